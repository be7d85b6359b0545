//! Input shapes consumed by every generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokenkit_core::{ComponentId, Token, slugify};

pub const DEFAULT_PACKAGE_NAME: &str = "@yourorg/design-system";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_LICENSE: &str = "MIT";

/// A single component prop as documented in generated files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProp {
    pub name: String,
    #[serde(rename = "type", default = "any_type")]
    pub prop_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn any_type() -> String {
    "any".to_string()
}

impl ComponentProp {
    pub fn new(name: impl Into<String>, prop_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prop_type: prop_type.into(),
            required: false,
            default_value: None,
            description: None,
        }
    }
}

/// Component view used by the AI-assistant generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub props: Vec<ComponentProp>,
    #[serde(default)]
    pub linked_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    #[default]
    Draft,
    Approved,
    Published,
    Archived,
}

/// A curated component with generated JSX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportableComponent {
    pub id: ComponentId,
    pub name: String,
    pub slug: String,
    #[serde(default, alias = "jsx_code")]
    pub jsx_code: String,
    #[serde(default)]
    pub props: Vec<ComponentProp>,
    #[serde(default)]
    pub status: ComponentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, alias = "linked_tokens")]
    pub linked_tokens: Vec<String>,
}

impl ExportableComponent {
    pub fn new(name: impl Into<String>, jsx_code: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ComponentId::generate(),
            slug: slugify(&name),
            name,
            jsx_code: jsx_code.into(),
            props: Vec::new(),
            status: ComponentStatus::Draft,
            description: None,
            category: None,
            linked_tokens: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ComponentStatus) -> Self {
        self.status = status;
        self
    }

    /// Published and carrying non-blank code.
    pub fn is_publishable(&self) -> bool {
        self.status == ComponentStatus::Published && !self.jsx_code.trim().is_empty()
    }

    /// PascalCase identifier used for directories and exports (`primary button` → `PrimaryButton`).
    pub fn export_name(&self) -> String {
        let source = if self.name.trim().is_empty() { self.slug.as_str() } else { self.name.as_str() };
        let pascal: String = source
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();
        match pascal.chars().next() {
            Some(c) if c.is_ascii_digit() => format!("Component{pascal}"),
            Some(_) => pascal,
            None => "Component".to_string(),
        }
    }

    pub fn to_component_data(&self) -> ComponentData {
        ComponentData {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            props: self.props.clone(),
            linked_tokens: self.linked_tokens.clone(),
            code: (!self.jsx_code.trim().is_empty()).then(|| self.jsx_code.clone()),
        }
    }
}

/// Keep only publishable components, in input order.
pub fn publishable(components: &[ExportableComponent]) -> Vec<&ExportableComponent> {
    components.iter().filter(|c| c.is_publishable()).collect()
}

/// User-editable npm package settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    pub package_name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: None,
            license: Some(DEFAULT_LICENSE.to_string()),
        }
    }
}

impl PackageConfig {
    pub fn new(package_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { package_name: package_name.into(), version: version.into(), ..Default::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn license_or_default(&self) -> &str {
        self.license.as_deref().filter(|l| !l.trim().is_empty()).unwrap_or(DEFAULT_LICENSE)
    }

    pub fn description_or_default(&self) -> String {
        self.description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{} design system", self.package_name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub package_name: String,
    pub version: String,
    pub exported_at: DateTime<Utc>,
}

impl Default for ExportMetadata {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            exported_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// The single input every generator consumes. Built per export request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub components: Vec<ComponentData>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub metadata: ExportMetadata,
}

impl ExportBundle {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, ..Default::default() }
    }

    pub fn with_components(mut self, components: Vec<ComponentData>) -> Self {
        self.components = components;
        self
    }

    pub fn with_themes(mut self, themes: Vec<String>) -> Self {
        self.themes = themes;
        self
    }

    pub fn with_metadata(mut self, metadata: ExportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Build a bundle from a package config, stamping the export time.
    pub fn for_package(config: &PackageConfig, tokens: Vec<Token>, exported_at: DateTime<Utc>) -> Self {
        Self::new(tokens).with_metadata(ExportMetadata {
            package_name: config.package_name.clone(),
            version: config.version.clone(),
            exported_at,
        })
    }
}

/// Per-call generator options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Timestamp written into headers; `None` means "now".
    pub generated_at: Option<DateTime<Utc>>,
    /// Scope CSS output to `.{theme_class}` instead of `:root`.
    pub theme_class: Option<String>,
    /// Attach `$extensions` metadata to DTCG leaves.
    pub include_extensions: bool,
}

impl GenerateOptions {
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at: Some(generated_at), ..Default::default() }
    }

    pub fn with_theme_class(mut self, theme_class: impl Into<String>) -> Self {
        self.theme_class = Some(theme_class.into());
        self
    }

    pub fn with_extensions(mut self) -> Self {
        self.include_extensions = true;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now)
    }
}
