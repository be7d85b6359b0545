//! Format generators.
//!
//! Every generator is a pure function of an [`ExportBundle`] and
//! [`GenerateOptions`]. New formats are added by implementing [`Generator`]
//! and registering a variant in [`ExportFormat`].

mod claude;
mod css;
mod cursor;
mod dtcg;
mod knowledge;
mod llms;
mod mcp;
pub mod package;
mod readme;
mod scss;
mod tailwind;

pub use claude::{ClaudeMdGenerator, ClaudeTokensGenerator};
pub use css::CssGenerator;
pub use cursor::CursorRulesGenerator;
pub use dtcg::{DtcgGenerator, parse_dtcg};
pub use knowledge::ProjectKnowledgeGenerator;
pub use llms::LlmsGenerator;
pub use mcp::McpJsonGenerator;
pub use readme::AiReadmeGenerator;
pub use scss::ScssGenerator;
pub use tailwind::TailwindGenerator;

use serde::{Deserialize, Serialize};

use crate::model::{ExportBundle, GenerateOptions};

/// A single-artifact serializer.
pub trait Generator: Send + Sync {
    fn format(&self) -> ExportFormat;

    /// Path of the artifact inside a bundle.
    fn default_path(&self) -> &'static str {
        self.format().default_path()
    }

    fn content_type(&self) -> &'static str {
        self.format().content_type()
    }

    fn generate(&self, bundle: &ExportBundle, options: &GenerateOptions) -> String;
}

/// Every single-string output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Css,
    Scss,
    Tailwind,
    Dtcg,
    CursorRules,
    ClaudeMd,
    ClaudeTokens,
    ProjectKnowledge,
    McpJson,
    AiReadme,
    Llms,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 11] = [
        ExportFormat::Css,
        ExportFormat::Scss,
        ExportFormat::Tailwind,
        ExportFormat::Dtcg,
        ExportFormat::CursorRules,
        ExportFormat::ClaudeMd,
        ExportFormat::ClaudeTokens,
        ExportFormat::ProjectKnowledge,
        ExportFormat::McpJson,
        ExportFormat::AiReadme,
        ExportFormat::Llms,
    ];

    /// Files of the AI-assistant export archive, in archive order.
    pub const AI_EXPORT: [ExportFormat; 6] = [
        ExportFormat::CursorRules,
        ExportFormat::ClaudeMd,
        ExportFormat::ClaudeTokens,
        ExportFormat::ProjectKnowledge,
        ExportFormat::McpJson,
        ExportFormat::AiReadme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Dtcg => "dtcg",
            ExportFormat::CursorRules => "cursor-rules",
            ExportFormat::ClaudeMd => "claude-md",
            ExportFormat::ClaudeTokens => "claude-tokens",
            ExportFormat::ProjectKnowledge => "project-knowledge",
            ExportFormat::McpJson => "mcp-json",
            ExportFormat::AiReadme => "ai-readme",
            ExportFormat::Llms => "llms",
        }
    }

    /// Parse a format name, accepting a few common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "css" => Some(Self::Css),
            "scss" | "sass" => Some(Self::Scss),
            "tailwind" | "tailwind-config" => Some(Self::Tailwind),
            "dtcg" | "json" | "tokens-json" => Some(Self::Dtcg),
            "cursor-rules" | "cursor" => Some(Self::CursorRules),
            "claude-md" | "claude" => Some(Self::ClaudeMd),
            "claude-tokens" => Some(Self::ClaudeTokens),
            "project-knowledge" | "knowledge" => Some(Self::ProjectKnowledge),
            "mcp-json" | "mcp" => Some(Self::McpJson),
            "ai-readme" | "readme" => Some(Self::AiReadme),
            "llms" | "llms-txt" | "llms.txt" => Some(Self::Llms),
            _ => None,
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            ExportFormat::Css => "tokens.css",
            ExportFormat::Scss => "_tokens.scss",
            ExportFormat::Tailwind => "tailwind.config.js",
            ExportFormat::Dtcg => "tokens.json",
            ExportFormat::CursorRules => ".cursor/rules/design-system.mdc",
            ExportFormat::ClaudeMd => "CLAUDE.md",
            ExportFormat::ClaudeTokens => ".claude/rules/tokens.md",
            ExportFormat::ProjectKnowledge => "project-knowledge.txt",
            ExportFormat::McpJson => "design-system.json",
            ExportFormat::AiReadme => "README.md",
            ExportFormat::Llms => "LLMS.txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Css => "text/css; charset=utf-8",
            ExportFormat::Scss => "text/x-scss; charset=utf-8",
            ExportFormat::Tailwind => "text/javascript; charset=utf-8",
            ExportFormat::Dtcg | ExportFormat::McpJson => "application/json",
            ExportFormat::CursorRules
            | ExportFormat::ClaudeMd
            | ExportFormat::ClaudeTokens
            | ExportFormat::AiReadme => "text/markdown; charset=utf-8",
            ExportFormat::ProjectKnowledge | ExportFormat::Llms => "text/plain; charset=utf-8",
        }
    }

    pub fn generator(&self) -> Box<dyn Generator> {
        match self {
            ExportFormat::Css => Box::new(CssGenerator),
            ExportFormat::Scss => Box::new(ScssGenerator),
            ExportFormat::Tailwind => Box::new(TailwindGenerator),
            ExportFormat::Dtcg => Box::new(DtcgGenerator),
            ExportFormat::CursorRules => Box::new(CursorRulesGenerator),
            ExportFormat::ClaudeMd => Box::new(ClaudeMdGenerator),
            ExportFormat::ClaudeTokens => Box::new(ClaudeTokensGenerator),
            ExportFormat::ProjectKnowledge => Box::new(ProjectKnowledgeGenerator),
            ExportFormat::McpJson => Box::new(McpJsonGenerator),
            ExportFormat::AiReadme => Box::new(AiReadmeGenerator),
            ExportFormat::Llms => Box::new(LlmsGenerator),
        }
    }

    /// Shorthand for `self.generator().generate(bundle, options)`.
    pub fn generate(&self, bundle: &ExportBundle, options: &GenerateOptions) -> String {
        self.generator().generate(bundle, options)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
            format!("unknown format '{s}' (expected one of: {})", known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_name(format.as_str()), Some(format));
            assert_eq!(format.generator().format(), format);
        }
        assert_eq!(ExportFormat::from_name("LLMS.txt"), Some(ExportFormat::Llms));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_ai_export_paths() {
        let paths: Vec<&str> = ExportFormat::AI_EXPORT.iter().map(|f| f.default_path()).collect();
        assert_eq!(
            paths,
            vec![
                ".cursor/rules/design-system.mdc",
                "CLAUDE.md",
                ".claude/rules/tokens.md",
                "project-knowledge.txt",
                "design-system.json",
                "README.md",
            ]
        );
    }
}
