//! npm component package files.
//!
//! Unlike the single-artifact generators this produces a file set; only
//! publishable components are included.

use serde_json::json;

use crate::model::{ExportableComponent, PackageConfig};
use crate::sections::or_missing;
use crate::templates::{NPM_README, render_or_placeholder};

pub const COMPONENTS_DIR: &str = "dist/components";

pub fn package_json(config: &PackageConfig) -> String {
    let manifest = json!({
        "name": config.package_name,
        "version": config.version,
        "description": config.description_or_default(),
        "license": config.license_or_default(),
        "main": format!("{COMPONENTS_DIR}/index.js"),
        "style": "dist/tokens.css",
        "files": ["dist", "README.md", "LLMS.txt"],
        "peerDependencies": {
            "react": ">=17.0.0",
            "react-dom": ">=17.0.0",
        },
    });
    serde_json::to_string_pretty(&manifest).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

/// README listing only publishable components.
pub fn package_readme(config: &PackageConfig, components: &[&ExportableComponent]) -> String {
    let rows: Vec<_> = components
        .iter()
        .filter(|c| c.is_publishable())
        .map(|c| {
            json!({
                "name": c.name,
                "export_name": c.export_name(),
                "description": or_missing(c.description.as_deref()),
            })
        })
        .collect();
    let data = json!({
        "package_name": config.package_name,
        "description": config.description_or_default(),
        "license": config.license_or_default(),
        "components": rows,
    });
    render_or_placeholder("README.md", NPM_README, &data)
}

/// `(path, content)` pairs for one component: the JSX module and its re-export.
pub fn component_files(component: &ExportableComponent) -> [(String, String); 2] {
    let name = component.export_name();
    let mut code = component.jsx_code.trim_end().to_string();
    code.push('\n');
    [
        (format!("{COMPONENTS_DIR}/{name}/{name}.jsx"), code),
        (
            format!("{COMPONENTS_DIR}/{name}/index.js"),
            format!("export {{ default }} from './{name}';\nexport * from './{name}';\n"),
        ),
    ]
}

/// Aggregate `dist/components/index.js`.
pub fn barrel(components: &[&ExportableComponent]) -> String {
    let mut out = String::new();
    for component in components.iter().filter(|c| c.is_publishable()) {
        let name = component.export_name();
        out.push_str(&format!("export {{ default as {name} }} from './{name}';\n"));
    }
    out
}
