use serde_json::json;
use std::io::{Cursor, Read};
use std::path::Path;
use tokenkit_cli::cli::{ExportArgs, PackageArgs};
use tokenkit_cli::commands::{export, figma, migrate, package};
use tokenkit_cli::config::FileConfig;
use tokenkit_export::PackageConfig;
use tokenkit_sync::{FileTokenStore, SyncStatus, TokenStore};

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

const LIGHT: &str = r##"{
    "color": { "bg": { "base": { "$type": "color", "$value": "#FFFFFF" } } },
    "spacing": { "sm": { "$type": "number", "$value": 4 } }
}"##;

#[tokio::test]
async fn migrate_dry_run_leaves_store_untouched() {
    let input = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();
    write(input.path(), "light_tokens.json", LIGHT);
    write(input.path(), "broken.json", "{ nope");
    write(input.path(), "notes.txt", "ignored");

    let report = migrate::migrate(input.path(), store_dir.path(), true).await.unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.count(SyncStatus::Error), 1);
    assert_eq!(report.count(SyncStatus::Success), 1);
    assert!(!store_dir.path().join("themes").exists());
}

#[tokio::test]
async fn migrate_syncs_into_file_store() {
    let input = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();
    write(input.path(), "light_tokens.json", LIGHT);
    write(input.path(), "empty_tokens.json", "{}");

    let report = migrate::migrate(input.path(), store_dir.path(), false).await.unwrap();
    let statuses: Vec<_> = report.entries.iter().map(|e| (e.file.as_str(), e.status)).collect();
    assert_eq!(statuses, vec![("empty_tokens.json", SyncStatus::Skipped), ("light_tokens.json", SyncStatus::Success)]);

    let store = FileTokenStore::open(store_dir.path()).await.unwrap();
    let theme = store.get_theme("light").await.unwrap().unwrap();
    assert_eq!(theme.source.as_deref(), Some(migrate::MIGRATION_SOURCE));
    assert_eq!(store.list_tokens(&theme.id).await.unwrap().len(), 2);
}

#[test]
fn package_archive_contains_publishable_components_only() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "light_tokens.json", LIGHT);
    let components = json!([
        { "id": "c1", "name": "Button", "slug": "button", "jsxCode": "export default () => null;", "status": "published" },
        { "id": "c2", "name": "Card", "slug": "card", "jsx_code": "export default () => null;", "status": "draft" },
        { "id": "c3", "name": "Empty", "slug": "empty", "jsxCode": "", "status": "published" }
    ]);
    write(dir.path(), "components.json", &components.to_string());

    let args = PackageArgs {
        files: vec![dir.path().join("light_tokens.json")],
        components: dir.path().join("components.json"),
        out_dir: dir.path().join("out"),
        name: None,
        pkg_version: None,
        unpacked: false,
    };
    let config = PackageConfig::new("@acme/ui", "2.0.0");
    let bundle = package::build(&args, &config).unwrap();
    let path = package::write(&bundle, &args.out_dir, false).unwrap();
    assert!(path.ends_with("acme-ui-2.0.0.zip"));

    let mut archive = zip_entries(&path);
    archive.sort();
    assert!(archive.contains(&"dist/components/Button/Button.jsx".to_string()));
    assert!(!archive.iter().any(|p| p.contains("Card") || p.contains("Empty")));

    let unpacked = package::write(&bundle, &args.out_dir, true).unwrap();
    let css = std::fs::read_to_string(unpacked.join("dist/tokens.css")).unwrap();
    assert!(css.contains("--spacing-sm: 4px;"));
}

#[test]
fn export_uses_configured_package_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "light_tokens.json", LIGHT);
    write(dir.path(), "tokenkit.toml", "[package]\nname = \"@acme/ui\"\nversion = \"2.0.0\"\n");
    let config = FileConfig::load(&dir.path().join("tokenkit.toml")).unwrap();

    let out = dir.path().join("out/pack.zip");
    let args = ExportArgs {
        files: vec![dir.path().join("light_tokens.json")],
        format: vec!["ai-bundle".into()],
        out: Some(out.clone()),
        theme_class: None,
        extensions: false,
    };
    export::run(args, config.package(None, None)).unwrap();

    let readme = zip_file(&out, "README.md");
    assert!(readme.starts_with("# @acme/ui AI Context Pack"), "{readme}");
    assert!(!readme.contains("1970-01-01"));
    let mcp = zip_file(&out, "design-system.json");
    assert!(mcp.contains("\"@acme/ui\""));
}

fn zip_file(path: &Path, name: &str) -> String {
    let bytes = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

fn zip_entries(path: &Path) -> Vec<String> {
    let mut bytes = Vec::new();
    std::fs::File::open(path).unwrap().read_to_end(&mut bytes).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(String::from).collect()
}

#[tokio::test]
async fn figma_export_feeds_migration() {
    let dir = tempfile::tempdir().unwrap();
    let document = json!({
        "collections": [{
            "id": "c1",
            "name": "Theme",
            "modes": [{ "modeId": "1:0", "name": "Light" }, { "modeId": "1:1", "name": "Dark" }],
            "variableIds": ["v1", "v2"]
        }],
        "variables": [
            {
                "id": "v1",
                "name": "color/bg/base",
                "resolvedType": "COLOR",
                "valuesByMode": {
                    "1:0": { "r": 1, "g": 0.337, "b": 0.2, "a": 1 },
                    "1:1": { "r": 0, "g": 0, "b": 0, "a": 1 }
                }
            },
            {
                "id": "v2",
                "name": "spacing/md",
                "resolvedType": "FLOAT",
                "valuesByMode": { "1:0": 16, "1:1": 16 }
            }
        ]
    });
    write(dir.path(), "variables.json", &document.to_string());

    let exports = figma::read_document(&dir.path().join("variables.json")).unwrap().export();
    let modes_dir = dir.path().join("modes");
    let written = figma::write_modes(&exports, &modes_dir).unwrap();
    assert_eq!(written.len(), 2);
    assert!(modes_dir.join("Light_tokens.json").is_file());

    let store_dir = dir.path().join("store");
    migrate::migrate(&modes_dir, &store_dir, false).await.unwrap();

    let store = FileTokenStore::open(&store_dir).await.unwrap();
    let light = store.get_theme("light").await.unwrap().unwrap();
    let tokens = store.list_tokens(&light.id).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].css_var, "--color-bg-base");
    assert_eq!(tokens[0].value.display(), "#FF5633");
}
