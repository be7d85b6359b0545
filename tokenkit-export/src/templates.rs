//! Handlebars rendering for the markdown documents.
//!
//! Templates are plain text (markdown, JSON-ish snippets), so HTML escaping
//! is disabled.

use handlebars::Handlebars;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::Result;

static REGISTRY: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
});

/// Render an inline template against `data`.
pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String> {
    Ok(REGISTRY.render_template(template, data)?)
}

/// Render, logging failures and falling back to a placeholder document.
pub fn render_or_placeholder<T: Serialize>(name: &str, template: &str, data: &T) -> String {
    render(template, data).unwrap_or_else(|e| {
        tracing::error!(template = name, error = %e, "template rendering failed");
        format!("# {name}\n\nThis document could not be generated.\n")
    })
}

pub const NPM_README: &str = r#"# {{package_name}}

{{description}}

## Installation

```bash
npm install {{package_name}}
```

```js
import '{{package_name}}/dist/tokens.css';
```

## Components

{{#if components}}
| Component | Description | Import |
|-----------|-------------|--------|
{{#each components}}
| {{name}} | {{description}} | `import { {{export_name}} } from '{{../package_name}}';` |
{{/each}}
{{else}}
None
{{/if}}

## License

{{license}}
"#;

pub const AI_README: &str = r#"# {{package_name}} AI Context Pack

Version {{version}}, exported {{exported_at}}.

Drop these files into your project so AI coding assistants follow the design system.

| File | Used by |
|------|---------|
| `.cursor/rules/design-system.mdc` | Cursor |
| `CLAUDE.md` | Claude Code |
| `.claude/rules/tokens.md` | Claude Code |
| `project-knowledge.txt` | Claude Projects, ChatGPT, Bolt |
| `design-system.json` | MCP servers and tooling |

## Contents

- Themes: {{themes}}
- Tokens: {{token_count}}
- Components: {{component_count}}
"#;

pub const LLMS_TXT: &str = r#"# {{package_name}}

> Design system v{{version}}. Styling is expressed through CSS custom properties; use `var(--token)` references, never raw values.

## Themes

{{themes}}

{{#each categories}}
## {{label}} Tokens

{{#each tokens}}
- `{{css_var}}`: {{value}}{{#if description}} ({{description}}){{/if}}
{{/each}}

{{/each}}
## Components

{{#if components}}
{{#each components}}
### {{name}}

{{description}}

Props: {{props}}
Tokens: {{linked_tokens}}

{{/each}}
{{else}}
None
{{/if}}
"#;
