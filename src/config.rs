//! Site configuration module.
//!
//! Handles loading, validating, and merging `mdpress.toml`. Stock defaults
//! are the base layer; the user file is merged key-by-key on top, so config
//! files stay sparse — override just the values you want:
//!
//! ```toml
//! [site]
//! name = "Acme Docs"
//!
//! [colors.dark]
//! background = "#0b0e14"
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Sections
//!
//! | Section | Controls |
//! |---------|----------|
//! | `[site]` | Site name, description, base URL prefix |
//! | `[nav]` | Sidebar group ordering overrides |
//! | `[search]` | Search index toggle and body size bound |
//! | `[rail]` | Right-rail TOC and "ask an LLM" links |
//! | `[markdown]` | Syntax highlight theme |
//! | `[colors.light]` / `[colors.dark]` | Color schemes, emitted as CSS custom properties |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `mdpress.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity (name, description, base URL).
    pub site: SiteSection,
    /// Sidebar navigation settings.
    pub nav: NavConfig,
    /// Search index settings.
    pub search: SearchConfig,
    /// Right-rail settings (TOC, LLM links).
    pub rail: RailConfig,
    /// Markdown rendering settings.
    pub markdown: MarkdownConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        let valid_base = base.is_empty()
            || base.starts_with('/')
            || base.starts_with("http://")
            || base.starts_with("https://");
        if !valid_base {
            return Err(ConfigError::Validation(
                "site.base_url must be empty, a path starting with '/', or an http(s) URL".into(),
            ));
        }
        if base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        if self.search.body_limit == 0 {
            return Err(ConfigError::Validation(
                "search.body_limit must be non-zero".into(),
            ));
        }
        for link in &self.rail.llm_links {
            if !link.url_template.contains("{url}") {
                return Err(ConfigError::Validation(format!(
                    "rail link '{}' is missing the {{url}} placeholder",
                    link.label
                )));
            }
        }
        Ok(())
    }
}

/// Site identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site name, shown in the header and page titles.
    pub name: String,
    /// Short site description, used in meta tags.
    pub description: String,
    /// URL prefix for all generated links: empty for root hosting, a path
    /// (`/docs`) when hosted under a subpath, or a full `https://` URL when
    /// absolute links are wanted (required for working LLM links).
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Documentation".to_string(),
            description: String::new(),
            base_url: String::new(),
        }
    }
}

/// Sidebar navigation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Explicit group ordering. Groups named here appear first, in this
    /// order; remaining groups follow in their discovered order.
    pub group_order: Vec<String>,
}

/// Search index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Build the search index and show the search box.
    pub enabled: bool,
    /// Maximum characters of page body stored per search document.
    pub body_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            body_limit: 5000,
        }
    }
}

/// Right-rail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RailConfig {
    /// Show the per-page table of contents.
    pub toc: bool,
    /// "Ask an LLM" links rendered under the TOC. Each `url_template`
    /// must contain a `{url}` placeholder, replaced with the page URL.
    pub llm_links: Vec<LlmLink>,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            toc: true,
            llm_links: Vec::new(),
        }
    }
}

/// One "ask an LLM" link in the right rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmLink {
    /// Link label, e.g. "Ask ChatGPT".
    pub label: String,
    /// URL with a `{url}` placeholder for the page address.
    pub url_template: String,
}

/// Markdown rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Syntect theme used for fenced code blocks.
    pub highlight_theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight_theme: "InspiredGitHub".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Sidebar and right-rail background color.
    pub sidebar_background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (nav groups, TOC, footer).
    pub text_muted: String,
    /// Border and divider color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Link hover color.
    pub link_hover: String,
    /// Accent color (active nav entry, search highlight).
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            sidebar_background: "#fafafa".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e4e4e4".to_string(),
            link: "#2456d6".to_string(),
            link_hover: "#10307f".to_string(),
            accent: "#2456d6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#101214".to_string(),
            sidebar_background: "#16181c".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2c2f33".to_string(),
            link: "#7aa2ff".to_string(),
            link_hover: "#a9c2ff".to_string(),
            accent: "#7aa2ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize
/// and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `mdpress.toml` file path.
///
/// A missing file yields the stock defaults — a fresh project works with no
/// config at all. A file that exists but fails to parse or validate is an
/// error.
pub fn load_config(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = if config_path.exists() {
        let content = fs::read_to_string(config_path)?;
        Some(toml::from_str(&content)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `mdpress.toml` with all keys documented.
///
/// Used by the `gen-config` CLI command and the `init` scaffolder.
pub fn stock_config_toml() -> &'static str {
    r##"# mdpress configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

[site]
# Site name, shown in the header and page titles.
name = "Documentation"

# Short description, used in meta tags.
description = ""

# URL prefix for all generated links. Leave empty when hosting at the
# domain root; set a path ("/docs") when hosting under a subpath, or a
# full URL ("https://docs.example.com") for absolute links — required
# for the rail's LLM links to point at the published site.
base_url = ""

# ---------------------------------------------------------------------------
# Sidebar navigation
# ---------------------------------------------------------------------------
[nav]
# Explicit group ordering. Groups named here appear first, in this order;
# remaining groups follow in discovered order.
group_order = []

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Build the search index and show the search box.
enabled = true

# Maximum characters of page body stored per search document.
body_limit = 5000

# ---------------------------------------------------------------------------
# Right rail (table of contents column)
# ---------------------------------------------------------------------------
[rail]
# Show the per-page table of contents.
toc = true

# "Ask an LLM" links rendered under the TOC. {url} is replaced with the
# page address. Example:
#
#   [[rail.llm_links]]
#   label = "Ask ChatGPT"
#   url_template = "https://chatgpt.com/?q=Read%20{url}%20and%20answer%20my%20questions"

# ---------------------------------------------------------------------------
# Markdown
# ---------------------------------------------------------------------------
[markdown]
# Syntax highlight theme for fenced code blocks. One of: InspiredGitHub,
# Solarized (light), Solarized (dark), base16-ocean.light, base16-ocean.dark,
# base16-eighties.dark, base16-mocha.dark.
highlight_theme = "InspiredGitHub"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
sidebar_background = "#fafafa"
text = "#1a1a1a"
text_muted = "#666666"    # Nav groups, TOC, footer
border = "#e4e4e4"
link = "#2456d6"
link_hover = "#10307f"
accent = "#2456d6"        # Active nav entry, search highlight

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#101214"
sidebar_background = "#16181c"
text = "#e8e8e8"
text_muted = "#9a9a9a"
border = "#2c2f33"
link = "#7aa2ff"
link_hover = "#a9c2ff"
accent = "#7aa2ff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn scheme_vars(scheme: &ColorScheme) -> String {
        format!(
            "    --color-bg: {};\n    --color-sidebar-bg: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-border: {};\n    --color-link: {};\n    --color-link-hover: {};\n    --color-accent: {};",
            scheme.background,
            scheme.sidebar_background,
            scheme.text,
            scheme.text_muted,
            scheme.border,
            scheme.link,
            scheme.link_hover,
            scheme.accent,
        )
    }

    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        scheme_vars(&colors.light),
        scheme_vars(&colors.dark)
    )
}
