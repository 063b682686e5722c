//! Shared types used across pipeline stages.
//!
//! These types are serialized into the site manifest (`mdpress scan`) and
//! flow from content discovery through rendering, so they live in one place
//! rather than being redeclared per stage.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// A documentation page discovered from a markdown file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Site-absolute URL path (`/`, `/guides/getting-started`).
    pub url: String,
    /// Source path relative to the content root.
    pub source_path: String,
    /// Resolved title: frontmatter → first `# heading` → filename.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Sidebar group from frontmatter. `None` lands in the default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Sort position within the group (missing sorts last).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Rendered but excluded from navigation and search.
    #[serde(default)]
    pub hidden: bool,
    /// Markdown body with frontmatter stripped.
    pub body: String,
}

impl Page {
    /// Sort key within a nav group: explicit order first, then title.
    pub fn nav_sort_key(&self) -> (u32, String) {
        (self.order.unwrap_or(u32::MAX), self.title.to_lowercase())
    }

    pub(crate) fn from_parts(
        url: String,
        source_path: String,
        title: String,
        fm: Frontmatter,
        body: String,
    ) -> Self {
        Self {
            url,
            source_path,
            title,
            description: fm.description,
            icon: fm.icon,
            group: fm.group,
            order: fm.order,
            hidden: fm.hidden,
            body,
        }
    }
}

/// A sidebar navigation group: a heading plus its ordered page links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavGroup {
    /// Group heading. `None` is the default group, shown without a heading
    /// at the top of the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub entries: Vec<NavEntry>,
}

/// A single sidebar link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavEntry {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
