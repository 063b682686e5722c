//! YAML frontmatter parsing.
//!
//! Content files may open with a YAML metadata block delimited by `---`
//! fences:
//!
//! ```text
//! ---
//! title: Getting Started
//! group: Guides
//! order: 1
//! ---
//!
//! # Getting Started
//! ...
//! ```
//!
//! [`parse`] splits the block from the markdown body and deserializes it
//! into a typed [`Frontmatter`]. Files without a block get default (empty)
//! frontmatter and the whole file as body. A block that is present but is
//! not valid YAML is an error — silently dropping author metadata hides
//! typos until pages go missing from navigation.
//!
//! ## Recognized keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `title` | Page title (overrides the first `# heading`) |
//! | `description` | Short summary, shown in search results and meta tags |
//! | `icon` | Icon name displayed next to the nav entry |
//! | `group` | Sidebar group this page belongs to |
//! | `order` | Sort position within the group (missing sorts last) |
//! | `hidden` | Render the page but keep it out of nav and search |
//!
//! Unknown keys are rejected to catch typos early, matching the config
//! loader's behavior.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Typed page metadata from the YAML frontmatter block.
///
/// Every field is optional; an absent block is equivalent to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub group: Option<String>,
    pub order: Option<u32>,
    pub hidden: bool,
}

/// Frontmatter fence matcher, anchored at the start of the file.
///
/// Group 1 is the YAML block, group 2 the remaining body. The closing
/// `---` must sit on its own line; an unterminated opening fence means
/// the file has no frontmatter at all.
fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")
            .expect("frontmatter regex must compile")
    })
}

/// Split a content file into frontmatter and markdown body.
///
/// A UTF-8 BOM before the opening fence is tolerated (some Windows editors
/// insert one).
pub fn parse(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    match fence_regex().captures(content) {
        Some(caps) => {
            let yaml = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let fm = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            Ok((fm, body))
        }
        None => Ok((Frontmatter::default(), content)),
    }
}
