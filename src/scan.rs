//! Content discovery and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the content directory to discover
//! markdown pages, resolves their metadata, and assembles the sidebar
//! navigation, producing a structured manifest that rendering and search
//! consume.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                            # Content root
//! ├── index.md                     # → /
//! ├── changelog.md                 # → /changelog
//! ├── guides/
//! │   ├── index.md                 # → /guides
//! │   ├── getting-started.md       # → /guides/getting-started
//! │   └── deployment.md            # → /guides/deployment
//! ├── reference/
//! │   └── cli.md                   # → /reference/cli
//! └── assets/                      # Static files, copied verbatim
//!     └── logo.svg
//! ```
//!
//! URL paths are derived from file paths: each segment is slugified, the
//! extension is dropped, and `index` maps to its directory. `.md` and
//! `.mdx` files are both treated as markdown.
//!
//! ## Navigation
//!
//! Sidebar groups come from frontmatter `group` keys. Pages without a group
//! form the default group at the top of the sidebar. Within a group, pages
//! sort by frontmatter `order` (missing sorts last), then title. Groups
//! sort by `nav.group_order` from the config when named there, then by the
//! minimum `order` of their members, then by name. Pages with
//! `hidden: true` are rendered but appear in neither navigation nor search.
//!
//! ## Validation
//!
//! Two source files that map to the same URL (e.g. `a.md` and `a/index.md`)
//! are a scan error naming both files.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontmatterError};
use crate::slug::slugify;
use crate::types::{NavEntry, NavGroup, Page};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("content directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        source: FrontmatterError,
    },
    #[error("URL '{url}' produced by both {first} and {second}")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub navigation: Vec<NavGroup>,
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

/// Directory inside the content root whose files are copied verbatim to
/// the output root instead of being scanned as pages.
pub const ASSETS_DIR: &str = "assets";

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Scan the content directory into a [`Manifest`].
pub fn scan(source: &Path, config: &SiteConfig) -> Result<Manifest, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::MissingSource(source.to_path_buf()));
    }

    let mut pages = Vec::new();
    let mut seen: BTreeMap<String, String> = BTreeMap::new();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(source)
            .expect("walked path is under source")
            .to_path_buf();
        if is_skipped(&rel) {
            continue;
        }

        let page = load_page(entry.path(), &rel)?;
        if let Some(first) = seen.get(&page.url) {
            return Err(ScanError::DuplicateUrl {
                url: page.url,
                first: first.clone(),
                second: page.source_path,
            });
        }
        seen.insert(page.url.clone(), page.source_path.clone());
        pages.push(page);
    }

    pages.sort_by(|a, b| a.url.cmp(&b.url));

    let navigation = build_navigation(&pages, config);

    Ok(Manifest {
        navigation,
        pages,
        config: config.clone(),
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

/// Skip hidden files/directories and the static assets tree.
fn is_skipped(rel: &Path) -> bool {
    rel.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name.starts_with('.') || name == ASSETS_DIR
    })
}

fn load_page(path: &Path, rel: &Path) -> Result<Page, ScanError> {
    let source_path = rel.to_string_lossy().replace('\\', "/");
    let content = fs::read_to_string(path)?;
    let (fm, body) = frontmatter::parse(&content).map_err(|source| ScanError::Frontmatter {
        path: source_path.clone(),
        source,
    })?;

    let url = url_for(rel);
    let title = resolve_title(&fm.title, body, rel);

    Ok(Page::from_parts(
        url,
        source_path,
        title,
        fm,
        body.to_string(),
    ))
}

/// Derive the site-absolute URL for a content file.
///
/// Each path segment is slugified; the extension is dropped; an `index`
/// stem maps to its directory:
///
/// - `index.md` → `/`
/// - `guides/Getting Started.md` → `/guides/getting-started`
/// - `guides/index.md` → `/guides`
pub fn url_for(rel: &Path) -> String {
    let mut segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    if let Some(last) = segments.last_mut() {
        let stem = Path::new(last.as_str())
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| last.clone());
        *last = stem;
    }
    if segments.last().map(String::as_str) == Some("index") {
        segments.pop();
    }

    let slugged: Vec<String> = segments.iter().map(|s| slugify(s)).collect();
    format!("/{}", slugged.join("/"))
        .trim_end_matches('/')
        .to_string()
        + if slugged.is_empty() { "/" } else { "" }
}

/// Resolve a page title: frontmatter → first `# heading` → filename stem.
fn resolve_title(fm_title: &Option<String>, body: &str, rel: &Path) -> String {
    if let Some(title) = fm_title {
        return title.clone();
    }
    if let Some(heading) = body
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim())
        .filter(|t| !t.is_empty())
    {
        return heading.to_string();
    }
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    title_from_stem(&stem)
}

/// Turn a filename stem into a display title: `getting-started` → "Getting Started".
fn title_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assemble sidebar groups from the non-hidden pages.
fn build_navigation(pages: &[Page], config: &SiteConfig) -> Vec<NavGroup> {
    // Group name → member pages, preserving the page sort from scan.
    let mut groups: BTreeMap<Option<String>, Vec<&Page>> = BTreeMap::new();
    for page in pages.iter().filter(|p| !p.hidden) {
        groups.entry(page.group.clone()).or_default().push(page);
    }

    let mut named: Vec<(String, Vec<&Page>)> = Vec::new();
    let mut default_group: Option<Vec<&Page>> = None;
    for (name, members) in groups {
        match name {
            Some(name) => named.push((name, members)),
            None => default_group = Some(members),
        }
    }

    // Named groups: config ordering wins, then minimum member order, then name.
    let configured = &config.nav.group_order;
    named.sort_by_key(|(name, members)| {
        let configured_pos = configured
            .iter()
            .position(|n| n == name)
            .unwrap_or(usize::MAX);
        let min_order = members
            .iter()
            .filter_map(|p| p.order)
            .min()
            .unwrap_or(u32::MAX);
        (configured_pos, min_order, name.clone())
    });

    let mut navigation = Vec::new();
    if let Some(members) = default_group {
        navigation.push(nav_group(None, members));
    }
    for (name, members) in named {
        navigation.push(nav_group(Some(name), members));
    }
    navigation
}

fn nav_group(name: Option<String>, mut members: Vec<&Page>) -> NavGroup {
    members.sort_by_key(|p| p.nav_sort_key());
    let icon = members.iter().find_map(|p| p.icon.clone());
    NavGroup {
        name,
        icon,
        entries: members
            .iter()
            .map(|p| NavEntry {
                title: p.title.clone(),
                url: p.url.clone(),
                icon: p.icon.clone(),
            })
            .collect(),
    }
}
