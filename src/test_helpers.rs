//! Shared test utilities for the mdpress test suite.
//!
//! Provides a sample documentation tree builder, manifest lookup helpers,
//! and navigation assertions used across the scan, search, and generate
//! tests.

use std::fs;
use std::path::Path;

pub use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::scan::{self, Manifest};
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a content file under `dir`, creating parent directories.
pub fn write_page(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Build a small but representative docs tree in a temp directory:
///
/// ```text
/// ├── index.md                  → /            (default group)
/// ├── internal.md               → /internal    (hidden)
/// ├── guides/
/// │   ├── index.md              → /guides      (hidden overview)
/// │   ├── getting-started.md    → /guides/getting-started  (Guides, order 1)
/// │   └── deployment.md         → /guides/deployment       (Guides, order 2)
/// ├── reference/
/// │   └── cli.md                → /reference/cli           (Reference)
/// └── assets/
///     └── logo.svg
/// ```
pub fn sample_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_page(
        root,
        "index.md",
        "---\ntitle: Home\ndescription: Welcome to the docs\n---\n\n# Welcome\n\nStart with the [guides](/guides/getting-started).\n",
    );
    write_page(
        root,
        "internal.md",
        "---\ntitle: Internal\nhidden: true\n---\n\nNot linked anywhere.\n",
    );
    write_page(
        root,
        "guides/index.md",
        "---\ntitle: Guides Overview\nhidden: true\n---\n\nAll guides.\n",
    );
    write_page(
        root,
        "guides/getting-started.md",
        "---\ntitle: Getting Started\ndescription: Install and run\ngroup: Guides\norder: 1\nicon: rocket\n---\n\n# Getting Started\n\n## Install\n\nRun the installer.\n\n## First Build\n\n```sh\nmdpress build\n```\n",
    );
    write_page(
        root,
        "guides/deployment.md",
        "---\ntitle: Deployment\ngroup: Guides\norder: 2\n---\n\n# Deployment\n\nShip the `dist/` directory.\n",
    );
    write_page(
        root,
        "reference/cli.md",
        "---\ntitle: CLI\ngroup: Reference\norder: 1\n---\n\n# CLI\n\nEvery command documented.\n",
    );
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/logo.svg"), "<svg></svg>").unwrap();

    tmp
}

/// Scan the sample site with default config.
pub fn scan_sample(tmp: &TempDir) -> Manifest {
    scan::scan(tmp.path(), &SiteConfig::default()).unwrap()
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a page by URL. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, url: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.url == url)
        .unwrap_or_else(|| {
            let urls: Vec<&str> = manifest.pages.iter().map(|p| p.url.as_str()).collect();
            panic!("page '{url}' not found. Available: {urls:?}")
        })
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Entry titles of a nav group, looked up by name. Panics if missing.
pub fn nav_entry_titles<'a>(manifest: &'a Manifest, name: Option<&str>) -> Vec<&'a str> {
    manifest
        .navigation
        .iter()
        .find(|g| g.name.as_deref() == name)
        .map(|g| g.entries.iter().map(|e| e.title.as_str()).collect())
        .unwrap_or_else(|| {
            let names: Vec<Option<&str>> = manifest
                .navigation
                .iter()
                .map(|g| g.name.as_deref())
                .collect();
            panic!("nav group {name:?} not found. Available: {names:?}")
        })
}

/// Assert that the sidebar matches an expected shape.
///
/// Each entry is `(group name, entry titles)`; `None` is the default group.
pub fn assert_nav_shape(manifest: &Manifest, expected: &[(Option<&str>, &[&str])]) {
    let actual_names: Vec<Option<&str>> = manifest
        .navigation
        .iter()
        .map(|g| g.name.as_deref())
        .collect();
    let expected_names: Vec<Option<&str>> = expected.iter().map(|(n, _)| *n).collect();
    assert_eq!(actual_names, expected_names, "nav group names mismatch");

    for (name, titles) in expected {
        let actual_titles = nav_entry_titles(manifest, *name);
        assert_eq!(
            actual_titles,
            titles.to_vec(),
            "nav entries of group {name:?} mismatch"
        );
    }
}
