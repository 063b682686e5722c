//! Project scaffolding: `init`, `client`, and `deploy` file generation.
//!
//! All three commands are thin file writers. They never touch the network
//! and they refuse to overwrite anything a user may have edited:
//!
//! - `init` refuses to run where an `mdpress.toml` already exists.
//! - `client` refuses to eject over an existing `client/` directory.
//! - `deploy` writes fresh config for the chosen hosting target and skips
//!   files that are already present.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config;
use crate::generate::CLIENT_FILES;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("already an mdpress project: {0} exists")]
    AlreadyInitialized(PathBuf),
    #[error("client assets already ejected: {0} exists")]
    ClientExists(PathBuf),
}

/// Supported deployment targets for `mdpress deploy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeployTarget {
    Netlify,
    Vercel,
    GithubPages,
}

// ============================================================================
// init
// ============================================================================

const STARTER_INDEX: &str = "\
---
title: Home
description: Documentation home
---

# Welcome

This site is built with mdpress. Edit the markdown files under `docs/`
and run `mdpress dev` to see changes live.
";

const STARTER_GUIDE: &str = "\
---
title: Getting Started
group: Guides
order: 1
---

# Getting Started

## Write content

Every markdown file under `docs/` becomes a page. Frontmatter controls
the title, sidebar group, and ordering.

## Run the dev server

```sh
mdpress dev
```

## Build for production

```sh
mdpress build
```
";

/// Scaffold a new project in `dir`: config, starter content, assets dir.
///
/// Returns the created paths, relative to `dir`.
pub fn init(dir: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
    let config_path = dir.join("mdpress.toml");
    if config_path.exists() {
        return Err(ScaffoldError::AlreadyInitialized(config_path));
    }

    let files: &[(&str, &str)] = &[
        ("mdpress.toml", config::stock_config_toml()),
        ("docs/index.md", STARTER_INDEX),
        ("docs/guides/getting-started.md", STARTER_GUIDE),
    ];

    let mut created = Vec::new();
    for (rel, content) in files {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        created.push(PathBuf::from(rel));
    }
    fs::create_dir_all(dir.join("docs/assets"))?;
    created.push(PathBuf::from("docs/assets"));

    Ok(created)
}

// ============================================================================
// client
// ============================================================================

/// Eject the embedded client assets into `client/` under `dir` so they can
/// be customized. Builds prefer ejected copies over the embedded ones.
pub fn eject_client(dir: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
    let client_dir = dir.join("client");
    if client_dir.exists() {
        return Err(ScaffoldError::ClientExists(client_dir));
    }
    fs::create_dir_all(&client_dir)?;

    let mut created = Vec::new();
    for (name, content) in CLIENT_FILES {
        fs::write(client_dir.join(name), content)?;
        created.push(PathBuf::from("client").join(name));
    }
    Ok(created)
}

// ============================================================================
// deploy
// ============================================================================

const NETLIFY_TOML: &str = "\
[build]
publish = \"dist\"
command = \"mdpress build\"
";

const NETLIFY_REDIRECTS: &str = "\
/*  /404.html  404
";

const VERCEL_JSON: &str = "\
{
  \"outputDirectory\": \"dist\",
  \"cleanUrls\": true,
  \"trailingSlash\": true
}
";

const GITHUB_PAGES_WORKFLOW: &str = "\
name: Deploy docs

on:
  push:
    branches: [main]

permissions:
  contents: read
  pages: write
  id-token: write

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Install mdpress
        run: cargo install mdpress
      - name: Build site
        run: |
          mdpress build
          touch dist/.nojekyll
      - uses: actions/upload-pages-artifact@v3
        with:
          path: dist
  deploy:
    needs: build
    runs-on: ubuntu-latest
    environment:
      name: github-pages
      url: ${{ steps.deployment.outputs.page_url }}
    steps:
      - id: deployment
        uses: actions/deploy-pages@v4
";

/// The files a deploy target generates: (relative path, content).
pub fn deploy_files(target: DeployTarget) -> Vec<(PathBuf, &'static str)> {
    match target {
        DeployTarget::Netlify => vec![
            (PathBuf::from("netlify.toml"), NETLIFY_TOML),
            (PathBuf::from("_redirects"), NETLIFY_REDIRECTS),
        ],
        DeployTarget::Vercel => vec![(PathBuf::from("vercel.json"), VERCEL_JSON)],
        DeployTarget::GithubPages => vec![(
            PathBuf::from(".github/workflows/deploy-docs.yml"),
            GITHUB_PAGES_WORKFLOW,
        )],
    }
}

/// Write deployment config for `target` into `dir`.
///
/// Returns `(created, skipped)` relative paths; existing files are left
/// untouched.
pub fn write_deploy(
    dir: &Path,
    target: DeployTarget,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>), ScaffoldError> {
    let mut created = Vec::new();
    let mut skipped = Vec::new();
    for (rel, content) in deploy_files(target) {
        let path = dir.join(&rel);
        if path.exists() {
            skipped.push(rel);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        created.push(rel);
    }
    Ok((created, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::scan;
    use tempfile::TempDir;

    #[test]
    fn init_creates_project_skeleton() {
        let tmp = TempDir::new().unwrap();
        let created = init(tmp.path()).unwrap();

        assert!(tmp.path().join("mdpress.toml").exists());
        assert!(tmp.path().join("docs/index.md").exists());
        assert!(tmp.path().join("docs/guides/getting-started.md").exists());
        assert!(tmp.path().join("docs/assets").is_dir());
        assert_eq!(created.len(), 4);
    }

    #[test]
    fn init_refuses_existing_project() {
        let tmp = TempDir::new().unwrap();
        init(tmp.path()).unwrap();
        let err = init(tmp.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyInitialized(_)));
    }

    #[test]
    fn initialized_project_scans_and_loads() {
        let tmp = TempDir::new().unwrap();
        init(tmp.path()).unwrap();

        let config = crate::config::load_config(&tmp.path().join("mdpress.toml")).unwrap();
        assert_eq!(config.site.name, SiteConfig::default().site.name);

        let manifest = scan::scan(&tmp.path().join("docs"), &config).unwrap();
        assert_eq!(manifest.pages.len(), 2);
        assert!(manifest.pages.iter().any(|p| p.url == "/"));
    }

    #[test]
    fn eject_writes_client_assets() {
        let tmp = TempDir::new().unwrap();
        let created = eject_client(tmp.path()).unwrap();
        assert_eq!(created.len(), CLIENT_FILES.len());
        assert!(tmp.path().join("client/site.css").exists());
        assert!(tmp.path().join("client/search.js").exists());
        assert!(tmp.path().join("client/scrollspy.js").exists());
    }

    #[test]
    fn eject_refuses_existing_client_dir() {
        let tmp = TempDir::new().unwrap();
        eject_client(tmp.path()).unwrap();
        let err = eject_client(tmp.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::ClientExists(_)));
    }

    #[test]
    fn netlify_deploy_files() {
        let tmp = TempDir::new().unwrap();
        let (created, skipped) = write_deploy(tmp.path(), DeployTarget::Netlify).unwrap();
        assert_eq!(created.len(), 2);
        assert!(skipped.is_empty());

        let toml_content = std::fs::read_to_string(tmp.path().join("netlify.toml")).unwrap();
        let parsed: toml::Value = toml::from_str(&toml_content).unwrap();
        assert_eq!(
            parsed["build"]["publish"].as_str(),
            Some("dist")
        );
    }

    #[test]
    fn vercel_deploy_file_is_valid_json() {
        let tmp = TempDir::new().unwrap();
        write_deploy(tmp.path(), DeployTarget::Vercel).unwrap();
        let content = std::fs::read_to_string(tmp.path().join("vercel.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["outputDirectory"], "dist");
    }

    #[test]
    fn github_pages_workflow_builds_site() {
        let tmp = TempDir::new().unwrap();
        write_deploy(tmp.path(), DeployTarget::GithubPages).unwrap();
        let content =
            std::fs::read_to_string(tmp.path().join(".github/workflows/deploy-docs.yml")).unwrap();
        assert!(content.contains("mdpress build"));
        assert!(content.contains(".nojekyll"));
    }

    #[test]
    fn deploy_skips_existing_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("netlify.toml"), "# mine").unwrap();
        let (created, skipped) = write_deploy(tmp.path(), DeployTarget::Netlify).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(skipped, vec![PathBuf::from("netlify.toml")]);
        let content = std::fs::read_to_string(tmp.path().join("netlify.toml")).unwrap();
        assert_eq!(content, "# mine");
    }
}
