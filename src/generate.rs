//! HTML site generation.
//!
//! Takes the scan manifest and renders the documentation site: one HTML
//! document per page plus the search index and static assets.
//!
//! ## Page Layout
//!
//! Every page shares a three-column documentation layout:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ header: site name ·············· search box           │
//! ├──────────┬──────────────────────────────┬─────────────┤
//! │ sidebar  │ content                      │ right rail  │
//! │ (groups) │ (rendered markdown)          │ (TOC, LLM)  │
//! │          │                              │             │
//! │          │ footer: prev / next          │             │
//! └──────────┴──────────────────────────────┴─────────────┘
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # /
//! ├── 404.html
//! ├── search-index.json
//! ├── guides/
//! │   ├── index.html             # /guides
//! │   └── getting-started/
//! │       └── index.html         # /guides/getting-started
//! ├── static/
//! │   ├── site.css               # color variables + base styles
//! │   ├── search.js
//! │   └── scrollspy.js
//! └── assets/                    # copied from docs/assets/
//!     └── logo.svg
//! ```
//!
//! Pages render in parallel via rayon; the markdown renderer (syntax and
//! theme sets) is built once and shared.
//!
//! ## Client assets
//!
//! CSS and JS are embedded at compile time. A project can eject them with
//! `mdpress client`; builds then prefer the ejected copies in `client/`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, SiteConfig};
use crate::markdown::{Heading, MarkdownError, MarkdownRenderer, Rendered};
use crate::scan::{ASSETS_DIR, Manifest};
use crate::search::{self, SearchDocument, WriteOutcome};
use crate::types::{NavEntry, NavGroup, Page};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),
}

const CSS_STATIC: &str = include_str!("../static/site.css");
const SEARCH_JS: &str = include_str!("../static/search.js");
const SCROLLSPY_JS: &str = include_str!("../static/scrollspy.js");
pub const LIVERELOAD_JS: &str = include_str!("../static/livereload.js");

/// Client assets that `mdpress client` ejects and builds can override.
pub const CLIENT_FILES: &[(&str, &str)] = &[
    ("site.css", CSS_STATIC),
    ("search.js", SEARCH_JS),
    ("scrollspy.js", SCROLLSPY_JS),
];

/// Rendering options that differ between static builds and the dev server.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Inject the live-reload polling script (dev server only).
    pub livereload: bool,
    /// Directory with ejected client assets, if the project has one.
    pub client_dir: Option<PathBuf>,
}

/// One fully rendered HTML document.
#[derive(Debug, Clone)]
pub struct PageOutput {
    pub url: String,
    pub title: String,
    pub html: String,
}

/// The rendered site: page documents, the 404 page, and search documents.
pub struct RenderedSite {
    pub pages: Vec<PageOutput>,
    pub not_found: String,
    pub search_documents: Vec<SearchDocument>,
}

/// Summary of a static build, for CLI output.
#[derive(Debug)]
pub struct BuildSummary {
    /// (title, output path) pairs in page order.
    pub pages: Vec<(String, String)>,
    pub assets_copied: usize,
    pub search: Option<WriteOutcome>,
}

// ============================================================================
// Site rendering
// ============================================================================

/// Render every page of the manifest to a full HTML document.
pub fn render_site(manifest: &Manifest, opts: &RenderOptions) -> Result<RenderedSite, GenerateError> {
    let renderer = MarkdownRenderer::new(&manifest.config.markdown.highlight_theme)?;

    let ctx = SiteContext {
        config: &manifest.config,
        navigation: &manifest.navigation,
        nav_flat: flatten_nav(&manifest.navigation),
        livereload: opts.livereload,
    };

    let rendered: Vec<(usize, Rendered)> = manifest
        .pages
        .par_iter()
        .enumerate()
        .map(|(idx, page)| (idx, renderer.render(&page.body)))
        .collect();

    let mut pages = Vec::with_capacity(manifest.pages.len());
    let mut paired: Vec<(&Page, String)> = Vec::with_capacity(manifest.pages.len());
    for (idx, output) in rendered {
        let page = &manifest.pages[idx];
        let doc = render_page(&ctx, page, &output);
        pages.push(PageOutput {
            url: page.url.clone(),
            title: page.title.clone(),
            html: doc.into_string(),
        });
        paired.push((page, output.plain_text));
    }

    let search_documents = if manifest.config.search.enabled {
        search::build_documents(
            paired.iter().map(|(page, plain)| (*page, plain.as_str())),
            manifest.config.search.body_limit,
        )
    } else {
        Vec::new()
    };

    let not_found = render_not_found(&ctx).into_string();

    Ok(RenderedSite {
        pages,
        not_found,
        search_documents,
    })
}

/// Assemble the final stylesheet: config color variables + base CSS.
pub fn stylesheet(config: &SiteConfig, opts: &RenderOptions) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        load_client_asset(opts, "site.css")
    )
}

/// Load a client asset, preferring an ejected copy when present.
pub fn load_client_asset(opts: &RenderOptions, name: &str) -> String {
    if let Some(dir) = &opts.client_dir {
        let path = dir.join(name);
        if let Ok(content) = fs::read_to_string(&path) {
            log::debug!("using ejected client asset {}", path.display());
            return content;
        }
    }
    CLIENT_FILES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, content)| (*content).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Static build
// ============================================================================

/// Run a full static build: render the site and write it to `output_dir`.
pub fn build(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    opts: &RenderOptions,
) -> Result<BuildSummary, GenerateError> {
    let site = render_site(manifest, opts)?;

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for page in &site.pages {
        let rel = page_file_path(&page.url);
        let path = output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        written.push((page.title.clone(), rel.to_string_lossy().to_string()));
    }

    fs::write(output_dir.join("404.html"), &site.not_found)?;

    // Static assets: stylesheet with injected colors, then the JS files.
    let static_dir = output_dir.join("static");
    fs::create_dir_all(&static_dir)?;
    fs::write(static_dir.join("site.css"), stylesheet(&manifest.config, opts))?;
    fs::write(
        static_dir.join("search.js"),
        load_client_asset(opts, "search.js"),
    )?;
    fs::write(
        static_dir.join("scrollspy.js"),
        load_client_asset(opts, "scrollspy.js"),
    )?;

    let assets_copied = copy_assets(source_dir, output_dir)?;

    let search = if manifest.config.search.enabled {
        Some(search::write_index(output_dir, site.search_documents)?)
    } else {
        None
    };

    Ok(BuildSummary {
        pages: written,
        assets_copied,
        search,
    })
}

/// Map a page URL to its output file path.
///
/// - `/` → `index.html`
/// - `/guides` → `guides/index.html`
/// - `/guides/getting-started` → `guides/getting-started/index.html`
pub fn page_file_path(url: &str) -> PathBuf {
    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(trimmed).join("index.html")
    }
}

/// Copy `docs/assets/` into `dist/assets/`, returning the file count.
fn copy_assets(source_dir: &Path, output_dir: &Path) -> std::io::Result<usize> {
    let assets = source_dir.join(ASSETS_DIR);
    if !assets.is_dir() {
        return Ok(0);
    }
    copy_dir_recursive(&assets, &output_dir.join(ASSETS_DIR))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut count = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            count += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            count += 1;
        }
    }
    Ok(count)
}

// ============================================================================
// HTML components
// ============================================================================

/// Shared per-render context: config, navigation, and options.
struct SiteContext<'a> {
    config: &'a SiteConfig,
    navigation: &'a [NavGroup],
    nav_flat: Vec<&'a NavEntry>,
    livereload: bool,
}

impl SiteContext<'_> {
    /// Prefix a site-absolute path with the configured base URL.
    fn href(&self, path: &str) -> String {
        format!("{}{}", self.config.site.base_url, path)
    }

    /// Canonical link target for a page URL (directory-style, trailing slash).
    fn page_href(&self, url: &str) -> String {
        if url == "/" {
            self.href("/")
        } else {
            self.href(&format!("{}/", url))
        }
    }

    /// Prev/next nav entries around `url`, when the page is in navigation.
    fn neighbors(&self, url: &str) -> (Option<&NavEntry>, Option<&NavEntry>) {
        match self.nav_flat.iter().position(|e| e.url == url) {
            Some(idx) => {
                let prev = idx.checked_sub(1).and_then(|i| self.nav_flat.get(i));
                let next = self.nav_flat.get(idx + 1);
                (prev.copied(), next.copied())
            }
            None => (None, None),
        }
    }
}

fn flatten_nav<'a>(navigation: &'a [NavGroup]) -> Vec<&'a NavEntry> {
    navigation.iter().flat_map(|g| g.entries.iter()).collect()
}

/// Renders the base HTML document structure.
fn base_document(ctx: &SiteContext, title: &str, description: Option<&str>, content: Markup) -> Markup {
    let site = &ctx.config.site;
    let full_title = if title == site.name {
        title.to_string()
    } else {
        format!("{} – {}", title, site.name)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                @if let Some(desc) = description {
                    meta name="description" content=(desc);
                } @else if !site.description.is_empty() {
                    meta name="description" content=(site.description);
                }
                link rel="stylesheet" href=(ctx.href("/static/site.css"));
            }
            body data-base=(site.base_url) {
                (content)
                @if ctx.config.search.enabled {
                    script src=(ctx.href("/static/search.js")) defer {}
                }
                @if ctx.config.rail.toc {
                    script src=(ctx.href("/static/scrollspy.js")) defer {}
                }
                @if ctx.livereload {
                    script src="/static/livereload.js" defer {}
                }
            }
        }
    }
}

/// Renders the site header with name and search box.
fn site_header(ctx: &SiteContext) -> Markup {
    html! {
        header.site-header {
            a.site-name href=(ctx.page_href("/")) { (ctx.config.site.name) }
            @if ctx.config.search.enabled {
                div.search {
                    input.search-input type="search" placeholder="Search docs…" aria-label="Search";
                    div.search-results {}
                }
            }
        }
    }
}

/// Renders the sidebar navigation with the current page highlighted.
fn sidebar(ctx: &SiteContext, current_url: &str) -> Markup {
    html! {
        nav.sidebar aria-label="Site navigation" {
            @for group in ctx.navigation {
                @if let Some(name) = &group.name {
                    p.nav-group-name { (name) }
                }
                ul {
                    @for entry in &group.entries {
                        @let is_current = entry.url == current_url;
                        li class=[is_current.then_some("current")] {
                            a href=(ctx.page_href(&entry.url)) {
                                @if let Some(icon) = &entry.icon {
                                    span.nav-icon data-icon=(icon) {}
                                }
                                (entry.title)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the right rail: table of contents plus "ask an LLM" links.
///
/// Level-1 headings are the page title and stay out of the TOC; levels
/// 2 and 3 are listed.
fn rail(ctx: &SiteContext, page: &Page, headings: &[Heading]) -> Markup {
    let toc_entries: Vec<&Heading> = headings.iter().filter(|h| h.level >= 2).collect();
    let page_url = ctx.page_href(&page.url);

    html! {
        aside.rail {
            @if ctx.config.rail.toc && !toc_entries.is_empty() {
                p.rail-title { "On this page" }
                ul.toc {
                    @for heading in &toc_entries {
                        li class={ "toc-" (heading.level) } {
                            a href={ "#" (heading.id) } { (heading.text) }
                        }
                    }
                }
            }
            @if !ctx.config.rail.llm_links.is_empty() {
                div.rail-llm {
                    p.rail-title { "Ask about this page" }
                    @for link in &ctx.config.rail.llm_links {
                        a href=(link.url_template.replace("{url}", &page_url)) target="_blank" rel="noopener" {
                            (link.label)
                        }
                    }
                }
            }
        }
    }
}

/// Renders the footer with prev/next page links.
fn page_footer(ctx: &SiteContext, current_url: &str) -> Markup {
    let (prev, next) = ctx.neighbors(current_url);
    html! {
        @if prev.is_some() || next.is_some() {
            footer.page-footer {
                @if let Some(prev) = prev {
                    a.prev href=(ctx.page_href(&prev.url)) {
                        span.label { "Previous" }
                        (prev.title)
                    }
                }
                @if let Some(next) = next {
                    a.next href=(ctx.page_href(&next.url)) {
                        span.label { "Next" }
                        (next.title)
                    }
                }
            }
        }
    }
}

/// Renders one full documentation page.
fn render_page(ctx: &SiteContext, page: &Page, rendered: &Rendered) -> Markup {
    let content = html! {
        (site_header(ctx))
        div.layout {
            (sidebar(ctx, &page.url))
            main.content {
                (PreEscaped(rendered.html.as_str()))
                (page_footer(ctx, &page.url))
            }
            (rail(ctx, page, &rendered.headings))
        }
    };
    base_document(ctx, &page.title, page.description.as_deref(), content)
}

/// Renders the 404 page, sharing the standard layout.
fn render_not_found(ctx: &SiteContext) -> Markup {
    let content = html! {
        (site_header(ctx))
        div.layout {
            (sidebar(ctx, ""))
            main.content {
                div.not-found {
                    h1 { "Page not found" }
                    p {
                        "The page you are looking for does not exist. "
                        a href=(ctx.page_href("/")) { "Back to the docs" }
                        "."
                    }
                }
            }
        }
    };
    base_document(ctx, "Page not found", None, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn rendered_sample() -> RenderedSite {
        let tmp = sample_site();
        let manifest = scan_sample(&tmp);
        render_site(&manifest, &RenderOptions::default()).unwrap()
    }

    fn page_html<'a>(site: &'a RenderedSite, url: &str) -> &'a str {
        &site
            .pages
            .iter()
            .find(|p| p.url == url)
            .unwrap_or_else(|| panic!("page '{url}' not rendered"))
            .html
    }

    #[test]
    fn renders_every_page() {
        let site = rendered_sample();
        assert_eq!(site.pages.len(), 6);
    }

    #[test]
    fn page_contains_rendered_markdown() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/getting-started");
        assert!(html.contains("<h2 id=\"install\">"));
        assert!(html.contains("Run the installer."));
    }

    #[test]
    fn sidebar_lists_nav_entries() {
        let site = rendered_sample();
        let html = page_html(&site, "/");
        assert!(html.contains("Getting Started"));
        assert!(html.contains("Reference"));
        assert!(html.contains("href=\"/guides/getting-started/\""));
    }

    #[test]
    fn sidebar_marks_current_page() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/getting-started");
        assert!(html.contains(r#"class="current""#));
    }

    #[test]
    fn hidden_page_rendered_but_absent_from_sidebar() {
        let site = rendered_sample();
        let html = page_html(&site, "/internal");
        assert!(html.contains("Not linked anywhere."));
        assert!(!html.contains("href=\"/internal/\""));
    }

    #[test]
    fn rail_contains_toc_for_subheadings() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/getting-started");
        assert!(html.contains("On this page"));
        assert!(html.contains("#install"));
        assert!(html.contains("#first-build"));
    }

    #[test]
    fn toc_omitted_when_no_subheadings() {
        let site = rendered_sample();
        let html = page_html(&site, "/reference/cli");
        assert!(!html.contains("On this page"));
    }

    #[test]
    fn footer_links_follow_nav_order() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/getting-started");
        // Nav order: Home, Getting Started, Deployment, CLI.
        assert!(html.contains("Previous"));
        assert!(html.contains("Next"));
        assert!(html.contains("href=\"/guides/deployment/\""));
    }

    #[test]
    fn first_nav_page_has_no_prev() {
        let site = rendered_sample();
        let html = page_html(&site, "/");
        assert!(!html.contains(r#"class="prev""#));
        assert!(html.contains(r#"class="next""#));
    }

    #[test]
    fn hidden_page_has_no_footer_links() {
        let site = rendered_sample();
        let html = page_html(&site, "/internal");
        assert!(!html.contains("page-footer"));
    }

    #[test]
    fn search_documents_built_for_visible_pages() {
        let site = rendered_sample();
        assert!(!site.search_documents.is_empty());
        assert!(site.search_documents.iter().all(|d| d.url != "/internal"));
        let gs = site
            .search_documents
            .iter()
            .find(|d| d.url == "/guides/getting-started")
            .unwrap();
        assert!(gs.body.contains("Run the installer"));
    }

    #[test]
    fn page_title_includes_site_name() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/deployment");
        assert!(html.contains("<title>Deployment – Documentation</title>"));
    }

    #[test]
    fn description_meta_from_frontmatter() {
        let site = rendered_sample();
        let html = page_html(&site, "/guides/getting-started");
        assert!(html.contains(r#"content="Install and run""#));
    }

    #[test]
    fn livereload_script_only_in_dev() {
        let tmp = sample_site();
        let manifest = scan_sample(&tmp);
        let static_site = render_site(&manifest, &RenderOptions::default()).unwrap();
        assert!(!page_html(&static_site, "/").contains("livereload"));

        let dev_opts = RenderOptions {
            livereload: true,
            ..Default::default()
        };
        let dev_site = render_site(&manifest, &dev_opts).unwrap();
        assert!(page_html(&dev_site, "/").contains("livereload"));
    }

    #[test]
    fn base_url_prefixes_links() {
        let tmp = sample_site();
        let mut config = crate::config::SiteConfig::default();
        config.site.base_url = "/docs".to_string();
        let manifest = crate::scan::scan(tmp.path(), &config).unwrap();
        let site = render_site(&manifest, &RenderOptions::default()).unwrap();
        let html = page_html(&site, "/");
        assert!(html.contains("href=\"/docs/static/site.css\""));
        assert!(html.contains("href=\"/docs/guides/getting-started/\""));
    }

    #[test]
    fn llm_links_substitute_page_url() {
        let tmp = sample_site();
        let mut config = crate::config::SiteConfig::default();
        config.site.base_url = "https://docs.example.com".to_string();
        config.rail.llm_links = vec![crate::config::LlmLink {
            label: "Ask ChatGPT".to_string(),
            url_template: "https://chatgpt.com/?q={url}".to_string(),
        }];
        let manifest = crate::scan::scan(tmp.path(), &config).unwrap();
        let site = render_site(&manifest, &RenderOptions::default()).unwrap();
        let html = page_html(&site, "/guides/deployment");
        assert!(html.contains("https://chatgpt.com/?q=https://docs.example.com/guides/deployment/"));
    }

    #[test]
    fn search_disabled_removes_box_and_documents() {
        let tmp = sample_site();
        let mut config = crate::config::SiteConfig::default();
        config.search.enabled = false;
        let manifest = crate::scan::scan(tmp.path(), &config).unwrap();
        let site = render_site(&manifest, &RenderOptions::default()).unwrap();
        assert!(site.search_documents.is_empty());
        assert!(!page_html(&site, "/").contains("search-input"));
    }

    #[test]
    fn not_found_page_shares_layout() {
        let site = rendered_sample();
        assert!(site.not_found.contains("Page not found"));
        assert!(site.not_found.contains("site-header"));
    }

    #[test]
    fn nav_titles_escaped() {
        let tmp = TempDir::new().unwrap();
        write_page(
            tmp.path(),
            "index.md",
            "---\ntitle: \"<script>alert('x')</script>\"\n---\nbody\n",
        );
        let manifest = crate::scan::scan(tmp.path(), &crate::config::SiteConfig::default()).unwrap();
        let site = render_site(&manifest, &RenderOptions::default()).unwrap();
        let html = page_html(&site, "/");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Static build
    // =========================================================================

    #[test]
    fn page_file_paths() {
        assert_eq!(page_file_path("/"), PathBuf::from("index.html"));
        assert_eq!(page_file_path("/guides"), PathBuf::from("guides/index.html"));
        assert_eq!(
            page_file_path("/guides/getting-started"),
            PathBuf::from("guides/getting-started/index.html")
        );
    }

    #[test]
    fn build_writes_site_to_disk() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let manifest = scan_sample(&tmp);
        let summary = build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();

        assert_eq!(summary.pages.len(), 6);
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("guides/getting-started/index.html").exists());
        assert!(out.path().join("404.html").exists());
        assert!(out.path().join("static/site.css").exists());
        assert!(out.path().join("static/search.js").exists());
        assert!(out.path().join("search-index.json").exists());
    }

    #[test]
    fn build_copies_assets() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let manifest = scan_sample(&tmp);
        let summary = build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();
        assert_eq!(summary.assets_copied, 1);
        assert!(out.path().join("assets/logo.svg").exists());
    }

    #[test]
    fn build_stylesheet_contains_config_colors() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let manifest = scan_sample(&tmp);
        build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();
        let css = std::fs::read_to_string(out.path().join("static/site.css")).unwrap();
        assert!(css.contains("--color-bg: #ffffff"));
        assert!(css.contains(".sidebar"));
    }

    #[test]
    fn rebuild_leaves_unchanged_search_index() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let manifest = scan_sample(&tmp);
        let first = build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();
        assert_eq!(first.search, Some(WriteOutcome::Written));
        let second = build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();
        assert_eq!(second.search, Some(WriteOutcome::Unchanged));
    }

    #[test]
    fn ejected_client_css_preferred() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let client = TempDir::new().unwrap();
        std::fs::write(client.path().join("site.css"), "/* ejected */").unwrap();

        let manifest = scan_sample(&tmp);
        let opts = RenderOptions {
            livereload: false,
            client_dir: Some(client.path().to_path_buf()),
        };
        build(&manifest, tmp.path(), out.path(), &opts).unwrap();
        let css = std::fs::read_to_string(out.path().join("static/site.css")).unwrap();
        assert!(css.contains("/* ejected */"));
        // Color variables are still injected ahead of the ejected file.
        assert!(css.contains("--color-bg"));
    }
}
