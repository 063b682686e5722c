//! Development and preview HTTP servers.
//!
//! Both servers are synchronous and serve one request at a time off
//! `tiny_http` — documentation sites are a single-reader workload and a
//! thread pool would buy nothing but moving parts.
//!
//! ## Dev server (`mdpress dev`)
//!
//! Renders the whole site into memory and serves it, rebuilding when the
//! content tree changes. Change detection is polling-based: a watcher
//! thread fingerprints the content tree (paths, sizes, mtimes) twice a
//! second and rebuilds on any difference. When a rebuild fails (broken
//! frontmatter mid-edit, say) the error is logged and the last good site
//! stays up.
//!
//! Live reload uses the same fingerprint: pages get a small polling script
//! that requests `/__livereload` and reloads when the build stamp changes.
//!
//! Endpoints beyond the rendered pages:
//!
//! | Path | Serves |
//! |------|--------|
//! | `/__livereload` | Current build stamp (plain text) |
//! | `/__search?q=…` | Search results as JSON |
//! | `/static/*` | Embedded (or ejected) CSS/JS |
//! | `/assets/*` | Files from `docs/assets/` |
//!
//! ## Preview server (`mdpress preview`)
//!
//! Serves an already-built `dist/` directory as-is: no rebuild, no reload
//! script, content types by extension, directory URLs resolve to their
//! `index.html`, unknown paths get the built `404.html`.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, UNIX_EPOCH};
use thiserror::Error;
use tiny_http::{Header, Response, Server};
use url::Url;
use walkdir::WalkDir;

use crate::config::{self, ConfigError};
use crate::generate::{self, GenerateError, RenderOptions};
use crate::scan::{self, ASSETS_DIR, ScanError};
use crate::search::{self, SearchDocument};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
    #[error("could not bind {0}: {1}")]
    Bind(String, String),
}

/// How often the watcher thread fingerprints the content tree.
const WATCH_INTERVAL: Duration = Duration::from_millis(500);

/// An HTTP reply, decoupled from `tiny_http` so routing stays testable.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    fn not_found(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 404,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }
}

// ============================================================================
// Dev server
// ============================================================================

/// Everything the dev server needs to answer requests, rebuilt on change.
pub struct SiteBundle {
    pages: HashMap<String, String>,
    not_found: String,
    search_documents: Vec<SearchDocument>,
    stylesheet: String,
    search_js: String,
    scrollspy_js: String,
    /// Content fingerprint at build time; doubles as the live-reload stamp.
    stamp: String,
}

/// Scan and render the site into memory.
pub fn build_bundle(
    source: &Path,
    config_path: &Path,
    client_dir: Option<&Path>,
) -> Result<SiteBundle, ServeError> {
    let config = config::load_config(config_path)?;
    let manifest = scan::scan(source, &config)?;
    let opts = RenderOptions {
        livereload: true,
        client_dir: client_dir.map(Path::to_path_buf),
    };
    let site = generate::render_site(&manifest, &opts)?;

    let pages = site
        .pages
        .into_iter()
        .map(|p| (p.url, p.html))
        .collect::<HashMap<_, _>>();

    Ok(SiteBundle {
        pages,
        not_found: site.not_found,
        search_documents: site.search_documents,
        stylesheet: generate::stylesheet(&config, &opts),
        search_js: generate::load_client_asset(&opts, "search.js"),
        scrollspy_js: generate::load_client_asset(&opts, "scrollspy.js"),
        stamp: fingerprint(source, config_path),
    })
}

/// Fingerprint the content tree and config file: every path with its size
/// and mtime, hashed. Cheap enough to run twice a second on any docs tree
/// that fits in an editor.
pub fn fingerprint(source: &Path, config_path: &Path) -> String {
    let mut hasher = Sha256::new();
    let mut stat = |path: &Path| {
        if let Ok(meta) = fs::metadata(path) {
            let mtime = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(meta.len().to_le_bytes());
            hasher.update(mtime.to_le_bytes());
        }
    };

    for entry in WalkDir::new(source).sort_by_file_name().into_iter().flatten() {
        if entry.file_type().is_file() {
            stat(entry.path());
        }
    }
    stat(config_path);
    format!("{:x}", hasher.finalize())
}

/// Run the dev server until interrupted.
pub fn dev(
    source: &Path,
    config_path: &Path,
    client_dir: Option<&Path>,
    port: u16,
) -> Result<(), ServeError> {
    let bundle = build_bundle(source, config_path, client_dir)?;
    println!("==> Serving {} pages on http://127.0.0.1:{port}", bundle.pages.len());
    let shared = Arc::new(RwLock::new(bundle));

    // Watcher thread: poll the fingerprint, rebuild on change. A failed
    // rebuild keeps the previous bundle so the site never goes dark
    // mid-edit.
    {
        let shared = Arc::clone(&shared);
        let source = source.to_path_buf();
        let config_path = config_path.to_path_buf();
        let client_dir = client_dir.map(Path::to_path_buf);
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(WATCH_INTERVAL);
                let current = fingerprint(&source, &config_path);
                let stale = {
                    let bundle = shared.read().expect("bundle lock poisoned");
                    bundle.stamp != current
                };
                if !stale {
                    continue;
                }
                log::info!("content changed, rebuilding");
                match build_bundle(&source, &config_path, client_dir.as_deref()) {
                    Ok(rebuilt) => {
                        let mut bundle = shared.write().expect("bundle lock poisoned");
                        *bundle = rebuilt;
                    }
                    Err(err) => {
                        log::error!("rebuild failed, keeping previous site: {err}");
                    }
                }
            }
        });
    }

    let addr = format!("127.0.0.1:{port}");
    let server =
        Server::http(&addr).map_err(|e| ServeError::Bind(addr.clone(), e.to_string()))?;

    for request in server.incoming_requests() {
        let reply = {
            let bundle = shared.read().expect("bundle lock poisoned");
            dev_reply(&bundle, source, request.url())
        };
        log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        if let Err(err) = respond(request, reply) {
            log::warn!("failed to write response: {err}");
        }
    }
    Ok(())
}

/// Route one dev-server request. Pure over the bundle, so tests can drive
/// it without sockets.
pub fn dev_reply(bundle: &SiteBundle, source: &Path, raw_url: &str) -> Reply {
    let (path, query) = split_url(raw_url);

    match path.as_str() {
        "/__livereload" => Reply::ok("text/plain; charset=utf-8", bundle.stamp.as_bytes()),
        "/__search" => {
            let q = query.unwrap_or_default();
            let hits = search::search(&bundle.search_documents, &q);
            let json = serde_json::to_vec(&hits).unwrap_or_else(|_| b"[]".to_vec());
            Reply::ok("application/json", json)
        }
        "/static/site.css" => Reply::ok("text/css; charset=utf-8", bundle.stylesheet.as_bytes()),
        "/static/search.js" => {
            Reply::ok("text/javascript; charset=utf-8", bundle.search_js.as_bytes())
        }
        "/static/scrollspy.js" => Reply::ok(
            "text/javascript; charset=utf-8",
            bundle.scrollspy_js.as_bytes(),
        ),
        "/static/livereload.js" => Reply::ok(
            "text/javascript; charset=utf-8",
            generate::LIVERELOAD_JS.as_bytes(),
        ),
        _ if path.starts_with("/assets/") => match sanitize_rel_path(&path["/assets/".len()..]) {
            Some(rel) => {
                let file = source.join(ASSETS_DIR).join(&rel);
                match fs::read(&file) {
                    Ok(body) => Reply::ok(content_type_for(&file), body),
                    Err(_) => Reply::not_found("text/plain; charset=utf-8", "not found"),
                }
            }
            None => Reply::not_found("text/plain; charset=utf-8", "not found"),
        },
        _ => {
            let url = normalize_page_url(&path);
            match bundle.pages.get(&url) {
                Some(html) => Reply::ok("text/html; charset=utf-8", html.as_bytes()),
                None => Reply::not_found("text/html; charset=utf-8", bundle.not_found.as_bytes()),
            }
        }
    }
}

// ============================================================================
// Preview server
// ============================================================================

/// Serve an already-built output directory.
pub fn preview(dist: &Path, port: u16) -> Result<(), ServeError> {
    if !dist.join("index.html").exists() {
        log::warn!(
            "{} has no index.html — did you run `mdpress build`?",
            dist.display()
        );
    }
    let addr = format!("127.0.0.1:{port}");
    let server =
        Server::http(&addr).map_err(|e| ServeError::Bind(addr.clone(), e.to_string()))?;
    println!("==> Previewing {} on http://127.0.0.1:{port}", dist.display());

    for request in server.incoming_requests() {
        let reply = preview_reply(dist, request.url());
        log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        if let Err(err) = respond(request, reply) {
            log::warn!("failed to write response: {err}");
        }
    }
    Ok(())
}

/// Route one preview request against the built directory.
pub fn preview_reply(dist: &Path, raw_url: &str) -> Reply {
    let (path, _) = split_url(raw_url);
    let rel = match sanitize_rel_path(path.trim_start_matches('/')) {
        Some(rel) => rel,
        None => return preview_not_found(dist),
    };

    let mut file = dist.join(&rel);
    if file.is_dir() {
        file = file.join("index.html");
    }
    match fs::read(&file) {
        Ok(body) => Reply::ok(content_type_for(&file), body),
        Err(_) => preview_not_found(dist),
    }
}

fn preview_not_found(dist: &Path) -> Reply {
    match fs::read(dist.join("404.html")) {
        Ok(body) => Reply::not_found("text/html; charset=utf-8", body),
        Err(_) => Reply::not_found("text/plain; charset=utf-8", "not found"),
    }
}

// ============================================================================
// Shared plumbing
// ============================================================================

fn respond(request: tiny_http::Request, reply: Reply) -> std::io::Result<()> {
    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .expect("static header name is valid");
    let response = Response::from_data(reply.body)
        .with_status_code(reply.status)
        .with_header(header);
    request.respond(response)
}

/// Split a request URL into its percent-decoded-enough path and the raw
/// value of the `q` query parameter.
fn split_url(raw_url: &str) -> (String, Option<String>) {
    match Url::parse(&format!("http://localhost{raw_url}")) {
        Ok(url) => {
            let q = url
                .query_pairs()
                .find(|(k, _)| k == "q")
                .map(|(_, v)| v.into_owned());
            (url.path().to_string(), q)
        }
        Err(_) => (raw_url.to_string(), None),
    }
}

/// Map a request path to a page URL: strip the trailing slash, keep `/`.
fn normalize_page_url(path: &str) -> String {
    if path == "/" {
        return "/".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    // "/index.html" style requests map back to their directory URL.
    let trimmed = trimmed.strip_suffix("/index.html").unwrap_or(trimmed);
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reject path traversal: only plain relative components survive.
fn sanitize_rel_path(path: &str) -> Option<PathBuf> {
    let rel = PathBuf::from(path);
    if rel
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        Some(rel)
    } else {
        None
    }
}

/// Content type by file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}
