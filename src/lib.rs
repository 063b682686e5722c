//! # mdpress
//!
//! A minimal static site generator for markdown documentation sites.
//! Your filesystem is the data source: markdown files become pages, their
//! paths become URLs, and frontmatter controls titles, sidebar grouping,
//! and ordering.
//!
//! # Architecture: Scan → Render → Serve/Write
//!
//! The pipeline has two stages plus two ways to consume their output:
//!
//! ```text
//! 1. Scan      docs/     →  Manifest        (filesystem → pages + navigation)
//! 2. Render    Manifest  →  RenderedSite    (markdown → full HTML documents)
//! 3a. Build    RenderedSite → dist/         (static files + search index)
//! 3b. Dev      RenderedSite → HTTP          (in-memory, rebuilt on change)
//! ```
//!
//! The split exists for three reasons:
//!
//! - **Debuggability**: the manifest is inspectable JSON (`mdpress scan`).
//! - **One renderer, two consumers**: the static builder and the dev server
//!   share the exact same rendering path, so what you preview is what ships.
//! - **Testability**: scan and render are pure functions over their inputs;
//!   tests drive them with temp-dir fixtures and never need a socket.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory, parses frontmatter, builds navigation |
//! | [`frontmatter`] | Splits and deserializes the YAML frontmatter block |
//! | [`markdown`] | Markdown → HTML with syntax highlighting and TOC extraction |
//! | [`generate`] | Maud page templates, static build, client asset handling |
//! | [`search`] | Flat JSON search index: build, persist, query |
//! | [`serve`] | Dev server with polling live reload, static preview server |
//! | [`scaffold`] | `init`, `client` eject, and `deploy` file generation |
//! | [`config`] | `mdpress.toml` loading, merging, validation, color CSS |
//! | [`slug`] | URL segment and heading anchor slugification |
//! | [`types`] | Shared types (`Page`, `NavGroup`) serialized in the manifest |
//! | [`output`] | CLI output formatting — grouped display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Synchronous, Single-Binary Serving
//!
//! The dev and preview servers run on `tiny_http` with no async runtime.
//! A documentation site under active editing has exactly one reader; the
//! moving parts an async stack buys are all overhead here. Live reload is
//! a 1-second client poll against a content fingerprint rather than a
//! websocket — the same fingerprint that triggers server-side rebuilds.
//!
//! ## Search Without an Index Structure
//!
//! The search "index" is a flat JSON array of `{url, title, description,
//! body}` documents. Queries tokenize on whitespace and AND-match
//! substrings, title hits first. At documentation scale (hundreds of
//! pages, not millions) a linear scan is instant, substring matching
//! handles partial words for free, and the same logic runs unchanged in
//! the browser and in the dev server.
//!
//! ## Frontmatter Is the Only Metadata Channel
//!
//! Navigation structure comes from frontmatter `group`/`order` keys, not
//! from a separate sidebar config file that can drift out of sync with the
//! content. The filesystem plus the files themselves are the source of
//! truth; `mdpress.toml` only holds site-wide settings.
//!
//! # The Output
//!
//! A build is plain HTML, one CSS file, and ~3 small vanilla JS files
//! (search, scrollspy — no framework). The generated site can be dropped
//! on any file server; `mdpress deploy` generates the config files for
//! common hosts.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod scaffold;
pub mod scan;
pub mod search;
pub mod serve;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
