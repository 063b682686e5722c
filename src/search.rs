//! Lightweight full-text search index.
//!
//! The index is a flat document array — one entry per non-hidden page —
//! persisted as `search-index.json` in the output directory. The client
//! search JS fetches that file and runs the same matching logic as
//! [`search`], which also answers the dev server's `/__search` endpoint.
//!
//! ## Matching
//!
//! Queries are whitespace-tokenized and lowercased. A document matches when
//! its combined `title + description + body` contains **every** token as a
//! substring (AND-matching). Documents whose title contains a token rank
//! before body-only matches; within each band results sort by title. There
//! is deliberately no inverted index and no relevance scoring — at
//! documentation-site scale a linear scan is instant, and substring
//! matching handles partial words (`deplo` finds "Deployment") for free.
//!
//! ## Cache-or-regenerate
//!
//! The persisted file carries a SHA-256 digest of its documents. When a
//! rebuild produces the same digest, the existing file is left untouched,
//! so downstream file watchers and deploy diffs see no spurious change.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

use crate::types::Page;

/// Name of the index file within the output directory.
pub const INDEX_FILENAME: &str = "search-index.json";

/// Version of the index format. Bump to invalidate existing files when
/// the document shape or digest computation changes.
const INDEX_VERSION: u32 = 1;

/// One searchable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Plain text of the rendered page, whitespace-collapsed and truncated.
    pub body: String,
}

/// On-disk index file.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexFile {
    pub version: u32,
    pub digest: String,
    pub documents: Vec<SearchDocument>,
}

/// Result of [`write_index`]: whether the file was rewritten.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Build search documents from pages and their extracted plain text.
///
/// `pages` pairs each page with the plain text produced by the markdown
/// renderer. Hidden pages are excluded. Bodies are truncated to
/// `body_limit` characters on a char boundary.
pub fn build_documents<'a>(
    pages: impl IntoIterator<Item = (&'a Page, &'a str)>,
    body_limit: usize,
) -> Vec<SearchDocument> {
    pages
        .into_iter()
        .filter(|(page, _)| !page.hidden)
        .map(|(page, plain)| SearchDocument {
            url: page.url.clone(),
            title: page.title.clone(),
            description: page.description.clone().unwrap_or_default(),
            body: truncate_chars(plain, body_limit),
        })
        .collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// SHA-256 over the serialized documents, hex-encoded.
fn documents_digest(documents: &[SearchDocument]) -> String {
    let json = serde_json::to_string(documents).expect("search documents must serialize");
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Write `search-index.json` into `output_dir`, skipping the write when an
/// existing file already holds the same documents.
pub fn write_index(output_dir: &Path, documents: Vec<SearchDocument>) -> io::Result<WriteOutcome> {
    let digest = documents_digest(&documents);
    let path = output_dir.join(INDEX_FILENAME);

    if let Some(existing) = load_index(output_dir)
        && existing.digest == digest
    {
        log::debug!("search index unchanged ({} documents)", documents.len());
        return Ok(WriteOutcome::Unchanged);
    }

    let file = IndexFile {
        version: INDEX_VERSION,
        digest,
        documents,
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json)?;
    Ok(WriteOutcome::Written)
}

/// Load an existing index file. Returns `None` if the file is missing,
/// unparsable, or from a different format version.
pub fn load_index(output_dir: &Path) -> Option<IndexFile> {
    let content = std::fs::read_to_string(output_dir.join(INDEX_FILENAME)).ok()?;
    let file: IndexFile = serde_json::from_str(&content).ok()?;
    (file.version == INDEX_VERSION).then_some(file)
}

/// Run a query against the documents.
///
/// Empty and whitespace-only queries return nothing.
pub fn search<'a>(documents: &'a [SearchDocument], query: &str) -> Vec<&'a SearchDocument> {
    let tokens: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(bool, &SearchDocument)> = documents
        .iter()
        .filter_map(|doc| {
            let title = doc.title.to_lowercase();
            let haystack = format!("{} {} {}", title, doc.description, doc.body).to_lowercase();
            if tokens.iter().all(|t| haystack.contains(t.as_str())) {
                let title_hit = tokens.iter().any(|t| title.contains(t.as_str()));
                Some((title_hit, doc))
            } else {
                None
            }
        })
        .collect();

    hits.sort_by(|(a_title, a), (b_title, b)| {
        b_title
            .cmp(a_title)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
    hits.into_iter().map(|(_, doc)| doc).collect()
}
