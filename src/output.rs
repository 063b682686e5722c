//! CLI output formatting for the scan and build commands.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every page is its semantic identity — positional index and title, grouped
//! the way the sidebar groups them — with source and output paths shown as
//! indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Navigation
//! 001 Home
//!     Source: index.md
//! Guides
//!     001 Getting Started
//!         Source: guides/getting-started.md
//!     002 Deployment
//!         Source: guides/deployment.md
//!
//! Hidden
//! 001 Internal
//!     Source: internal.md
//!
//! 2 groups, 3 pages in navigation, 1 hidden
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//! 002 Getting Started → guides/getting-started/index.html
//!
//! Assets: 1 file copied
//! Search: index written
//! Generated 2 pages
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::BuildSummary;
use crate::scan::Manifest;
use crate::search::WriteOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One page line plus its indented source context.
fn page_lines(depth: usize, index: usize, title: &str, source: &str) -> Vec<String> {
    vec![
        format!("{}{} {}", indent(depth), format_index(index), title),
        format!("{}Source: {}", indent(depth + 1), source),
    ]
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    let source_for = |url: &str| -> &str {
        manifest
            .pages
            .iter()
            .find(|p| p.url == url)
            .map(|p| p.source_path.as_str())
            .unwrap_or("")
    };

    lines.push("Navigation".to_string());
    let mut nav_pages = 0;
    for group in &manifest.navigation {
        let depth = match &group.name {
            Some(name) => {
                lines.push(name.clone());
                1
            }
            None => 0,
        };
        for (idx, entry) in group.entries.iter().enumerate() {
            lines.extend(page_lines(
                depth,
                idx + 1,
                &entry.title,
                source_for(&entry.url),
            ));
            nav_pages += 1;
        }
    }

    let hidden: Vec<_> = manifest.pages.iter().filter(|p| p.hidden).collect();
    if !hidden.is_empty() {
        lines.push(String::new());
        lines.push("Hidden".to_string());
        for (idx, page) in hidden.iter().enumerate() {
            lines.extend(page_lines(0, idx + 1, &page.title, &page.source_path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} groups, {} pages in navigation, {} hidden",
        manifest.navigation.len(),
        nav_pages,
        hidden.len()
    ));
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, (title, path)) in summary.pages.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(idx + 1), title, path));
    }

    lines.push(String::new());
    match summary.assets_copied {
        0 => {}
        1 => lines.push("Assets: 1 file copied".to_string()),
        n => lines.push(format!("Assets: {} files copied", n)),
    }
    match &summary.search {
        Some(WriteOutcome::Written) => lines.push("Search: index written".to_string()),
        Some(WriteOutcome::Unchanged) => lines.push("Search: index unchanged".to_string()),
        None => {}
    }
    lines.push(format!("Generated {} pages", summary.pages.len()));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{self, RenderOptions};
    use crate::test_helpers::*;

    #[test]
    fn index_is_three_digit_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn scan_output_groups_pages() {
        let tmp = sample_site();
        let manifest = scan_sample(&tmp);
        let lines = format_scan_output(&manifest);
        let text = lines.join("\n");

        assert!(text.contains("Navigation"));
        assert!(text.contains("Guides"));
        assert!(text.contains("001 Getting Started"));
        assert!(text.contains("Source: guides/getting-started.md"));
    }

    #[test]
    fn scan_output_lists_hidden_pages() {
        let tmp = sample_site();
        let manifest = scan_sample(&tmp);
        let text = format_scan_output(&manifest).join("\n");
        assert!(text.contains("Hidden"));
        assert!(text.contains("Internal"));
    }

    #[test]
    fn scan_output_summary_line() {
        let tmp = sample_site();
        let manifest = scan_sample(&tmp);
        let lines = format_scan_output(&manifest);
        assert_eq!(
            lines.last().unwrap(),
            "3 groups, 4 pages in navigation, 2 hidden"
        );
    }

    #[test]
    fn build_output_maps_titles_to_paths() {
        let tmp = sample_site();
        let out = TempDir::new().unwrap();
        let manifest = scan_sample(&tmp);
        let summary =
            generate::build(&manifest, tmp.path(), out.path(), &RenderOptions::default()).unwrap();
        let text = format_build_output(&summary).join("\n");

        assert!(text.contains("Home → index.html"));
        assert!(text.contains("Getting Started → guides/getting-started/index.html"));
        assert!(text.contains("Assets: 1 file copied"));
        assert!(text.contains("Search: index written"));
        assert!(text.contains("Generated 6 pages"));
    }
}
