//! Slug derivation for URLs and heading anchors.
//!
//! All URL-visible identifiers (page paths, table-of-contents anchors) pass
//! through the same slugifier so the rules stay consistent:
//!
//! - `"Getting Started"` → `"getting-started"` (page segment)
//! - `"Why use mdpress?"` → `"why-use-mdpress"` (heading anchor)
//! - `"API v2.0"` → `"api-v2-0"`
//!
//! Lowercase ASCII letters and digits pass through; everything else collapses
//! to a single dash. Leading and trailing dashes are trimmed.

/// Slugify a string for use in a URL path segment or anchor id.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Assigns unique anchor ids within one document.
///
/// The first occurrence of a slug is used as-is; repeats get a numeric
/// suffix (`usage`, `usage-2`, `usage-3`, …) so every heading stays
/// individually addressable.
#[derive(Debug, Default)]
pub struct AnchorSet {
    seen: std::collections::HashMap<String, u32>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and return an id unique within this set.
    ///
    /// Empty slugs (headings made entirely of punctuation) become `section`,
    /// which then participates in the same dedup counting.
    pub fn assign(&mut self, text: &str) -> String {
        let base = {
            let s = slugify(text);
            if s.is_empty() { "section".to_string() } else { s }
        };
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{}-{}", base, count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Getting Started"), "getting-started");
    }

    #[test]
    fn punctuation_collapses_to_single_dash() {
        assert_eq!(slugify("Why use mdpress?"), "why-use-mdpress");
        assert_eq!(slugify("API v2.0"), "api-v2-0");
    }

    #[test]
    fn consecutive_separators_do_not_double_dash() {
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn leading_and_trailing_junk_trimmed() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("...done..."), "done");
    }

    #[test]
    fn digits_preserved() {
        assert_eq!(slugify("step 2 of 3"), "step-2-of-3");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn anchors_unique_within_document() {
        let mut anchors = AnchorSet::new();
        assert_eq!(anchors.assign("Usage"), "usage");
        assert_eq!(anchors.assign("Usage"), "usage-2");
        assert_eq!(anchors.assign("Usage"), "usage-3");
        assert_eq!(anchors.assign("Other"), "other");
    }

    #[test]
    fn punctuation_only_heading_gets_fallback_anchor() {
        let mut anchors = AnchorSet::new();
        assert_eq!(anchors.assign("!!!"), "section");
        assert_eq!(anchors.assign("???"), "section-2");
    }
}
