//! Deterministic heading slugs.
//!
//! [`slugify`] keeps ASCII word characters, whitespace, hyphens and CJK
//! ideographs (U+4E00–U+9FFF), so `"你好 World"` becomes `"你好-world"`
//! without transliteration. Repeated titles produce repeated slugs; callers
//! that need unique anchors within one document can opt into
//! [`AnchorSlugger`].

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9_\s\-\x{4E00}-\x{9FFF}]").expect("slug filter pattern is valid")
});
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("hyphen pattern is valid"));

/// Derive the anchor slug for a heading title.
///
/// Empty or punctuation-only titles yield an empty string; no fallback id is
/// synthesised.
///
/// ```
/// use inkpress::domain::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("你好 World"), "你好-world");
/// assert_eq!(slugify("?!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&filtered, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Hands out unique anchors within a single document.
///
/// Headings processed in order receive monotonic suffixes when duplicates
/// occur (`setup`, `setup-2`, `setup-3`). A suffixed anchor is never reused
/// by a later title whose own slug happens to match it. Empty slugs are
/// passed through unchanged.
#[derive(Default, Debug)]
pub struct AnchorSlugger {
    occurrences: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `title`, suffixed until it differs from every anchor handed out so far.
    pub fn anchor_for(&mut self, title: &str) -> String {
        let base = slugify(title);
        if base.is_empty() {
            return base;
        }

        let count = self.occurrences.entry(base.clone()).or_insert(0);
        let anchor = loop {
            *count += 1;
            let candidate = if *count == 1 {
                base.clone()
            } else {
                format!("{base}-{}", *count)
            };
            if !self.issued.contains(&candidate) {
                break candidate;
            }
        };

        self.issued.insert(anchor.clone());
        anchor
    }
}
