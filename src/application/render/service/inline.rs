//! Inline rewriting: bold, then inline code, then links, then images.
//!
//! The order is part of the output contract. Bold runs first so
//! `**[text](url)**` nests the anchor inside `<strong>`. Links may wrap a
//! whole code span, but link and image rewriting never reach inside one.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::document::{RenderState, Segment, map_text_segments};

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern is valid"));
static CODE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code>.*?</code>").expect("code span pattern is valid"));
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[([^\]\n]+)\]\(([^)\n]+)\)").expect("link pattern is valid")
});
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]+)\)").expect("image pattern is valid")
});

/// Rewrite inline markup in every text segment and heading title.
pub(crate) fn apply_inline(segments: &mut [Segment], state: &mut RenderState) {
    map_text_segments(segments, |text, _| rewrite_inline(text, state));

    for segment in segments.iter_mut() {
        if let Segment::Heading(heading) = segment {
            heading.title = rewrite_inline(&heading.title, state);
        }
    }
}

pub(crate) fn rewrite_inline(text: &str, state: &mut RenderState) -> String {
    let bolded = BOLD.replace_all(text, "<strong>$1</strong>");
    let coded = INLINE_CODE.replace_all(&bolded, "<code>$1</code>");

    let linked = replace_outside_code(&coded, &LINK, |captures| {
        if !captures[1].is_empty() {
            // `![alt](src)` belongs to the image rule.
            return None;
        }
        state.metrics.links_count += 1;
        Some(format!("<a href=\"{}\">{}</a>", &captures[3], &captures[2]))
    });

    replace_outside_code(&linked, &IMAGE, |captures| {
        state.metrics.images_count += 1;
        if captures[1].trim().is_empty() {
            state.metrics.images_missing_alt += 1;
        }
        Some(format!("<img src=\"{}\" alt=\"{}\">", &captures[2], &captures[1]))
    })
}

/// Replace matches of `pattern` unless they reach into a `<code>` span.
///
/// A match may contain whole spans (`[`x`](u)`), but one that starts inside a
/// span or cuts through its boundary is left as written. `rewrite` returning
/// `None` keeps the match text.
fn replace_outside_code<F>(text: &str, pattern: &Regex, mut rewrite: F) -> String
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let spans: Vec<Range<usize>> = CODE_SPAN.find_iter(text).map(|m| m.range()).collect();

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for captures in pattern.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let range = whole.range();
        let shielded = spans.iter().any(|span| {
            let overlaps = span.start < range.end && range.start < span.end;
            let contained = range.start <= span.start && span.end <= range.end;
            overlaps && !contained
        });
        if shielded {
            continue;
        }
        if let Some(replacement) = rewrite(&captures) {
            output.push_str(&text[cursor..range.start]);
            output.push_str(&replacement);
            cursor = range.end;
        }
    }
    output.push_str(&text[cursor..]);

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::service::document::Heading;

    fn inline(text: &str) -> String {
        rewrite_inline(text, &mut RenderState::default())
    }

    #[test]
    fn bold_is_non_greedy() {
        assert_eq!(
            inline("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn inline_code_wraps_content() {
        assert_eq!(inline("run `cargo test`"), "run <code>cargo test</code>");
    }

    #[test]
    fn bold_wraps_link_not_the_reverse() {
        assert_eq!(
            inline("**[text](https://example.com)**"),
            "<strong><a href=\"https://example.com\">text</a></strong>"
        );
    }

    #[test]
    fn links_are_not_escaped() {
        assert_eq!(
            inline("[a & b](/search?q=1&r=2)"),
            "<a href=\"/search?q=1&r=2\">a & b</a>"
        );
    }

    #[test]
    fn images_survive_link_rewriting() {
        assert_eq!(
            inline("![logo](/img/logo.png)"),
            "<img src=\"/img/logo.png\" alt=\"logo\">"
        );
    }

    #[test]
    fn image_and_link_side_by_side() {
        let mut state = RenderState::default();
        let html = rewrite_inline("![a](x.png) then [b](y)", &mut state);

        assert_eq!(
            html,
            "<img src=\"x.png\" alt=\"a\"> then <a href=\"y\">b</a>"
        );
        assert_eq!(state.metrics.images_count, 1);
        assert_eq!(state.metrics.links_count, 1);
    }

    #[test]
    fn empty_alt_is_counted() {
        let mut state = RenderState::default();
        let html = rewrite_inline("![](x.png)", &mut state);

        assert_eq!(html, "<img src=\"x.png\" alt=\"\">");
        assert_eq!(state.metrics.images_missing_alt, 1);
    }

    #[test]
    fn code_spans_are_shielded_from_links() {
        assert_eq!(
            inline("`[not](a-link)` but [this](is)"),
            "<code>[not](a-link)</code> but <a href=\"is\">this</a>"
        );
    }

    #[test]
    fn link_text_may_be_a_code_span() {
        let mut state = RenderState::default();
        let html = rewrite_inline("See [`render`](/docs/render) for details.", &mut state);

        assert_eq!(
            html,
            "See <a href=\"/docs/render\"><code>render</code></a> for details."
        );
        assert_eq!(state.metrics.links_count, 1);
    }

    #[test]
    fn image_alt_inside_code_span_stays_literal() {
        assert_eq!(
            inline("`![x](y.png)` and ![z](w.png)"),
            "<code>![x](y.png)</code> and <img src=\"w.png\" alt=\"z\">"
        );
    }

    #[test]
    fn link_cutting_into_a_code_span_stays_literal() {
        assert_eq!(
            inline("[a `b](c)` d"),
            "[a <code>b](c)</code> d"
        );
    }

    #[test]
    fn malformed_references_stay_literal() {
        assert_eq!(inline("[text](missing"), "[text](missing");
        assert_eq!(inline("[text]"), "[text]");
        assert_eq!(inline("![alt(src)"), "![alt(src)");
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(inline("**open"), "**open");
        assert_eq!(inline("`open"), "`open");
    }

    #[test]
    fn heading_titles_are_rewritten() {
        let mut segments = vec![Segment::Heading(Heading {
            level: 2,
            slug: "bold-title".to_string(),
            title: "**Bold** title".to_string(),
        })];
        apply_inline(&mut segments, &mut RenderState::default());

        let Segment::Heading(heading) = &segments[0] else {
            panic!("expected heading");
        };
        assert_eq!(heading.title, "<strong>Bold</strong> title");
        assert_eq!(heading.slug, "bold-title");
    }
}
