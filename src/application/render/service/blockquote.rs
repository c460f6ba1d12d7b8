use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{RenderState, Segment, split_line_segments};

static QUOTE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^> (.*)$").expect("quote pattern is valid"));

/// Each `> text` line becomes its own `<blockquote>`; consecutive lines are not merged.
pub(crate) fn extract_blockquotes(segments: Vec<Segment>, state: &mut RenderState) -> Vec<Segment> {
    split_line_segments(segments, &QUOTE_LINE, |captures| {
        state.metrics.blockquotes_count += 1;
        Segment::Html(format!("<blockquote>{}</blockquote>", &captures[1]))
    })
}
