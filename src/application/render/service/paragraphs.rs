use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    document::{RenderState, Segment},
    headings::build_heading,
};

const BLOCK_SEPARATOR: &str = "\n\n";
const WORDS_PER_MINUTE: f32 = 225.0;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Final stage: flatten the segments into the output fragment.
///
/// Text segments are split on blank lines; each trimmed, non-empty block is
/// wrapped in `<p>` unless it already starts with `<`. Every other segment is
/// exactly one block. Blocks are joined with a single newline.
pub(crate) fn group_paragraphs(segments: Vec<Segment>, state: &mut RenderState) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Text(text) => {
                for block in text.split(BLOCK_SEPARATOR) {
                    let block = block.trim();
                    if block.is_empty() {
                        continue;
                    }
                    count_words(block, state);
                    if block.starts_with('<') {
                        blocks.push(block.to_string());
                    } else {
                        blocks.push(format!("<p>{block}</p>"));
                    }
                }
            }
            Segment::Heading(heading) => {
                count_words(&heading.title, state);
                blocks.push(build_heading(&heading));
            }
            Segment::Html(html) => {
                count_words(&html, state);
                blocks.push(html);
            }
            Segment::Code { html, .. } => blocks.push(html),
        }
    }

    state.metrics.reading_time_minutes = reading_time(state.metrics.word_count);
    blocks.join("\n")
}

fn count_words(html: &str, state: &mut RenderState) {
    let visible = TAG.replace_all(html, " ");
    let words = visible.split_whitespace().count() as u32;
    state.metrics.word_count = state.metrics.word_count.saturating_add(words);
}

fn reading_time(word_count: u32) -> u32 {
    if word_count == 0 {
        0
    } else {
        ((word_count as f32 / WORDS_PER_MINUTE).ceil() as u32).max(1)
    }
}
