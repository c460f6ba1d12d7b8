use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::application::render::types::OrderedListNumbering;

use super::document::{RenderState, Segment, map_text_segments, split_text_segments};

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*- (.*)$").expect("bullet item pattern is valid"));
static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(\d+)\. (.*)$").expect("numbered item pattern is valid"));
static ITEM_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<li>.*?</li>(?:\s*<li>.*?</li>)*").expect("item run pattern is valid")
});

/// Convert list lines to `<li>` items, then wrap each run of adjacent items in
/// one `<ul>`.
///
/// Numbered lines become items too. With [`OrderedListNumbering::LiteralOne`]
/// every such item reads `1. …`.
pub(crate) fn coalesce_lists(
    mut segments: Vec<Segment>,
    numbering: OrderedListNumbering,
    state: &mut RenderState,
) -> Vec<Segment> {
    map_text_segments(&mut segments, |text, begins_line| {
        convert_items(text, begins_line, numbering, state)
    });

    split_text_segments(segments, &ITEM_RUN, |captures| {
        Segment::Html(format!("<ul>{}</ul>", &captures[0]))
    })
}

/// Item markers are line-leading, so a match at offset 0 only counts when the
/// text begins a line.
fn convert_items(
    text: &str,
    begins_line: bool,
    numbering: OrderedListNumbering,
    state: &mut RenderState,
) -> String {
    let mid_line = |captures: &Captures<'_>| {
        !begins_line && captures.get(0).is_some_and(|m| m.start() == 0)
    };

    let bulleted = BULLET_ITEM.replace_all(text, |captures: &Captures<'_>| {
        if mid_line(captures) {
            return captures[0].to_string();
        }
        state.metrics.list_items_count += 1;
        format!("<li>{}</li>", &captures[1])
    });

    NUMBERED_ITEM
        .replace_all(&bulleted, |captures: &Captures<'_>| {
            if mid_line(captures) {
                return captures[0].to_string();
            }
            state.metrics.list_items_count += 1;
            let number = match numbering {
                OrderedListNumbering::LiteralOne => "1",
                OrderedListNumbering::Preserve => &captures[1],
            };
            format!("<li>{number}. {}</li>", &captures[2])
        })
        .into_owned()
}
