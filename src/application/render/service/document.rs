//! Intermediate representation shared by the pipeline stages.
//!
//! A document is an ordered list of [`Segment`]s. Stages only rewrite
//! [`Segment::Text`] (and heading titles); everything else is final HTML or
//! opaque code and flows through untouched until the paragraph stage emits it
//! as a single block.

use regex::{Captures, Regex};

use crate::application::render::types::{ContentMetrics, HeadingInfo};

/// A fenced code region lifted out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CodeBlock {
    pub(crate) language: Option<String>,
    pub(crate) body: String,
}

/// A `#`..`####` heading. The title is still markup until the inline stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub(crate) level: u8,
    pub(crate) slug: String,
    pub(crate) title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Markup that later stages may still rewrite.
    Text(String),
    /// Rendered code block HTML plus its source record.
    Code { block: CodeBlock, html: String },
    Heading(Heading),
    /// Finished block-level HTML (list runs, blockquotes).
    Html(String),
}

/// Bookkeeping gathered while the stages run.
#[derive(Debug, Default)]
pub(crate) struct RenderState {
    pub(crate) headings: Vec<HeadingInfo>,
    pub(crate) metrics: ContentMetrics,
}

/// Split every text segment around the matches of `pattern`, replacing each
/// match with the segment produced by `build`. Empty text fragments are dropped.
pub(crate) fn split_text_segments<F>(
    segments: Vec<Segment>,
    pattern: &Regex,
    build: F,
) -> Vec<Segment>
where
    F: FnMut(&Captures<'_>) -> Segment,
{
    split_segments(segments, pattern, false, build)
}

/// Like [`split_text_segments`] for `(?m)^` patterns: a match at offset 0 of a
/// segment that does not begin a line is ignored.
pub(crate) fn split_line_segments<F>(
    segments: Vec<Segment>,
    pattern: &Regex,
    build: F,
) -> Vec<Segment>
where
    F: FnMut(&Captures<'_>) -> Segment,
{
    split_segments(segments, pattern, true, build)
}

/// Whether the text segment at `index` starts on a line boundary.
///
/// Only the leading segment does. No stage consumes the newline that ends its
/// match, so every later text segment either opens with that newline or
/// continues the line the previous block ended on (text right after a closing
/// fence).
pub(crate) fn begins_line(index: usize) -> bool {
    index == 0
}

fn split_segments<F>(
    segments: Vec<Segment>,
    pattern: &Regex,
    line_anchored: bool,
    mut build: F,
) -> Vec<Segment>
where
    F: FnMut(&Captures<'_>) -> Segment,
{
    let mut output = Vec::with_capacity(segments.len());

    for (index, segment) in segments.into_iter().enumerate() {
        let Segment::Text(text) = segment else {
            output.push(segment);
            continue;
        };
        let mid_line = line_anchored && !begins_line(index);

        let mut cursor = 0;
        for captures in pattern.captures_iter(&text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if mid_line && whole.start() == 0 {
                continue;
            }
            push_text(&mut output, &text[cursor..whole.start()]);
            output.push(build(&captures));
            cursor = whole.end();
        }
        push_text(&mut output, &text[cursor..]);
    }

    output
}

/// Apply `rewrite` to the body of every text segment in place. The flag tells
/// whether the segment begins a line.
pub(crate) fn map_text_segments<F>(segments: &mut [Segment], mut rewrite: F)
where
    F: FnMut(&str, bool) -> String,
{
    for (index, segment) in segments.iter_mut().enumerate() {
        if let Segment::Text(text) = segment {
            *text = rewrite(text, begins_line(index));
        }
    }
}

fn push_text(output: &mut Vec<Segment>, fragment: &str) {
    if !fragment.is_empty() {
        output.push(Segment::Text(fragment.to_string()));
    }
}
