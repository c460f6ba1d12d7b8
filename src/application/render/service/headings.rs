use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    application::render::types::HeadingInfo,
    domain::slug::{AnchorSlugger, slugify},
};

use super::document::{Heading, RenderState, Segment, split_line_segments};

static HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,4}) (.+)$").expect("heading pattern is valid"));

/// Turn `#`..`####` lines into heading segments carrying their slug.
///
/// Five or more `#` characters are not a heading and stay as text.
pub(crate) fn extract_headings(
    segments: Vec<Segment>,
    unique_anchors: bool,
    state: &mut RenderState,
) -> Vec<Segment> {
    let mut slugger = unique_anchors.then(AnchorSlugger::new);

    split_line_segments(segments, &HEADING_LINE, |captures| {
        let level = captures[1].len() as u8;
        let title = captures[2].to_string();
        let slug = match slugger.as_mut() {
            Some(slugger) => slugger.anchor_for(&title),
            None => slugify(&title),
        };

        state.headings.push(HeadingInfo {
            level,
            slug: slug.clone(),
            text: title.clone(),
        });
        state.metrics.headings_count += 1;

        Segment::Heading(Heading { level, slug, title })
    })
}

pub(crate) fn build_heading(heading: &Heading) -> String {
    let Heading { level, slug, title } = heading;
    format!("<h{level} id=\"{slug}\">{title}</h{level}>")
}
