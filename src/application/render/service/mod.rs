mod blockquote;
mod document;
mod fence;
mod headings;
mod inline;
mod lists;
mod paragraphs;

use std::{sync::Arc, time::Instant};

use metrics::{counter, histogram};
use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::trace;

use crate::application::render::types::{
    CodeEscapePolicy, OrderedListNumbering, RenderOptions, RenderOutput, RenderRequest,
    RenderService,
};

use document::{RenderState, Segment};

pub(crate) const METRIC_RENDER_TOTAL: &str = "inkpress_render_total";
pub(crate) const METRIC_RENDER_MS: &str = "inkpress_render_ms";

/// Render author markup to an HTML fragment with the default options.
///
/// Total over every input: malformed markup degrades to literal text.
///
/// ```
/// let html = inkpress::application::render::render("# Title\n\nSome text.");
/// assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Some text.</p>");
/// ```
pub fn render(content: &str) -> String {
    render_with(content, &RenderOptions::default()).html
}

/// Run the full pipeline and return the HTML together with what was found on the way.
pub fn render_with(content: &str, options: &RenderOptions) -> RenderOutput {
    let mut state = RenderState::default();

    let normalized = normalize_stage(content);
    let segments = code_fence_stage(&normalized, options.code_escape, &mut state);
    let segments = heading_stage(segments, options.unique_anchors, &mut state);
    let segments = inline_stage(segments, &mut state);
    let segments = list_stage(segments, options.ordered_lists, &mut state);
    let segments = blockquote_stage(segments, &mut state);
    let html = paragraph_stage(segments, &mut state);

    let RenderState {
        headings,
        metrics: content_metrics,
    } = state;

    trace!(
        target = "application::render",
        input_bytes = content.len(),
        output_bytes = html.len(),
        headings = content_metrics.headings_count,
        code_blocks = content_metrics.code_blocks_count,
        "markup rendered"
    );

    RenderOutput {
        html,
        contains_code: content_metrics.code_blocks_count > 0,
        headings,
        content_metrics,
    }
}

/// Shared renderer used by the binary and embedding services.
pub struct MarkupRenderService {
    options: RenderOptions,
}

impl MarkupRenderService {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Default for MarkupRenderService {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl RenderService for MarkupRenderService {
    fn render(&self, request: &RenderRequest) -> RenderOutput {
        let started_at = Instant::now();
        let options = request.options.as_ref().unwrap_or(&self.options);

        let output = render_with(&request.markup, options);

        counter!(METRIC_RENDER_TOTAL, "target" => request.target.kind()).increment(1);
        histogram!(METRIC_RENDER_MS).record(started_at.elapsed().as_secs_f64() * 1000.0);

        output
    }
}

static RENDER_SERVICE: Lazy<Arc<MarkupRenderService>> =
    Lazy::new(|| Arc::new(MarkupRenderService::new(active_render_options())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<MarkupRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_OPTIONS: OnceCell<RenderOptions> = OnceCell::new();

/// Fix the options used by [`render_service`]. Must run before its first use.
pub fn configure_render_service(options: RenderOptions) -> Result<(), RenderConfigError> {
    RENDER_OPTIONS
        .set(options)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_options() -> RenderOptions {
    RENDER_OPTIONS.get().cloned().unwrap_or_default()
}

impl From<&crate::config::RenderSettings> for RenderOptions {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            code_escape: if settings.escape_code {
                CodeEscapePolicy::Escape
            } else {
                CodeEscapePolicy::Raw
            },
            ordered_lists: settings.ordered_list_numbering,
            unique_anchors: settings.unique_anchors,
        }
    }
}

fn normalize_stage(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

fn code_fence_stage(
    source: &str,
    policy: CodeEscapePolicy,
    state: &mut RenderState,
) -> Vec<Segment> {
    fence::extract_code_blocks(source, policy, state)
}

fn heading_stage(
    segments: Vec<Segment>,
    unique_anchors: bool,
    state: &mut RenderState,
) -> Vec<Segment> {
    headings::extract_headings(segments, unique_anchors, state)
}

fn inline_stage(mut segments: Vec<Segment>, state: &mut RenderState) -> Vec<Segment> {
    inline::apply_inline(&mut segments, state);
    segments
}

fn list_stage(
    segments: Vec<Segment>,
    numbering: OrderedListNumbering,
    state: &mut RenderState,
) -> Vec<Segment> {
    lists::coalesce_lists(segments, numbering, state)
}

fn blockquote_stage(segments: Vec<Segment>, state: &mut RenderState) -> Vec<Segment> {
    blockquote::extract_blockquotes(segments, state)
}

fn paragraph_stage(segments: Vec<Segment>, state: &mut RenderState) -> String {
    paragraphs::group_paragraphs(segments, state)
}
