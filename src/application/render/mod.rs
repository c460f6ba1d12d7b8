//! Content renderer: author markup in, embeddable HTML fragment out.
//!
//! The pipeline is pure and synchronous. Stages run in a fixed order over a
//! segment list (code fences, headings, inline markup, lists, blockquotes,
//! paragraphs); code blocks are lifted out first so nothing later can touch
//! them. There is no error path: malformed markup degrades to literal text.

mod service;
mod types;

pub use service::{
    MarkupRenderService, RenderConfigError, configure_render_service, render, render_service,
    render_with,
};
pub use types::{
    CodeEscapePolicy, ContentMetrics, HeadingInfo, OrderedListNumbering, RenderOptions,
    RenderOutput, RenderRequest, RenderService, RenderTarget,
};
