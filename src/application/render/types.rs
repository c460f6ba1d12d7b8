use serde::{Deserialize, Serialize};

/// Identifies what is being rendered so callers can persist results appropriately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTarget {
    /// Render the full post body.
    PostBody { slug: String },
    /// Render the author-provided summary for a post.
    PostSummary { slug: String },
    /// Render a standalone static page.
    PageBody { slug: String },
}

impl RenderTarget {
    /// Returns the slug associated with the target.
    pub fn slug(&self) -> &str {
        match self {
            RenderTarget::PostBody { slug }
            | RenderTarget::PostSummary { slug }
            | RenderTarget::PageBody { slug } => slug.as_str(),
        }
    }

    /// Short label used for metric and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderTarget::PostBody { .. } => "post_body",
            RenderTarget::PostSummary { .. } => "post_summary",
            RenderTarget::PageBody { .. } => "page_body",
        }
    }
}

/// How fenced code bodies are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeEscapePolicy {
    /// Replace `&`, `<` and `>` with entities so embedded markup stays inert.
    #[default]
    Escape,
    /// Emit the body verbatim. Legacy behaviour, opt-in only.
    Raw,
}

/// Text placed before each item produced by the `N. ` list rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderedListNumbering {
    /// Every item reads `1. …` whatever number the author typed.
    #[default]
    LiteralOne,
    /// Keep the author's number (`3. …` stays `3. …`).
    Preserve,
}

/// Knobs for the rendering pipeline. The defaults match the historical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub code_escape: CodeEscapePolicy,
    pub ordered_lists: OrderedListNumbering,
    /// Suffix repeated heading slugs (`-2`, `-3`, …) instead of reusing them.
    pub unique_anchors: bool,
}

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub target: RenderTarget,
    /// Source markup captured from the CMS/editor.
    pub markup: String,
    /// Per-request options; `None` falls back to the service configuration.
    #[serde(default)]
    pub options: Option<RenderOptions>,
}

impl RenderRequest {
    pub fn new(target: RenderTarget, markup: impl Into<String>) -> Self {
        Self {
            target,
            markup: markup.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Heading emitted by the renderer, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingInfo {
    pub level: u8,
    pub slug: String,
    /// Title exactly as the author wrote it, before inline rewriting.
    pub text: String,
}

/// Content-level metrics surfaced alongside rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentMetrics {
    pub headings_count: u32,
    pub code_blocks_count: u32,
    pub links_count: u32,
    pub images_count: u32,
    pub images_missing_alt: u32,
    pub list_items_count: u32,
    pub blockquotes_count: u32,
    pub word_count: u32,
    pub reading_time_minutes: u32,
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// HTML fragment ready to splice into a page template.
    pub html: String,
    pub headings: Vec<HeadingInfo>,
    /// Indicates whether any fenced code block was rendered.
    pub contains_code: bool,
    #[serde(default)]
    pub content_metrics: ContentMetrics,
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic, and total: every input produces some HTML.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> RenderOutput;
}
