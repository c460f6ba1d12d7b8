use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::application::render::types::CodeEscapePolicy;

use super::document::{CodeBlock, RenderState, Segment};

const FENCE: &str = "```";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([\w+#.\-]+)?\n(.*?)```").expect("code fence pattern is valid")
});

/// Lift every closed fenced block out of the source as a finished code segment.
///
/// An opening fence without a closing one stays in the text untouched.
pub(crate) fn extract_code_blocks(
    source: &str,
    policy: CodeEscapePolicy,
    state: &mut RenderState,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in CODE_FENCE.captures_iter(source) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::Text(source[cursor..whole.start()].to_string()));
        }

        let body = captures.get(2).map_or("", |m| m.as_str());
        let block = CodeBlock {
            language: captures.get(1).map(|m| m.as_str().to_string()),
            body: body.strip_suffix('\n').unwrap_or(body).to_string(),
        };
        trace!(
            target = "application::render::fence",
            language = block.language.as_deref().unwrap_or("text"),
            lines = block.body.lines().count(),
            "code block extracted"
        );
        let html = build_code_block(&block, policy);
        segments.push(Segment::Code { block, html });
        state.metrics.code_blocks_count += 1;

        cursor = whole.end();
    }

    let rest = &source[cursor..];
    if rest.contains(FENCE) {
        debug!(
            target = "application::render::fence",
            offset = cursor,
            "unterminated code fence left as literal text"
        );
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }

    segments
}

/// Header row (language label and copy button) above a `<pre><code>` body.
pub(crate) fn build_code_block(block: &CodeBlock, policy: CodeEscapePolicy) -> String {
    let body = match policy {
        CodeEscapePolicy::Escape => escape_code(&block.body),
        CodeEscapePolicy::Raw => block.body.clone(),
    };
    let label = block.language.as_deref().unwrap_or("text");

    let mut html = String::from("<div class=\"code-block\"");
    if let Some(language) = block.language.as_deref() {
        html.push_str(" data-language=\"");
        html.push_str(language);
        html.push('"');
    }
    html.push_str("><div class=\"code-block-header\"><span class=\"code-block-language\">");
    html.push_str(label);
    html.push_str("</span><button type=\"button\" class=\"code-block-copy\" data-role=\"code-copy-button\">Copy</button></div><pre><code");
    if let Some(language) = block.language.as_deref() {
        html.push_str(" class=\"language-");
        html.push_str(language);
        html.push('"');
    }
    html.push('>');
    html.push_str(&body);
    html.push_str("</code></pre></div>");
    html
}

fn escape_code(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str, policy: CodeEscapePolicy) -> (Vec<Segment>, RenderState) {
        let mut state = RenderState::default();
        let segments = extract_code_blocks(source, policy, &mut state);
        (segments, state)
    }

    #[test]
    fn captures_language_and_body() {
        let (segments, state) = extract("```js\nconsole.log(1)\n```", CodeEscapePolicy::Escape);

        assert_eq!(segments.len(), 1);
        let Segment::Code { block, html } = &segments[0] else {
            panic!("expected a code segment, got {segments:?}");
        };
        assert_eq!(block.language.as_deref(), Some("js"));
        assert_eq!(block.body, "console.log(1)");
        assert!(html.contains("data-language=\"js\""));
        assert!(html.contains("<code class=\"language-js\">console.log(1)</code>"));
        assert!(html.contains("data-role=\"code-copy-button\""));
        assert_eq!(state.metrics.code_blocks_count, 1);
    }

    #[test]
    fn missing_language_uses_plain_label() {
        let (segments, _) = extract("```\nplain\n```", CodeEscapePolicy::Escape);

        let Segment::Code { block, html } = &segments[0] else {
            panic!("expected a code segment");
        };
        assert_eq!(block.language, None);
        assert!(html.starts_with("<div class=\"code-block\"><div class=\"code-block-header\">"));
        assert!(html.contains("<span class=\"code-block-language\">text</span>"));
        assert!(html.contains("<pre><code>plain</code></pre>"));
    }

    #[test]
    fn escape_policy_neutralises_markup() {
        let (segments, _) = extract("```html\n<b>&</b>\n```", CodeEscapePolicy::Escape);
        let Segment::Code { html, .. } = &segments[0] else {
            panic!("expected a code segment");
        };
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn raw_policy_keeps_body_verbatim() {
        let (segments, _) = extract("```html\n<b>x</b>\n```", CodeEscapePolicy::Raw);
        let Segment::Code { html, .. } = &segments[0] else {
            panic!("expected a code segment");
        };
        assert!(html.contains("<code class=\"language-html\"><b>x</b></code>"));
    }

    #[test]
    fn surrounding_text_is_kept_in_order() {
        let (segments, _) = extract(
            "intro\n```rust\nfn main() {}\n```\noutro",
            CodeEscapePolicy::Escape,
        );

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Text("intro\n".to_string()));
        assert!(matches!(segments[1], Segment::Code { .. }));
        assert_eq!(segments[2], Segment::Text("\noutro".to_string()));
    }

    #[test]
    fn body_is_non_greedy_between_fences() {
        let (segments, state) = extract("```a\none\n```\n\n```b\ntwo\n```", CodeEscapePolicy::Escape);

        let bodies: Vec<_> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Code { block, .. } => Some(block.body.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bodies, vec!["one", "two"]);
        assert_eq!(state.metrics.code_blocks_count, 2);
    }

    #[test]
    fn language_tokens_allow_symbols() {
        let (segments, _) = extract("```c++\nint x;\n```", CodeEscapePolicy::Escape);
        let Segment::Code { block, .. } = &segments[0] else {
            panic!("expected a code segment");
        };
        assert_eq!(block.language.as_deref(), Some("c++"));
    }

    #[test]
    fn unterminated_fence_stays_text() {
        let source = "```js\nconsole.log(1)";
        let (segments, state) = extract(source, CodeEscapePolicy::Escape);

        assert_eq!(segments, vec![Segment::Text(source.to_string())]);
        assert_eq!(state.metrics.code_blocks_count, 0);
    }
}
