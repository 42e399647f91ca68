//! Inline markup rendering using pulldown-cmark.
//!
//! Only inline formatting is interpreted: strong, emphasis, strikethrough,
//! code spans and link text. Every source line becomes exactly one output
//! line, so newlines and blank lines survive. A line that would parse as a
//! block construct (heading, list item, quote, rule) is kept verbatim.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use super::styles::MarkupStyles;

/// Render text with inline markup to styled Lines, one per source line.
pub fn render_markup(input: &str, base: Style) -> Vec<Line<'static>> {
    let styles = MarkupStyles::from_base(base);
    input
        .split('\n')
        .map(|line| render_line(line.trim_end_matches('\r'), &styles))
        .collect()
}

fn render_line(source: &str, styles: &MarkupStyles) -> Line<'static> {
    let body = source.trim_start();
    let indent = &source[..source.len() - body.len()];

    let mut spans = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::styled(indent.to_string(), styles.text));
    }
    if !body.is_empty() {
        match inline_spans(body, styles) {
            Some(inline) if !inline.is_empty() => spans.extend(inline),
            _ => spans.push(Span::styled(body.to_string(), styles.text)),
        }
    }
    Line::from(spans)
}

/// Inline spans for one line, or `None` if it contains block markup.
fn inline_spans(body: &str, styles: &MarkupStyles) -> Option<Vec<Span<'static>>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut stack: Vec<Style> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let current = |stack: &[Style]| stack.iter().fold(styles.text, |acc, s| acc.patch(*s));

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {}
            Event::Start(Tag::Strong) => stack.push(styles.strong),
            Event::Start(Tag::Emphasis) => stack.push(styles.emphasis),
            Event::Start(Tag::Strikethrough) => stack.push(styles.strikethrough),
            Event::Start(Tag::Link { .. }) => stack.push(styles.link),
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link) => {
                stack.pop();
            }
            Event::Text(text) | Event::InlineHtml(text) => {
                push_merged(&mut spans, &text, current(&stack));
            }
            Event::Code(code) => {
                push_merged(&mut spans, &code, current(&stack).patch(styles.code));
            }
            Event::SoftBreak | Event::HardBreak => push_merged(&mut spans, " ", current(&stack)),
            _ => return None,
        }
    }
    Some(spans)
}

/// Append `text`, extending the last span when the style matches.
fn push_merged(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if let Some(last) = spans.last_mut() {
        if last.style == style {
            last.content.to_mut().push_str(text);
            return;
        }
    }
    spans.push(Span::styled(text.to_string(), style));
}
