// src/render/markdown.rs
//! Markdown to styled ratatui lines
//!
//! Raw HTML is shown as literal text; nothing in a message is interpreted
//! beyond markdown formatting. Control characters never reach a span, so a
//! reply cannot emit terminal escape sequences.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::render::Renderer;
use crate::theme::Palette;
use crate::util::string::StringUtils;

#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str, palette: &Palette) -> Vec<Line<'static>> {
        let mut builder = LineBuilder::new(palette);
        for event in Parser::new_ext(text, self.options) {
            builder.handle(event);
        }
        builder.finish()
    }
}

struct LineBuilder<'p> {
    palette: &'p Palette,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// One entry per open list: the next number for ordered lists.
    lists: Vec<Option<u64>>,
    item_bullet: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    /// Destination and first span index of each open link.
    links: Vec<(String, usize)>,
    gap_before_next_block: bool,
}

impl<'p> LineBuilder<'p> {
    fn new(palette: &'p Palette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            item_bullet: None,
            quote_depth: 0,
            in_code_block: false,
            links: Vec::new(),
            gap_before_next_block: false,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    self.push_code(&text);
                } else {
                    self.push_text(text);
                }
            }
            Event::Code(code) => {
                let style = self.current_style().fg(self.palette.code);
                self.spans.push(Span::styled(StringUtils::strip_control_chars(&code), style));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = Style::default().fg(self.palette.muted);
                self.push_literal(&html, style);
            }
            Event::SoftBreak => self.spans.push(Span::raw(" ")),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.start_block();
                self.lines.push(Line::styled("────────", Style::default().fg(self.palette.muted)));
                self.gap_before_next_block = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.spans.push(Span::styled(marker, Style::default().fg(self.palette.accent)));
            }
            Event::FootnoteReference(label) => {
                self.spans.push(Span::raw(format!("[{}]", StringUtils::strip_control_chars(&label))));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.start_block(),
            Tag::Heading { level, .. } => {
                self.start_block();
                let mut style = Style::default().fg(self.palette.accent).add_modifier(Modifier::BOLD);
                if level == HeadingLevel::H1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                self.push_style(style);
            }
            Tag::BlockQuote { .. } => {
                self.start_block();
                self.quote_depth += 1;
            }
            Tag::CodeBlock { .. } => {
                self.start_block();
                self.in_code_block = true;
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.start_block();
                } else {
                    self.flush_line();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush_line();
                self.item_bullet = Some(match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let bullet = format!("{}. ", number);
                        *number += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                });
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.links.push((StringUtils::strip_control_chars(&dest_url), self.spans.len()));
                self.push_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            Tag::Image { .. } => {
                self.push_style(
                    Style::default()
                        .fg(self.palette.muted)
                        .add_modifier(Modifier::ITALIC),
                );
                self.spans.push(Span::styled("[image: ", self.current_style()));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.gap_before_next_block = true;
            }
            TagEnd::Heading { .. } => {
                self.pop_style();
                self.flush_line();
                self.gap_before_next_block = true;
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.gap_before_next_block = true;
            }
            TagEnd::CodeBlock { .. } => {
                self.in_code_block = false;
                self.gap_before_next_block = true;
            }
            TagEnd::List { .. } => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap_before_next_block = true;
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link { .. } => {
                self.pop_style();
                if let Some((url, first_span)) = self.links.pop() {
                    let label: String = self.spans[first_span.min(self.spans.len())..]
                        .iter()
                        .map(|span| span.content.as_ref())
                        .collect();
                    if !url.is_empty() && label != url {
                        self.spans.push(Span::styled(
                            format!(" ({})", url),
                            Style::default().fg(self.palette.muted),
                        ));
                    }
                }
            }
            TagEnd::Image { .. } => {
                self.spans.push(Span::styled("]", self.current_style()));
                self.pop_style();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }

    fn current_style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        let combined = self.current_style().patch(style);
        self.styles.push(combined);
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_text(&mut self, text: CowStr<'_>) {
        let style = self.current_style();
        self.spans.push(Span::styled(StringUtils::strip_control_chars(&text), style));
    }

    /// Text that may span several lines, kept verbatim.
    fn push_literal(&mut self, text: &str, style: Style) {
        let text = StringUtils::strip_control_chars(text);
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                self.spans.push(Span::styled(segment.to_string(), style));
            }
            if segments.peek().is_some() {
                self.flush_line();
            }
        }
    }

    fn push_code(&mut self, code: &str) {
        let style = Style::default().fg(self.palette.code);
        let code = StringUtils::strip_control_chars(code);
        for line in code.trim_end_matches('\n').split('\n') {
            self.spans.push(Span::styled(format!("  {}", line), style));
            self.flush_line();
        }
    }

    fn start_block(&mut self) {
        // A pending list bullet belongs to the block that follows it.
        if !self.spans.is_empty() {
            self.flush_line();
        }
        if self.gap_before_next_block && !self.lines.is_empty() && self.lists.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap_before_next_block = false;
    }

    fn flush_line(&mut self) {
        if self.spans.is_empty() && self.item_bullet.is_none() {
            return;
        }
        let mut spans = self.line_prefix();
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn line_prefix(&mut self) -> Vec<Span<'static>> {
        let mut prefix = Vec::new();
        if self.quote_depth > 0 {
            prefix.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(self.palette.muted),
            ));
        }

        let depth = self.lists.len();
        match self.item_bullet.take() {
            Some(bullet) => {
                if depth > 1 {
                    prefix.push(Span::raw("  ".repeat(depth - 1)));
                }
                prefix.push(Span::styled(bullet, Style::default().fg(self.palette.accent)));
            }
            None if depth > 0 => prefix.push(Span::raw("  ".repeat(depth))),
            None => {}
        }
        prefix
    }
}
