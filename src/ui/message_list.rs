// src/ui/message_list.rs
//! Scrollable conversation view with the typing indicator

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, StatefulWidget, Widget, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState, WhichUse, BRAILLE_SIX};
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::app::App;
use crate::render::{Renderer, TextDirection};
use crate::session::{ChatSession, Message, Role};
use crate::theme::Palette;
use crate::transport::Transport;

pub fn render_message_list(app: &mut App, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width < 2 || inner.height == 0 {
        return;
    }

    // Last column is reserved for the scrollbar.
    let content_width = inner.width - 1;
    let text = conversation_text(&app.session, &app.renderer, &app.throbber, palette);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(palette.foreground).bg(palette.background))
        .wrap(Wrap { trim: false });
    let height = paragraph.line_count(content_width).clamp(1, u16::MAX as usize) as u16;

    let mut scroll_view = ScrollView::new(Size::new(content_width, height))
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

    if app.follow_tail {
        app.scroll.scroll_to_bottom();
    }
    scroll_view.render(inner, buf, &mut app.scroll);
}

/// Every message in log order, followed by the typing indicator while a reply is pending.
pub fn conversation_text<T: Transport, R: Renderer>(
    session: &ChatSession<T>,
    renderer: &R,
    throbber: &ThrobberState,
    palette: &Palette,
) -> Text<'static> {
    let mut lines = Vec::new();

    for message in session.messages() {
        lines.extend(message_lines(message, renderer, palette));
        lines.push(Line::default());
    }

    if session.is_pending() {
        let indicator = Throbber::default()
            .label(" typing")
            .style(Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC))
            .throbber_style(Style::default().fg(palette.accent))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        lines.push(indicator.to_line(throbber));
    }

    Text::from(lines)
}

pub fn message_lines<R: Renderer>(
    message: &Message,
    renderer: &R,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let (side, color) = match message.role() {
        Role::User => (Alignment::Right, palette.user),
        Role::Assistant => (Alignment::Left, palette.assistant),
    };
    let body_alignment = TextDirection::detect(message.text()).alignment_or(side);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            message.role().label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", message.timestamp().format("%H:%M")),
            Style::default().fg(palette.muted),
        ),
    ])
    .alignment(side)];

    lines.extend(
        renderer
            .render(message.text(), palette)
            .into_iter()
            .map(|line| line.patch_style(Style::default().fg(color)).alignment(body_alignment)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::render::MarkdownRenderer;
    use crate::session::SessionOptions;
    use crate::theme::Theme;
    use crate::transport::{
        transport_channel, OutboundEvent, ResponsePayload, TransportEvent, TransportSender,
    };

    #[derive(Debug)]
    struct SilentTransport;

    impl Transport for SilentTransport {
        fn open(&mut self, _events: TransportSender) -> Result<()> {
            Ok(())
        }

        fn emit(&mut self, _event: OutboundEvent) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) {}
    }

    fn connected_session() -> ChatSession<SilentTransport> {
        let (events, _receiver) = transport_channel();
        let mut session = ChatSession::initialize(SilentTransport, events, SessionOptions::default());
        session.handle_event(TransportEvent::Connected);
        session
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn render_lines<T: Transport>(session: &ChatSession<T>) -> Vec<Line<'static>> {
        conversation_text(
            session,
            &MarkdownRenderer::default(),
            &ThrobberState::default(),
            &Theme::Light.palette(),
        )
        .lines
    }

    #[test]
    fn test_typing_indicator_only_while_pending() {
        let mut session = connected_session();
        let has_indicator =
            |lines: &[Line<'static>]| lines.iter().any(|line| text_of(line).contains("typing"));

        assert!(!has_indicator(&render_lines(&session)));

        session.submit("I feel anxious");
        let lines = render_lines(&session);
        assert!(has_indicator(&lines));
        assert!(text_of(lines.last().unwrap()).contains("typing"));

        session.on_response(ResponsePayload::new("Tell me more."));
        assert!(!has_indicator(&render_lines(&session)));
    }

    #[test]
    fn test_messages_render_in_order_with_blank_separators() {
        let mut session = connected_session();
        session.submit("first");
        session.on_response(ResponsePayload::new("second"));

        let texts: Vec<String> = render_lines(&session).iter().map(text_of).collect();
        let first = texts.iter().position(|t| t == "first").unwrap();
        let second = texts.iter().position(|t| t == "second").unwrap();
        assert!(first < second);
        assert_eq!(texts[first + 1], "");
        assert!(texts[first - 1].starts_with("You · "));
        assert!(texts[second - 1].starts_with("Assistant · "));
    }

    #[test]
    fn test_sides_follow_role_and_direction() {
        let renderer = MarkdownRenderer::default();
        let palette = Theme::Dark.palette();

        let user = message_lines(&Message::new_user("hello"), &renderer, &palette);
        assert!(user.iter().all(|line| line.alignment == Some(Alignment::Right)));

        let assistant = message_lines(&Message::new_assistant("hi there"), &renderer, &palette);
        assert!(assistant.iter().all(|line| line.alignment == Some(Alignment::Left)));

        let rtl = message_lines(&Message::new_assistant("שלום, מה שלומך?"), &renderer, &palette);
        assert_eq!(rtl[0].alignment, Some(Alignment::Left));
        assert_eq!(rtl[1].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_escape_sequences_never_reach_the_buffer() {
        let mut session = connected_session();
        session.submit("hello");
        session.on_response(ResponsePayload::new("safe \x1b]0;pwned\x07 \x1b[2J text"));

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        Paragraph::new(Text::from(render_lines(&session))).render(area, &mut buf);

        let dirty: Vec<&str> = buf
            .content
            .iter()
            .map(|cell| cell.symbol())
            .filter(|symbol| symbol.chars().any(char::is_control))
            .collect();
        assert!(dirty.is_empty(), "cells with control chars: {:?}", dirty);
    }
}
