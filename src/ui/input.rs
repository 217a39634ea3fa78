use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::render::TextDirection;
use crate::session::ChatSession;
use crate::theme::Palette;
use crate::transport::Transport;
use crate::ui::style::dim_unless_enabled;

const CARET: &str = "▏";

pub fn render_input<T: Transport>(
    session: &ChatSession<T>,
    placeholder: &str,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let enabled = session.input_enabled();
    let border_color = if enabled { palette.accent } else { palette.border };
    let sendable = session.can_submit() && !session.input().trim().is_empty();

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title_bottom(
            Line::from(Span::styled(
                " Enter ⏎ send ",
                dim_unless_enabled(sendable, Style::default().fg(palette.accent)),
            ))
            .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    block.render(area, buf);

    let muted = Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC);
    let (line, alignment) = if !enabled {
        (Line::from(Span::styled("Connecting...", muted)), Alignment::Left)
    } else if session.input().is_empty() {
        (
            Line::from(vec![
                Span::styled(CARET, Style::default().fg(palette.accent)),
                Span::styled(placeholder.to_string(), muted),
            ]),
            Alignment::Left,
        )
    } else {
        let visible = visible_tail(session.input(), inner.width.saturating_sub(1) as usize);
        (
            Line::from(vec![
                Span::styled(visible, Style::default().fg(palette.foreground)),
                Span::styled(CARET, Style::default().fg(palette.accent)),
            ]),
            TextDirection::detect(session.input()).alignment_or(Alignment::Left),
        )
    };

    Paragraph::new(line).alignment(alignment).render(inner, buf);
}

/// The last `width` characters of `text`, so the caret stays in view.
pub fn visible_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_tail_keeps_the_end() {
        assert_eq!(visible_tail("hello world", 5), "world");
        assert_eq!(visible_tail("hi", 5), "hi");
        assert_eq!(visible_tail("سلام دنیا", 4), "دنیا");
    }
}
