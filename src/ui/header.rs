use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::session::ChatSession;
use crate::theme::Palette;
use crate::transport::Transport;

pub fn status_text(connected: bool) -> &'static str {
    if connected { "Connected" } else { "Connecting..." }
}

pub fn render_header<T: Transport>(
    session: &ChatSession<T>,
    title: &str,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    block.render(area, buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(22)])
        .split(inner);

    let status_style = if session.is_connected() {
        Style::default().fg(palette.online)
    } else {
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC)
    };
    let heading = Line::from(vec![
        Span::styled(
            title.to_string(),
            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(palette.muted)),
        Span::styled(status_text(session.is_connected()), status_style),
    ]);
    Paragraph::new(heading).render(columns[0], buf);

    let theme_label = if session.theme().is_dark() { "☀ Light (Ctrl+T)" } else { "☾ Dark (Ctrl+T)" };
    Paragraph::new(theme_label)
        .style(Style::default().fg(palette.accent))
        .alignment(Alignment::Right)
        .render(columns[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(true), "Connected");
        assert_eq!(status_text(false), "Connecting...");
    }
}
