pub mod header;
pub mod input;
pub mod message_list;
pub mod style;
pub mod toast;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph, Widget},
};
use crate::app::App;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.session.theme().palette();
        self.sync_follow_tail();

        Block::new()
            .style(Style::default().bg(palette.background).fg(palette.foreground))
            .render(area, buf);

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Min(1),     // Conversation
                Constraint::Length(3),  // Input box
                Constraint::Length(1),  // Help
            ])
            .split(area);

        header::render_header(&self.session, &self.config.title, &palette, main_layout[0], buf);
        message_list::render_message_list(self, &palette, main_layout[1], buf);
        input::render_input(&self.session, &self.config.placeholder, &palette, main_layout[2], buf);

        Paragraph::new("Enter: send • Ctrl+T: theme • ↑↓ PgUp PgDn: scroll • End: latest • Esc: quit")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .render(main_layout[3], buf);

        toast::render_toasts(self.session.notifications(), &palette, area, buf);
    }
}
