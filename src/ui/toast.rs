// src/ui/toast.rs
//! Stacked toast notifications, newest at the bottom of the stack

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use crate::session::{NotificationLevel, Notifications};
use crate::theme::Palette;

const TOAST_WIDTH: u16 = 60;
const TOAST_HEIGHT: u16 = 3;

pub fn render_toasts(notifications: &Notifications, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let mut y = area.y + 1;

    for notification in notifications.iter() {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let (color, title) = match notification.level {
            NotificationLevel::Error => (palette.error, " Error "),
            NotificationLevel::Warning => (palette.warning, " Warning "),
        };
        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);

        Clear.render(toast_area, buf);
        Paragraph::new(notification.text.as_str())
            .style(Style::default().fg(color).bg(palette.background))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .render(toast_area, buf);

        y += TOAST_HEIGHT;
    }
}
