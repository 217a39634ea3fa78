// src/render/mod.rs
//! Renderer - turns raw message text into terminal lines

pub mod direction;
pub mod markdown;

use ratatui::text::Line;

use crate::theme::Palette;

pub use direction::TextDirection;
pub use markdown::MarkdownRenderer;

/// Message text is untrusted: implementations only ever produce styled text.
pub trait Renderer {
    fn render(&self, text: &str, palette: &Palette) -> Vec<Line<'static>>;
}
