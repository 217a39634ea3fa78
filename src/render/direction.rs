// src/render/direction.rs
//! Auto text direction (the terminal equivalent of `dir="auto"`)

use ratatui::layout::Alignment;
use unicode_bidi::{get_base_direction, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction of the first strong character; neutral-only text is LTR.
    pub fn detect(text: &str) -> Self {
        match get_base_direction(text) {
            Direction::Rtl => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// RTL text is pinned to the right edge; LTR text keeps the fallback.
    pub fn alignment_or(self, fallback: Alignment) -> Alignment {
        match self {
            TextDirection::Rtl => Alignment::Right,
            TextDirection::Ltr => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_latin_as_ltr() {
        assert_eq!(TextDirection::detect("I feel anxious"), TextDirection::Ltr);
    }

    #[test]
    fn test_detects_arabic_and_hebrew_as_rtl() {
        assert_eq!(TextDirection::detect("أشعر بالقلق"), TextDirection::Rtl);
        assert_eq!(TextDirection::detect("  123 שלום"), TextDirection::Rtl);
    }

    #[test]
    fn test_first_strong_character_wins() {
        assert_eq!(TextDirection::detect("hello שלום"), TextDirection::Ltr);
        assert_eq!(TextDirection::detect("שלום hello"), TextDirection::Rtl);
    }

    #[test]
    fn test_neutral_text_defaults_to_ltr() {
        assert_eq!(TextDirection::detect(""), TextDirection::Ltr);
        assert_eq!(TextDirection::detect("1234 !?"), TextDirection::Ltr);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(TextDirection::Rtl.alignment_or(Alignment::Left), Alignment::Right);
        assert_eq!(TextDirection::Ltr.alignment_or(Alignment::Center), Alignment::Center);
    }
}
