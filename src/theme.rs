use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::Rgb(250, 250, 250),
                foreground: Color::Rgb(24, 24, 27),
                muted: Color::Rgb(113, 113, 122),
                border: Color::Rgb(212, 212, 216),
                accent: Color::Rgb(37, 99, 235),
                user: Color::Rgb(30, 64, 175),
                assistant: Color::Rgb(24, 24, 27),
                code: Color::Rgb(190, 18, 60),
                error: Color::Rgb(220, 38, 38),
                warning: Color::Rgb(202, 138, 4),
                online: Color::Rgb(22, 163, 74),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(9, 9, 11),
                foreground: Color::Rgb(244, 244, 245),
                muted: Color::Rgb(161, 161, 170),
                border: Color::Rgb(63, 63, 70),
                accent: Color::Rgb(96, 165, 250),
                user: Color::Rgb(147, 197, 253),
                assistant: Color::Rgb(228, 228, 231),
                code: Color::Rgb(251, 113, 133),
                error: Color::Rgb(248, 113, 113),
                warning: Color::Rgb(250, 204, 21),
                online: Color::Rgb(74, 222, 128),
            },
        }
    }
}

/// Colors used by every widget for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub code: Color,
    pub error: Color,
    pub warning: Color,
    pub online: Color,
}
