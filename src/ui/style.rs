use ratatui::style::{Style, Stylize};

pub fn dim_unless_enabled(is_enabled: bool, style: Style) -> Style {
    if is_enabled { style.bold() } else { style.dim().italic() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn test_dim_unless_enabled() {
        let enabled = dim_unless_enabled(true, Style::default());
        let disabled = dim_unless_enabled(false, Style::default());

        assert!(enabled.add_modifier.contains(Modifier::BOLD));
        assert!(disabled.add_modifier.contains(Modifier::DIM | Modifier::ITALIC));
        assert!(!disabled.add_modifier.contains(Modifier::BOLD));
    }
}
