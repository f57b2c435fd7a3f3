//! Color and emphasis for every screen.
//!
//! Colors can be turned off with `--no-color` or `NO_COLOR`; emphasis
//! (bold, reverse, dim) stays so the selection remains visible.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether widgets may use color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Off when `--no-color` was passed or `NO_COLOR` is set to a
    /// non-empty value (<https://no-color.org>), on otherwise.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let env_disables = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self {
            enabled: !no_color_flag && !env_disables,
        }
    }

    /// Colors on or off regardless of the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether colors are on.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::fixed(true)
    }
}

// ===== Palette =====

/// Styles used by the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Top bar.
    pub header: Style,
    /// Section and post titles.
    pub title: Style,
    /// Secondary text: hints, placeholders, timestamps.
    pub muted: Style,
    /// Error messages.
    pub error: Style,
    /// Selected list row.
    pub selected: Style,
    /// Focused input border.
    pub focused: Style,
    /// Unfocused input border.
    pub unfocused: Style,
    /// Key names in hints and help.
    pub key: Style,
    /// The current page button.
    pub current_page: Style,
    /// Clickable page buttons.
    pub button: Style,
    /// Disabled Previous/Next.
    pub disabled: Style,
    /// Text cursor in inputs.
    pub cursor: Style,
}

impl Palette {
    /// Palette for `config`.
    pub fn new(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                title: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                selected: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                focused: Style::default().fg(Color::Yellow),
                unfocused: Style::default().fg(Color::Gray),
                key: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                current_page: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                button: Style::default().fg(Color::White),
                disabled: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                title: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::BOLD),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                focused: Style::default().add_modifier(Modifier::BOLD),
                unfocused: Style::default(),
                key: Style::default().add_modifier(Modifier::BOLD),
                current_page: Style::default().add_modifier(Modifier::REVERSED),
                button: Style::default(),
                disabled: Style::default().add_modifier(Modifier::DIM),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color_env)]
    fn no_color_flag_disables_colors() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn no_color_env_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let disabled = ColorConfig::from_env_and_args(false);
        std::env::set_var("NO_COLOR", "");
        let empty = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");

        assert!(!disabled.colors_enabled());
        assert!(empty.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn colors_default_to_on() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn colorless_palette_has_no_foreground_colors() {
        let palette = Palette::new(ColorConfig::fixed(false));
        for style in [palette.header, palette.error, palette.selected, palette.key] {
            assert_eq!(style.fg, None);
            assert_eq!(style.bg, None);
        }
    }

    #[test]
    fn selection_stays_distinct_without_colors() {
        let palette = Palette::new(ColorConfig::fixed(false));
        assert_ne!(palette.selected, palette.button);
        assert_ne!(palette.current_page, palette.button);
    }
}
