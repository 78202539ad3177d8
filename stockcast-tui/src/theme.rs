//! Neon-on-charcoal theme tokens for the dashboard.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, point forecasts)
//! - **Positive**: Neon green (gains, history)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (stale data, rate limits)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (axes, hints, disabled)

use ratatui::style::{Color, Modifier, Style};

/// Electric cyan accent.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
/// Neon green.
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
/// Hot pink.
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
/// Neon orange.
pub const WARNING: Color = Color::Rgb(255, 140, 0);
/// Cool purple.
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
/// Steel blue.
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Border style for the panel frame.
pub fn panel_border() -> Style {
    accent()
}

/// Title style for a panel frame.
pub fn panel_title() -> Style {
    accent_bold()
}

/// Style for a daily price change (green up, pink down).
pub fn change(value: f64) -> Style {
    if value >= 0.0 { positive() } else { negative() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_style_by_sign() {
        assert_eq!(change(1.5), positive());
        assert_eq!(change(-0.2), negative());
        assert_eq!(change(0.0), positive());
    }

    #[test]
    fn panel_frame_styles() {
        assert_eq!(panel_border(), accent());
        assert_eq!(panel_title(), accent_bold());
    }
}
