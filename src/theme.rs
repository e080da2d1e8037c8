use ratatui::style::{Color, Modifier, Style};
use schedule_tui::schedule::{Customization, Rgb};

// Chrome around the grid; the grid itself follows the user's Customization.
pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BORDER_STYLE: Style = Style::new().fg(Color::Gray);
pub const FOCUS_BORDER_STYLE: Style = Style::new().fg(Color::Cyan);
pub const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
pub const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Terminal styles derived from the live Customization.
#[derive(Debug, Clone, Copy)]
pub struct GridTheme {
    pub base: Style,
    pub header: Style,
    pub time: Style,
    pub cell: Style,
    pub room: Style,
    pub cursor: Style,
}

impl GridTheme {
    pub fn from_customization(c: &Customization) -> Self {
        let bg = to_color(c.background_color);
        let fg = to_color(c.text_color);
        let accent = to_color(c.accent_color);
        let muted = to_color(c.background_color.mix(c.text_color, 0.6));

        Self {
            base: Style::default().fg(fg).bg(bg),
            header: Style::default()
                .fg(fg)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            time: Style::default().fg(muted).bg(bg),
            cell: Style::default()
                .fg(fg)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            room: Style::default().fg(fg).bg(accent),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}
