use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use schedule_tui::schedule::{Customization, FontSize, Rgb};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleField {
    Background,
    Text,
    Accent,
    FontSize,
}

impl StyleField {
    pub fn next(&self) -> Self {
        match self {
            StyleField::Background => StyleField::Text,
            StyleField::Text => StyleField::Accent,
            StyleField::Accent => StyleField::FontSize,
            StyleField::FontSize => StyleField::Background,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            StyleField::Background => StyleField::FontSize,
            StyleField::Text => StyleField::Background,
            StyleField::Accent => StyleField::Text,
            StyleField::FontSize => StyleField::Accent,
        }
    }
}

/// Editing buffers for the four style controls. Colors are kept as text so a
/// half-typed hex value survives until it parses.
#[derive(Debug, Clone)]
pub struct CustomizeState {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub font_size: FontSize,
    pub active_field: StyleField,
    /// Values when the panel opened, restored on cancel.
    pub original: Customization,
}

impl CustomizeState {
    pub fn new(current: &Customization) -> Self {
        Self {
            background: current.background_color.to_string(),
            text: current.text_color.to_string(),
            accent: current.accent_color.to_string(),
            font_size: current.font_size,
            active_field: StyleField::Background,
            original: *current,
        }
    }

    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.active_field {
            StyleField::Background => Some(&mut self.background),
            StyleField::Text => Some(&mut self.text),
            StyleField::Accent => Some(&mut self.accent),
            StyleField::FontSize => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(buf) = self.active_buffer() {
            if buf.len() < 7 && (c == '#' || c.is_ascii_hexdigit()) {
                buf.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.active_buffer() {
            buf.pop();
        }
    }

    pub fn next_font_size(&mut self) {
        self.font_size = self.font_size.next();
    }

    pub fn prev_font_size(&mut self) {
        self.font_size = self.font_size.prev();
    }

    /// Customization with every parseable field applied on top of `current`.
    pub fn apply_to(&self, current: &Customization) -> Customization {
        Customization {
            background_color: self.background.parse().unwrap_or(current.background_color),
            text_color: self.text.parse().unwrap_or(current.text_color),
            accent_color: self.accent.parse().unwrap_or(current.accent_color),
            font_size: self.font_size,
        }
    }

    pub fn is_valid(&self) -> bool {
        [&self.background, &self.text, &self.accent]
            .iter()
            .all(|s| s.parse::<Rgb>().is_ok())
    }
}

pub struct CustomizePanel;

impl CustomizePanel {
    pub fn render(frame: &mut Frame, area: Rect, state: Option<&CustomizeState>, current: &Customization) {
        let editing = state.is_some();
        let block = Block::default()
            .title(" Customize ")
            .title_style(theme::HEADER_STYLE)
            .borders(Borders::ALL)
            .border_style(if editing {
                theme::FOCUS_BORDER_STYLE
            } else {
                theme::BORDER_STYLE
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // background
            Constraint::Length(1), // text
            Constraint::Length(1), // accent
            Constraint::Length(1), // font size
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let shown = state.cloned().unwrap_or_else(|| CustomizeState::new(current));
        let active = |field: StyleField| editing && shown.active_field == field;

        let colors = [
            ("Background:", &shown.background, current.background_color, StyleField::Background),
            ("Text:", &shown.text, current.text_color, StyleField::Text),
            ("Accent:", &shown.accent, current.accent_color, StyleField::Accent),
        ];
        for (row, (label, value, swatch, field)) in rows.iter().zip(colors) {
            render_color_field(frame, *row, label, value, swatch, active(field));
        }

        let size = format!("< {} ({}px) >", shown.font_size.label(), shown.font_size.px());
        render_field(frame, rows[3], "Font:", vec![Span::raw(size)], active(StyleField::FontSize));

        let help = if editing {
            Line::from(vec![
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Next ", theme::DIM_STYLE),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Done ", theme::DIM_STYLE),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Revert", theme::DIM_STYLE),
            ])
        } else {
            Line::from(vec![
                Span::styled("c", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Edit style", theme::DIM_STYLE),
            ])
        };
        frame.render_widget(Paragraph::new(help), rows[4]);
    }
}

fn render_color_field(frame: &mut Frame, area: Rect, label: &str, value: &str, swatch: Rgb, active: bool) {
    let cursor = if active { "_" } else { "" };
    let spans = vec![
        Span::styled("  ", Style::default().bg(theme::to_color(swatch))),
        Span::raw(format!(" {}{}", value, cursor)),
    ];
    render_field(frame, area, label, spans, active);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: Vec<Span<'static>>, active: bool) {
    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(format!("{:<12}", label), theme::DIM_STYLE)];
    spans.extend(value.into_iter().map(|s| s.patch_style(style)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hex_characters_are_accepted() {
        let mut state = CustomizeState::new(&Customization::default());
        state.background.clear();
        for c in "#zz12ab3c9".chars() {
            state.input_char(c);
        }
        assert_eq!(state.background, "#12ab3c");
    }

    #[test]
    fn partial_colors_keep_previous_value() {
        let current = Customization::default();
        let mut state = CustomizeState::new(&current);
        state.active_field = StyleField::Accent;
        state.backspace();
        assert!(!state.is_valid());
        assert_eq!(state.apply_to(&current).accent_color, current.accent_color);

        state.input_char('0');
        assert!(state.is_valid());
        assert_eq!(state.apply_to(&current).accent_color, Rgb::new(0x4f, 0x46, 0xe0));
    }

    #[test]
    fn font_size_field_ignores_typing() {
        let mut state = CustomizeState::new(&Customization::default());
        state.active_field = StyleField::FontSize;
        state.input_char('1');
        state.next_font_size();
        assert_eq!(state.font_size, FontSize::Large);
        assert_eq!(state.background, "#ffffff");
    }
}
