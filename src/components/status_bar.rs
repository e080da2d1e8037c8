use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus, InputMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;

        let mode_str = match (app.input_mode, app.focus) {
            (InputMode::Customize, _) => "[Customize]",
            (InputMode::Normal, Focus::Classes) => "[Classes]",
            (InputMode::Normal, Focus::Grid) => "[Grid]",
        };
        let busy = if app.exporting { " exporting..." } else { "" };

        // Status message wins over the key hints.
        let right_text = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            match (app.input_mode, app.focus) {
                (InputMode::Customize, _) if w >= 60 => {
                    " Tab:Field #hex:Color \u{2190}/\u{2192}:Font Enter:Done Esc:Revert".to_string()
                }
                (InputMode::Normal, Focus::Classes) if w >= 80 => {
                    " jk:Select a:Add Tab:Grid c:Style e:Export ?:Help q:Quit".to_string()
                }
                (InputMode::Normal, Focus::Grid) if w >= 80 => {
                    " hjkl:Move x:Remove Tab:Classes c:Style e:Export ?:Help q:Quit".to_string()
                }
                _ if w >= 40 => " a:Add x:Remove e:Export q:Quit".to_string(),
                _ => " ?:Help q:Quit".to_string(),
            }
        };

        let left = format!(" {}{} ", mode_str, busy);
        let padding_len = w.saturating_sub(left.len() + right_text.chars().count());
        let padding = " ".repeat(padding_len);

        let line = Line::from(vec![
            Span::styled(left, theme::STATUS_STYLE),
            Span::styled(padding, theme::STATUS_STYLE),
            Span::styled(right_text, theme::STATUS_STYLE),
        ]);

        let bar = Paragraph::new(line).style(theme::STATUS_STYLE);
        frame.render_widget(bar, area);
    }
}
