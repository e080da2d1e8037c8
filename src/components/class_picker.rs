use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use schedule_tui::schedule::ClassRecord;

use crate::theme;

pub struct ClassPicker;

impl ClassPicker {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        classes: &[ClassRecord],
        selected_index: usize,
        focused: bool,
    ) {
        let w = area.width as usize;

        let title = if w >= 20 {
            format!(" Classes ({}) ", classes.len())
        } else {
            " Classes ".to_string()
        };

        let border_style = if focused {
            theme::FOCUS_BORDER_STYLE
        } else {
            theme::BORDER_STYLE
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::HEADER_STYLE)
            .borders(Borders::ALL)
            .border_style(border_style);

        if classes.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No classes configured").style(theme::DIM_STYLE);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = classes
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let is_selected = i == selected_index;
                let marker = if is_selected { ">" } else { " " };
                let title_style = match (is_selected, focused) {
                    (true, true) => theme::SELECTED_STYLE,
                    (true, false) => Style::default().add_modifier(Modifier::BOLD),
                    _ => Style::default(),
                };

                let schedule = class.schedule.as_deref().unwrap_or("no meeting times");
                ListItem::new(vec![
                    Line::from(Span::styled(
                        truncate(&format!("{} {}", marker, class.display_name()), inner_w),
                        title_style,
                    )),
                    Line::from(Span::styled(
                        truncate(&format!("   {}", schedule), inner_w),
                        theme::DIM_STYLE,
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
