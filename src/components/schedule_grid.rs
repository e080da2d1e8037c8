use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use schedule_tui::schedule::{DayName, FontSize, GridCell, GridView};

use crate::theme::{self, GridTheme};

pub struct ScheduleGrid;

impl ScheduleGrid {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view: &GridView,
        grid_theme: &GridTheme,
        font_size: FontSize,
        cursor: Option<GridCell>,
    ) {
        let block = Block::default()
            .title(format!(
                " Schedule ({} cells, {} font) ",
                view.occupied(),
                font_size.label()
            ))
            .title_style(theme::HEADER_STYLE)
            .borders(Borders::ALL)
            .border_style(if cursor.is_some() {
                theme::FOCUS_BORDER_STYLE
            } else {
                theme::BORDER_STYLE
            })
            .style(grid_theme.base);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 10 || inner.height < 3 {
            return;
        }

        let inner_w = inner.width as usize;
        let inner_h = inner.height as usize;

        // Time label column width
        let time_col_w: u16 = if inner_w >= 70 { 6 } else { 3 };
        let day_cols_w = inner.width.saturating_sub(time_col_w);
        let col_w = (day_cols_w / 7).max(1);

        let mut col_constraints = vec![Constraint::Length(time_col_w)];
        for _ in 0..7 {
            col_constraints.push(Constraint::Length(col_w));
        }
        col_constraints.push(Constraint::Min(0));

        let cols = Layout::horizontal(col_constraints).split(inner);

        // One header row, then as many rows per hour as fit.
        let content_rows = inner_h.saturating_sub(1);
        let total_hours = view.rows.len().max(1);
        let rows_per_hour = (content_rows / total_hours).max(1);
        let visible_hours = (content_rows / rows_per_hour).min(total_hours);

        let mut row_constraints = vec![Constraint::Length(1)];
        for _ in 0..visible_hours {
            row_constraints.push(Constraint::Length(rows_per_hour as u16));
        }
        row_constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(row_constraints).split(inner);

        // Keep the cursor row on screen when not every hour fits.
        let first_hour = cursor
            .map(|c| (c.hour.index() + 1).saturating_sub(visible_hours))
            .unwrap_or(0);

        let header_time = if time_col_w >= 6 { "Time" } else { "" };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{:<width$}", header_time, width = time_col_w as usize),
                grid_theme.header,
            ))),
            cols[0].intersection(rows[0]),
        );

        for day in DayName::ALL {
            let col_idx = day.index() + 1;
            let label = if col_w >= 11 {
                day.name()
            } else if col_w >= 4 {
                day.short_name()
            } else {
                &day.name()[..1]
            };
            let para = Paragraph::new(Line::from(Span::styled(
                format!("{:^width$}", label, width = col_w as usize),
                grid_theme.header,
            )));
            frame.render_widget(para, cols[col_idx].intersection(rows[0]));
        }

        for (slot, row) in view.rows.iter().skip(first_hour).take(visible_hours).enumerate() {
            let row_area = rows[slot + 1];

            let time_label = if time_col_w >= 6 {
                format!("{} ", row.hour)
            } else {
                format!("{:>2} ", row.hour.hour())
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(time_label, grid_theme.time))),
                cols[0].intersection(row_area),
            );

            for day in DayName::ALL {
                let cell_area = cols[day.index() + 1].intersection(row_area);
                if cell_area.width == 0 || cell_area.height == 0 {
                    continue;
                }

                let width = cell_area.width as usize;
                let selected = cursor == Some(GridCell::new(day, row.hour));

                let mut lines = match &row.cells[day.index()] {
                    Some(cell) => {
                        let mut lines = vec![Line::from(Span::styled(
                            pad(&cell.code, width),
                            grid_theme.cell,
                        ))];
                        if rows_per_hour >= 2 {
                            lines.push(Line::from(Span::styled(pad(&cell.room, width), grid_theme.room)));
                        } else if width >= cell.code.len() + cell.room.len() + 2 {
                            lines = vec![Line::from(vec![
                                Span::styled(format!("{} ", cell.code), grid_theme.cell),
                                Span::styled(
                                    pad(&cell.room, width - cell.code.len() - 1),
                                    grid_theme.room,
                                ),
                            ])];
                        }
                        lines
                    }
                    None => vec![Line::from(Span::styled(" ".repeat(width), grid_theme.base))],
                };

                if selected {
                    for line in &mut lines {
                        for span in &mut line.spans {
                            span.style = span.style.patch(grid_theme.cursor);
                        }
                    }
                }

                frame.render_widget(Paragraph::new(lines), cell_area);
            }
        }
    }
}

/// Left-align `s` in exactly `width` columns.
fn pad(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}
