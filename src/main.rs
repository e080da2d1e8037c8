mod app;
mod components;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, Focus, InputMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use schedule_tui::config::Config;

use crate::components::customize_panel::StyleField;

// The loop below is synchronous; the runtime only hosts export tasks.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let log_path = logging::init()?;
    let config = Config::load()?;
    tracing::info!(
        classes = config.classes.len(),
        export_dir = %config.export_dir.display(),
        log = ?log_path,
        "starting"
    );

    let mut app = App::new(config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.poll_export();

        let view = app.view();
        let grid_theme = theme::GridTheme::from_customization(&app.customization);

        terminal.draw(|frame| {
            let area = frame.area();

            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            let sidebar_w = if area.width >= 100 { 36 } else { 28 };
            let content = Layout::horizontal([Constraint::Length(sidebar_w), Constraint::Min(20)])
                .split(layout[0]);

            let sidebar = Layout::vertical([Constraint::Min(4), Constraint::Length(7)])
                .split(content[0]);

            components::ClassPicker::render(
                frame,
                sidebar[0],
                &app.classes,
                app.selected_class,
                app.focus == Focus::Classes && app.input_mode == InputMode::Normal,
            );
            components::CustomizePanel::render(
                frame,
                sidebar[1],
                app.customize_form.as_ref(),
                &app.customization,
            );

            let cursor = (app.focus == Focus::Grid && app.input_mode == InputMode::Normal)
                .then_some(app.cursor);
            components::ScheduleGrid::render(
                frame,
                content[1],
                &view,
                &grid_theme,
                app.customization.font_size,
                cursor,
            );

            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(frame, layout[1], app);
        })?;
        app.rendered = Some(view);

        if let Some(key) = event::next_key_press(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Customize => handle_customize_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => app.toggle_focus(),
        (KeyCode::Char('a'), _) => app.add_selected_class(),
        (KeyCode::Char('c'), _) => app.open_customize(),
        (KeyCode::Char('e'), _) => app.start_export(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => match app.focus {
            Focus::Classes => handle_class_input(app, code),
            Focus::Grid => handle_grid_input(app, code),
        },
    }
}

fn handle_class_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.prev_class(),
        KeyCode::Down | KeyCode::Char('j') => app.next_class(),
        KeyCode::Enter => app.add_selected_class(),
        _ => {}
    }
}

fn handle_grid_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => app.cursor_left(),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_right(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => app.remove_cursor_cell(),
        _ => {}
    }
}

fn handle_customize_input(app: &mut App, code: KeyCode) {
    let on_font_size = app
        .customize_form
        .as_ref()
        .is_some_and(|f| f.active_field == StyleField::FontSize);

    match code {
        KeyCode::Esc => app.cancel_customize(),
        KeyCode::Enter => app.finish_customize(),
        KeyCode::Tab | KeyCode::Down => app.form_tab(),
        KeyCode::BackTab | KeyCode::Up => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Right | KeyCode::Char(' ') if on_font_size => app.form_next_font_size(),
        KeyCode::Left if on_font_size => app.form_prev_font_size(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.clamp(30, 54);
    let popup_h = area.height.clamp(12, 24);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Classes", section_style)),
        entry("j/k", "Select class"),
        entry("a/Enter", "Add class to schedule"),
        Line::from(""),
        Line::from(Span::styled("Grid", section_style)),
        entry("Tab", "Switch between classes and grid"),
        entry("h/j/k/l", "Move cell cursor"),
        entry("x/Del", "Remove cell"),
        Line::from(""),
        Line::from(Span::styled("Style & export", section_style)),
        entry("c", "Edit colors and font size"),
        entry("e", "Export grid as my-schedule.png"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
