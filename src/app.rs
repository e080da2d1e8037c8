use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use schedule_tui::config::Config;
use schedule_tui::schedule::{
    export::export_png, project, ClassRecord, Customization, DayName, GridCell, GridView,
    HourLabel, ScheduleState,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::components::customize_panel::CustomizeState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Classes,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Customize,
}

type ExportResult = Result<Option<PathBuf>>;

/// Owns the schedule for the session. Every mutation goes through here; the
/// components only read.
pub struct App {
    pub running: bool,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub classes: Vec<ClassRecord>,
    pub selected_class: usize,
    pub schedule: ScheduleState,
    pub customization: Customization,
    pub cursor: GridCell,
    pub customize_form: Option<CustomizeState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Projection drawn in the last frame; what export captures.
    pub rendered: Option<GridView>,
    pub exporting: bool,
    export_dir: PathBuf,
    export_tx: UnboundedSender<ExportResult>,
    export_rx: UnboundedReceiver<ExportResult>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (export_tx, export_rx) = mpsc::unbounded_channel();

        Self {
            running: true,
            focus: Focus::Classes,
            input_mode: InputMode::Normal,
            classes: config.classes,
            selected_class: 0,
            schedule: ScheduleState::new(),
            customization: config.customization,
            cursor: GridCell::new(DayName::Monday, HourLabel::FIRST),
            customize_form: None,
            status_message: None,
            show_help: false,
            rendered: None,
            exporting: false,
            export_dir: config.export_dir,
            export_tx,
            export_rx,
        }
    }

    pub fn view(&self) -> GridView {
        project(&self.schedule)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Classes => Focus::Grid,
            Focus::Grid => Focus::Classes,
        };
    }

    // ── class selection ──

    pub fn next_class(&mut self) {
        if !self.classes.is_empty() {
            self.selected_class = (self.selected_class + 1) % self.classes.len();
        }
    }

    pub fn prev_class(&mut self) {
        if !self.classes.is_empty() {
            self.selected_class = self
                .selected_class
                .checked_sub(1)
                .unwrap_or(self.classes.len() - 1);
        }
    }

    pub fn add_selected_class(&mut self) {
        let Some(class) = self.classes.get(self.selected_class) else {
            self.status_message = Some("No class selected".to_string());
            return;
        };

        let report = self.schedule.add_class(class);
        for warning in &report.warnings {
            tracing::warn!(class = %class.code, %warning, "schedule segment skipped");
        }

        let mut msg = format!(
            "Added {} ({} cell{})",
            class.code,
            report.placed,
            if report.placed == 1 { "" } else { "s" }
        );
        if !report.overwritten.is_empty() {
            msg.push_str(&format!(", replaced {}", report.overwritten.len()));
        }
        if let Some(first) = report.warnings.first() {
            msg.push_str(&format!(" - {}", first));
        }
        self.status_message = Some(msg);
    }

    // ── grid cursor ──

    pub fn cursor_left(&mut self) {
        if let Some(day) = self.cursor.day.index().checked_sub(1).and_then(DayName::from_index) {
            self.cursor.day = day;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(day) = DayName::from_index(self.cursor.day.index() + 1) {
            self.cursor.day = day;
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some(hour) = self.cursor.hour.index().checked_sub(1).and_then(HourLabel::from_index) {
            self.cursor.hour = hour;
        }
    }

    pub fn cursor_down(&mut self) {
        if let Some(hour) = HourLabel::from_index(self.cursor.hour.index() + 1) {
            self.cursor.hour = hour;
        }
    }

    pub fn remove_cursor_cell(&mut self) {
        let GridCell { day, hour } = self.cursor;
        if let Some(entry) = self.schedule.remove_cell(day, hour) {
            self.status_message = Some(format!("Removed {} from {} {}", entry.class.code, day, hour));
        }
    }

    // ── customization ──

    pub fn open_customize(&mut self) {
        self.customize_form = Some(CustomizeState::new(&self.customization));
        self.input_mode = InputMode::Customize;
    }

    /// Keep the grid in step with the form while typing.
    fn apply_customize_form(&mut self) {
        if let Some(ref form) = self.customize_form {
            self.customization = form.apply_to(&self.customization);
        }
    }

    pub fn finish_customize(&mut self) {
        if let Some(form) = self.customize_form.take() {
            self.customization = form.apply_to(&self.customization);
            if !form.is_valid() {
                self.status_message = Some("Incomplete colors were left unchanged".to_string());
            }
            tracing::info!(customization = ?self.customization, "customization updated");
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_customize(&mut self) {
        if let Some(form) = self.customize_form.take() {
            self.customization = form.original;
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.customize_form {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.customize_form {
            form.active_field = form.active_field.prev();
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.customize_form {
            form.input_char(c);
        }
        self.apply_customize_form();
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.customize_form {
            form.backspace();
        }
        self.apply_customize_form();
    }

    pub fn form_next_font_size(&mut self) {
        if let Some(ref mut form) = self.customize_form {
            form.next_font_size();
        }
        self.apply_customize_form();
    }

    pub fn form_prev_font_size(&mut self) {
        if let Some(ref mut form) = self.customize_form {
            form.prev_font_size();
        }
        self.apply_customize_form();
    }

    // ── export ──

    /// Encode the last drawn grid on a blocking task. The event loop picks
    /// the outcome up in `poll_export`.
    pub fn start_export(&mut self) {
        if self.exporting {
            self.status_message = Some("Export already running".to_string());
            return;
        }

        let view = self.rendered.clone();
        let customization = self.customization;
        let dir = self.export_dir.clone();
        self.spawn_export_job(move || export_png(view.as_ref(), &customization, &dir));
    }

    // A panic inside the job is sent back as an error so `exporting` clears.
    fn spawn_export_job(&mut self, job: impl FnOnce() -> ExportResult + Send + 'static) {
        let tx = self.export_tx.clone();
        self.exporting = true;
        tokio::task::spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(job))
                .unwrap_or_else(|_| Err(eyre!("export task panicked")));
            let _ = tx.send(result);
        });
    }

    pub fn poll_export(&mut self) {
        while let Ok(result) = self.export_rx.try_recv() {
            self.exporting = false;
            match result {
                Ok(Some(path)) => {
                    self.status_message = Some(format!("Saved {}", path.display()));
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(error = ?err, "export failed");
                    self.status_message = Some(format!("Export failed: {}", err));
                }
            }
        }
    }
}
