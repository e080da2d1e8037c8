pub mod class_picker;
pub mod customize_panel;
pub mod schedule_grid;
pub mod status_bar;

pub use class_picker::ClassPicker;
pub use customize_panel::CustomizePanel;
pub use schedule_grid::ScheduleGrid;
pub use status_bar::StatusBar;
