//! Weekly schedule grid: parsing class meeting times, expanding them into
//! hourly cells, holding the placed cells, and projecting/exporting the grid.

pub mod class;
pub mod customization;
pub mod day;
pub mod export;
pub mod grid;
pub mod hour;
pub mod parser;
pub mod render;
pub mod state;

pub use class::{ClassRecord, ClassSummary};
pub use customization::{Customization, FontSize, Rgb};
pub use day::DayName;
pub use grid::{expand, GridCell, ScheduleEntry};
pub use hour::HourLabel;
pub use parser::{parse_schedule, ParseOutcome, ParseWarning, TimeRange};
pub use render::{project, CellView, GridRow, GridView};
pub use state::{AddReport, ScheduleState};
