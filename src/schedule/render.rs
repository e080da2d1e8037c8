use super::day::DayName;
use super::hour::HourLabel;
use super::state::ScheduleState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub code: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub hour: HourLabel,
    /// Indexed by `DayName::index`.
    pub cells: [Option<CellView>; 7],
}

/// Read-only picture of the weekly grid, one row per hour slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn cell(&self, day: DayName, hour: HourLabel) -> Option<&CellView> {
        self.rows.get(hour.index())?.cells[day.index()].as_ref()
    }

    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

pub fn project(state: &ScheduleState) -> GridView {
    let rows = HourLabel::all()
        .map(|hour| GridRow {
            hour,
            cells: DayName::ALL.map(|day| {
                state.class_at(day, hour).map(|class| CellView {
                    code: class.code.clone(),
                    room: class.room.clone(),
                })
            }),
        })
        .collect();

    GridView { rows }
}
