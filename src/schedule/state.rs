use std::collections::BTreeMap;

use super::class::{ClassRecord, ClassSummary};
use super::day::DayName;
use super::grid::{expand, GridCell, ScheduleEntry};
use super::hour::HourLabel;
use super::parser::{parse_schedule, ParseWarning};

/// The placed cells of the weekly grid. Holds at most one entry per
/// `(day, hour)`; a later placement replaces whatever was there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleState {
    entries: BTreeMap<GridCell, ScheduleEntry>,
}

/// What one `add_class` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub placed: usize,
    /// Entries of other classes that were replaced.
    pub overwritten: Vec<ScheduleEntry>,
    pub warnings: Vec<ParseWarning>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: &ClassRecord) -> AddReport {
        let mut report = AddReport::default();

        let Some(schedule) = class.schedule.as_deref().filter(|s| !s.trim().is_empty()) else {
            report.warnings.push(ParseWarning::NoSchedule {
                class: class.code.clone(),
            });
            return report;
        };

        let outcome = parse_schedule(schedule);
        report.warnings = outcome.warnings;

        let summary = class.summary();
        for range in &outcome.ranges {
            for entry in expand(range, &summary) {
                if let Some(previous) = self.insert(entry) {
                    if previous.class.id != summary.id {
                        report.overwritten.push(previous);
                    }
                }
                report.placed += 1;
            }
        }

        tracing::info!(
            class = %class.code,
            placed = report.placed,
            overwritten = report.overwritten.len(),
            warnings = report.warnings.len(),
            "added class to schedule"
        );
        report
    }

    /// Place `entry`, returning the entry it replaced.
    pub fn insert(&mut self, entry: ScheduleEntry) -> Option<ScheduleEntry> {
        self.entries.insert(entry.cell(), entry)
    }

    /// Remove the entry at `(day, hour)`. Removing an empty cell does nothing.
    pub fn remove_cell(&mut self, day: DayName, hour: HourLabel) -> Option<ScheduleEntry> {
        let removed = self.entries.remove(&GridCell::new(day, hour));
        if let Some(entry) = &removed {
            tracing::info!(class = %entry.class.code, %day, %hour, "removed cell");
        }
        removed
    }

    pub fn get(&self, day: DayName, hour: HourLabel) -> Option<&ScheduleEntry> {
        self.entries.get(&GridCell::new(day, hour))
    }

    pub fn class_at(&self, day: DayName, hour: HourLabel) -> Option<&ClassSummary> {
        self.get(day, hour).map(|e| &e.class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, code: &str, schedule: Option<&str>) -> ClassRecord {
        ClassRecord {
            id: id.to_string(),
            code: code.to_string(),
            name: format!("{code} lecture"),
            schedule: schedule.map(str::to_string),
            instructor: "Staff".to_string(),
            room: format!("Room {id}"),
        }
    }

    fn hour(h: u8) -> HourLabel {
        HourLabel::new(h).unwrap()
    }

    #[test]
    fn later_class_overwrites_occupied_cell() {
        let mut state = ScheduleState::new();
        state.add_class(&record("1", "A100", Some("M 9:00 AM - 11:00 AM")));
        let report = state.add_class(&record("2", "B200", Some("M 10:00 AM - 11:00 AM")));

        assert_eq!(report.placed, 1);
        assert_eq!(report.overwritten.len(), 1);
        assert_eq!(report.overwritten[0].class.code, "A100");
        assert_eq!(state.len(), 2);
        assert_eq!(state.class_at(DayName::Monday, hour(10)).map(|c| c.code.as_str()), Some("B200"));
        assert_eq!(state.class_at(DayName::Monday, hour(9)).map(|c| c.code.as_str()), Some("A100"));
    }

    #[test]
    fn re_adding_same_class_is_not_reported_as_overwrite() {
        let mut state = ScheduleState::new();
        let class = record("1", "A100", Some("TTH 1:00 PM - 3:00 PM"));
        state.add_class(&class);
        let report = state.add_class(&class);
        assert_eq!(report.placed, 4);
        assert!(report.overwritten.is_empty());
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn remove_cell_is_idempotent() {
        let mut state = ScheduleState::new();
        state.add_class(&record("1", "A100", Some("MW 9:00 AM - 10:00 AM")));

        assert!(state.remove_cell(DayName::Monday, hour(9)).is_some());
        let after_first = state.clone();
        assert!(state.remove_cell(DayName::Monday, hour(9)).is_none());
        assert_eq!(state, after_first);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn removing_absent_cell_leaves_state_unchanged() {
        let mut state = ScheduleState::new();
        state.add_class(&record("1", "A100", Some("F 2:00 PM - 4:00 PM")));
        let before = state.clone();
        assert!(state.remove_cell(DayName::Sunday, hour(8)).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn class_without_schedule_adds_nothing() {
        let mut state = ScheduleState::new();
        for schedule in [None, Some("  ")] {
            let report = state.add_class(&record("3", "ART10", schedule));
            assert_eq!(report.placed, 0);
            assert!(matches!(report.warnings.as_slice(), [ParseWarning::NoSchedule { .. }]));
        }
        assert!(state.is_empty());
    }

    #[test]
    fn partial_schedule_places_valid_segments_and_reports_rest() {
        let mut state = ScheduleState::new();
        let report = state.add_class(&record("4", "CHEM1", Some("MW 8:00 AM - 9:00 AM, Z 1:00 PM - 2:00 PM")));
        assert_eq!(report.placed, 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(state.iter().count(), 2);
    }
}
