use super::class::ClassSummary;
use super::day::DayName;
use super::hour::{HourLabel, FIRST_HOUR, LAST_HOUR};
use super::parser::TimeRange;

/// Address of one grid slot. Orders by day first, then hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    pub day: DayName,
    pub hour: HourLabel,
}

impl GridCell {
    pub fn new(day: DayName, hour: HourLabel) -> Self {
        Self { day, hour }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub day: DayName,
    pub hour: HourLabel,
    pub class: ClassSummary,
}

impl ScheduleEntry {
    pub fn cell(&self) -> GridCell {
        GridCell::new(self.day, self.hour)
    }
}

/// Entries covering every `(day, hour)` of `range`, day-major. Hours outside
/// the grid window are dropped.
pub fn expand(range: &TimeRange, class: &ClassSummary) -> Vec<ScheduleEntry> {
    let start = range.start_hour.max(FIRST_HOUR);
    let end = range.end_hour.min(LAST_HOUR + 1);

    if start != range.start_hour || end != range.end_hour {
        tracing::debug!(
            class = %class.code,
            start = range.start_hour,
            end = range.end_hour,
            "clamping meeting time to grid window"
        );
    }

    range
        .days
        .iter()
        .flat_map(|&day| {
            (start..end)
                .filter_map(HourLabel::new)
                .map(move |hour| ScheduleEntry {
                    day,
                    hour,
                    class: class.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use DayName::*;

    fn class() -> ClassSummary {
        ClassSummary {
            id: "7".to_string(),
            code: "PHYS110".to_string(),
            name: "Mechanics".to_string(),
            instructor: "Dr. Noether".to_string(),
            room: "Lab 4".to_string(),
        }
    }

    fn range(days: &[DayName], start_hour: u8, end_hour: u8) -> TimeRange {
        TimeRange {
            days: days.to_vec(),
            start_hour,
            end_hour,
        }
    }

    fn hours(entries: &[ScheduleEntry], day: DayName) -> Vec<u8> {
        entries
            .iter()
            .filter(|e| e.day == day)
            .map(|e| e.hour.hour())
            .collect()
    }

    #[test]
    fn one_cell_per_hour_per_day_inside_window() {
        for start in FIRST_HOUR..=LAST_HOUR {
            for end in (start + 1)..=(LAST_HOUR + 1) {
                let entries = expand(&range(&[Monday, Thursday], start, end), &class());
                let per_day = (end - start) as usize;
                assert_eq!(entries.len(), per_day * 2, "{start}..{end}");
                assert_eq!(hours(&entries, Monday), (start..end).collect::<Vec<_>>());
                assert_eq!(hours(&entries, Thursday).len(), per_day);
            }
        }
    }

    #[test]
    fn early_start_is_clamped_to_first_slot() {
        let entries = expand(&range(&[Tuesday, Friday], 7, 9), &class());
        assert_eq!(hours(&entries, Tuesday), vec![8]);
        assert_eq!(hours(&entries, Friday), vec![8]);
    }

    #[test]
    fn late_end_is_clamped_to_last_slot() {
        let entries = expand(&range(&[Saturday], 20, 23), &class());
        assert_eq!(hours(&entries, Saturday), vec![20, 21]);
    }

    #[test]
    fn range_entirely_outside_window_yields_nothing() {
        assert!(expand(&range(&[Monday], 5, 8), &class()).is_empty());
        assert!(expand(&range(&[Monday], 22, 23), &class()).is_empty());
    }

    #[test]
    fn entries_carry_a_copy_of_the_class() {
        let entries = expand(&range(&[Wednesday], 10, 11), &class());
        assert_eq!(entries[0].class, class());
        assert_eq!(entries[0].cell(), GridCell::new(Wednesday, HourLabel::new(10).unwrap()));
    }
}
