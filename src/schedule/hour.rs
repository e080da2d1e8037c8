use std::fmt;

/// First hour slot of the grid (08:00).
pub const FIRST_HOUR: u8 = 8;
/// Last hour slot of the grid (21:00).
pub const LAST_HOUR: u8 = 21;
pub const SLOT_COUNT: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// One of the fixed hourly rows of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourLabel(u8);

impl HourLabel {
    pub const FIRST: HourLabel = HourLabel(FIRST_HOUR);
    pub const LAST: HourLabel = HourLabel(LAST_HOUR);

    /// `None` when the hour has no slot in the grid.
    pub fn new(hour: u8) -> Option<Self> {
        (FIRST_HOUR..=LAST_HOUR)
            .contains(&hour)
            .then_some(HourLabel(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// Row position, 0 for 08:00.
    pub fn index(self) -> usize {
        (self.0 - FIRST_HOUR) as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(FIRST_HOUR))
            .and_then(Self::new)
    }

    pub fn all() -> impl Iterator<Item = HourLabel> {
        (FIRST_HOUR..=LAST_HOUR).map(HourLabel)
    }
}

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourteen_slots_from_eight_to_twenty_one() {
        let labels: Vec<String> = HourLabel::all().map(|h| h.to_string()).collect();
        assert_eq!(labels.len(), SLOT_COUNT);
        assert_eq!(SLOT_COUNT, 14);
        assert_eq!(labels.first().map(String::as_str), Some("08:00"));
        assert_eq!(labels.last().map(String::as_str), Some("21:00"));
    }

    #[test]
    fn rejects_hours_outside_window() {
        assert!(HourLabel::new(7).is_none());
        assert!(HourLabel::new(22).is_none());
        assert_eq!(HourLabel::new(13).map(HourLabel::index), Some(5));
        assert_eq!(HourLabel::from_index(13), Some(HourLabel::LAST));
        assert_eq!(HourLabel::from_index(14), None);
    }
}
