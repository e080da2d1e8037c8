use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    /// Grid column order.
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Match a day name or any abbreviation of it at least three letters
    /// long (`Thu`, `Thur`, `Thurs`), ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        if s.len() < 3 {
            return None;
        }
        Self::ALL.into_iter().find(|day| {
            day.name()
                .get(..s.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(s))
        })
    }

    /// The day whose three-letter abbreviation starts `s`, whether or not
    /// the rest of `s` spells the name.
    pub fn from_short_prefix(s: &str) -> Option<Self> {
        let head = s.get(..3)?;
        Self::ALL
            .into_iter()
            .find(|day| head.eq_ignore_ascii_case(day.short_name()))
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
