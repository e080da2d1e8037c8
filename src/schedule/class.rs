use serde::Deserialize;

/// A roster record as handed over by the class list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassRecord {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub room: String,
}

/// The copy of a class carried by placed grid entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSummary {
    pub id: String,
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub room: String,
}

impl ClassRecord {
    pub fn summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id.clone(),
            code: self.code.clone(),
            name: self.name.clone(),
            instructor: self.instructor.clone(),
            room: self.room.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    /// Roster used when none is configured.
    pub fn samples() -> Vec<ClassRecord> {
        vec![
            ClassRecord {
                id: "1".to_string(),
                code: "CS101".to_string(),
                name: "Introduction to Computer Science".to_string(),
                schedule: Some("MWF 9:00 AM - 10:30 AM".to_string()),
                instructor: "Dr. Smith".to_string(),
                room: "Room 301".to_string(),
            },
            ClassRecord {
                id: "2".to_string(),
                code: "MATH201".to_string(),
                name: "Advanced Calculus".to_string(),
                schedule: Some("TTH 1:00 PM - 2:30 PM".to_string()),
                instructor: "Prof. Johnson".to_string(),
                room: "Room 205".to_string(),
            },
        ]
    }
}
