//! Student roster: the registration data model and the in-memory store.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// The fixed six-day week recognized by the analysis engine, in display order.
///
/// Day matching is exact-string; anything else in a student's data is ignored.
pub const WEEK_DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Default hourly slot catalog suggested to registration UIs.
///
/// Slots are free text on the wire; nothing validates against this list.
pub const DEFAULT_TIME_SLOTS: [&str; 10] = [
    "8:00-9:00",
    "9:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
    "17:00-18:00",
];

/// One student's slot selection for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlots {
    pub day: String,
    pub slots: Vec<String>,
}

/// A registered student with their weekly free-time selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,

    pub name: String,

    #[serde(rename = "regNo")]
    pub reg_no: String,

    #[serde(rename = "rollNo")]
    pub roll_no: String,

    /// At most one entry per day; days with no entry count as "no free slots".
    #[serde(rename = "timeSlots", default)]
    pub time_slots: Vec<DaySlots>,
}

impl Student {
    /// Returns the student's slot list for `day`, or an empty slice if the
    /// student has no entry for that day. Absence is never an error.
    pub fn slots_for_day(&self, day: &str) -> &[String] {
        self.time_slots
            .iter()
            .find(|ts| ts.day == day)
            .map(|ts| ts.slots.as_slice())
            .unwrap_or(&[])
    }
}

/// In-memory roster of registered students.
///
/// An owned, injectable store rather than process-global state, so tests can
/// instantiate independent rosters. Reads hand out copies: an in-flight
/// analysis works on the snapshot taken at call time and never observes
/// concurrent registrations.
#[derive(Debug, Default)]
pub struct RosterStore {
    students: RwLock<Vec<Student>>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a student to the roster. Registration order is preserved and
    /// is the order analysis results report students in.
    pub fn add(&self, student: Student) {
        self.students.write().unwrap().push(student);
    }

    /// Returns a copy of the full roster taken at call time.
    pub fn snapshot(&self) -> Vec<Student> {
        self.students.read().unwrap().clone()
    }

    /// Looks up a single student by id.
    pub fn get(&self, id: Uuid) -> Option<Student> {
        self.students
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Removes every student. The only way students leave the roster.
    pub fn clear(&self) {
        self.students.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.students.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, slots: Vec<DaySlots>) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            reg_no: format!("REG-{name}"),
            roll_no: format!("ROLL-{name}"),
            time_slots: slots,
        }
    }

    #[test]
    fn slots_for_missing_day_is_empty() {
        let s = student(
            "Asha",
            vec![DaySlots {
                day: "Monday".to_string(),
                slots: vec!["9:00-10:00".to_string()],
            }],
        );

        assert_eq!(s.slots_for_day("Monday"), ["9:00-10:00".to_string()]);
        assert!(s.slots_for_day("Tuesday").is_empty());
        assert!(s.slots_for_day("Funday").is_empty());
    }

    #[test]
    fn snapshot_is_isolated_from_later_adds() {
        let store = RosterStore::new();
        store.add(student("Asha", vec![]));

        let snap = store.snapshot();
        store.add(student("Ben", vec![]));

        assert_eq!(snap.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_empties_the_roster() {
        let store = RosterStore::new();
        store.add(student("Asha", vec![]));
        store.add(student("Ben", vec![]));
        store.clear();

        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let store = RosterStore::new();
        let s = student("Asha", vec![]);
        let id = s.id;
        store.add(s);

        assert_eq!(store.get(id).map(|s| s.name), Some("Asha".to_string()));
        assert!(store.get(Uuid::new_v4()).is_none());
    }
}
