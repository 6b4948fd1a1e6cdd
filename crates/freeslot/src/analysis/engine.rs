//! Deterministic slot intersection engine.
//!
//! Computes, per weekday, the slots every registered student is free and the
//! students covering that common set. This is also the fallback the
//! orchestrator uses whenever the enrichment collaborator fails.

use crate::roster::{Student, WEEK_DAYS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Common availability for one day, derived from the full roster.
///
/// Every field defaults so a partially-shaped enrichment response still
/// deserializes; the engine itself always fills all three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonAvailability {
    #[serde(default)]
    pub day: String,

    #[serde(rename = "availableSlots", default)]
    pub available_slots: Vec<String>,

    #[serde(default)]
    pub students: Vec<String>,
}

impl CommonAvailability {
    fn none(day: &str) -> Self {
        Self {
            day: day.to_string(),
            available_slots: Vec::new(),
            students: Vec::new(),
        }
    }
}

/// Computes per-day common availability across all students.
///
/// Always returns exactly six entries, one per weekday in fixed order,
/// regardless of input size. An empty roster yields six empty entries.
///
/// Per day: if no student reported any slot, the day is the defined
/// "no availability" result. Otherwise the common set is the intersection of
/// every student's slot set, including students with nothing that day (an
/// empty set forces an empty intersection: "common" means every single
/// registered student is free). The intersection keeps the first student's
/// reported slot order with duplicates collapsed; membership is set-based, so
/// slot order differences between students do not matter.
pub fn compute_common_availability(students: &[Student]) -> Vec<CommonAvailability> {
    WEEK_DAYS
        .iter()
        .map(|&day| {
            if students.iter().all(|s| s.slots_for_day(day).is_empty()) {
                return CommonAvailability::none(day);
            }

            let mut common: Vec<String> = Vec::new();
            let mut seen: HashSet<&str> = HashSet::new();
            for slot in students[0].slots_for_day(day) {
                if seen.insert(slot.as_str()) {
                    common.push(slot.clone());
                }
            }

            for student in &students[1..] {
                let theirs: HashSet<&str> =
                    student.slots_for_day(day).iter().map(String::as_str).collect();
                common.retain(|slot| theirs.contains(slot.as_str()));
            }

            // An empty common set means nobody is jointly free, so no student
            // qualifies; the vacuous superset would otherwise admit everyone.
            let names = if common.is_empty() {
                Vec::new()
            } else {
                students_covering(students, day, &common)
            };

            CommonAvailability {
                day: day.to_string(),
                available_slots: common,
                students: names,
            }
        })
        .collect()
}

/// Returns, in roster order, the names of students whose slot set for `day`
/// is a superset of `slots`.
///
/// Re-verified as a primitive rather than assumed from the intersection,
/// because the slot set may also come pre-filtered from the enrichment path.
pub fn students_covering(students: &[Student], day: &str, slots: &[String]) -> Vec<String> {
    students
        .iter()
        .filter(|student| {
            let theirs: HashSet<&str> =
                student.slots_for_day(day).iter().map(String::as_str).collect();
            slots.iter().all(|slot| theirs.contains(slot.as_str()))
        })
        .map(|student| student.name.clone())
        .collect()
}
