//! Roster export: JSON dump and per-day CSV.

use crate::roster::Student;
use chrono::Utc;

/// CSV header, kept byte-compatible with the admin dashboard's download.
const CSV_HEADER: &str = "Id,Name,Registration Number,Roll Number,Day,Free Slots";

/// Serializes the full roster as pretty-printed JSON.
pub fn roster_to_json(students: &[Student]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(students)
}

/// Renders the roster as CSV, one row per (student, day) pair for days with
/// at least one selected slot. Slots are joined by `", "` inside a quoted
/// field; every field is quoted.
pub fn roster_to_csv(students: &[Student]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for student in students {
        for day_slots in &student.time_slots {
            if day_slots.slots.is_empty() {
                continue;
            }
            let row = [
                student.id.to_string(),
                student.name.clone(),
                student.reg_no.clone(),
                student.roll_no.clone(),
                day_slots.day.clone(),
                day_slots.slots.join(", "),
            ];
            let quoted: Vec<String> = row.iter().map(|f| csv_quote(f)).collect();
            out.push_str(&quoted.join(","));
            out.push('\n');
        }
    }

    out
}

/// Dated attachment filename matching the original dashboard's downloads.
pub fn export_file_name(extension: &str) -> String {
    format!(
        "student-timetable-data-{}.{}",
        Utc::now().format("%Y-%m-%d"),
        extension
    )
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
