//! Registration and roster endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::roster::{DaySlots, Student, DEFAULT_TIME_SLOTS, WEEK_DAYS};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Body for POST /students.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,

    #[serde(rename = "regNo")]
    pub reg_no: String,

    #[serde(rename = "rollNo")]
    pub roll_no: String,

    #[serde(rename = "timeSlots", default)]
    pub time_slots: Vec<DaySlots>,
}

impl RegisterPayload {
    /// Same checks the registration form runs: the three identity fields must
    /// not be blank. Slot selections may be empty.
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if self.reg_no.trim().is_empty() {
            return Err("Registration number is required");
        }
        if self.roll_no.trim().is_empty() {
            return Err("Roll number is required");
        }
        Ok(())
    }
}

/// POST /students
///
/// Registers a student and returns the stored record with its assigned id.
pub async fn post_register(
    State(s): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Response {
    info!("POST /students - Registering student");

    if let Err(reason) = payload.validate() {
        return ApiErrorType::from((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid registration",
            Some(reason.to_string()),
        ))
        .into_response();
    }

    let student = Student {
        id: Uuid::new_v4(),
        name: payload.name,
        reg_no: payload.reg_no,
        roll_no: payload.roll_no,
        time_slots: payload.time_slots,
    };

    info!(student_id = %student.id, "Student registered");
    s.roster.add(student.clone());

    (StatusCode::CREATED, Json(student)).into_response()
}

/// GET /students
///
/// Returns a snapshot of the full roster.
pub async fn get_students(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /students");
    (StatusCode::OK, Json(s.roster.snapshot())).into_response()
}

/// GET /students/:id
pub async fn get_student(
    Path(id): Path<Uuid>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /students/{}", id);

    match s.roster.get(id) {
        Some(student) => (StatusCode::OK, Json(student)).into_response(),
        None => ApiErrorType::from((
            StatusCode::NOT_FOUND,
            "Student not found",
            Some(format!("No student with id: {}", id)),
        ))
        .into_response(),
    }
}

/// GET /catalog
///
/// The fixed week and the suggested slot labels for registration UIs. Slots
/// remain free text on submission; nothing is validated against this list.
pub async fn get_catalog() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "days": WEEK_DAYS,
            "slots": DEFAULT_TIME_SLOTS,
        })),
    )
        .into_response()
}

/// DELETE /students
///
/// Bulk-clears the roster; the only way students are removed.
pub async fn delete_students(State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /students - Clearing roster");

    let removed = s.roster.len();
    s.roster.clear();

    (
        StatusCode::OK,
        Json(json!({ "message": "Roster cleared", "removed": removed })),
    )
        .into_response()
}
