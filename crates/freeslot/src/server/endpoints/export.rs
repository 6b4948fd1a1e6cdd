//! Roster export endpoints.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use std::sync::Arc;
use tracing::{error, info};

use crate::export::{export_file_name, roster_to_csv, roster_to_json};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /export/json
///
/// Downloads the roster as a pretty-printed JSON attachment.
pub async fn get_export_json(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /export/json");

    let students = s.roster.snapshot();
    if students.is_empty() {
        return empty_roster_response();
    }

    match roster_to_json(&students) {
        Ok(body) => attachment("application/json", &export_file_name("json"), body),
        Err(e) => {
            error!("Failed to serialize roster: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to export roster",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// GET /export/csv
///
/// Downloads the roster as CSV, one row per (student, day-with-slots) pair.
pub async fn get_export_csv(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /export/csv");

    let students = s.roster.snapshot();
    if students.is_empty() {
        return empty_roster_response();
    }

    let body = roster_to_csv(&students);
    attachment("text/csv", &export_file_name("csv"), body)
}

fn empty_roster_response() -> Response {
    ApiErrorType::from((
        StatusCode::NOT_FOUND,
        "No data to export",
        Some("There are no students to export.".to_string()),
    ))
    .into_response()
}

fn attachment(content_type: &str, file_name: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
