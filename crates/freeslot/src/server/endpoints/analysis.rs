//! Common-availability analysis endpoint.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::analysis::{analyze_common_slots, compute_common_availability};
use crate::types::AppState;

/// Query parameters for the analysis endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalysisQueryParams {
    /// If true, skip the enrichment collaborator and run the deterministic
    /// engine directly
    #[serde(default)]
    pub local: bool,
}

/// GET /analysis
///
/// Runs the availability analysis over a roster snapshot taken at call time.
/// Never fails: the orchestrator degrades to the local engine on any
/// enrichment problem.
pub async fn get_analysis(
    State(s): State<Arc<AppState>>,
    Query(params): Query<AnalysisQueryParams>,
) -> Response {
    info!("GET /analysis - Analyzing common slots (local={})", params.local);

    let students = s.roster.snapshot();

    let result = if params.local {
        compute_common_availability(&students)
    } else {
        analyze_common_slots(&s.enrichment, &students).await
    };

    (StatusCode::OK, Json(result)).into_response()
}
