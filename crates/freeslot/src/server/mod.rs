use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{analysis, export, roster, status};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let roster_router = Router::new()
        .route(
            "/students",
            post(roster::post_register)
                .get(roster::get_students)
                .delete(roster::delete_students),
        )
        .route("/students/:id", get(roster::get_student))
        .route("/catalog", get(roster::get_catalog));

    let export_router = Router::new()
        .route("/export/json", get(export::get_export_json))
        .route("/export/csv", get(export::get_export_csv));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/analysis", get(analysis::get_analysis))
        .merge(roster_router)
        .merge(export_router)
        .with_state(app_state)
}
