//! Process-wide shared state threaded through the HTTP server.

use crate::analysis::GeminiClient;
use crate::roster::RosterStore;

/// State shared by every request handler.
pub struct AppState {
    /// The in-memory student roster
    pub roster: RosterStore,
    /// Client for the enrichment collaborator
    pub enrichment: GeminiClient,
}

impl AppState {
    pub fn new(enrichment: GeminiClient) -> Self {
        Self {
            roster: RosterStore::new(),
            enrichment,
        }
    }
}
