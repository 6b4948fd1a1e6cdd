//! Common-availability analysis.
//!
//! The orchestrator tries the external enrichment collaborator once and, on
//! any failure at all, degrades to the deterministic local engine. It never
//! raises to its caller.

mod engine;
mod enrichment;
mod error;

pub use engine::{compute_common_availability, students_covering, CommonAvailability};
pub use enrichment::{
    extract_json_array, EnrichmentClient, EnrichmentConfig, GeminiClient,
};
pub use error::EnrichmentError;

use crate::roster::Student;
use tracing::{info, warn};

/// Which path produced an analysis result.
///
/// The public contract collapses both branches into the same list, but keeping
/// the distinction explicit makes the fallback trigger testable in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Parsed from the enrichment collaborator's response, accepted as-is
    Remote(Vec<CommonAvailability>),
    /// Computed locally after the enrichment attempt failed
    Fallback(Vec<CommonAvailability>),
}

impl AnalysisOutcome {
    pub fn into_result(self) -> Vec<CommonAvailability> {
        match self {
            AnalysisOutcome::Remote(result) | AnalysisOutcome::Fallback(result) => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }
}

/// Analyzes common availability across the roster.
///
/// An empty roster returns an empty list immediately (the orchestrator's own
/// short-circuit, distinct from the engine's six empty entries). Otherwise the
/// enrichment collaborator is consulted exactly once; every failure path
/// silently falls back to [`compute_common_availability`]. Always returns a
/// list, never an error.
pub async fn analyze_common_slots<C>(client: &C, students: &[Student]) -> Vec<CommonAvailability>
where
    C: EnrichmentClient + Sync,
{
    if students.is_empty() {
        return Vec::new();
    }
    analyze_outcome(client, students).await.into_result()
}

/// Same as [`analyze_common_slots`] but keeps which branch produced the
/// result. Callers must not pass an empty roster through this path.
pub async fn analyze_outcome<C>(client: &C, students: &[Student]) -> AnalysisOutcome
where
    C: EnrichmentClient + Sync,
{
    match try_enrichment(client, students).await {
        Ok(result) => {
            info!(days = result.len(), "Using enrichment analysis result");
            AnalysisOutcome::Remote(result)
        }
        Err(e) => {
            warn!(
                error = %e,
                transport = e.is_transport(),
                "Enrichment failed, falling back to local engine"
            );
            AnalysisOutcome::Fallback(compute_common_availability(students))
        }
    }
}

/// Single-shot enrichment attempt: call, extract the array substring, parse.
///
/// A successfully parsed array is accepted as-is. Missing or extra fields in
/// its objects are deliberately not validated; over-checking the enrichment
/// path buys nothing when the deterministic engine backs it anyway.
async fn try_enrichment<C>(
    client: &C,
    students: &[Student],
) -> Result<Vec<CommonAvailability>, EnrichmentError>
where
    C: EnrichmentClient + Sync,
{
    let text = client.request_common_slots(students).await?;
    let array = extract_json_array(&text).ok_or(EnrichmentError::NoJsonArray)?;
    serde_json::from_str(array).map_err(|e| EnrichmentError::Malformed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::DaySlots;
    use uuid::Uuid;

    /// Stub collaborator returning a canned response or failure.
    struct StubClient {
        response: Result<String, EnrichmentError>,
    }

    impl StubClient {
        fn replies(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: Err(EnrichmentError::Network {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    impl EnrichmentClient for StubClient {
        async fn request_common_slots(
            &self,
            _students: &[Student],
        ) -> Result<String, EnrichmentError> {
            self.response.clone()
        }
    }

    fn student(name: &str, day_slots: &[(&str, &[&str])]) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            reg_no: format!("REG-{name}"),
            roll_no: format!("ROLL-{name}"),
            time_slots: day_slots
                .iter()
                .map(|(day, slots)| DaySlots {
                    day: day.to_string(),
                    slots: slots.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn empty_roster_short_circuits() {
        let client = StubClient::replies("[]");
        let result = analyze_common_slots(&client, &[]).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn unreachable_collaborator_falls_back_to_engine_exactly() {
        let students = [
            student("A", &[("Monday", &["9-10", "10-11"])]),
            student("B", &[("Monday", &["9-10"])]),
        ];

        let client = StubClient::unreachable();
        let outcome = analyze_outcome(&client, &students).await;

        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.into_result(),
            compute_common_availability(&students)
        );
    }

    #[tokio::test]
    async fn parseable_response_wins_over_local_engine() {
        let students = [student("A", &[("Monday", &["9-10"])])];
        let client = StubClient::replies(
            "Here you go:\n\
             [{\"day\": \"Monday\", \"availableSlots\": [\"9-10\"], \"students\": [\"A\"]}]",
        );

        let outcome = analyze_outcome(&client, &students).await;
        assert!(!outcome.is_fallback());

        let result = outcome.into_result();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].day, "Monday");
        assert_eq!(result[0].available_slots, ["9-10"]);
    }

    #[tokio::test]
    async fn partially_shaped_response_is_accepted_as_is() {
        // Missing "day", extra "confidence": parses as an array, so kept.
        let students = [student("A", &[("Monday", &["9-10"])])];
        let client = StubClient::replies(
            "[{\"availableSlots\": [\"9-10\"], \"confidence\": 0.9}]",
        );

        let outcome = analyze_outcome(&client, &students).await;
        assert!(!outcome.is_fallback());

        let result = outcome.into_result();
        assert_eq!(result[0].day, "");
        assert_eq!(result[0].available_slots, ["9-10"]);
        assert!(result[0].students.is_empty());
    }

    #[tokio::test]
    async fn response_without_array_falls_back() {
        let students = [student("A", &[("Tuesday", &["9-10"])])];
        let client = StubClient::replies("I'm sorry, I cannot help with that.");

        let outcome = analyze_outcome(&client, &students).await;
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.into_result(),
            compute_common_availability(&students)
        );
    }

    #[tokio::test]
    async fn unparseable_array_falls_back() {
        let students = [student("A", &[("Tuesday", &["9-10"])])];
        let client = StubClient::replies("[{\"day\": }]");

        let outcome = analyze_outcome(&client, &students).await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn empty_response_falls_back() {
        let students = [student("A", &[("Tuesday", &["9-10"])])];
        let client = StubClient::replies("");

        let outcome = analyze_outcome(&client, &students).await;
        assert!(outcome.is_fallback());
    }
}
