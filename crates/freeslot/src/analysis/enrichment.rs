//! HTTP client for the enrichment collaborator.
//!
//! The collaborator is a Gemini-style `generateContent` endpoint: it gets the
//! roster wrapped in a natural-language prompt and is asked to return a JSON
//! array of per-day common slots. Its reply is free-form text that may or may
//! not contain exactly one such array; [`extract_json_array`] pulls it out.

use super::error::EnrichmentError;
use crate::roster::{DaySlots, Student};
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default base URL for the Gemini API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for availability analysis.
const GEMINI_MODEL: &str = "gemini-pro";

/// Configuration for the enrichment client.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Base URL of the generateContent API
    pub base_url: String,
    /// Model name appended to the generateContent path
    pub model: String,
    /// API key; `None` means the collaborator is unreachable and every
    /// analysis falls back to the local engine
    pub api_key: Option<String>,
    /// Sampling temperature (kept low, the task is extraction not prose)
    pub temperature: f64,
    /// Output token cap for the generated array
    pub max_output_tokens: u32,
    /// Connect timeout for the HTTP client
    pub connect_timeout: Duration,
    /// Overall request timeout
    pub request_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            api_key: None,
            temperature: 0.1,
            max_output_tokens: 2048,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Seam for the external collaborator so the orchestrator can be exercised
/// with stub implementations.
///
/// A single-shot call: no retry, no cancellation, whatever timeout the
/// transport carries. Returns the raw generated text.
pub trait EnrichmentClient {
    fn request_common_slots(
        &self,
        students: &[Student],
    ) -> impl Future<Output = Result<String, EnrichmentError>> + Send;
}

/// Production client talking to the Gemini generateContent API.
pub struct GeminiClient {
    client: Client,
    config: EnrichmentConfig,
}

impl GeminiClient {
    /// Creates a client with custom configuration.
    pub fn with_config(config: EnrichmentConfig) -> Result<Self, EnrichmentError> {
        // Fail construction, not every request, on a bad base URL
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EnrichmentError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl EnrichmentClient for GeminiClient {
    async fn request_common_slots(
        &self,
        students: &[Student],
    ) -> Result<String, EnrichmentError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            EnrichmentError::NotConfigured {
                message: "no API key set".to_string(),
            }
        })?;

        let correlation_id = correlation_id();
        let prompt = build_prompt(students)?;
        let url = self.endpoint();

        info!(
            correlation_id = %correlation_id,
            students = students.len(),
            model = %self.config.model,
            "Requesting common-slot analysis from enrichment collaborator"
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| EnrichmentError::UnexpectedResponse {
                message: "response carries no generated text".to_string(),
            })?;

        debug!(
            correlation_id = %correlation_id,
            text_len = text.len(),
            "Received enrichment response"
        );

        Ok(text.to_string())
    }
}

/// Per-student payload embedded in the prompt. Roll numbers stay out of it;
/// the collaborator only needs names, registration numbers and slot data.
#[derive(Serialize)]
struct StudentPayload<'a> {
    name: &'a str,
    #[serde(rename = "regNo")]
    reg_no: &'a str,
    #[serde(rename = "timeSlots")]
    time_slots: &'a [DaySlots],
}

/// Builds the natural-language instruction wrapping the roster data.
fn build_prompt(students: &[Student]) -> Result<String, EnrichmentError> {
    let payload: Vec<StudentPayload<'_>> = students
        .iter()
        .map(|s| StudentPayload {
            name: &s.name,
            reg_no: &s.reg_no,
            time_slots: &s.time_slots,
        })
        .collect();

    let data = serde_json::to_string(&payload).map_err(|e| EnrichmentError::Malformed {
        message: e.to_string(),
    })?;

    Ok(format!(
        "I have data from {} students about their free time slots.\n\
         Here is the data: {}\n\n\
         Please analyze this data and find common time slots when all students \
         are free for each day of the week.\n\
         Return the result as a JSON array where each object has:\n\
         - day: the name of the day\n\
         - availableSlots: array of time slots when ALL students are free\n\
         - students: array of student names who are free in these slots\n\n\
         Return ONLY the JSON without any additional text.",
        students.len(),
        data
    ))
}

// First '[' through last ']', across newlines.
static ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Extracts the first array-shaped substring from free-form response text.
///
/// Leading and trailing prose around the array is tolerated; text with no
/// bracketed region at all yields `None`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    ARRAY_REGEX.find(text).map(|m| m.as_str())
}

/// Short random tag tying together the log lines of one enrichment call.
fn correlation_id() -> String {
    let tag: u64 = rand::thread_rng().gen();
    format!("enrich-{:012x}", tag & 0xFFFF_FFFF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn extracts_array_from_surrounding_prose() {
        let text = "Sure! Here is the analysis you asked for:\n\
                    [{\"day\": \"Monday\"}]\n\
                    Let me know if you need anything else.";
        assert_eq!(extract_json_array(text), Some("[{\"day\": \"Monday\"}]"));
    }

    #[test]
    fn extraction_spans_newlines() {
        let text = "```json\n[\n  {\"day\": \"Monday\"},\n  {\"day\": \"Tuesday\"}\n]\n```";
        let found = extract_json_array(text).unwrap();
        assert!(found.starts_with('['));
        assert!(found.ends_with(']'));
        assert!(found.contains("Tuesday"));
    }

    #[test]
    fn no_array_yields_none() {
        assert_eq!(extract_json_array(""), None);
        assert_eq!(extract_json_array("I could not determine any common slots."), None);
    }

    #[test]
    fn greedy_match_runs_to_last_bracket() {
        // Nested arrays inside the objects must stay inside the match.
        let text = "x [{\"availableSlots\": [\"9-10\"]}] y";
        assert_eq!(
            extract_json_array(text),
            Some("[{\"availableSlots\": [\"9-10\"]}]")
        );
    }

    #[test]
    fn prompt_carries_roster_data_and_instruction() {
        let students = vec![Student {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            reg_no: "R-001".to_string(),
            roll_no: "17".to_string(),
            time_slots: vec![DaySlots {
                day: "Monday".to_string(),
                slots: vec!["9:00-10:00".to_string()],
            }],
        }];

        let prompt = build_prompt(&students).unwrap();
        assert!(prompt.contains("data from 1 students"));
        assert!(prompt.contains("\"regNo\":\"R-001\""));
        assert!(prompt.contains("9:00-10:00"));
        // Roll numbers are not shared with the collaborator.
        assert!(!prompt.contains("17\""));
        assert!(prompt.contains("Return ONLY the JSON"));
    }

    #[test]
    fn correlation_ids_are_tagged_and_distinct() {
        let a = correlation_id();
        let b = correlation_id();
        assert!(a.starts_with("enrich-"));
        assert_eq!(a.len(), "enrich-".len() + 12);
        assert_ne!(a, b);
    }

    #[test]
    fn client_rejects_invalid_base_url() {
        let config = EnrichmentConfig {
            base_url: "not a url".to_string(),
            ..EnrichmentConfig::default()
        };
        assert!(matches!(
            GeminiClient::with_config(config),
            Err(EnrichmentError::UrlError { .. })
        ));
    }
}
