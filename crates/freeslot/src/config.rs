//! Environment-driven application configuration.

use crate::analysis::EnrichmentConfig;
use std::env;
use std::net::SocketAddr;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Enrichment collaborator settings
    pub enrichment: EnrichmentConfig,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// - `FREESLOT_BIND` — bind address, default `127.0.0.1:8080`
    /// - `GEMINI_API_KEY` — enrichment API key; unset means every analysis
    ///   falls back to the local engine, which is a supported mode
    /// - `GEMINI_BASE_URL`, `GEMINI_MODEL` — override the collaborator target
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = env::var("FREESLOT_BIND")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let mut enrichment = EnrichmentConfig::default();
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                enrichment.api_key = Some(key);
            }
        }
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            enrichment.base_url = base_url;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            enrichment.model = model;
        }

        Ok(Self {
            bind_addr,
            enrichment,
        })
    }
}
