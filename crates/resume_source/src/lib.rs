//! Client boundary for the remote resume lookup service.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::domain::Resume;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Outcome of one lookup request.
///
/// `success` reflects the service's explicit status signal; `resume` is the
/// decoded payload, which may be absent even on a success status. Deciding
/// what an absent payload means is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResponse {
    pub success: bool,
    pub resume: Option<Resume>,
}

#[async_trait]
pub trait ResumeSource: Send + Sync {
    /// Looks up the resume registered under `name`.
    ///
    /// `Err` is reserved for transport/runtime failures; a service-level
    /// rejection comes back as `Ok` with `success: false`.
    async fn fetch_resume(&self, name: &str) -> Result<SourceResponse>;
}

pub struct MissingResumeSource;

#[async_trait]
impl ResumeSource for MissingResumeSource {
    async fn fetch_resume(&self, name: &str) -> Result<SourceResponse> {
        Err(anyhow!("resume source unavailable for '{name}'"))
    }
}

#[derive(Debug, Error)]
pub enum HttpSourceError {
    #[error("invalid resume service base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// HTTP implementation speaking the lookup service's `GET /resume?name=`
/// endpoint.
#[derive(Debug)]
pub struct HttpResumeSource {
    http: Client,
    server_url: String,
}

impl HttpResumeSource {
    pub fn new(server_url: impl Into<String>) -> std::result::Result<Self, HttpSourceError> {
        let server_url = server_url.into();
        Url::parse(&server_url).map_err(|source| HttpSourceError::InvalidBaseUrl {
            url: server_url.clone(),
            source,
        })?;

        Ok(Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResumeSource for HttpResumeSource {
    async fn fetch_resume(&self, name: &str) -> Result<SourceResponse> {
        let response = self
            .http
            .get(format!("{}/resume", self.server_url))
            .query(&[("name", name)])
            .send()
            .await
            .context("resume request failed")?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "resume lookup returned failure status");
            return Ok(SourceResponse {
                success: false,
                resume: None,
            });
        }

        let body = response
            .bytes()
            .await
            .context("failed to read resume response body")?;
        if body.is_empty() {
            return Ok(SourceResponse {
                success: true,
                resume: None,
            });
        }

        let resume: Resume =
            serde_json::from_slice(&body).context("malformed resume payload")?;
        Ok(SourceResponse {
            success: true,
            resume: Some(resume),
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
