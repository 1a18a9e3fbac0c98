//! Form relay client
//!
//! Posts the contact form to a third-party relay endpoint as multipart form
//! data. Any 2xx status is success; the response body is never read.

use super::form::{Field, Submission};
use crate::config::ContactConfig;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Ways a relay post can fail
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection, TLS, timeout or any other transport-level failure
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-2xx status
    #[error("relay rejected submission with HTTP {0}")]
    Status(u16),

    /// The configured endpoint isn't a URL
    #[error("invalid relay URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result of one relay post
pub type SubmitOutcome = Result<(), RelayError>;

/// HTTP client bound to the configured relay endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    url: Url,
}

impl RelayClient {
    /// Build a client for the endpoint in `config`
    pub fn new(config: &ContactConfig) -> Result<Self, RelayError> {
        let url = Url::parse(&config.relay_url).map_err(|e| RelayError::InvalidUrl {
            url: config.relay_url.clone(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Post one submission. Single attempt, no retries.
    pub async fn submit(&self, submission: &Submission) -> SubmitOutcome {
        let form = Form::new()
            .text(Field::Name.key(), submission.name.clone())
            .text(Field::Email.key(), submission.email.clone())
            .text(Field::Message.key(), submission.message.clone());

        let response = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Relay accepted submission (HTTP {})", status.as_u16());
            Ok(())
        } else {
            tracing::warn!("Relay rejected submission (HTTP {})", status.as_u16());
            Err(RelayError::Status(status.as_u16()))
        }
    }
}
