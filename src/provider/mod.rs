//! Upstream gateway: one outbound completion call per inbound request.

pub mod constants;
pub(crate) mod openai;

pub use openai::{OpenAiClient, OpenAiConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the upstream gateway.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The upstream responded with a non-success status. `body` is the
    /// verbatim upstream error text, surfaced to the caller uninterpreted.
    #[error("upstream returned {status}: {body}")]
    Api { status: u16, body: String },
    /// The call could not be completed at all.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The upstream answered 2xx with a body that is not JSON.
    #[error("failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
    /// The gateway itself could not be constructed.
    #[error("provider configuration error: {0}")]
    Configuration(String),
}

/// Seam between the request handler and whichever completion API backs it.
///
/// Exactly one call per invocation: no retry, no backoff, no caching of
/// prior results even for identical inputs.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one completion request authenticated with the caller-supplied
    /// credential and return the generated text.
    async fn complete(
        &self,
        credential: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError>;
}
