//! # levelforge
//!
//! A single-endpoint HTTP relay for game level design. Clients POST
//! structured level-design parameters together with their own OpenAI API
//! key; levelforge folds the parameters into a generation prompt, forwards
//! it to the chat-completion API, and returns the generated blueprint text
//! untouched.
//!
//! The service is stateless: every request carries its own credential,
//! builds its own prompt, and makes exactly one upstream call. Nothing is
//! retried, cached, or persisted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use levelforge::{AppState, PromptVariant, router};
//! use levelforge::provider::{OpenAiClient, OpenAiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = OpenAiClient::new(OpenAiConfig::default())?;
//!     let state = AppState::new(Arc::new(gateway), PromptVariant::Standard);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod blueprint;
pub mod error;
pub mod provider;

pub use api::{AppState, router};
pub use blueprint::prompt::PromptVariant;
pub use blueprint::request::{LevelParams, LevelRequest, LevelResponse};
pub use error::ApiError;
