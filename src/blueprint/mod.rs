pub mod prompt;
pub mod request;

pub use prompt::{PromptVariant, build_user_prompt};
pub use request::{LevelParams, LevelRequest, LevelResponse};
