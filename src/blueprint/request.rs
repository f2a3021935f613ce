//! Inbound request shape and validation.
//!
//! Deserialization is deliberately permissive: every field is optional at
//! the serde layer so that a missing parameter produces a structured
//! validation error rather than a deserializer rejection, and `count`
//! accepts whatever JSON the client sends (`5`, `"5"`, even `5.0`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Fallback used when the caller supplies no theme keywords.
pub const THEME_KEYWORDS_FALLBACK: &str = "none";

/// Fallback used when the caller supplies no extra notes.
pub const EXTRA_NOTES_FALLBACK: &str = "No additional notes.";

/// Most level ideas a single request may ask for.
pub const MAX_LEVEL_COUNT: u32 = 10;

/// Raw JSON body of `POST /api/level-blueprint`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub stage_position: Option<String>,
    #[serde(default)]
    pub playtime: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub theme_keywords: Option<String>,
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default)]
    pub extra_notes: Option<String>,
}

/// A validated, normalized request. All fields are concrete and `count`
/// is within `1..=MAX_LEVEL_COUNT`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelParams {
    pub api_key: String,
    pub genre: String,
    pub camera: String,
    pub stage_position: String,
    pub playtime: String,
    pub difficulty: String,
    pub focus: String,
    pub theme_keywords: String,
    pub count: u32,
    pub extra_notes: String,
}

/// Outbound body: the raw upstream text, passed through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    pub content: String,
}

impl LevelRequest {
    /// Validate and normalize, fail-fast in contract order: credential
    /// first, then required fields as a group, then count normalization.
    pub fn validate(self) -> Result<LevelParams, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ApiError::MissingApiKey)?
            .to_string();

        let required = [
            &self.genre,
            &self.camera,
            &self.stage_position,
            &self.playtime,
            &self.difficulty,
            &self.focus,
        ];
        if required.iter().any(|field| is_blank(field)) {
            return Err(ApiError::MissingFields);
        }
        if !self.count.as_ref().is_some_and(is_present) {
            return Err(ApiError::MissingFields);
        }

        let count = normalize_count(self.count.as_ref());

        let theme_keywords = self
            .theme_keywords
            .filter(|keywords| !keywords.trim().is_empty())
            .unwrap_or_else(|| THEME_KEYWORDS_FALLBACK.to_string());
        let extra_notes = self
            .extra_notes
            .filter(|notes| !notes.trim().is_empty())
            .unwrap_or_else(|| EXTRA_NOTES_FALLBACK.to_string());

        Ok(LevelParams {
            api_key,
            genre: self.genre.unwrap_or_default(),
            camera: self.camera.unwrap_or_default(),
            stage_position: self.stage_position.unwrap_or_default(),
            playtime: self.playtime.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            focus: self.focus.unwrap_or_default(),
            theme_keywords,
            count,
            extra_notes,
        })
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

/// Presence check with the original service's truthiness semantics:
/// `null`, `false`, `0`, `0.0`, and `""` all count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Normalize the requested level count to an integer in
/// `1..=MAX_LEVEL_COUNT`. Integers are taken as-is, numeric strings are
/// parsed, floats are truncated; anything unparsable or non-positive
/// becomes 1.
pub fn normalize_count(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };

    match parsed {
        Some(n) if n >= 1 => (n as u64).min(u64::from(MAX_LEVEL_COUNT)) as u32,
        _ => 1,
    }
}
