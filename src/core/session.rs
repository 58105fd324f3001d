//! Toggle state carried in a modal's `private_metadata`.
//!
//! The record is typed everywhere inside the crate; it is only turned into a
//! string when a view is rendered and parsed back when Slack returns it on a
//! button press.

use serde::{Deserialize, Serialize};

use crate::errors::BotError;

pub const TOGGLE_STATE_VERSION: u8 = 1;

/// Slack rejects `private_metadata` longer than this many characters.
pub const PRIVATE_METADATA_LIMIT: usize = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Ai,
    Original,
}

impl DisplayMode {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            DisplayMode::Ai => DisplayMode::Original,
            DisplayMode::Original => DisplayMode::Ai,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Ai => "ai",
            DisplayMode::Original => "original",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    #[serde(rename = "v")]
    version: u8,
    original: String,
    ai: String,
    mode: DisplayMode,
}

impl ToggleState {
    /// Fresh state for a newly rendered suggestion, showing the AI text.
    #[must_use]
    pub fn new(original: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            version: TOGGLE_STATE_VERSION,
            original: original.into(),
            ai: ai.into(),
            mode: DisplayMode::Ai,
        }
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn ai(&self) -> &str {
        &self.ai
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Text for the current mode.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.mode {
            DisplayMode::Ai => &self.ai,
            DisplayMode::Original => &self.original,
        }
    }

    /// Same texts, other mode.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            mode: self.mode.flipped(),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// Returns `RenderError` when the encoded state exceeds Slack's metadata limit.
    pub fn to_metadata(&self) -> Result<String, BotError> {
        let encoded = serde_json::to_string(self)?;
        let length = encoded.chars().count();
        if length > PRIVATE_METADATA_LIMIT {
            return Err(BotError::RenderError(format!(
                "toggle state is {length} characters, over the {PRIVATE_METADATA_LIMIT} character private_metadata limit"
            )));
        }
        Ok(encoded)
    }

    /// # Errors
    ///
    /// Returns `ParseError` for malformed metadata or an unknown version.
    pub fn from_metadata(raw: &str) -> Result<Self, BotError> {
        let state: Self = serde_json::from_str(raw)
            .map_err(|e| BotError::ParseError(format!("Invalid toggle metadata: {e}")))?;
        if state.version != TOGGLE_STATE_VERSION {
            return Err(BotError::ParseError(format!(
                "Unsupported toggle metadata version {}",
                state.version
            )));
        }
        Ok(state)
    }
}
