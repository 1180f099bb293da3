//! # Shell Error Type
//!
//! Everything that can go wrong while serving one menu action.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  read line ── Io ──────────────────────────► fatal, shell exits  │
//! │      │                                                           │
//! │      ▼                                                           │
//! │  decode JSON ── InvalidJson ──┐                                  │
//! │      │                        ├──► "Error: ..." printed, loop    │
//! │      ▼                        │    continues                     │
//! │  quote_order ── Quote ────────┘                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use foodshop_core::QuoteError;

/// Example accepted by the "Quote order" prompt.
pub const ORDER_JSON_EXAMPLE: &str = r#"{"items":{"RED":1,"GREEN":2},"member":false}"#;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl ShellError {
    /// Text shown to the user after `Error: `.
    pub fn user_message(&self) -> String {
        match self {
            ShellError::InvalidJson(err) => {
                format!("invalid JSON: {err}\nHint: {ORDER_JSON_EXAMPLE}")
            }
            other => other.to_string(),
        }
    }

    /// Only I/O failures end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Io(_))
    }
}
