//! Error types for the dlt-checker system
//!
//! Check failures are terminal for a single call: nothing is retried and no
//! partial report is produced.

use crate::common::amount::AmountError;
use crate::draws::DrawNumber;
use crate::ticket::TicketError;

/// Root error type for all dlt-checker operations
#[derive(Debug, thiserror::Error)]
pub enum DltError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Check failed: {0}")]
    Check(#[from] CheckError),

    #[error("Invalid ticket input: {0}")]
    Ticket(#[from] TicketError),

    #[error("Draw data error: {0}")]
    DrawData(#[from] DataIntegrityError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration and validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Failures of a range check over the draw store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("Start draw {0} not found in the loaded draws")]
    DrawNotFound(DrawNumber),

    #[error("No valid tickets supplied")]
    NoValidTickets,

    #[error("Invalid draw count {0}: at least one draw must be checked")]
    InvalidRange(usize),

    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),
}

/// Defects in the draw data handed over by the upstream source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityError {
    #[error("Malformed amount '{raw}' for prize '{key}'{}: {reason}", draw_suffix(.draw))]
    MalformedAmount {
        draw: Option<DrawNumber>,
        key: String,
        raw: String,
        reason: AmountError,
    },

    #[error("Malformed draw {draw}: {reason}")]
    MalformedDraw { draw: DrawNumber, reason: String },

    #[error("Duplicate draw number {0}")]
    DuplicateDraw(DrawNumber),

    #[error("Draws out of order: {previous} precedes {next}")]
    OutOfOrder { previous: DrawNumber, next: DrawNumber },
}

impl DataIntegrityError {
    /// Attach the draw a malformed amount was read from
    pub fn in_draw(self, number: &DrawNumber) -> Self {
        match self {
            DataIntegrityError::MalformedAmount { key, raw, reason, .. } => {
                DataIntegrityError::MalformedAmount {
                    draw: Some(number.clone()),
                    key,
                    raw,
                    reason,
                }
            }
            other => other,
        }
    }
}

fn draw_suffix(draw: &Option<DrawNumber>) -> String {
    match draw {
        Some(number) => format!(" in draw {}", number),
        None => String::new(),
    }
}

// Convenience type alias for Results
pub type DltResult<T> = Result<T, DltError>;
