// src/linkedin/error.rs
use thiserror::Error;

pub const PARSE_FAILURE_MESSAGE: &str =
    "Failed to parse LinkedIn profile. Please ensure this is a valid LinkedIn PDF export.";

/// Pipeline-fatal failures. Field-level misses never surface here.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse LinkedIn profile. Please ensure this is a valid LinkedIn PDF export.")]
    Extraction { reason: String },
}

impl ImportError {
    pub fn extraction(reason: impl Into<String>) -> Self {
        Self::Extraction {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Extraction { .. } => "PARSE_ERROR",
        }
    }

    /// Low-level cause, for logs only
    pub fn reason(&self) -> &str {
        match self {
            Self::Extraction { reason } => reason,
        }
    }
}
