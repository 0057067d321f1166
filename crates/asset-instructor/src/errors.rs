//! Instructor error taxonomy with retry classification.
//!
//! Callers can query `is_retriable()` / `retry_category()` without string
//! matching.
//!
//! | Category  | Retriable | Source                                        |
//! |-----------|-----------|-----------------------------------------------|
//! | Transient | yes       | directory connection lost or refused          |
//! | Fatal     | no        | failed query, corrupt record, bad fixture     |
//! | NotFound  | no        | asset name not in the directory               |
//! | Rejected  | no        | capability or time-window violation           |

use std::fmt;

use instruction::ValidationError;
use thiserror::Error;

use crate::directory::DirectoryError;

/// Classification used by callers to decide whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCategory {
    /// Directory could not be reached. Safe to retry.
    Transient,
    /// Directory answered, but the answer cannot be used. Terminal until
    /// the stored data or schema is fixed.
    Fatal,
    /// The asset does not exist. Terminal.
    NotFound,
    /// The request broke a capability or temporal rule. Terminal until the
    /// request is corrected.
    Rejected,
}

impl RetryCategory {
    pub fn is_retriable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for RetryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Fatal => write!(f, "fatal"),
            Self::NotFound => write!(f, "not_found"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Failure to turn a request into an instruction.
#[derive(Debug, Error)]
pub enum InstructorError {
    /// The asset name did not resolve. Raised before any validation runs.
    #[error("Asset not found: {asset_name}")]
    AssetNotFound { asset_name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Asset directory unavailable: {0}")]
    Directory(#[from] DirectoryError),
}

impl InstructorError {
    pub fn retry_category(&self) -> RetryCategory {
        match self {
            Self::AssetNotFound { .. } => RetryCategory::NotFound,
            Self::Validation(_) => RetryCategory::Rejected,
            Self::Directory(err) if err.is_transient() => RetryCategory::Transient,
            Self::Directory(_) => RetryCategory::Fatal,
        }
    }

    pub fn is_retriable(&self) -> bool {
        self.retry_category().is_retriable()
    }

    pub fn not_found(asset_name: impl Into<String>) -> Self {
        Self::AssetNotFound {
            asset_name: asset_name.into(),
        }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure to hand an instruction to the control system.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to encode instruction: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write instruction: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_terminal() {
        let err = InstructorError::not_found("cool_assset");
        assert!(!err.is_retriable());
        assert_eq!(err.retry_category(), RetryCategory::NotFound);
        assert_eq!(err.to_string(), "Asset not found: cool_assset");
    }

    #[test]
    fn lost_connection_is_retriable() {
        let err = InstructorError::from(DirectoryError::Connection("refused".into()));
        assert!(err.is_retriable());
        assert_eq!(err.retry_category().to_string(), "transient");
    }

    #[test]
    fn deterministic_directory_faults_are_terminal() {
        let faults = [
            DirectoryError::Query("relation \"assets\" does not exist".into()),
            DirectoryError::CorruptRecord {
                name: "cool_asset".into(),
                reason: "negative max_power -1".into(),
            },
            DirectoryError::Fixture {
                path: "assets.toml".into(),
                reason: "bad".into(),
            },
            DirectoryError::DuplicateAsset("cool_asset".into()),
        ];
        for fault in faults {
            let err = InstructorError::from(fault);
            assert_eq!(err.retry_category(), RetryCategory::Fatal, "{err}");
            assert!(!err.is_retriable());
        }
    }

    #[test]
    fn as_validation_only_matches_validation() {
        assert!(InstructorError::not_found("x").as_validation().is_none());
    }
}
