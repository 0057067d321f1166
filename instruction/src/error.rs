//! Validation failure taxonomy.
//!
//! A rejected request reports every constraint it violates, capability
//! first, then temporal. Both kinds are user-correctable and terminal: the
//! same input always fails the same way, so there is nothing to retry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Requested power exceeds the asset's maximum.
    #[error(
        "asset {asset_name} max power is {max_power}, instructed power is {requested_power}"
    )]
    InsufficientPower {
        asset_name: String,
        max_power: u32,
        requested_power: u32,
    },

    /// Start is not strictly before end.
    #[error("start {start} is not before end {end}")]
    InvalidTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Rejection of an instruction request.
///
/// Always holds at least one [`Violation`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("instruction rejected: {}", format_violations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn has_insufficient_power(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::InsufficientPower { .. }))
    }

    pub fn has_invalid_time_window(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::InvalidTimeWindow { .. }))
    }
}
