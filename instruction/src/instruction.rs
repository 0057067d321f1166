use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// Raw request as received from the trading team.
///
/// Nothing about it has been checked yet; see [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub power: u32,
    pub asset_name: String,
}

impl InstructionRequest {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        power: u32,
        asset_name: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            power,
            asset_name: asset_name.into(),
        }
    }
}

/// A validated instruction, ready to be sent on to the asset.
///
/// Only [`crate::validate`] constructs this type, so any value of it
/// satisfies `power <= asset.max_power` and `start < end`. The asset is
/// shared, not owned: many instructions may point at the same record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    asset: Arc<Asset>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    power: u32,
}

impl Instruction {
    pub(crate) fn new_unchecked(
        asset: Arc<Asset>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        power: u32,
    ) -> Self {
        debug_assert!(power <= asset.max_power);
        debug_assert!(start < end);
        Self {
            asset,
            start,
            end,
            power,
        }
    }

    pub fn asset(&self) -> &Arc<Asset> {
        &self.asset
    }

    pub fn asset_name(&self) -> &str {
        &self.asset.name
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    /// Length of the instructed window. Always positive.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Flatten into the message handed to the control system.
    pub fn to_dispatch(&self) -> DispatchMessage {
        DispatchMessage {
            asset_name: self.asset.name.clone(),
            start: self.start,
            end: self.end,
            power: self.power,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {} from {} to {}",
            self.asset.name,
            self.power,
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// Wire shape of a dispatched instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchMessage {
    pub asset_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub power: u32,
}
