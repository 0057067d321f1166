use chrono::{DateTime, Utc};
use instruction::{validate, Instruction, InstructionRequest};
use tracing::{debug, info, warn};

use crate::directory::{AssetDirectory, AssetLookup};
use crate::errors::InstructorError;

/// Turns raw requests into validated instructions.
///
/// Resolves the asset first and stops there if it does not exist; only a
/// resolved asset is handed to the validator. Holds no mutable state, so a
/// single instance can serve concurrent callers.
pub struct AssetInstructor<D> {
    directory: D,
}

impl<D: AssetDirectory> AssetInstructor<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Check `power` and the `start..end` window against `asset_name`.
    pub async fn create_and_validate_instruction(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        power: u32,
        asset_name: &str,
    ) -> Result<Instruction, InstructorError> {
        self.process(&InstructionRequest::new(start, end, power, asset_name))
            .await
    }

    #[tracing::instrument(skip(self, request), fields(asset = %request.asset_name))]
    pub async fn process(
        &self,
        request: &InstructionRequest,
    ) -> Result<Instruction, InstructorError> {
        debug!("Resolving asset");
        let asset = match self.directory.lookup(&request.asset_name).await? {
            AssetLookup::Found(asset) => asset,
            AssetLookup::NotFound => {
                warn!("Instruction rejected: asset not found");
                return Err(InstructorError::not_found(&request.asset_name));
            }
        };

        match validate(request, asset) {
            Ok(instruction) => {
                info!(
                    power = instruction.power(),
                    start = %instruction.start(),
                    end = %instruction.end(),
                    "Instruction validated"
                );
                Ok(instruction)
            }
            Err(err) => {
                warn!(reason = %err, "Instruction rejected");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryAssetDirectory;
    use chrono::TimeZone;
    use instruction::{Asset, Violation};

    fn instructor() -> AssetInstructor<InMemoryAssetDirectory> {
        AssetInstructor::new(
            InMemoryAssetDirectory::with_assets([
                Asset::new("cool_asset", 1000, "battery"),
                Asset::new("small_asset", 400, "solar"),
            ])
            .unwrap(),
        )
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_request() {
        let instruction = instructor()
            .create_and_validate_instruction(at(10), at(20), 500, "cool_asset")
            .await
            .unwrap();
        assert_eq!(instruction.power(), 500);
        assert_eq!(instruction.asset().technology, "battery");
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let err = instructor()
            .create_and_validate_instruction(at(10), at(20), 500, "cool_assset")
            .await
            .unwrap_err();
        assert!(
            matches!(err, InstructorError::AssetNotFound { ref asset_name } if asset_name == "cool_assset")
        );
    }

    #[tokio::test]
    async fn validation_error_passes_through_unchanged() {
        let err = instructor()
            .create_and_validate_instruction(at(10), at(20), 500, "small_asset")
            .await
            .unwrap_err();
        let validation = err.as_validation().unwrap();
        assert_eq!(
            validation.violations(),
            &[Violation::InsufficientPower {
                asset_name: "small_asset".into(),
                max_power: 400,
                requested_power: 500,
            }]
        );
    }

    #[tokio::test]
    async fn process_accepts_request_value() {
        let req = InstructionRequest::new(at(10), at(10), 1, "cool_asset");
        let err = instructor().process(&req).await.unwrap_err();
        assert!(err.as_validation().unwrap().has_invalid_time_window());
    }
}
