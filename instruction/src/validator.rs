//! Instruction Validator
//!
//! Applies the capability and temporal checks to a request against a
//! resolved asset. Both checks always run so a caller sees every problem
//! with a request at once.
//!
//! ```text
//! Check 1: Capability  power <= asset.max_power   (equal passes)
//! Check 2: Temporal    start < end                (equal fails)
//!    │
//!    ▼
//! all pass → Instruction
//! any fail → ValidationError [capability, temporal]
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::asset::Asset;
use crate::error::{ValidationError, Violation};
use crate::instruction::{Instruction, InstructionRequest};

/// Whether `asset` can be instructed at `power`.
pub fn has_sufficient_power(asset: &Asset, power: u32) -> bool {
    power <= asset.max_power
}

/// Whether the window is non-empty and correctly ordered.
pub fn starts_before_end(start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start < end
}

/// Validate `request` against `asset`.
///
/// The caller is responsible for having resolved `asset` from
/// `request.asset_name`; the returned instruction references `asset`.
pub fn validate(
    request: &InstructionRequest,
    asset: Arc<Asset>,
) -> Result<Instruction, ValidationError> {
    let mut violations = Vec::new();

    if !has_sufficient_power(&asset, request.power) {
        violations.push(Violation::InsufficientPower {
            asset_name: asset.name.clone(),
            max_power: asset.max_power,
            requested_power: request.power,
        });
    }

    if !starts_before_end(request.start, request.end) {
        violations.push(Violation::InvalidTimeWindow {
            start: request.start,
            end: request.end,
        });
    }

    match ValidationError::from_violations(violations) {
        Some(err) => Err(err),
        None => Ok(Instruction::new_unchecked(
            asset,
            request.start,
            request.end,
            request.power,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ten() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap()
    }

    fn twenty() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 20, 0, 0).unwrap()
    }

    fn asset(max_power: u32) -> Arc<Asset> {
        Arc::new(Asset::new("cool_asset", max_power, "battery"))
    }

    #[test]
    fn accepts_request_within_capability() {
        let req = InstructionRequest::new(ten(), twenty(), 500, "cool_asset");
        let instruction = validate(&req, asset(1000)).unwrap();
        assert_eq!(instruction.power(), 500);
        assert_eq!(instruction.start(), ten());
        assert_eq!(instruction.end(), twenty());
        assert_eq!(instruction.asset_name(), "cool_asset");
    }

    #[test]
    fn power_equal_to_max_is_accepted() {
        let req = InstructionRequest::new(ten(), twenty(), 1000, "cool_asset");
        assert!(validate(&req, asset(1000)).is_ok());
    }

    #[test]
    fn zero_power_is_accepted() {
        let req = InstructionRequest::new(ten(), twenty(), 0, "cool_asset");
        assert!(validate(&req, asset(0)).is_ok());
    }

    #[test]
    fn power_above_max_is_rejected_with_both_bounds() {
        let req = InstructionRequest::new(ten(), twenty(), 500, "cool_asset");
        let err = validate(&req, asset(400)).unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::InsufficientPower {
                asset_name: "cool_asset".into(),
                max_power: 400,
                requested_power: 500,
            }]
        );
    }

    #[test]
    fn one_over_max_is_rejected() {
        let req = InstructionRequest::new(ten(), twenty(), 1001, "cool_asset");
        assert!(validate(&req, asset(1000))
            .unwrap_err()
            .has_insufficient_power());
    }

    #[test]
    fn reversed_window_is_rejected() {
        let req = InstructionRequest::new(twenty(), ten(), 500, "cool_asset");
        let err = validate(&req, asset(1000)).unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::InvalidTimeWindow {
                start: twenty(),
                end: ten(),
            }]
        );
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let req = InstructionRequest::new(ten(), ten(), 500, "cool_asset");
        let err = validate(&req, asset(1000)).unwrap_err();
        assert!(err.has_invalid_time_window());
        assert!(!err.has_insufficient_power());
    }

    #[test]
    fn one_second_window_is_accepted() {
        let req = InstructionRequest::new(ten(), ten() + Duration::seconds(1), 1, "cool_asset");
        let instruction = validate(&req, asset(1)).unwrap();
        assert_eq!(instruction.duration(), Duration::seconds(1));
    }

    #[test]
    fn both_violations_are_collected_capability_first() {
        let req = InstructionRequest::new(twenty(), ten(), 500, "cool_asset");
        let err = validate(&req, asset(400)).unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], Violation::InsufficientPower { .. }));
        assert!(matches!(violations[1], Violation::InvalidTimeWindow { .. }));
    }

    #[test]
    fn validation_is_deterministic() {
        let a = asset(400);
        let ok = InstructionRequest::new(ten(), twenty(), 100, "cool_asset");
        let bad = InstructionRequest::new(ten(), ten(), 500, "cool_asset");

        assert_eq!(validate(&ok, a.clone()), validate(&ok, a.clone()));
        assert_eq!(validate(&bad, a.clone()), validate(&bad, a));
    }

    #[test]
    fn instruction_references_the_given_asset() {
        let a = asset(1000);
        let req = InstructionRequest::new(ten(), twenty(), 500, "cool_asset");
        let instruction = validate(&req, a.clone()).unwrap();
        assert!(Arc::ptr_eq(instruction.asset(), &a));
    }

    #[test]
    fn predicates_match_validate() {
        let a = Asset::new("x", 10, "");
        assert!(has_sufficient_power(&a, 10));
        assert!(!has_sufficient_power(&a, 11));
        assert!(starts_before_end(ten(), twenty()));
        assert!(!starts_before_end(ten(), ten()));
        assert!(!starts_before_end(twenty(), ten()));
    }
}
