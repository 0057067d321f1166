//! Asset Instruction Library
//!
//! Pure decision logic that turns a raw instruction request plus an asset
//! capability record into either a validated [`Instruction`] or a
//! [`ValidationError`] listing every violated constraint.
//!
//! # Pipeline
//!
//! ```text
//! InstructionRequest + Arc<Asset>
//!    │
//!    ├─ capability check  (power <= asset.max_power)
//!    ├─ temporal check    (start < end)
//!    ▼
//! Ok(Instruction) | Err(ValidationError { violations })
//! ```
//!
//! Nothing in this crate performs I/O, logs, or holds shared state, so
//! validation can run from any number of callers concurrently.

pub mod asset;
pub mod error;
pub mod instruction;
pub mod validator;

pub use asset::Asset;
pub use error::{ValidationError, Violation};
pub use instruction::{DispatchMessage, Instruction, InstructionRequest};
pub use validator::{has_sufficient_power, starts_before_end, validate};
