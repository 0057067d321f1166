//! Asset Instructor
//!
//! Receives instruction requests from the trading team, resolves the target
//! asset, validates the request against the asset's capability and the
//! requested time window, and hands accepted instructions on to the control
//! system.
//!
//! ```text
//! InstructionRequest
//!    │ AssetDirectory::lookup ── NotFound → AssetNotFound (stop)
//!    ▼
//! instruction::validate ── violations → Validation
//!    ▼
//! Instruction → Dispatcher
//! ```

pub mod config;
pub mod directory;
pub mod dispatch;
pub mod errors;
pub mod instructor;

pub use config::DatabaseConfig;
pub use directory::{
    AssetDirectory, AssetLookup, DirectoryError, InMemoryAssetDirectory, PostgresAssetDirectory,
};
pub use dispatch::{Dispatcher, StdoutDispatcher};
pub use errors::{DispatchError, InstructorError, RetryCategory};
pub use instructor::AssetInstructor;
