use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use instruction::Instruction;
use tracing::info;

use crate::errors::DispatchError;

/// Receiver of validated instructions (the control system, "owl").
///
/// Takes the instruction by value: once dispatched, the caller no longer
/// owns it.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, instruction: Instruction) -> Result<(), DispatchError>;
}

/// Writes each instruction as one JSON line.
pub struct StdoutDispatcher<W = std::io::Stdout> {
    out: Mutex<W>,
}

impl StdoutDispatcher {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl Default for StdoutDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> StdoutDispatcher<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> Dispatcher for StdoutDispatcher<W> {
    async fn dispatch(&self, instruction: Instruction) -> Result<(), DispatchError> {
        let line = serde_json::to_string(&instruction.to_dispatch())?;
        {
            let mut out = self
                .out
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        info!(asset = %instruction.asset_name(), power = instruction.power(), "Instruction dispatched");
        Ok(())
    }
}
