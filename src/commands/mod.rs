//! Step implementations
//!
//! Each module exposes `execute(&Session) -> Result<StepStatus>`. Aborts are
//! returned as errors; external tool failures are reported in the status.

pub mod build;
pub mod clean;
pub mod debug;
pub mod doxygen;
pub mod run;
pub mod valgrind;

use anyhow::Result;

use crate::dispatch::Session;
use crate::error::{hints, AppError};

/// How a step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Every tool the step ran exited successfully
    Completed,
    /// Nothing to do
    Skipped,
    /// An external tool exited unsuccessfully
    ToolFailed { tool: String, exit_code: i32 },
}

/// Refuse to start the executable when realtime scheduling needs root
fn check_realtime_permission(session: &Session, operation: &str) -> Result<()> {
    if session.profile.realtime_blocked(session.exec.is_root()) {
        return Err(AppError::permission_required(operation, hints::realtime_root()).into());
    }
    Ok(())
}
