//! Debug step: start the built program under gdb or lldb

use anyhow::Result;

use super::{check_realtime_permission, StepStatus};
use crate::dispatch::Session;
use crate::error::AppError;
use crate::utils::terminal::print_step;

pub fn execute(session: &Session) -> Result<StepStatus> {
    let debugger = session.profile.debugger;
    print_step(&format!(
        "Debugging {} with {}",
        session.config.project.executable,
        debugger.name()
    ));

    // The debuggee still creates realtime threads
    check_realtime_permission(session, "Debugging with realtime scheduling")?;

    if session.exec.find_program(debugger.name()).is_none() {
        return Err(AppError::missing_tool(
            debugger.name(),
            "debug",
            format!("Install {} and ensure it's in your PATH", debugger.name()),
        )
        .into());
    }

    let artifact = session.require_artifact()?;
    let spec = debugger.launch_command(
        &artifact.display().to_string(),
        &session.invocation.run_args,
    );
    session.run_tool(&spec)
}
