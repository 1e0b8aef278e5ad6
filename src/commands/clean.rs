//! Clean step: remove the build directory

use anyhow::Result;

use super::StepStatus;
use crate::build::format_size;
use crate::dispatch::Session;
use crate::utils::terminal::print_step;

/// Remove the build directory if it exists
pub fn execute(session: &Session) -> Result<StepStatus> {
    let build_dir = &session.build_dir;
    print_step(&format!("Cleaning {}/", build_dir.name()));

    if !build_dir.exists() {
        println!("  ℹ️  {}/ directory does not exist", build_dir.name());
        return Ok(StepStatus::Skipped);
    }

    if session.exec.is_dry_run() {
        println!(
            "  [DRY RUN] Would remove: {} ({})",
            build_dir.path().display(),
            format_size(build_dir.size())
        );
        return Ok(StepStatus::Completed);
    }

    let freed = build_dir.remove()?;
    println!("  ✅ Removed: {}/ ({})", build_dir.name(), format_size(freed));
    Ok(StepStatus::Completed)
}
