//! Doxygen step: generate the API documentation

use anyhow::Result;

use super::StepStatus;
use crate::dispatch::Session;
use crate::exec::CommandSpec;
use crate::utils::terminal::{print_step, print_warning};
use crate::utils::tools::ensure_installed_interactive;

/// Run doxygen on the configured Doxyfile from the project directory
pub fn execute(session: &Session) -> Result<StepStatus> {
    print_step("Building Doxygen documentation");

    ensure_installed_interactive(
        "doxygen",
        "documentation",
        session.invocation.assume_yes,
        &session.profile,
        session.exec,
    )?;

    let project_dir = &session.invocation.project_dir;
    let doxyfile = &session.config.project.doxyfile;
    if !project_dir.join(doxyfile).is_file() {
        print_warning(&format!(
            "{} not found in {}",
            doxyfile.display(),
            project_dir.display()
        ));
    }

    let spec = CommandSpec::new("doxygen")
        .arg(doxyfile.display().to_string())
        .current_dir(project_dir);
    session.run_tool(&spec)
}
