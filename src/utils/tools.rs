//! Tool detection and installation
//!
//! Missing programs are installed through the host package manager. Startup
//! dependencies are installed without asking; tools needed by a single step
//! (doxygen, valgrind) are installed only after the user agrees.

use anyhow::Result;

use crate::error::{hints, AppError};
use crate::exec::Executor;
use crate::platform::PlatformProfile;
use crate::utils::terminal::{print_info, print_warning};

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> &'static str {
    match tool_name {
        "cmake" => hints::cmake(),
        "ninja" => hints::ninja(),
        "doxygen" => hints::doxygen(),
        "valgrind" => hints::valgrind(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}

/// Install `program` through the package manager if it is not on PATH
///
/// A failing install is reported as a warning; the step that needs the
/// program fails later with the tool's own error.
pub fn ensure_installed(program: &str, profile: &PlatformProfile, exec: &dyn Executor) -> Result<()> {
    if exec.find_program(program).is_some() {
        return Ok(());
    }

    print_info(&format!("Installing: {}", program));
    let install = profile.package_manager.install_command(program);
    let result = exec.run(&install)?;
    if !result.success {
        print_warning(&format!(
            "'{}' exited with code {}",
            install.command_line(),
            result.exit_code
        ));
    }
    Ok(())
}

/// Install each of `programs` that is missing
pub fn ensure_all_installed(
    programs: &[String],
    profile: &PlatformProfile,
    exec: &dyn Executor,
) -> Result<()> {
    for program in programs {
        ensure_installed(program, profile, exec)?;
    }
    Ok(())
}

/// Ask before installing a missing `program`; declining aborts
pub fn ensure_installed_interactive(
    program: &str,
    required_for: &str,
    assume_yes: bool,
    profile: &PlatformProfile,
    exec: &dyn Executor,
) -> Result<()> {
    if exec.find_program(program).is_some() {
        return Ok(());
    }

    let question = format!("{} is not installed. Install it (Y/n)?", display_name(program));
    if !assume_yes && !exec.confirm(&question)? {
        return Err(AppError::install_declined(program).into());
    }

    print_info(&format!("Installing: {}", program));
    let result = exec.run(&profile.package_manager.install_command(program))?;
    if !result.success {
        return Err(AppError::missing_tool(program, required_for, get_tool_hint(program)).into());
    }
    Ok(())
}

/// `doxygen` -> `Doxygen`
fn display_name(program: &str) -> String {
    let mut chars = program.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
