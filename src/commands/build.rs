//! Build step: configure with CMake, build with Ninja
//!
//! Both tools run with the build directory as the process working
//! directory. The directory is entered through a [`ScopedDir`] so the
//! previous working directory comes back even when a step errors out.

use anyhow::Result;

use super::StepStatus;
use crate::build::cmake::{ninja_command, CMakeConfig};
use crate::build::toolchains::CompilerInfo;
use crate::build::ScopedDir;
use crate::dispatch::Session;
use crate::utils::terminal::{print_step, print_success, print_warning};
use crate::utils::tools::ensure_all_installed;

/// Configure and build the project into the build directory
pub fn execute(session: &Session) -> Result<StepStatus> {
    let invocation = &session.invocation;
    let build_dir = &session.build_dir;

    print_step(&format!(
        "Building {} ({}) in {}/",
        session.config.project.executable,
        invocation.build_type,
        build_dir.name()
    ));

    let compilers = CompilerInfo::from_profile(&session.profile)?;

    if let Some(target) = &invocation.target {
        ensure_all_installed(
            &session.config.target_tools(target),
            &session.profile,
            session.exec,
        )?;
    }

    let cmake = CMakeConfig::new(&invocation.project_dir)
        .generator("Ninja")
        .compilers(compilers.cmake_variables())
        .toolchain_file(invocation.toolchain.as_deref())
        .target(invocation.target.as_deref())
        .build_type(invocation.build_type);

    if session.exec.is_dry_run() {
        println!(
            "  [DRY RUN] Would create and enter: {}",
            build_dir.path().display()
        );
        return configure_and_build(session, &cmake);
    }

    build_dir.create()?;
    let _cwd = ScopedDir::enter(build_dir.path())?;
    configure_and_build(session, &cmake)
}

fn configure_and_build(session: &Session, cmake: &CMakeConfig) -> Result<StepStatus> {
    let status = session.run_tool(&cmake.configure_command())?;
    if status != StepStatus::Completed {
        print_warning("CMake configure failed, skipping ninja");
        return Ok(status);
    }

    let status = session.run_tool(&ninja_command())?;
    if status == StepStatus::Completed && !session.exec.is_dry_run() {
        print_success(&format!("Built {}", session.artifact().display()));
    }
    Ok(status)
}
