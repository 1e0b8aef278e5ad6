//! Command dispatch
//!
//! A [`Session`] is everything the steps share: the frozen invocation, the
//! host profile, the project configuration and the executor. The
//! [`Dispatcher`] installs startup dependencies and then runs the scheduled
//! steps one after another. An abort (missing privilege, declined install)
//! stops the remaining steps; a failing external tool does not.

use std::path::PathBuf;

use anyhow::Result;

use crate::build::BuildDirectory;
use crate::cli::{Invocation, Step};
use crate::commands::{self, StepStatus};
use crate::config::{SlidepotConfig, CONFIG_FILE_NAME};
use crate::error::AppError;
use crate::exec::{CommandSpec, Executor};
use crate::platform::{Platform, PlatformProfile};
use crate::utils::terminal::{print_info, print_success, print_warning};
use crate::utils::tools::ensure_all_installed;

/// State shared by all steps of one invocation
pub struct Session<'a> {
    pub invocation: Invocation,
    pub profile: PlatformProfile,
    pub config: SlidepotConfig,
    pub build_dir: BuildDirectory,
    pub exec: &'a dyn Executor,
}

impl<'a> Session<'a> {
    /// Derive the session for `platform`
    pub fn new(platform: Platform, invocation: Invocation, exec: &'a dyn Executor) -> Result<Self> {
        let profile = PlatformProfile::detect(platform, exec);
        let config = SlidepotConfig::load(&invocation.project_dir)?;
        let build_dir = BuildDirectory::new(
            &invocation.project_dir,
            invocation.target.as_deref(),
            platform,
        );

        Ok(Self {
            invocation,
            profile,
            config,
            build_dir,
            exec,
        })
    }

    /// Path of the built executable
    pub fn artifact(&self) -> PathBuf {
        self.build_dir
            .artifact(&self.config.project.executable, self.profile.executable_suffix)
    }

    /// Path of the built executable, which must exist unless this is a dry run
    pub fn require_artifact(&self) -> Result<PathBuf> {
        let artifact = self.artifact();
        if !artifact.is_file() {
            if self.exec.is_dry_run() {
                print_warning(&format!("{} has not been built yet", artifact.display()));
            } else {
                return Err(AppError::artifact_missing(artifact).into());
            }
        }
        Ok(artifact)
    }

    /// Run an external tool, turning a non-zero exit into a failed status
    pub fn run_tool(&self, spec: &CommandSpec) -> Result<StepStatus> {
        let result = self.exec.run(spec)?;
        if result.success {
            Ok(StepStatus::Completed)
        } else {
            print_warning(&format!(
                "'{}' exited with code {}",
                spec.command_line(),
                result.exit_code
            ));
            Ok(StepStatus::ToolFailed {
                tool: spec.program.clone(),
                exit_code: result.exit_code,
            })
        }
    }
}

/// Outcome of every executed step
#[derive(Debug, Default)]
pub struct Summary {
    pub results: Vec<(Step, StepStatus)>,
}

impl Summary {
    /// Process exit code: the last failing tool's code, 0 if none failed
    pub fn exit_code(&self) -> i32 {
        self.results
            .iter()
            .rev()
            .find_map(|(_, status)| match status {
                StepStatus::ToolFailed { exit_code, .. } if *exit_code > 0 => Some(*exit_code),
                StepStatus::ToolFailed { .. } => Some(1),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// Runs the scheduled steps of an invocation in order
pub struct Dispatcher<'a> {
    session: Session<'a>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher for the running host
    pub fn new(invocation: Invocation, exec: &'a dyn Executor) -> Result<Self> {
        Self::for_platform(Platform::current()?, invocation, exec)
    }

    /// Create a dispatcher for a specific platform
    pub fn for_platform(
        platform: Platform,
        invocation: Invocation,
        exec: &'a dyn Executor,
    ) -> Result<Self> {
        Ok(Self {
            session: Session::new(platform, invocation, exec)?,
        })
    }

    /// Install startup dependencies, then execute each scheduled step
    pub fn run(&self) -> Result<Summary> {
        let session = &self.session;

        print_info(&format!(
            "Platform: {} | project: {}",
            session.profile.platform,
            session.invocation.project_dir.display()
        ));
        if session.invocation.project_dir.join(CONFIG_FILE_NAME).is_file() {
            print_info(&format!("Using {}", CONFIG_FILE_NAME));
        }

        ensure_all_installed(
            &session.config.dependencies.required,
            &session.profile,
            session.exec,
        )?;

        let mut summary = Summary::default();
        for step in session.invocation.scheduled_steps() {
            let status = match step {
                Step::Clean => commands::clean::execute(session)?,
                Step::Build => commands::build::execute(session)?,
                Step::Run => commands::run::execute(session)?,
                Step::Debug => commands::debug::execute(session)?,
                Step::Doxygen => commands::doxygen::execute(session)?,
                Step::Valgrind => commands::valgrind::execute(session)?,
                Step::Test => StepStatus::Skipped,
            };
            summary.results.push((step, status));
        }

        if summary.exit_code() == 0 {
            print_success("All steps completed");
        }
        Ok(summary)
    }
}
