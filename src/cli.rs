//! CLI argument parsing using clap derive macros

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::build::cmake::BuildType;
use crate::commands::valgrind::ValgrindTool;
use crate::dispatch::Dispatcher;
use crate::exec::{DryRunExecutor, Executor, SystemExecutor};
use crate::utils::terminal;

/// A positional command word
///
/// Variant order is execution order: steps always run clean, build, run,
/// debug, doxygen, valgrind, whatever order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Step {
    /// Remove the build directory from the last build
    Clean,
    /// Configure with CMake and build with Ninja
    Build,
    /// Run the executable on the host (not on the target)
    Run,
    /// Start the executable under the platform debugger
    Debug,
    /// Build the Doxygen documentation
    Doxygen,
    /// Run valgrind with the selected analyzer
    Valgrind,
    /// Test mode; suppresses `build`
    Test,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Clean => "clean",
            Step::Build => "build",
            Step::Run => "run",
            Step::Debug => "debug",
            Step::Doxygen => "doxygen",
            Step::Valgrind => "valgrind",
            Step::Test => "test",
        };
        f.write_str(name)
    }
}

/// Run cmake projects for various platforms
///
/// Builds, runs, documents and analyzes the SlidePotentiometer application
/// on macOS and Linux hosts, or cross-compiles it for an embedded target.
#[derive(Parser, Debug)]
#[command(name = "slidepot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Commands to run, combinable (e.g. `clean build run`)
    #[arg(value_enum, required = true, num_args = 1..)]
    pub commands: Vec<Step>,

    /// Directory containing the top-level CMakeLists.txt
    #[arg(short = 'c', long, default_value = ".", env = "SLIDEPOT_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Build version to build
    #[arg(
        short = 'b',
        long,
        value_enum,
        ignore_case = true,
        default_value_t = BuildType::Debug,
        env = "SLIDEPOT_BUILD_TYPE"
    )]
    pub build_type: BuildType,

    /// Use the specified CMake toolchain file instead of the system default
    #[arg(short = 'x', long, env = "SLIDEPOT_TOOLCHAIN")]
    pub toolchain: Option<PathBuf>,

    /// Compile for the given target (e.g. Tm4c123)
    #[arg(short = 't', long, env = "SLIDEPOT_TARGET", value_parser = parse_target)]
    pub target: Option<String>,

    /// Valgrind analyzer
    #[arg(short = 'v', long, value_enum, default_value_t = ValgrindTool::Memcheck)]
    pub valgrind_check: ValgrindTool,

    /// Install missing tools without prompting
    ///
    /// Otherwise each missing tool is installed after a `(Y/n)` prompt, where
    /// an empty answer counts as yes.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Echo every spawned command
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Arguments passed to the executable by `run` and `debug`
    #[arg(last = true)]
    pub run_args: Vec<String>,
}

/// Parsed invocation, immutable once built
#[derive(Debug, Clone)]
pub struct Invocation {
    pub steps: BTreeSet<Step>,
    /// Absolute project directory
    pub project_dir: PathBuf,
    pub build_type: BuildType,
    /// Absolute toolchain file path
    pub toolchain: Option<PathBuf>,
    pub target: Option<String>,
    pub valgrind_tool: ValgrindTool,
    pub run_args: Vec<String>,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Invocation {
    /// Whether `step` was requested
    pub fn wants(&self, step: Step) -> bool {
        self.steps.contains(&step)
    }

    /// Steps that actually execute, in order
    pub fn scheduled_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .copied()
            .filter(|step| match step {
                Step::Test => false,
                Step::Build => !self.wants(Step::Test),
                _ => true,
            })
            .collect()
    }
}

/// Target names become a directory name and a CMake define, so they must
/// stay a single path component.
fn parse_target(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("target must not be empty".to_string());
    }
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(format!(
            "target '{}' must be a plain name without path separators or '..'",
            value
        ));
    }
    Ok(value.to_string())
}

impl Cli {
    /// Resolve paths against the current directory and freeze the arguments
    pub fn invocation(&self) -> Result<Invocation> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        self.invocation_from(&cwd)
    }

    fn invocation_from(&self, cwd: &Path) -> Result<Invocation> {
        let project_dir = cwd.join(&self.project_dir);
        let project_dir = project_dir.canonicalize().with_context(|| {
            format!("Project directory not found: {}", project_dir.display())
        })?;

        Ok(Invocation {
            steps: self.commands.iter().copied().collect(),
            project_dir,
            build_type: self.build_type,
            toolchain: self.toolchain.as_ref().map(|t| cwd.join(t)),
            target: self.target.clone(),
            valgrind_tool: self.valgrind_check,
            run_args: self.run_args.clone(),
            assume_yes: self.yes,
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }

    /// Execute the requested steps, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        if self.no_color {
            terminal::disable_colors();
        }

        let invocation = self.invocation()?;

        let system = SystemExecutor::new(invocation.verbose);
        let exec: &dyn Executor = if invocation.dry_run {
            &DryRunExecutor
        } else {
            &system
        };

        let dispatcher = Dispatcher::new(invocation, exec)?;
        let summary = dispatcher.run()?;
        Ok(summary.exit_code())
    }
}
