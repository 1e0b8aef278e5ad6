//! Subprocess execution
//!
//! Every external tool slidepot drives (package managers, cmake, ninja,
//! doxygen, valgrind, debuggers and the built executable) goes through an
//! [`Executor`]. The system executor spawns real processes with inherited
//! stdio; the dry-run executor only prints what would happen.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;

/// A fully specified external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path
    pub program: String,
    /// Arguments passed verbatim (no shell)
    pub args: Vec<String>,
    /// Working directory for the child, inherited when `None`
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Human readable command line
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a subprocess execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, -1 when killed by a signal
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            duration,
        }
    }

    /// A successful result that took no time
    pub fn ok() -> Self {
        Self {
            success: true,
            exit_code: 0,
            duration: Duration::ZERO,
        }
    }
}

/// Host operations the dispatcher depends on
pub trait Executor {
    /// Look up a program on PATH
    fn find_program(&self, name: &str) -> Option<PathBuf>;

    /// Run a command to completion with inherited stdio
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;

    /// Ask a yes/no question on the terminal
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Whether the current process runs with root privilege
    fn is_root(&self) -> bool;

    /// Whether filesystem and process side effects are suppressed
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Interpret an answer to a `(Y/n)` prompt
pub fn parse_confirmation(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

#[cfg(unix)]
fn effective_user_is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn effective_user_is_root() -> bool {
    false
}

/// Executor that spawns real processes
#[derive(Debug, Default)]
pub struct SystemExecutor {
    verbose: bool,
}

impl SystemExecutor {
    /// Create a system executor
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Executor for SystemExecutor {
    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }

        if self.verbose {
            eprintln!("{} {}", style("Running:").dim(), spec.command_line());
        }

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {}", spec.program))?;

        let result = CommandResult::from_status(status, start.elapsed());
        if self.verbose {
            eprintln!(
                "{} {} in {:.1}s",
                style("Finished:").dim(),
                spec.program,
                result.duration.as_secs_f64()
            );
        }
        Ok(result)
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        print!("{} ", style(question).cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer from stdin")?;

        Ok(parse_confirmation(&input))
    }

    fn is_root(&self) -> bool {
        effective_user_is_root()
    }
}

/// Executor that prints commands instead of running them
#[derive(Debug, Default)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        match &spec.current_dir {
            Some(dir) => println!(
                "  [DRY RUN] Would run: {} (in {})",
                spec.command_line(),
                dir.display()
            ),
            None => println!("  [DRY RUN] Would run: {}", spec.command_line()),
        }
        Ok(CommandResult::ok())
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        println!("  [DRY RUN] Would ask: {} (assuming yes)", question);
        Ok(true)
    }

    fn is_root(&self) -> bool {
        effective_user_is_root()
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
