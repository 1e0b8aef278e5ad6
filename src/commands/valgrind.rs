//! Valgrind step: run the built program under a valgrind analyzer

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;

use super::StepStatus;
use crate::dispatch::Session;
use crate::error::{hints, AppError};
use crate::exec::CommandSpec;
use crate::utils::terminal::print_step;
use crate::utils::tools::ensure_installed_interactive;

/// Valgrind analysis tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValgrindTool {
    /// Memory error detector
    #[default]
    Memcheck,
    /// Cache and branch-prediction profiler
    Cachegrind,
    /// Call-graph generating cache profiler
    Callgrind,
    /// Thread error detector
    Helgrind,
    /// Alternative thread error detector
    Drd,
    /// Heap profiler
    Massif,
    /// Dynamic heap analysis tool
    Dhat,
}

impl ValgrindTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValgrindTool::Memcheck => "memcheck",
            ValgrindTool::Cachegrind => "cachegrind",
            ValgrindTool::Callgrind => "callgrind",
            ValgrindTool::Helgrind => "helgrind",
            ValgrindTool::Drd => "drd",
            ValgrindTool::Massif => "massif",
            ValgrindTool::Dhat => "dhat",
        }
    }
}

impl fmt::Display for ValgrindTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full valgrind command line for `program`
///
/// `--track-origins` and `--leak-check` belong to memcheck; valgrind
/// rejects them for every other tool.
pub fn valgrind_command(tool: ValgrindTool, program: &str, args: &[String]) -> CommandSpec {
    let mut cmd = CommandSpec::new("valgrind").arg(format!("--tool={}", tool));
    if tool == ValgrindTool::Memcheck {
        cmd = cmd.args(["--track-origins=yes", "--leak-check=full"]);
    }
    cmd.args(["--read-inline-info=yes", "-s"])
        .arg(program)
        .args(args.iter().cloned())
}

pub fn execute(session: &Session) -> Result<StepStatus> {
    let tool = session.invocation.valgrind_tool;
    print_step(&format!("Running valgrind ({})", tool));

    if session.profile.requires_root_for_realtime && !session.exec.is_root() {
        return Err(AppError::permission_required("valgrind", hints::valgrind_root()).into());
    }

    ensure_installed_interactive(
        "valgrind",
        "memory analysis",
        session.invocation.assume_yes,
        &session.profile,
        session.exec,
    )?;

    let artifact = session.require_artifact()?;
    let spec = valgrind_command(
        tool,
        &artifact.display().to_string(),
        &session.invocation.run_args,
    );
    session.run_tool(&spec)
}
