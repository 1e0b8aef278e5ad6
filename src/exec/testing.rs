//! Recording executor for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use super::subprocess::{CommandResult, CommandSpec, Executor};

/// Executor double that records commands and fakes the host
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    programs: HashSet<String>,
    root: bool,
    dry_run: bool,
    exit_codes: HashMap<String, i32>,
    answers: RefCell<VecDeque<bool>>,
    calls: RefCell<Vec<CommandSpec>>,
    cwds: RefCell<Vec<PathBuf>>,
    prompts: RefCell<Vec<String>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs that `find_program` resolves
    pub fn with_programs(mut self, names: &[&str]) -> Self {
        self.programs.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn as_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Make every invocation of `program` exit with `code`
    pub fn failing(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Queue an answer for the next prompt
    pub fn answer(self, yes: bool) -> Self {
        self.answers.borrow_mut().push_back(yes);
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::command_line).collect()
    }

    /// Process working directory observed at each `run`
    pub fn cwds(&self) -> Vec<PathBuf> {
        self.cwds.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn ran(&self, program: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.program == program)
    }
}

impl Executor for RecordingExecutor {
    fn find_program(&self, name: &str) -> Option<PathBuf> {
        self.programs
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        if let Ok(cwd) = std::env::current_dir() {
            self.cwds.borrow_mut().push(cwd);
        }
        Ok(match self.exit_codes.get(&spec.program) {
            Some(code) => CommandResult {
                success: false,
                exit_code: *code,
                duration: Duration::ZERO,
            },
            None => CommandResult::ok(),
        })
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        self.prompts.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
    }

    fn is_root(&self) -> bool {
        self.root
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
