//! External process execution

pub mod subprocess;

#[cfg(test)]
pub mod testing;

pub use subprocess::{CommandSpec, DryRunExecutor, Executor, SystemExecutor};
