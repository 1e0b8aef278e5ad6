//! Run step: execute the built program on the host

use anyhow::Result;

use super::{check_realtime_permission, StepStatus};
use crate::dispatch::Session;
use crate::exec::CommandSpec;
use crate::utils::terminal::print_step;

/// Run the executable with the trailing `-- args`
pub fn execute(session: &Session) -> Result<StepStatus> {
    print_step(&format!("Running {}", session.config.project.executable));

    check_realtime_permission(session, "Running with realtime scheduling")?;

    let artifact = session.require_artifact()?;
    let spec = CommandSpec::new(artifact.display().to_string())
        .args(session.invocation.run_args.iter().cloned());
    session.run_tool(&spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Step;
    use crate::dispatch::tests::invocation;
    use crate::error::AppError;
    use crate::exec::testing::RecordingExecutor;
    use crate::platform::Platform;
    use tempfile::TempDir;

    fn build_artifact(temp: &TempDir, dir: &str, file: &str) -> String {
        let build = temp.path().join(dir);
        std::fs::create_dir_all(&build).unwrap();
        let artifact = build.join(file);
        std::fs::write(&artifact, b"").unwrap();
        artifact.display().to_string()
    }

    #[test]
    fn test_linux_non_root_aborts_without_spawning() {
        let temp = TempDir::new().unwrap();
        build_artifact(&temp, "Linux_build", "SlidePotentiometer.elf");
        let exec = RecordingExecutor::new().as_root(false);
        let session =
            Session::new(Platform::Linux, invocation(temp.path(), &[Step::Run]), &exec).unwrap();

        let err = execute(&session).unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(e @ AppError::PermissionRequired { .. }) => {
                assert!(e.hint().unwrap().contains("realtime scheduling"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_linux_root_runs_artifact_with_args() {
        let temp = TempDir::new().unwrap();
        let artifact = build_artifact(&temp, "Linux_build", "SlidePotentiometer.elf");
        let exec = RecordingExecutor::new().as_root(true);
        let mut inv = invocation(temp.path(), &[Step::Run]);
        inv.run_args = vec!["--once".to_string()];
        let session = Session::new(Platform::Linux, inv, &exec).unwrap();

        assert_eq!(execute(&session).unwrap(), StepStatus::Completed);
        assert_eq!(exec.command_lines(), vec![format!("{} --once", artifact)]);
    }

    #[test]
    fn test_macos_runs_without_root() {
        let temp = TempDir::new().unwrap();
        let artifact = build_artifact(&temp, "Darwin_build", "SlidePotentiometer.Mach-O");
        let exec = RecordingExecutor::new().as_root(false);
        let session =
            Session::new(Platform::MacOs, invocation(temp.path(), &[Step::Run]), &exec).unwrap();

        execute(&session).unwrap();
        assert_eq!(exec.command_lines(), vec![artifact]);
    }

    #[test]
    fn test_missing_artifact_is_error() {
        let temp = TempDir::new().unwrap();
        let exec = RecordingExecutor::new().as_root(true);
        let session =
            Session::new(Platform::Linux, invocation(temp.path(), &[Step::Run]), &exec).unwrap();

        let err = execute(&session).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::ArtifactMissing { .. })
        ));
    }

    #[test]
    fn test_failing_program_reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let artifact = build_artifact(&temp, "Linux_build", "SlidePotentiometer.elf");
        let exec = RecordingExecutor::new().as_root(true).failing(&artifact, 134);
        let session =
            Session::new(Platform::Linux, invocation(temp.path(), &[Step::Run]), &exec).unwrap();

        assert_eq!(
            execute(&session).unwrap(),
            StepStatus::ToolFailed {
                tool: artifact,
                exit_code: 134
            }
        );
    }
}
