//! End-to-end tests against the slidepot binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slidepot() -> Command {
    let mut cmd = Command::cargo_bin("slidepot").unwrap();
    cmd.env_remove("SLIDEPOT_PROJECT_DIR")
        .env_remove("SLIDEPOT_BUILD_TYPE")
        .env_remove("SLIDEPOT_TOOLCHAIN")
        .env_remove("SLIDEPOT_TARGET")
        .arg("--no-color");
    cmd
}

#[cfg(target_os = "linux")]
const BUILD_DIR: &str = "Linux_build";
#[cfg(target_os = "macos")]
const BUILD_DIR: &str = "Darwin_build";

/// Skip startup installs so tests never reach the real package manager
const NO_STARTUP_DEPS: &str = "[dependencies]\nrequired = []\n";

/// Executables that exit 0, placed first on PATH for the spawned binary
#[cfg(unix)]
fn stub_tools(dir: &std::path::Path, names: &[&str]) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    for name in names {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let paths = std::iter::once(dir.to_path_buf()).chain(std::env::split_paths(&inherited));
    std::env::join_paths(paths).unwrap()
}

const COMPILERS: &[&str] = &["gcc", "g++", "clang", "clang++"];

#[test]
fn help_lists_commands_and_flags() {
    slidepot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("valgrind"))
        .stdout(predicate::str::contains("--project-dir"))
        .stdout(predicate::str::contains("--valgrind-check"))
        .stdout(predicate::str::contains("(Y/n)"));
}

#[test]
fn target_with_path_components_is_rejected() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    let outside = temp.path().join("victim_build");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::create_dir_all(&outside).unwrap();

    for target in ["../victim", "", "/tmp/elsewhere"] {
        slidepot()
            .args(["clean", "-t", target, "-c"])
            .arg(&project)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("target"));
    }
    assert!(outside.is_dir());
}

#[test]
fn target_from_environment_is_rejected_when_not_a_plain_name() {
    let temp = TempDir::new().unwrap();
    slidepot()
        .env("SLIDEPOT_TARGET", "../victim")
        .args(["clean", "--dry-run", "-c"])
        .arg(temp.path())
        .assert()
        .code(2);
}

#[test]
fn unknown_command_is_rejected() {
    slidepot()
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'deploy'"));
}

#[test]
fn unknown_build_type_is_rejected() {
    slidepot()
        .args(["build", "--build-type", "Profile"])
        .assert()
        .code(2);
}

#[test]
fn missing_project_dir_fails() {
    let temp = TempDir::new().unwrap();
    slidepot()
        .args(["clean", "--dry-run", "-c"])
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project directory not found"));
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn dry_run_clean_keeps_build_dir() {
    let temp = TempDir::new().unwrap();
    let build_dir = temp.path().join(BUILD_DIR);
    std::fs::create_dir_all(&build_dir).unwrap();
    std::fs::write(build_dir.join("build.ninja"), "rule cc\n").unwrap();

    slidepot()
        .args(["clean", "--dry-run", "-c"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would remove"));

    assert!(build_dir.join("build.ninja").exists());
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn clean_without_build_dir_succeeds() {
    let temp = TempDir::new().unwrap();
    slidepot()
        .args(["clean", "--dry-run", "-c"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn malformed_config_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("slidepot.toml"), "[project\n").unwrap();

    slidepot()
        .args(["clean", "--dry-run", "-c"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("HINT:"));
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn project_dir_and_target_come_from_environment() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("Tm4c123_build")).unwrap();

    slidepot()
        .env("SLIDEPOT_PROJECT_DIR", temp.path())
        .env("SLIDEPOT_TARGET", "Tm4c123")
        .args(["clean", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaning Tm4c123_build/"))
        .stdout(predicate::str::contains("[DRY RUN] Would remove"));

    assert!(temp.path().join("Tm4c123_build").is_dir());
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn build_type_from_environment_adds_release_define() {
    let temp = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    std::fs::write(temp.path().join("slidepot.toml"), NO_STARTUP_DEPS).unwrap();
    let path = stub_tools(bin.path(), COMPILERS);

    slidepot()
        .env("PATH", path)
        .env("SLIDEPOT_BUILD_TYPE", "release")
        .args(["build", "--dry-run", "-c"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-DRELEASE_BUILD=1"))
        .stdout(predicate::str::contains("Would run: ninja"))
        .stdout(predicate::str::contains("Built ").not());

    assert!(!temp.path().join(BUILD_DIR).exists());
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn verbose_echoes_spawned_commands() {
    let temp = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    std::fs::write(temp.path().join("slidepot.toml"), NO_STARTUP_DEPS).unwrap();
    let mut tools = COMPILERS.to_vec();
    tools.extend(["cmake", "ninja"]);
    let path = stub_tools(bin.path(), &tools);

    slidepot()
        .env("PATH", path)
        .args(["build", "--verbose", "-c"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Running: cmake -G Ninja"))
        .stderr(predicate::str::contains("Running: ninja"))
        .stderr(predicate::str::contains("Finished: ninja"))
        .stdout(predicate::str::contains("success: Built"));

    assert!(temp.path().join(BUILD_DIR).is_dir());
}
