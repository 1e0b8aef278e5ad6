//! CMake configuration
//!
//! Builds the configure command line for the project. The build directory is
//! the working directory of the configure and ninja invocations, so no `-B`
//! is passed.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::exec::CommandSpec;

/// Project build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
        }
    }
}

/// CMake configuration builder
#[derive(Debug, Default)]
pub struct CMakeConfig {
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build type
    build_type: BuildType,
    /// Compiler variables, passed ahead of the source directory
    compilers: Vec<(String, String)>,
    /// CMake variables (-D options)
    variables: Vec<(String, String)>,
    /// Generator (e.g., "Ninja")
    generator: Option<String>,
    /// Toolchain file
    toolchain_file: Option<PathBuf>,
}

impl CMakeConfig {
    /// Create a new CMake configuration
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Default::default()
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set a CMake variable
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Pin the C and C++ compilers
    pub fn compilers(mut self, vars: Vec<(String, String)>) -> Self {
        self.compilers = vars;
        self
    }

    /// Set the generator
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Set the toolchain file
    pub fn toolchain_file(mut self, path: Option<&Path>) -> Self {
        self.toolchain_file = path.map(Path::to_path_buf);
        self
    }

    /// Define `<target>=1` so the project selects its target sources
    pub fn target(self, target: Option<&str>) -> Self {
        match target {
            Some(target) => self.variable(target, "1"),
            None => self,
        }
    }

    /// The configure command line
    pub fn configure_command(&self) -> CommandSpec {
        let mut cmd = CommandSpec::new("cmake");

        if let Some(generator) = &self.generator {
            cmd = cmd.arg("-G").arg(generator.clone());
        }

        for (name, value) in &self.compilers {
            cmd = cmd.arg(format!("-D{}={}", name, value));
        }

        cmd = cmd.arg("-S").arg(self.source_dir.display().to_string());

        if let Some(toolchain) = &self.toolchain_file {
            cmd = cmd.arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
        }

        for (name, value) in &self.variables {
            cmd = cmd.arg(format!("-D{}={}", name, value));
        }

        if self.build_type == BuildType::Release {
            cmd = cmd.arg("-DRELEASE_BUILD=1");
        }

        cmd
    }
}

/// The ninja invocation that follows a configure
pub fn ninja_command() -> CommandSpec {
    CommandSpec::new("ninja")
}
