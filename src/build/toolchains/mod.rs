//! C/C++ compiler detection
//!
//! The configure step pins CMake to the host's native compiler pair so a
//! stray `CC`/`CXX` in the environment cannot change what gets built.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::error::{hints, AppError};
use crate::exec::Executor;
use crate::platform::PlatformProfile;

/// Compiler family for C/C++ toolchains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerType {
    /// GNU Compiler Collection
    Gcc,
    /// LLVM Clang
    Clang,
}

impl CompilerType {
    /// C compiler executable name
    pub fn c_name(&self) -> &'static str {
        match self {
            CompilerType::Gcc => "gcc",
            CompilerType::Clang => "clang",
        }
    }

    /// C++ compiler executable name
    pub fn cxx_name(&self) -> &'static str {
        match self {
            CompilerType::Gcc => "g++",
            CompilerType::Clang => "clang++",
        }
    }
}

impl fmt::Display for CompilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerType::Gcc => write!(f, "gcc"),
            CompilerType::Clang => write!(f, "clang"),
        }
    }
}

/// Resolve the C and C++ compilers of `compiler_type` on PATH
pub fn detect_compilers(
    compiler_type: CompilerType,
    exec: &dyn Executor,
) -> (Option<PathBuf>, Option<PathBuf>) {
    (
        exec.find_program(compiler_type.c_name()),
        exec.find_program(compiler_type.cxx_name()),
    )
}

/// Resolved C/C++ compiler pair
#[derive(Debug, Clone)]
pub struct CompilerInfo {
    /// Path to C compiler
    pub cc: PathBuf,
    /// Path to C++ compiler
    pub cxx: PathBuf,
}

impl CompilerInfo {
    /// Take the compiler pair from a profile, failing if either is missing
    pub fn from_profile(profile: &PlatformProfile) -> Result<Self> {
        let compiler_type = profile.platform.compiler_type();
        let cc = profile.c_compiler.clone().ok_or_else(|| {
            AppError::missing_tool(compiler_type.c_name(), "build", hints::compiler())
        })?;
        let cxx = profile.cxx_compiler.clone().ok_or_else(|| {
            AppError::missing_tool(compiler_type.cxx_name(), "build", hints::compiler())
        })?;
        Ok(Self { cc, cxx })
    }

    /// Get CMake variables for this compiler
    pub fn cmake_variables(&self) -> Vec<(String, String)> {
        vec![
            ("CMAKE_C_COMPILER".to_string(), self.cc.display().to_string()),
            (
                "CMAKE_CXX_COMPILER".to_string(),
                self.cxx.display().to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::RecordingExecutor;
    use crate::platform::Platform;

    #[test]
    fn test_cmake_variables() {
        let exec = RecordingExecutor::new().with_programs(&["clang", "clang++"]);
        let profile = PlatformProfile::detect(Platform::MacOs, &exec);
        let info = CompilerInfo::from_profile(&profile).unwrap();

        assert_eq!(
            info.cmake_variables(),
            vec![
                ("CMAKE_C_COMPILER".to_string(), "/usr/bin/clang".to_string()),
                ("CMAKE_CXX_COMPILER".to_string(), "/usr/bin/clang++".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_cxx_compiler_is_missing_tool() {
        let exec = RecordingExecutor::new().with_programs(&["gcc"]);
        let profile = PlatformProfile::detect(Platform::Linux, &exec);
        let err = CompilerInfo::from_profile(&profile).unwrap_err();

        match err.downcast_ref::<AppError>() {
            Some(AppError::MissingTool { tool, .. }) => assert_eq!(tool, "g++"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
