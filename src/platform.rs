//! Host platform detection
//!
//! The host is one of a closed set of platforms. Each platform maps to a
//! [`PlatformProfile`] describing compilers, executable suffix, debugger,
//! package manager and whether realtime scheduling needs root.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::build::toolchains::{detect_compilers, CompilerType};
use crate::error::AppError;
use crate::exec::{CommandSpec, Executor};

/// Supported host platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS (reported by the kernel as Darwin)
    MacOs,
    /// Linux
    Linux,
}

impl Platform {
    /// Platform of the running host
    pub fn current() -> Result<Self> {
        let name = match std::env::consts::OS {
            "macos" => "Darwin",
            "linux" => "Linux",
            other => other,
        };
        Self::from_os_name(name)
    }

    /// Parse a kernel name as printed by `uname -s`
    pub fn from_os_name(name: &str) -> Result<Self> {
        match name {
            "Darwin" => Ok(Platform::MacOs),
            "Linux" => Ok(Platform::Linux),
            other => Err(AppError::unsupported_platform(other).into()),
        }
    }

    /// Kernel name, also used for the default build directory
    pub fn os_name(&self) -> &'static str {
        match self {
            Platform::MacOs => "Darwin",
            Platform::Linux => "Linux",
        }
    }

    /// Compiler family preferred on this platform
    pub fn compiler_type(&self) -> CompilerType {
        match self {
            Platform::MacOs => CompilerType::Clang,
            Platform::Linux => CompilerType::Gcc,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.os_name())
    }
}

/// Package manager used to install missing programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Homebrew
    Brew,
    /// apt, run through sudo
    Apt,
}

impl PackageManager {
    /// Package name for a program looked up on PATH
    pub fn installation_name<'a>(&self, program: &'a str) -> &'a str {
        match (self, program) {
            (PackageManager::Apt, "ninja") => "ninja-build",
            _ => program,
        }
    }

    /// Command that installs `program`
    pub fn install_command(&self, program: &str) -> CommandSpec {
        let package = self.installation_name(program);
        match self {
            PackageManager::Brew => CommandSpec::new("brew").args(["install", package]),
            PackageManager::Apt => CommandSpec::new("sudo").args(["apt", "install", package]),
        }
    }
}

/// Native debugger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debugger {
    Gdb,
    Lldb,
}

impl Debugger {
    pub fn name(&self) -> &'static str {
        match self {
            Debugger::Gdb => "gdb",
            Debugger::Lldb => "lldb",
        }
    }

    /// Command that starts the debugger on `program` with `args`
    pub fn launch_command(&self, program: &str, args: &[String]) -> CommandSpec {
        let separator = match self {
            Debugger::Gdb => "--args",
            Debugger::Lldb => "--",
        };
        CommandSpec::new(self.name())
            .arg(separator)
            .arg(program)
            .args(args.iter().cloned())
    }
}

/// Everything slidepot needs to know about the host, derived once at startup
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub c_compiler: Option<PathBuf>,
    pub cxx_compiler: Option<PathBuf>,
    pub executable_suffix: &'static str,
    pub debugger: Debugger,
    pub requires_root_for_realtime: bool,
    pub package_manager: PackageManager,
}

impl PlatformProfile {
    /// Build the profile for `platform`, resolving compilers on PATH
    pub fn detect(platform: Platform, exec: &dyn Executor) -> Self {
        let (c_compiler, cxx_compiler) = detect_compilers(platform.compiler_type(), exec);

        match platform {
            Platform::MacOs => Self {
                platform,
                c_compiler,
                cxx_compiler,
                executable_suffix: ".Mach-O",
                debugger: Debugger::Lldb,
                requires_root_for_realtime: false,
                package_manager: PackageManager::Brew,
            },
            // Realtime scheduler settings need root on Linux
            Platform::Linux => Self {
                platform,
                c_compiler,
                cxx_compiler,
                executable_suffix: ".elf",
                debugger: Debugger::Gdb,
                requires_root_for_realtime: true,
                package_manager: PackageManager::Apt,
            },
        }
    }

    /// Whether realtime execution must be refused for a non-root user
    pub fn realtime_blocked(&self, is_root: bool) -> bool {
        self.requires_root_for_realtime && !is_root && self.platform == Platform::Linux
    }
}
