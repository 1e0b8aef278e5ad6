//! Error types and helpers for user-friendly error messages
//!
//! Every early abort of the dispatcher is one of these variants. Each carries
//! a hint that is printed below the message so the user knows what to do next.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a slidepot invocation
#[derive(Error, Debug)]
pub enum AppError {
    /// Host OS has no platform profile
    #[error("Unsupported host platform: {os}")]
    UnsupportedPlatform { os: String },

    /// Tool/executable not found and could not be installed
    #[error("Missing tool: {tool} (required for {required_for})")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Operation needs root on this platform
    #[error("{operation} requires root permission on this platform")]
    PermissionRequired { operation: String, hint: String },

    /// User answered no to an install prompt
    #[error("{tool} is required but installation was declined")]
    InstallDeclined { tool: String },

    /// slidepot.toml errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Built executable is not where run/debug/valgrind expect it
    #[error("Executable not found: {}", .path.display())]
    ArtifactMissing { path: PathBuf, hint: String },
}

impl AppError {
    /// Create an unsupported platform error
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a permission error with a hint
    pub fn permission_required(operation: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::PermissionRequired {
            operation: operation.into(),
            hint: hint.into(),
        }
    }

    /// Create an install-declined error
    pub fn install_declined(tool: impl Into<String>) -> Self {
        Self::InstallDeclined { tool: tool.into() }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing artifact error
    pub fn artifact_missing(path: impl Into<PathBuf>) -> Self {
        Self::ArtifactMissing {
            path: path.into(),
            hint: hints::artifact_missing().to_string(),
        }
    }

    /// Hint printed under the error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            AppError::UnsupportedPlatform { .. } => Some(hints::unsupported_platform()),
            AppError::MissingTool { hint, .. }
            | AppError::PermissionRequired { hint, .. }
            | AppError::ArtifactMissing { hint, .. } => Some(hint.as_str()),
            AppError::Config { hint, .. } => hint.as_deref(),
            AppError::InstallDeclined { .. } => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let AppError::Config {
            source: Some(source),
            ..
        } = self
        {
            eprintln!("  caused by: {:#}", source);
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Realtime scheduling needs root on Linux
    pub fn realtime_root() -> &'static str {
        "The operating system uses realtime scheduling which on this platform requires root permission.\n\
         Re-run with sudo. See:\n\
         https://stackoverflow.com/questions/46874369/thread-explicit-scheduling-posix-api-gives-error"
    }

    /// Valgrind needs root on Linux
    pub fn valgrind_root() -> &'static str {
        "Re-run with sudo to do valgrind tests"
    }

    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake"
    }

    /// Get hint for missing Ninja
    pub fn ninja() -> &'static str {
        "Install Ninja with your package manager:\n\
         • macOS: brew install ninja\n\
         • Ubuntu: sudo apt install ninja-build"
    }

    /// Get hint for a missing C/C++ compiler
    pub fn compiler() -> &'static str {
        "Install a C/C++ compiler:\n\
         • macOS: xcode-select --install (provides clang and clang++)\n\
         • Ubuntu: sudo apt install build-essential (provides gcc and g++)"
    }

    /// Get hint for missing Doxygen
    pub fn doxygen() -> &'static str {
        "Install Doxygen for documentation generation:\n\
         • macOS: brew install doxygen\n\
         • Ubuntu: sudo apt install doxygen"
    }

    /// Get hint for missing Valgrind
    pub fn valgrind() -> &'static str {
        "Install Valgrind:\n\
         • Ubuntu: sudo apt install valgrind\n\
         • macOS: valgrind support is limited, consider the Linux build"
    }

    /// Get hint when the host is neither macOS nor Linux
    pub fn unsupported_platform() -> &'static str {
        "slidepot supports macOS (Darwin) and Linux hosts only."
    }

    /// Get hint for a missing executable
    pub fn artifact_missing() -> &'static str {
        "Build the project first:\n\
         • slidepot build\n\
         Use the same --target and --project-dir that were used for the build."
    }

    /// Get hint for invalid slidepot.toml
    pub fn invalid_config() -> &'static str {
        "slidepot.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • [project] executable must be a plain file name\n\
         • [dependencies] required must be a list of program names"
    }
}
