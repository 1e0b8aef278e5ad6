//! slidepot.toml configuration parsing
//!
//! The file is optional. Every field has a default matching the
//! SlidePotentiometer project layout:
//!
//! ```toml
//! [project]
//! executable = "SlidePotentiometer"
//! doxyfile = "Doxygen/Doxyfile"
//!
//! [dependencies]
//! required = ["cmake", "ninja", "git", "openocd", "wget"]
//!
//! [targets.Tm4c123]
//! tools = ["lm4flash"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::{hints, AppError};

/// File name looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "slidepot.toml";

/// Root configuration from slidepot.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlidepotConfig {
    pub project: ProjectConfig,
    pub dependencies: DependenciesConfig,
    pub targets: HashMap<String, TargetConfig>,
}

/// `[project]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Stem of the linked executable
    pub executable: String,
    /// Doxygen configuration, relative to the project directory
    pub doxyfile: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            executable: "SlidePotentiometer".to_string(),
            doxyfile: PathBuf::from("Doxygen/Doxyfile"),
        }
    }
}

/// `[dependencies]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependenciesConfig {
    /// Programs installed at startup when missing
    pub required: Vec<String>,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            required: ["cmake", "ninja", "git", "openocd", "wget"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// `[targets.<name>]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Extra programs needed to build or flash this target
    pub tools: Vec<String>,
}

impl SlidepotConfig {
    /// Load `slidepot.toml` from `project_dir`, falling back to defaults
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config_error_with_hint(
                format!("Failed to read {}", path.display()),
                Some(e.into()),
                hints::invalid_config(),
            )
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            AppError::config_error_with_hint(
                format!("Failed to parse {}", CONFIG_FILE_NAME),
                Some(e.into()),
                hints::invalid_config(),
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let executable = &self.project.executable;
        if executable.trim().is_empty() {
            return Err(AppError::config_error("[project] executable must not be empty").into());
        }
        if executable.contains('/') || executable.contains('\\') {
            return Err(AppError::config_error(format!(
                "[project] executable must be a file name, got '{}'",
                executable
            ))
            .into());
        }

        let all_tools = self
            .dependencies
            .required
            .iter()
            .chain(self.targets.values().flat_map(|t| t.tools.iter()));
        for tool in all_tools {
            if tool.trim().is_empty() {
                return Err(AppError::config_error("tool names must not be empty").into());
            }
        }

        Ok(())
    }

    /// Extra tools a cross-compilation target needs
    pub fn target_tools(&self, target: &str) -> Vec<String> {
        if let Some(config) = self.targets.get(target) {
            return config.tools.clone();
        }
        match target {
            "Tm4c123" => vec!["lm4flash".to_string()],
            _ => Vec::new(),
        }
    }
}
