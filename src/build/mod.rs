//! Build directory handling and CMake/Ninja orchestration
//!
//! ## Modules
//!
//! - `cmake` - configure command construction and build types
//! - `toolchains` - native compiler detection

pub mod cmake;
pub mod toolchains;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use walkdir::WalkDir;

use crate::platform::Platform;

/// Output directory for one platform or cross-compilation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirectory {
    name: String,
    path: PathBuf,
}

impl BuildDirectory {
    /// `<project_dir>/<target>_build`, or `<project_dir>/<os>_build` without a target
    pub fn new(project_dir: &Path, target: Option<&str>, platform: Platform) -> Self {
        let name = format!("{}_build", target.unwrap_or(platform.os_name()));
        let path = project_dir.join(&name);
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Create the directory and any missing parents
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create directory: {}", self.path.display()))
    }

    /// Recursively delete the directory, returning the bytes freed
    pub fn remove(&self) -> Result<u64> {
        let size = self.size();
        fs::remove_dir_all(&self.path)
            .with_context(|| format!("Failed to remove directory: {}", self.path.display()))?;
        Ok(size)
    }

    /// Total size of the files below the directory
    pub fn size(&self) -> u64 {
        WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.metadata().ok())
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .sum()
    }

    /// Path of the linked executable
    pub fn artifact(&self, executable: &str, suffix: &str) -> PathBuf {
        self.path.join(format!("{}{}", executable, suffix))
    }
}

/// Format a byte count the way the clean summary prints it
pub fn format_size(size_bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Process working directory change that is undone on drop
#[derive(Debug)]
pub struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = std::env::current_dir().context("Failed to get current directory")?;
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to enter directory: {}", dir.display()))?;
        Ok(Self { previous })
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            eprintln!(
                "{}: failed to restore working directory {}: {}",
                style("warning").yellow().bold(),
                self.previous.display(),
                e
            );
        }
    }
}
