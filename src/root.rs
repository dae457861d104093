//! Root directory resolution
//!
//! Each program entry point picks one strategy; the result is resolved once
//! at startup and never changes afterwards.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How the served root directory is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStrategy {
    /// The process working directory
    CurrentDir,
    /// The directory above the one holding the executable, so
    /// `<project>/bin/devserve-project` serves `<project>` from anywhere
    Installation,
}

impl RootStrategy {
    /// Resolve the strategy against the running process
    pub fn resolve(self) -> Result<PathBuf> {
        match self {
            Self::CurrentDir => current_dir_root(),
            Self::Installation => {
                let exe = std::env::current_exe()?;
                installation_root(&exe).ok_or_else(|| Error::Root {
                    path: exe.clone(),
                    reason: "executable has no grandparent directory".to_string(),
                })
            }
        }
    }
}

/// The working directory, as an absolute path
pub fn current_dir_root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Grandparent of an executable path, made absolute
pub fn installation_root(exe: &Path) -> Option<PathBuf> {
    let absolute = if exe.is_absolute() {
        exe.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(exe)
    };
    absolute.parent()?.parent().map(Path::to_path_buf)
}

/// Fail unless `root` is an existing directory
pub fn ensure_servable(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|e| Error::Root {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(Error::Root {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        })
    }
}
