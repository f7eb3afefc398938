use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{SokobanError, SokobanResult};

/// Single-slot durable storage for the serialized save record.
pub trait SaveStore {
    fn exists(&self) -> bool;

    /// Fails with [`SokobanError::LoadFailed`] when there is no save.
    fn read(&self) -> SokobanResult<String>;

    fn write(&mut self, contents: &str) -> SokobanResult<()>;

    /// Removes the save. Clearing an empty store succeeds.
    fn clear(&mut self) -> SokobanResult<()>;
}

#[derive(Clone, Debug)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSaveStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, err: std::io::Error) -> SokobanError {
        SokobanError::StoreUnavailable(format!("{}: {err}", self.path.display()))
    }
}

impl SaveStore for FileSaveStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> SokobanResult<String> {
        std::fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => {
                SokobanError::LoadFailed(format!("no save at {}", self.path.display()))
            }
            _ => self.unavailable(err),
        })
    }

    fn write(&mut self, contents: &str) -> SokobanResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.unavailable(err))?;
        }
        std::fs::write(&self.path, contents).map_err(|err| self.unavailable(err))?;
        debug!("wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> SokobanResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.unavailable(err)),
        }
    }
}

/// Keeps the save in memory. Used by tests and hosts without a filesystem.
#[derive(Clone, Debug, Default)]
pub struct MemorySaveStore {
    contents: Option<String>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveStore for MemorySaveStore {
    fn exists(&self) -> bool {
        self.contents.is_some()
    }

    fn read(&self) -> SokobanResult<String> {
        self.contents
            .clone()
            .ok_or_else(|| SokobanError::LoadFailed("no save in memory".to_string()))
    }

    fn write(&mut self, contents: &str) -> SokobanResult<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> SokobanResult<()> {
        self.contents = None;
        Ok(())
    }
}
