use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{SokobanError, SokobanResult};

/// Supplies raw level-definition text by level number.
pub trait LevelSource {
    fn level_text(&self, level: u32) -> SokobanResult<String>;
}

/// Reads `<root>/<level>.map` files.
#[derive(Clone, Debug)]
pub struct DirectoryLevelSource {
    root: PathBuf,
}

impl DirectoryLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryLevelSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn level_path(&self, level: u32) -> PathBuf {
        self.root.join(format!("{level}.map"))
    }
}

impl LevelSource for DirectoryLevelSource {
    fn level_text(&self, level: u32) -> SokobanResult<String> {
        let path = self.level_path(level);
        debug!("reading level {level} from {}", path.display());
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SokobanError::LevelNotFound(level),
            _ => SokobanError::Io(err),
        })
    }
}

/// Level texts held in memory, for embedding hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLevelSource {
    levels: BTreeMap<u32, String>,
}

impl InMemoryLevelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: u32, text: impl Into<String>) -> Self {
        self.insert(level, text);
        self
    }

    pub fn insert(&mut self, level: u32, text: impl Into<String>) {
        self.levels.insert(level, text.into());
    }
}

impl LevelSource for InMemoryLevelSource {
    fn level_text(&self, level: u32) -> SokobanResult<String> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(SokobanError::LevelNotFound(level))
    }
}
