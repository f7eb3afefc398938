use std::path::PathBuf;

pub const DEFAULT_LEVELS_DIR: &str = "levels";
pub const DEFAULT_SAVE_PATH: &str = "sokoban_save.json";
pub const DEFAULT_LOG_PATH: &str = "sokoban.log";

/// Runtime settings of a game host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Directory holding `<n>.map` level definitions.
    pub levels_dir: PathBuf,
    pub save_path: PathBuf,
    pub log_path: PathBuf,
    /// Ignore any save and start from the first level.
    pub new_game: bool,
    /// Jump straight to this level after starting.
    pub start_level: Option<i64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            new_game: false,
            start_level: None,
        }
    }
}
