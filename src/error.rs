/// Core error type for the Sokoban engine.
///
/// A blocked move is not an error: see [`crate::core::MoveOutcome::Blocked`].
#[derive(thiserror::Error, Debug)]
pub enum SokobanError {
    /// Explicit jump outside the playable range. Level state is unchanged.
    #[error("Invalid level number {0}, expected 1..=50")]
    InvalidLevelNumber(i64),

    /// History holds only the starting state.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The per-level undo allowance is used up. Reloading the level restores it.
    #[error("Undo budget exhausted ({0} of {0} used)")]
    UndoBudgetExhausted(u32),

    #[error("Level {0} not found")]
    LevelNotFound(u32),

    /// The level definition could not be turned into a playable grid.
    #[error("Malformed level {level}: {reason}")]
    MalformedLevel { level: u32, reason: String },

    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// Missing, unreadable or inconsistent save. Callers fall back to a new game.
    #[error("Load failed: {0}")]
    LoadFailed(String),

    #[error("Save store unavailable: {0}")]
    StoreUnavailable(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type used throughout the engine.
pub type SokobanResult<T> = Result<T, SokobanError>;
