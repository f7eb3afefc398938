//! # Sokoban engine
//!
//! Level state machine for a grid-based box-pushing puzzle.
//!
//! - [`core`](crate::core): the grid, the player and boxes, move application, undo and win detection
//! - [`session`]: progress through the numbered levels and when to save
//! - [`persistence`]: the durable save record and the single-slot save store
//! - [`level_source`]: where raw level definitions come from
//!
//! Rendering and input belong to the host; [`text_view`] is a plain text dump
//! for terminals and tests.

pub mod config;
pub mod core;
pub mod error;
pub mod level_source;
pub mod persistence;
pub mod session;
pub mod text_view;

#[cfg(test)]
mod test;

pub use config::GameConfig;
pub use crate::core::{
    BlockReason, Cell, CellKind, Crate, Direction, GameChangeType, GridMap, HistoryEntry, Level,
    MoveOutcome, MoveRecord, Player, UserAction, Vec2,
};
pub use error::{SokobanError, SokobanResult};
pub use level_source::{DirectoryLevelSource, InMemoryLevelSource, LevelSource};
pub use persistence::{FileSaveStore, MemorySaveStore, SaveRecord, SaveStore};
pub use session::{Session, SessionEvent};
pub use text_view::render_level_to_string;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
