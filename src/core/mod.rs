mod bounded_grid;
mod bounds;
mod consts;
mod grid_map;
mod level;
mod model_helpers;
mod models;
mod update;

pub use bounded_grid::BoundedGrid;
pub use bounds::BoundsOriginRoot;
pub use consts::*;
pub use grid_map::{GridMap, LevelDefinition, parse_level_definition};
pub use level::Level;
pub use models::{
    BlockReason, Cell, CellKind, Crate, Direction, GameChangeType, HistoryEntry, MoveOutcome,
    MoveRecord, Player, PushedCrate, UserAction, Vec2,
};
