/// Width and height of every level grid, in cells.
pub const GRID_SIZE: i32 = 20;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 50;

/// Undos allowed per level lifetime. Reset by reload or a fresh level only.
pub const UNDO_LIMIT: u32 = 3;
