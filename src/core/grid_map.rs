use log::debug;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::{Cell, CellKind, GRID_SIZE, Vec2};
use crate::error::{SokobanError, SokobanResult};

const PLAYER_DIGIT: u32 = 5;
const BOX_DIGIT: u32 = 3;

/// Fixed-size cell grid of a level. Shape and cell kinds never change after
/// parsing; the movable pieces live on the [`crate::core::Level`].
#[derive(Clone, Debug)]
pub struct GridMap {
    cells: BoundedGrid<Option<Cell>>,
}

impl GridMap {
    pub fn empty() -> Self {
        GridMap {
            cells: BoundedGrid::new_with_size(Vec2::new(GRID_SIZE, GRID_SIZE), None),
        }
    }

    /// Cell at `pos`, or `None` off the grid or where the definition left no cell.
    pub fn get(&self, pos: Vec2) -> Option<Cell> {
        self.cells.get(&pos).copied().flatten()
    }

    pub fn kind_at(&self, pos: Vec2) -> Option<CellKind> {
        self.get(pos).map(|cell| cell.kind)
    }

    pub fn is_walkable(&self, pos: Vec2) -> bool {
        self.kind_at(pos).is_some_and(CellKind::is_walkable)
    }

    pub fn is_target(&self, pos: Vec2) -> bool {
        self.kind_at(pos) == Some(CellKind::Target)
    }

    pub fn width(&self) -> i32 {
        self.cells.size().extent.x
    }

    pub fn height(&self) -> i32 {
        self.cells.size().extent.y
    }

    /// Columns and rows actually covered by cells, for hosts that only draw
    /// the used part of the grid.
    pub fn used_extent(&self) -> Vec2 {
        let mut extent = Vec2::default();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get(Vec2::new(x, y)).is_some() {
                    extent.x = extent.x.max(x + 1);
                    extent.y = extent.y.max(y + 1);
                }
            }
        }
        extent
    }

    pub fn target_count(&self) -> usize {
        self.cells_iter()
            .filter(|cell| cell.kind == CellKind::Target)
            .count()
    }

    pub fn cells_iter(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| Vec2::new(x, y)))
            .filter_map(move |pos| self.get(pos))
    }

    fn place(&mut self, cell: Cell) {
        self.cells[&cell.position] = Some(cell);
    }
}

/// A parsed level definition: the grid plus the starting pieces.
#[derive(Clone, Debug)]
pub struct LevelDefinition {
    pub grid: GridMap,
    pub player: Vec2,
    /// In scan order: rows top to bottom, each row from its last column to its first.
    pub boxes: Vec<Vec2>,
}

/// Parses the digit grid format. `5` marks the player and `3` a box, both
/// standing on floor; every other digit is a cell kind.
pub fn parse_level_definition(level: u32, text: &str) -> SokobanResult<LevelDefinition> {
    let malformed = |reason: String| SokobanError::MalformedLevel { level, reason };

    let mut grid = GridMap::empty();
    let mut player = None;
    let mut boxes = Vec::new();

    for (y, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        if y >= GRID_SIZE as usize {
            return Err(malformed(format!(
                "row {} is beyond the {GRID_SIZE}-row grid",
                y + 1
            )));
        }
        let chars: Vec<char> = line.chars().collect();
        if chars.len() > GRID_SIZE as usize {
            return Err(malformed(format!(
                "row {} has {} columns, the grid holds {GRID_SIZE}",
                y + 1,
                chars.len()
            )));
        }

        for x in (0..chars.len()).rev() {
            let ch = chars[x];
            let position = Vec2::new(x as i32, y as i32);
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| malformed(format!("unexpected {ch:?} at ({x}, {y})")))?;

            let kind = match digit {
                PLAYER_DIGIT => {
                    if player.replace(position).is_some() {
                        return Err(malformed(format!("second player at ({x}, {y})")));
                    }
                    CellKind::Floor
                }
                BOX_DIGIT => {
                    boxes.push(position);
                    CellKind::Floor
                }
                other => CellKind::from_digit(other)
                    .ok_or_else(|| malformed(format!("unknown cell digit {other} at ({x}, {y})")))?,
            };
            grid.place(Cell { position, kind });
        }
    }

    let player = player.ok_or_else(|| malformed("no player position".to_string()))?;
    debug!(
        "parsed level {level}: player at {:?}, {} boxes, {} targets",
        player,
        boxes.len(),
        grid.target_count()
    );

    Ok(LevelDefinition { grid, player, boxes })
}
