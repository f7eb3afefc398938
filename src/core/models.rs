#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Blank,
    Wall,
    Floor,
    Target,
}

impl CellKind {
    /// Maps a level-definition digit to a cell kind. Player (5) and box (3)
    /// digits are not cell kinds and are handled by the level parser.
    pub fn from_digit(digit: u32) -> Option<CellKind> {
        match digit {
            0 => Some(CellKind::Blank),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Floor),
            4 => Some(CellKind::Target),
            _ => None,
        }
    }

    /// Whether the player or a box may stand on this kind of cell.
    pub fn is_walkable(self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub position: Vec2,
    pub kind: CellKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Vec2 { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step on the grid. `y` grows downward.
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0, -1),
            Direction::Right => Vec2::new(1, 0),
            Direction::Down => Vec2::new(0, 1),
            Direction::Left => Vec2::new(-1, 0),
        }
    }

    /// Stable integer encoding used in save records.
    pub fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        Direction::ALL.get(code as usize).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    pub position: Vec2,
    pub facing: Direction,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Player {
            position,
            facing: Direction::default(),
        }
    }
}

/// A pushable box. `on_target` mirrors the kind of the cell under it and is
/// refreshed by the level after every move and undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crate {
    pub position: Vec2,
    pub on_target: bool,
}

/// State captured before a move is applied, enough to reverse it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub player: Vec2,
    pub facing: Direction,
    pub pushed: Option<PushedCrate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PushedCrate {
    /// Index into the level's ordered box list.
    pub index: usize,
    pub from: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistoryEntry {
    /// Bottom of the history: the level as loaded. Never popped.
    Sentinel,
    Move(MoveRecord),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockReason {
    OutOfBounds,
    /// Wall or blank cell.
    Impassable,
    /// The box in the way has a wall, blank cell, grid edge or another box behind it.
    BoxBlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Moved { change: GameChangeType, won: bool },
    Blocked(BlockReason),
}

impl MoveOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, MoveOutcome::Moved { won: true, .. })
    }
}
