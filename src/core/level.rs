use log::{debug, info};

use crate::core::grid_map::{LevelDefinition, parse_level_definition};
use crate::core::{
    Crate, GridMap, HistoryEntry, MAX_LEVEL, MIN_LEVEL, MoveRecord, Player, UNDO_LIMIT,
};
use crate::error::{SokobanError, SokobanResult};
use crate::level_source::LevelSource;

/// One playable level: the fixed grid, the movable pieces, and the move
/// history with its step and undo counters.
#[derive(Clone, Debug)]
pub struct Level {
    pub(crate) number: u32,
    pub(crate) grid: GridMap,
    pub(crate) player: Player,
    pub(crate) boxes: Vec<Crate>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) step_count: u32,
    pub(crate) undo_used: u32,
}

impl Level {
    /// Loads level `number` from `source`.
    pub fn load(number: u32, source: &dyn LevelSource) -> SokobanResult<Level> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&number) {
            return Err(SokobanError::InvalidLevelNumber(number as i64));
        }
        let text = source.level_text(number)?;
        let definition = parse_level_definition(number, &text)?;
        info!(
            "loaded level {number} with {} boxes",
            definition.boxes.len()
        );
        Ok(Level::from_definition(number, definition))
    }

    pub fn from_definition(number: u32, definition: LevelDefinition) -> Level {
        let LevelDefinition {
            grid,
            player,
            boxes,
        } = definition;
        let boxes = boxes
            .into_iter()
            .map(|position| Crate {
                position,
                on_target: grid.is_target(position),
            })
            .collect();

        Level {
            number,
            grid,
            player: Player::new(player),
            boxes,
            history: vec![HistoryEntry::Sentinel],
            step_count: 0,
            undo_used: 0,
        }
    }

    /// Re-reads the definition of the current level and starts it over.
    /// On error the level is left as it was.
    pub fn reload(&mut self, source: &dyn LevelSource) -> SokobanResult<()> {
        *self = Level::load(self.number, source)?;
        Ok(())
    }

    /// Reverts the most recent move.
    ///
    /// Fails with [`SokobanError::NothingToUndo`] before the first move and with
    /// [`SokobanError::UndoBudgetExhausted`] once [`UNDO_LIMIT`] undos were spent.
    pub fn undo(&mut self) -> SokobanResult<MoveRecord> {
        let Some(HistoryEntry::Move(record)) = self.history.last().copied() else {
            return Err(SokobanError::NothingToUndo);
        };
        if self.undo_used >= UNDO_LIMIT {
            return Err(SokobanError::UndoBudgetExhausted(UNDO_LIMIT));
        }
        self.history.pop();

        self.player.position = record.player;
        self.player.facing = record.facing;
        if let Some(pushed) = record.pushed {
            let on_target = self.grid.is_target(pushed.from);
            let crate_ = &mut self.boxes[pushed.index];
            crate_.position = pushed.from;
            crate_.on_target = on_target;
        }

        self.step_count = self.step_count.saturating_sub(1);
        self.undo_used += 1;
        debug!(
            "level {}: undo {} of {UNDO_LIMIT}, player back at {:?}",
            self.number, self.undo_used, self.player.position
        );
        Ok(record)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boxes(&self) -> &[Crate] {
        &self.boxes
    }

    /// Full history, bottom sentinel first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn undo_used(&self) -> u32 {
        self.undo_used
    }

    pub fn undo_remaining(&self) -> u32 {
        UNDO_LIMIT.saturating_sub(self.undo_used)
    }

    /// Whether any move sits above the sentinel.
    pub fn has_moves(&self) -> bool {
        matches!(self.history.last(), Some(HistoryEntry::Move(_)))
    }
}
