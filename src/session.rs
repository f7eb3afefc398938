//! Progress through the level set: which level is live, how to move between
//! levels, and when the live level is written to the save store.

use log::{info, warn};

use crate::config::GameConfig;
use crate::core::{
    BlockReason, Direction, GameChangeType, Level, MAX_LEVEL, MIN_LEVEL, MoveOutcome,
};
use crate::error::{SokobanError, SokobanResult};
use crate::level_source::{DirectoryLevelSource, LevelSource};
use crate::persistence::{self, FileSaveStore, SaveStore};

/// Something the host may want to show after a session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Moved(GameChangeType),
    Blocked(BlockReason),
    LevelCompleted { level: u32, steps: u32 },
    LevelStarted { level: u32 },
    /// The last level was solved. The session stays on it.
    GameCompleted,
    Undone { used: u32, remaining: u32 },
    Reloaded { level: u32 },
    /// A level was solved but the following one could not be loaded.
    AdvanceFailed { level: u32, reason: String },
    /// An automatic save failed. In-memory state is still authoritative.
    SaveFailed(String),
    /// Continuing from the save was impossible; a new game was started instead.
    FellBackToNewGame(String),
}

pub type SessionEvents = Vec<SessionEvent>;

/// Owns the live [`Level`] together with its level source and save store.
pub struct Session {
    level: Level,
    levels: Box<dyn LevelSource>,
    store: Box<dyn SaveStore>,
}

impl Session {
    /// Starts on the first level without touching the save store.
    pub fn new(levels: Box<dyn LevelSource>, store: Box<dyn SaveStore>) -> SokobanResult<Session> {
        let level = Level::load(MIN_LEVEL, levels.as_ref())?;
        Ok(Session {
            level,
            levels,
            store,
        })
    }

    pub fn from_config(config: &GameConfig) -> SokobanResult<Session> {
        Session::new(
            Box::new(DirectoryLevelSource::new(&config.levels_dir)),
            Box::new(FileSaveStore::new(&config.save_path)),
        )
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn has_save(&self) -> bool {
        self.store.exists()
    }

    /// Deletes the save and starts over from the first level.
    pub fn new_game(&mut self) -> SokobanResult<SessionEvents> {
        if let Err(err) = self.store.clear() {
            warn!("could not delete the previous save: {err}");
        }
        self.level = Level::load(MIN_LEVEL, self.levels.as_ref())?;
        info!("new game");

        let mut events = vec![SessionEvent::LevelStarted { level: MIN_LEVEL }];
        self.auto_save(&mut events);
        Ok(events)
    }

    /// Resumes from the save store, or starts a new game when that fails.
    pub fn continue_game(&mut self) -> SokobanResult<SessionEvents> {
        match persistence::read_level(self.store.as_ref(), self.levels.as_ref()) {
            Ok(level) => {
                self.level = level;
                Ok(vec![SessionEvent::LevelStarted {
                    level: self.level.number(),
                }])
            }
            Err(err) => {
                warn!("continue failed, starting a new game: {err}");
                let mut events = vec![SessionEvent::FellBackToNewGame(err.to_string())];
                events.extend(self.new_game()?);
                Ok(events)
            }
        }
    }

    /// Applies a move to the live level. Solving it saves the solved level and
    /// advances to the next one; when that level cannot be loaded the solved
    /// level stays live.
    pub fn apply_direction(&mut self, direction: Direction) -> SokobanResult<SessionEvents> {
        let (change, won) = match self.level.apply_move(direction) {
            MoveOutcome::Blocked(reason) => return Ok(vec![SessionEvent::Blocked(reason)]),
            MoveOutcome::Moved { change, won } => (change, won),
        };

        let mut events = vec![SessionEvent::Moved(change)];
        if !won {
            self.auto_save(&mut events);
            return Ok(events);
        }

        let solved = self.level.number();
        info!(
            "level {solved} solved in {} steps",
            self.level.step_count()
        );
        self.auto_save(&mut events);
        events.push(SessionEvent::LevelCompleted {
            level: solved,
            steps: self.level.step_count(),
        });
        if solved >= MAX_LEVEL {
            events.push(SessionEvent::GameCompleted);
        }
        match self.next_level() {
            Ok(started) => events.extend(started),
            Err(err) => {
                let next = (solved + 1).min(MAX_LEVEL);
                warn!("could not advance past level {solved}: {err}");
                events.push(SessionEvent::AdvanceFailed {
                    level: next,
                    reason: err.to_string(),
                });
            }
        }
        Ok(events)
    }

    /// Reverts the last move. The undo errors are passed through untouched so
    /// the host can offer a reload when the budget is spent.
    pub fn undo(&mut self) -> SokobanResult<SessionEvents> {
        self.level.undo()?;
        let mut events = vec![SessionEvent::Undone {
            used: self.level.undo_used(),
            remaining: self.level.undo_remaining(),
        }];
        self.auto_save(&mut events);
        Ok(events)
    }

    pub fn reload(&mut self) -> SokobanResult<SessionEvents> {
        self.level.reload(self.levels.as_ref())?;
        let mut events = vec![SessionEvent::Reloaded {
            level: self.level.number(),
        }];
        self.auto_save(&mut events);
        Ok(events)
    }

    /// Moves on to the following level and saves. On the last level this
    /// starts it over.
    pub fn next_level(&mut self) -> SokobanResult<SessionEvents> {
        let mut events = self.advance(1)?;
        self.auto_save(&mut events);
        Ok(events)
    }

    /// Steps back one level without saving. Does nothing on the first level.
    pub fn previous_level(&mut self) -> SokobanResult<SessionEvents> {
        if self.level.number() <= MIN_LEVEL {
            return Ok(Vec::new());
        }
        self.advance(-1)
    }

    /// Jumps to level `number` and saves. Out-of-range numbers are rejected
    /// rather than clamped, and leave the current level in place.
    pub fn jump_to(&mut self, number: i64) -> SokobanResult<SessionEvents> {
        if !(MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&number) {
            return Err(SokobanError::InvalidLevelNumber(number));
        }
        self.level = Level::load(number as u32, self.levels.as_ref())?;
        info!("jumped to level {number}");

        let mut events = vec![SessionEvent::LevelStarted {
            level: number as u32,
        }];
        self.auto_save(&mut events);
        Ok(events)
    }

    /// Explicit save. Unlike the automatic saves, failure is returned.
    pub fn save(&mut self) -> SokobanResult<()> {
        persistence::write_level(self.store.as_mut(), &self.level)
            .map_err(|err| SokobanError::SaveFailed(err.to_string()))
    }

    fn advance(&mut self, offset: i64) -> SokobanResult<SessionEvents> {
        let target = (self.level.number() as i64 + offset).clamp(MIN_LEVEL as i64, MAX_LEVEL as i64)
            as u32;
        self.level = Level::load(target, self.levels.as_ref())?;
        info!("now on level {target}");
        Ok(vec![SessionEvent::LevelStarted { level: target }])
    }

    fn auto_save(&mut self, events: &mut SessionEvents) {
        if let Err(err) = self.save() {
            warn!("auto-save of level {} failed: {err}", self.level.number());
            events.push(SessionEvent::SaveFailed(err.to_string()));
        }
    }
}
