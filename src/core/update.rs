use log::debug;

use crate::core::{
    BlockReason, Direction, GameChangeType, HistoryEntry, Level, MoveOutcome, MoveRecord,
    PushedCrate, UserAction,
};

impl Level {
    pub fn step(&mut self, action: UserAction) -> MoveOutcome {
        match action {
            UserAction::Move(direction) => self.apply_move(direction),
        }
    }

    /// Moves the player one cell in `direction`, pushing a box if one is in
    /// the way. A blocked move changes nothing, not even the facing.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.try_move(direction);
        match outcome {
            MoveOutcome::Moved { change, won } => debug!(
                "level {}: {:?} {:?} -> {:?}, step {}{}",
                self.number,
                direction,
                change,
                self.player.position,
                self.step_count,
                if won { ", solved" } else { "" }
            ),
            MoveOutcome::Blocked(reason) => debug!(
                "level {}: {:?} blocked ({:?}) at {:?}",
                self.number, direction, reason, self.player.position
            ),
        }
        outcome
    }

    fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        let delta = direction.delta();
        let dest = self.player.position + delta;

        let Some(cell) = self.grid.get(dest) else {
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        };
        if !cell.kind.is_walkable() {
            return MoveOutcome::Blocked(BlockReason::Impassable);
        }

        let record = MoveRecord {
            player: self.player.position,
            facing: self.player.facing,
            pushed: None,
        };

        let change = match self.box_index_at(dest) {
            None => {
                self.history.push(HistoryEntry::Move(record));
                GameChangeType::PlayerMove
            }
            Some(index) => {
                let beyond = dest + delta;
                if !self.grid.is_walkable(beyond) || self.box_index_at(beyond).is_some() {
                    return MoveOutcome::Blocked(BlockReason::BoxBlocked);
                }

                self.history.push(HistoryEntry::Move(MoveRecord {
                    pushed: Some(PushedCrate { index, from: dest }),
                    ..record
                }));
                let on_target = self.grid.is_target(beyond);
                let crate_ = &mut self.boxes[index];
                crate_.position = beyond;
                crate_.on_target = on_target;
                GameChangeType::PlayerAndBoxMove
            }
        };

        self.player.position = dest;
        self.player.facing = direction;
        self.step_count += 1;

        MoveOutcome::Moved {
            change,
            won: self.is_won(),
        }
    }
}
