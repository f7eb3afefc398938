use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Direction, HistoryEntry, Level, MoveRecord, PushedCrate, Vec2};
use crate::error::{SokobanError, SokobanResult};
use crate::level_source::LevelSource;

/// Durable snapshot of a level in progress. The undo counter is not part of
/// it: a restored level always starts with a full undo budget.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub level: u32,
    pub player_x: i32,
    pub player_y: i32,
    pub player_facing: u8,
    pub box_count: usize,
    pub boxes: Vec<BoxData>,
    pub move_count: usize,
    pub moves: Vec<MoveData>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoxData {
    pub x: i32,
    pub y: i32,
    pub on_target: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MoveData {
    Sentinel,
    Move {
        player_x: i32,
        player_y: i32,
        player_facing: u8,
        has_box: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        box_index: Option<usize>,
        #[serde(default)]
        box_x: i32,
        #[serde(default)]
        box_y: i32,
    },
}

impl From<&HistoryEntry> for MoveData {
    fn from(entry: &HistoryEntry) -> Self {
        match entry {
            HistoryEntry::Sentinel => MoveData::Sentinel,
            HistoryEntry::Move(record) => {
                let from = record.pushed.map(|p| p.from).unwrap_or_default();
                MoveData::Move {
                    player_x: record.player.x,
                    player_y: record.player.y,
                    player_facing: record.facing.code(),
                    has_box: record.pushed.is_some(),
                    box_index: record.pushed.map(|p| p.index),
                    box_x: from.x,
                    box_y: from.y,
                }
            }
        }
    }
}

impl SaveRecord {
    pub fn to_json(&self) -> SokobanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SokobanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Flattens `level` into a save record, history included.
pub fn save(level: &Level) -> SaveRecord {
    let player = level.player();
    let boxes: Vec<BoxData> = level
        .boxes()
        .iter()
        .map(|b| BoxData {
            x: b.position.x,
            y: b.position.y,
            on_target: b.on_target,
        })
        .collect();
    let moves: Vec<MoveData> = level.history().iter().map(MoveData::from).collect();

    SaveRecord {
        level: level.number(),
        player_x: player.position.x,
        player_y: player.position.y,
        player_facing: player.facing.code(),
        box_count: boxes.len(),
        boxes,
        move_count: moves.len(),
        moves,
    }
}

/// Rebuilds a level from `record`, reloading its grid from `source`.
///
/// Any inconsistency between the record and the level definition fails with
/// [`SokobanError::LoadFailed`].
pub fn restore(record: &SaveRecord, source: &dyn LevelSource) -> SokobanResult<Level> {
    let mut level = Level::load(record.level, source)?;

    let player = Vec2::new(record.player_x, record.player_y);
    if !level.grid.is_walkable(player) {
        return Err(corrupt(format!("player at {player:?} is not on floor")));
    }
    level.player.position = player;
    level.player.facing = facing(record.player_facing)?;

    if record.box_count != record.boxes.len() || record.boxes.len() != level.boxes.len() {
        return Err(corrupt(format!(
            "level {} has {} boxes, save lists {} (count field {})",
            record.level,
            level.boxes.len(),
            record.boxes.len(),
            record.box_count
        )));
    }
    let mut occupied = HashSet::from([player]);
    for (index, (saved, crate_)) in record.boxes.iter().zip(level.boxes.iter_mut()).enumerate() {
        let position = Vec2::new(saved.x, saved.y);
        if !level.grid.is_walkable(position) || !occupied.insert(position) {
            return Err(corrupt(format!("box {index} cannot stand at {position:?}")));
        }
        let on_target = level.grid.is_target(position);
        if on_target != saved.on_target {
            warn!("box {index} at {position:?} had a stale on-target flag, refreshed");
        }
        crate_.position = position;
        crate_.on_target = on_target;
    }

    level.history = restore_history(record, level.boxes.len())?;
    check_history_replays(&level)?;
    level.step_count = (level.history.len() - 1) as u32;

    info!(
        "restored level {} at step {} with full undo budget",
        level.number, level.step_count
    );
    Ok(level)
}

fn restore_history(record: &SaveRecord, box_count: usize) -> SokobanResult<Vec<HistoryEntry>> {
    if record.move_count != record.moves.len() {
        return Err(corrupt(format!(
            "move count {} does not match {} saved moves",
            record.move_count,
            record.moves.len()
        )));
    }
    if record.moves.first() != Some(&MoveData::Sentinel) {
        return Err(corrupt("history does not start at the sentinel".to_string()));
    }

    let mut history = vec![HistoryEntry::Sentinel];
    for (i, data) in record.moves.iter().enumerate().skip(1) {
        let MoveData::Move {
            player_x,
            player_y,
            player_facing,
            has_box,
            box_index,
            box_x,
            box_y,
        } = *data
        else {
            return Err(corrupt(format!("sentinel repeated at move {i}")));
        };

        let pushed = match (has_box, box_index) {
            (false, _) => None,
            (true, Some(index)) if index < box_count => Some(PushedCrate {
                index,
                from: Vec2::new(box_x, box_y),
            }),
            (true, _) => {
                return Err(corrupt(format!("move {i} references an unknown box")));
            }
        };
        history.push(HistoryEntry::Move(MoveRecord {
            player: Vec2::new(player_x, player_y),
            facing: facing(player_facing)?,
            pushed,
        }));
    }
    Ok(history)
}

/// Walks the history back from the restored position. Each entry has to undo
/// into a legal position one step earlier: the player back on free floor, and
/// a pushed box returning to the cell the player stood on.
fn check_history_replays(level: &Level) -> SokobanResult<()> {
    let mut player = level.player.position;
    let mut boxes: Vec<Vec2> = level.boxes.iter().map(|b| b.position).collect();

    for (i, entry) in level.history.iter().enumerate().rev() {
        let HistoryEntry::Move(record) = entry else {
            continue;
        };
        let before = record.player;
        if !level.grid.is_walkable(before) {
            return Err(corrupt(format!("move {i} starts off the floor at {before:?}")));
        }
        let Some(direction) = Direction::ALL
            .into_iter()
            .find(|d| before + d.delta() == player)
        else {
            return Err(corrupt(format!(
                "move {i} does not lead from {before:?} to {player:?}"
            )));
        };

        if let Some(pushed) = record.pushed {
            if pushed.from != player || boxes[pushed.index] != pushed.from + direction.delta() {
                return Err(corrupt(format!(
                    "move {i} pushes box {} from {:?}, which is not in front of the player",
                    pushed.index, pushed.from
                )));
            }
            boxes[pushed.index] = pushed.from;
        }
        if boxes.contains(&before) {
            return Err(corrupt(format!("move {i} starts on a box at {before:?}")));
        }
        player = before;
    }
    Ok(())
}

fn facing(code: u8) -> SokobanResult<Direction> {
    Direction::from_code(code).ok_or_else(|| corrupt(format!("unknown direction code {code}")))
}

fn corrupt(reason: String) -> SokobanError {
    SokobanError::LoadFailed(format!("corrupt save: {reason}"))
}
