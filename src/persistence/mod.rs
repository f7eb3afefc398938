//! Save and restore of a level in progress.
//!
//! A [`SaveRecord`] is the durable shape of a [`Level`]; a [`SaveStore`] holds
//! its JSON form in a single slot.

mod record;
mod store;

pub use record::{BoxData, MoveData, SaveRecord, restore, save};
pub use store::{FileSaveStore, MemorySaveStore, SaveStore};

use crate::core::Level;
use crate::error::{SokobanError, SokobanResult};
use crate::level_source::LevelSource;

/// Serializes `level` into `store`, replacing any previous save.
pub fn write_level(store: &mut dyn SaveStore, level: &Level) -> SokobanResult<()> {
    let json = save(level).to_json()?;
    store.write(&json)
}

/// Reads the saved level from `store`. Unparseable contents are reported as
/// a load failure like any other corrupt save.
pub fn read_level(store: &dyn SaveStore, source: &dyn LevelSource) -> SokobanResult<Level> {
    let json = store.read()?;
    let record = SaveRecord::from_json(&json)
        .map_err(|err| SokobanError::LoadFailed(format!("unreadable save: {err}")))?;
    restore(&record, source)
}
