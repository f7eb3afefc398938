mod test {
    use crate::core::*;
    use crate::error::SokobanError;
    use crate::persistence::{
        self, FileSaveStore, MemorySaveStore, MoveData, SaveRecord, restore, save,
    };
    use crate::test::test_util::{GameTestState, snapshot};
    use Direction::*;

    const ROOM: &str = r#"
#######
#  .  #
# $@$ #
#    .#
#######
"#;

    fn played_room() -> GameTestState {
        let mut game = GameTestState::new(ROOM);
        // push the right box right, then walk round and push the left one up
        game.assert_moves(&[Right, Down, Left, Left, Up]);
        game
    }

    #[test]
    fn round_trip_reproduces_level() {
        let game = played_room();
        let record = save(&game.level);

        let restored = restore(&record, &game.source).unwrap();

        assert_eq!(snapshot(&restored), snapshot(&game.level));
        assert_eq!(restored.history(), game.level.history());
        assert_eq!(restored.number(), 1);
    }

    #[test]
    fn round_trip_resets_undo_budget() {
        let mut game = played_room();
        game.level.undo().unwrap();
        assert_eq!(game.level.undo_used(), 1);

        let restored = restore(&save(&game.level), &game.source).unwrap();

        assert_eq!(restored.undo_used(), 0);
        assert_eq!(restored.step_count(), game.level.step_count());
    }

    #[test]
    fn restored_history_can_be_undone() {
        let mut game = played_room();
        let mut restored = restore(&save(&game.level), &game.source).unwrap();

        while restored.undo_remaining() > 0 {
            restored.undo().unwrap();
            game.level.undo().unwrap();
            assert_eq!(snapshot(&restored), snapshot(&game.level));
        }
    }

    #[test]
    fn record_uses_explicit_sentinel_and_box_references() {
        let game = played_room();
        let record = save(&game.level);

        assert_eq!(record.move_count, 6);
        assert_eq!(record.moves[0], MoveData::Sentinel);
        assert_eq!(
            record.moves[1],
            MoveData::Move {
                player_x: 3,
                player_y: 2,
                player_facing: Down.code(),
                has_box: true,
                box_index: Some(0),
                box_x: 4,
                box_y: 2,
            }
        );
        assert_eq!(record.box_count, 2);
        assert_eq!(record.player_facing, Up.code());
    }

    #[test]
    fn json_field_names_are_stable() {
        let game = played_room();
        let json = save(&game.level).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["level"], 1);
        assert_eq!(value["boxCount"], 2);
        assert_eq!(value["moves"][0]["kind"], "sentinel");
        assert_eq!(value["moves"][1]["kind"], "move");
        assert_eq!(value["moves"][1]["hasBox"], true);
        assert_eq!(value["moves"][1]["boxIndex"], 0);
        assert_eq!(value["boxes"][0]["onTarget"], false);

        assert_eq!(SaveRecord::from_json(&json).unwrap(), save(&game.level));
    }

    #[test]
    fn sentinel_at_origin_is_not_confused_with_a_move() {
        // a real move whose pre-move player position is (0, 0)
        let mut game = GameTestState::new("@ \n  ");
        game.assert_moves(&[Right, Left, Down]);

        let restored = restore(&save(&game.level), &game.source).unwrap();

        assert_eq!(restored.history(), game.level.history());
        assert_eq!(restored.step_count(), 3);
    }

    #[test]
    fn stale_box_flags_are_refreshed() {
        let game = played_room();
        let mut record = save(&game.level);
        for b in &mut record.boxes {
            b.on_target = !b.on_target;
        }

        let restored = restore(&record, &game.source).unwrap();

        assert_eq!(restored.boxes(), game.level.boxes());
    }

    #[test]
    fn corrupt_records_are_rejected() {
        let game = played_room();
        let good = save(&game.level);
        let load_failed = |record: &SaveRecord| {
            matches!(
                restore(record, &game.source),
                Err(SokobanError::LoadFailed(_))
            )
        };

        let mut record = good.clone();
        record.player_x = 0;
        assert!(load_failed(&record), "player inside a wall");

        let mut record = good.clone();
        record.boxes[1] = record.boxes[0];
        assert!(load_failed(&record), "two boxes on one cell");

        let mut record = good.clone();
        record.boxes.pop();
        record.box_count = 1;
        assert!(load_failed(&record), "box missing");

        let mut record = good.clone();
        record.player_facing = 9;
        assert!(load_failed(&record), "unknown facing");

        let mut record = good.clone();
        record.moves.remove(0);
        record.move_count -= 1;
        assert!(load_failed(&record), "no sentinel");

        let mut record = good.clone();
        record.moves[2] = MoveData::Sentinel;
        assert!(load_failed(&record), "sentinel in the middle");

        let mut record = good.clone();
        record.move_count += 1;
        assert!(load_failed(&record), "count mismatch");

        let mut record = good.clone();
        if let MoveData::Move { box_index, .. } = &mut record.moves[1] {
            *box_index = Some(5);
        }
        assert!(load_failed(&record), "unknown box");

        let mut record = good.clone();
        if let MoveData::Move { box_x, box_y, .. } = &mut record.moves[1] {
            *box_x = 0;
            *box_y = 0;
        }
        assert!(load_failed(&record), "box pushed out of a wall");

        let mut record = good.clone();
        if let MoveData::Move { player_x, .. } = &mut record.moves[3] {
            *player_x = i32::MAX;
        }
        assert!(load_failed(&record), "player far off the grid");

        let mut record = good.clone();
        // (4, 3) is floor but two cells from where the next move starts
        if let MoveData::Move { player_x, .. } = &mut record.moves[4] {
            *player_x = 4;
        }
        assert!(load_failed(&record), "player jumps two cells");

        let mut record = good.clone();
        // box 0 really came from (4, 2); claim it was box 1
        if let MoveData::Move { box_index, .. } = &mut record.moves[1] {
            *box_index = Some(1);
        }
        assert!(load_failed(&record), "wrong box pushed");
    }

    #[test]
    fn restored_history_undoes_onto_floor_only() {
        let game = played_room();
        let mut restored = restore(&save(&game.level), &game.source).unwrap();

        while restored.undo().is_ok() {}
        restored.apply_move(Direction::Right);

        let grid = restored.grid();
        assert!(grid.is_walkable(restored.player().position));
        assert!(restored.boxes().iter().all(|b| grid.is_walkable(b.position)));
    }

    #[test]
    fn restore_of_missing_level_fails() {
        let game = played_room();
        let mut record = save(&game.level);
        record.level = 2;

        assert!(matches!(
            restore(&record, &game.source),
            Err(SokobanError::LevelNotFound(2))
        ));
    }

    #[test]
    fn stores_round_trip_through_json() {
        let game = played_room();
        let dir = tempfile::tempdir().unwrap();
        let mut file_store = FileSaveStore::new(dir.path().join("save.json"));
        let mut memory_store = MemorySaveStore::new();

        persistence::write_level(&mut file_store, &game.level).unwrap();
        persistence::write_level(&mut memory_store, &game.level).unwrap();

        for restored in [
            persistence::read_level(&file_store, &game.source).unwrap(),
            persistence::read_level(&memory_store, &game.source).unwrap(),
        ] {
            assert_eq!(snapshot(&restored), snapshot(&game.level));
        }
    }

    #[test]
    fn unreadable_save_is_a_load_failure() {
        let game = played_room();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            persistence::read_level(&FileSaveStore::new(&path), &game.source),
            Err(SokobanError::LoadFailed(_))
        ));
        assert!(matches!(
            persistence::read_level(&MemorySaveStore::new(), &game.source),
            Err(SokobanError::LoadFailed(_))
        ));
    }
}
