mod test {
    use crate::core::*;
    use crate::error::SokobanError;
    use crate::test::test_util::{GameTestState, snapshot};
    use Direction::*;

    const CORRIDOR: &str = r#"
########
#@$  . #
########
"#;

    #[test]
    fn undo_before_any_move_reports_nothing_to_undo() {
        let mut game = GameTestState::new(CORRIDOR);

        assert!(matches!(game.level.undo(), Err(SokobanError::NothingToUndo)));
        assert_eq!(game.level.undo_used(), 0);
        assert_eq!(game.level.history(), &[HistoryEntry::Sentinel]);
    }

    #[test]
    fn undo_restores_player_and_pushed_box() {
        let mut game = GameTestState::new(CORRIDOR);
        let start = snapshot(&game.level);
        game.assert_move(Right);

        let record = game.level.undo().unwrap();

        assert_eq!(
            record.pushed,
            Some(PushedCrate {
                index: 0,
                from: Vec2::new(2, 1)
            })
        );
        assert_eq!(snapshot(&game.level), start);
        assert_eq!(game.level.undo_used(), 1);
        assert_eq!(game.level.undo_remaining(), UNDO_LIMIT - 1);
        game.assert_matches(CORRIDOR);
    }

    #[test]
    fn undo_restores_facing_from_before_the_move() {
        let mut game = GameTestState::new(
            r#"
#####
#   #
#@  #
#####
"#,
        );
        game.assert_moves(&[Up, Right]);
        assert_eq!(game.level.player().facing, Right);

        game.level.undo().unwrap();

        assert_eq!(game.level.player().position, Vec2::new(1, 1));
        assert_eq!(game.level.player().facing, Up);
    }

    #[test]
    fn undo_refreshes_on_target_flag() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right, Right]);
        assert!(game.level.is_won());

        game.level.undo().unwrap();

        assert!(!game.level.boxes()[0].on_target);
        assert!(!game.level.is_won());
    }

    #[test]
    fn undo_budget_runs_out_after_three() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right, Right, Right]);

        for used in 1..=UNDO_LIMIT {
            game.level.undo().unwrap();
            assert_eq!(game.level.undo_used(), used);
        }

        assert!(matches!(
            game.level.undo(),
            Err(SokobanError::UndoBudgetExhausted(UNDO_LIMIT))
        ));
        assert_eq!(game.level.undo_used(), UNDO_LIMIT);
        assert_eq!(game.level.step_count(), 1);
    }

    #[test]
    fn empty_history_is_reported_before_exhausted_budget() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right, Right]);
        for _ in 0..UNDO_LIMIT {
            game.level.undo().unwrap();
        }

        assert!(matches!(game.level.undo(), Err(SokobanError::NothingToUndo)));
    }

    #[test]
    fn moves_after_undo_keep_counting() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right]);
        game.level.undo().unwrap();
        game.assert_move(Right);

        assert_eq!(game.level.step_count(), 2);
        assert_eq!(game.level.history().len(), 3);
        assert_eq!(game.level.undo_used(), 1);
    }

    #[test]
    fn reload_restores_budget_and_start_position() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right]);
        game.level.undo().unwrap();
        game.level.undo().unwrap();
        game.assert_move(Right);

        game.level.reload(&game.source).unwrap();

        assert_eq!(game.level.undo_used(), 0);
        assert_eq!(game.level.step_count(), 0);
        assert_eq!(game.level.history(), &[HistoryEntry::Sentinel]);
        game.assert_matches(CORRIDOR);
    }

    #[test]
    fn failed_reload_leaves_level_untouched() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_move(Right);
        let before = snapshot(&game.level);

        let empty = crate::level_source::InMemoryLevelSource::new();
        assert!(matches!(
            game.level.reload(&empty),
            Err(SokobanError::LevelNotFound(1))
        ));
        assert_eq!(snapshot(&game.level), before);
    }
}
