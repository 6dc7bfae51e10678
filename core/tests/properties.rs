use minesweep_core::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn game_config() -> impl Strategy<Value = GameConfig> {
    (1u8..=12, 1u8..=12)
        .prop_filter("need room for a mine and a safe cell", |&(rows, cols)| {
            rows as u16 * cols as u16 >= 2
        })
        .prop_flat_map(|size| {
            let max_mines = mult(size.0, size.1) - 1;
            (Just(size), 1..=max_mines)
        })
        .prop_map(|(size, mines)| GameConfig::new_unchecked(size, mines))
}

fn brute_force_count(layout: &MineLayout, (row, col): Coord2) -> u8 {
    let (rows, cols) = layout.size();
    let mut count = 0;
    for r in row.saturating_sub(1)..=row.saturating_add(1) {
        for c in col.saturating_sub(1)..=col.saturating_add(1) {
            if (r, c) != (row, col) && r < rows && c < cols && layout.contains_mine((r, c)) {
                count += 1;
            }
        }
    }
    count
}

fn safe_cells(engine: &PlayEngine) -> Vec<Coord2> {
    engine
        .board()
        .iter()
        .filter(|(_, cell)| !cell.is_mine())
        .map(|(coords, _)| coords)
        .collect()
}

proptest! {
    #[test]
    fn adjacency_matches_brute_force(config in game_config(), seed in any::<u64>()) {
        let layout = RandomMinefieldGenerator::new(seed).generate(config).unwrap();
        let board = Board::new(&layout);

        prop_assert_eq!(layout.mine_count(), config.mines);
        for (coords, cell) in board.iter() {
            prop_assert_eq!(cell.is_mine(), layout.contains_mine(coords));
            if !cell.is_mine() {
                prop_assert_eq!(cell.adjacent_count(), brute_force_count(&layout, coords));
            }
        }
    }

    #[test]
    fn revealing_safe_cells_never_opens_a_mine(
        config in game_config(),
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..16),
    ) {
        let mut engine = PlayEngine::new_game(config, RandomMinefieldGenerator::new(seed)).unwrap();
        let safe = safe_cells(&engine);

        for pick in picks {
            if engine.is_finished() {
                break;
            }
            engine.reveal(*pick.get(&safe)).unwrap();
            prop_assert!(engine.board().iter().all(|(_, cell)| !(cell.is_mine() && cell.is_revealed())));
            prop_assert_ne!(engine.outcome(), Outcome::Lost);
        }
    }

    #[test]
    fn won_exactly_when_unrevealed_equals_mines(config in game_config(), seed in any::<u64>()) {
        let mut engine = PlayEngine::new_game(config, RandomMinefieldGenerator::new(seed)).unwrap();
        let mines: BTreeSet<usize> = engine
            .mine_locations()
            .into_iter()
            .map(|coords| engine.board().index_of(coords))
            .collect();

        for coords in safe_cells(&engine) {
            let won_before = engine.outcome() == Outcome::Won;
            prop_assert_eq!(won_before, engine.unrevealed_indices() == mines);
            if won_before {
                break;
            }
            engine.reveal(coords).unwrap();
        }

        prop_assert_eq!(engine.outcome(), Outcome::Won);
        prop_assert_eq!(engine.unrevealed_indices(), mines);
    }

    #[test]
    fn marks_stay_exclusive(
        config in game_config(),
        seed in any::<u64>(),
        actions in prop::collection::vec((0u8..5, any::<prop::sample::Index>()), 1..40),
    ) {
        let mut engine = PlayEngine::new_game(config, RandomMinefieldGenerator::new(seed)).unwrap();
        let cells: Vec<Coord2> = engine.board().iter().map(|(coords, _)| coords).collect();

        for (action, pick) in actions {
            let coords = *pick.get(&cells);
            let before = engine.cell_at(coords).unwrap();
            let result = match action {
                0 => engine.flag(coords).map(|_| ()),
                1 => engine.mark_unsure(coords).map(|_| ()),
                2 => engine.clear_mark(coords).map(|_| ()),
                3 => engine.toggle_flag(coords).map(|_| ()),
                _ => engine.reveal(coords).map(|_| ()),
            };
            if result == Err(GameError::AlreadyEnded) {
                break;
            }
            if before.is_revealed() && action < 2 {
                prop_assert_eq!(engine.cell_at(coords).unwrap(), before);
            }
            for (_, cell) in engine.board().iter() {
                prop_assert!(!(cell.is_flagged() && cell.is_unsure()));
            }
        }
    }

    #[test]
    fn mines_stay_hidden_until_the_end(config in game_config(), seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let mut engine = PlayEngine::new_game(config, RandomMinefieldGenerator::new(seed)).unwrap();
        let cells: Vec<Coord2> = engine.board().iter().map(|(coords, _)| coords).collect();

        engine.reveal(*pick.get(&cells)).unwrap();
        let obs = engine.observe();

        let shows_mines = obs.symbols.iter().any(|&symbol| symbol == Symbol::Mine);
        prop_assert_eq!(shows_mines, engine.is_finished());
    }
}

#[test]
fn zero_mines_is_an_invalid_configuration() {
    assert!(matches!(
        PlayEngine::new_random((5, 5), 0, 0),
        Err(GameError::InvalidConfiguration { .. })
    ));
}

#[test]
fn two_cell_board_is_won_in_one_reveal() {
    let mut engine = PlayEngine::new_random((2, 1), 1, 9).unwrap();
    let safe = safe_cells(&engine)[0];

    assert_eq!(engine.reveal(safe), Ok(RevealOutcome::Won));
    assert_eq!(engine.outcome(), Outcome::Won);
}
