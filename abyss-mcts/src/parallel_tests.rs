#[cfg(test)]
mod tests {
    use crate::parallel::{MctsError, ParallelMcts, SearchConfig};
    use abyss_core::{Move, State};

    fn engine(total_iterations: u32, num_threads: usize, seed: u64) -> ParallelMcts {
        ParallelMcts::new(SearchConfig {
            total_iterations,
            num_threads,
            seed: Some(seed),
            ..SearchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn config_is_validated() {
        let bad = ParallelMcts::new(SearchConfig {
            exploration_constant: f64::NAN,
            ..SearchConfig::default()
        });
        assert!(matches!(bad, Err(MctsError::InvalidConfig { .. })));

        let bad = ParallelMcts::new(SearchConfig {
            total_iterations: 0,
            ..SearchConfig::default()
        });
        assert!(matches!(bad, Err(MctsError::InvalidConfig { .. })));
    }

    #[test]
    fn thread_count_resolves_to_at_least_one() {
        let auto = ParallelMcts::new(SearchConfig::default()).unwrap();
        assert!(auto.num_threads() >= 1);
        assert!(auto.iterations_per_thread() >= 1);

        let pinned = engine(1000, 3, 0);
        assert_eq!(pinned.num_threads(), 3);
        assert_eq!(pinned.iterations_per_thread(), 333);
    }

    #[test]
    fn single_legal_move_bypasses_the_search() {
        // A returning diver mid-water has exactly one move-phase option.
        let mut s = State::new(2).unwrap();
        s.players[0].position = 6;
        s.board.set_occupied(6, true);
        s.players[0].returning = true;

        let mut mcts = engine(u32::MAX, 2, 1);
        let mv = mcts.find_best_move(&s, 0, false).unwrap();
        assert_eq!(mv, Move::Return);
    }

    #[test]
    fn chosen_move_is_always_legal() {
        let mut s = State::new(2).unwrap();
        s.players[0].position = 4;
        s.board.set_occupied(4, true);
        s.players[0].inventory.push(vec![2]);

        let mut mcts = engine(512, 2, 7);

        let legal = s.possible_moves(false);
        let mv = mcts.find_best_move(&s, 0, false).unwrap();
        assert!(legal.contains(&mv), "{:?} not in {:?}", mv, legal);

        let legal = s.possible_moves(true);
        let mv = mcts.find_best_move(&s, 0, true).unwrap();
        assert!(legal.contains(&mv), "{:?} not in {:?}", mv, legal);
    }

    #[test]
    fn fixed_seed_and_thread_count_reproduce_the_decision() {
        let mut s = State::new(3).unwrap();
        s.players[0].position = 3;
        s.board.set_occupied(3, true);
        s.players[0].inventory.push(vec![1]);

        let first = engine(600, 2, 99).find_best_move(&s, 0, false).unwrap();
        let second = engine(600, 2, 99).find_best_move(&s, 0, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn search_prefers_surfacing_with_loot_over_a_doomed_dive() {
        // Two tiles from safety, heavy, low on air: surfacing banks the
        // carried points, diving on squanders them.
        let mut s = State::new(2).unwrap();
        s.players[0].position = 2;
        s.board.set_occupied(2, true);
        s.players[0].inventory = vec![vec![3], vec![3]];
        s.players[1].returning = true;
        s.oxygen = 6;

        let mut mcts = engine(2_000, 2, 5);
        let mv = mcts.find_best_move(&s, 0, false).unwrap();
        assert_eq!(mv, Move::Return);
    }
}
