#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::player::Player;

    #[test]
    fn advance_skips_occupied_tiles_without_spending_steps() {
        let mut board = Board::new();
        board.set_occupied(2, true);

        let mut p = Player::new();
        p.advance(2, &mut board);

        // 1 costs a step, 2 is passed over, 3 costs the second step.
        assert_eq!(p.position, 3);
        assert!(board.is_occupied(3));
        assert!(board.is_occupied(2));
        assert!(!board.is_occupied(1));
    }

    #[test]
    fn advance_past_the_deep_end_clamps_and_forces_returning() {
        let mut board = Board::new();
        let last = board.len();

        let mut p = Player::new();
        p.position = last - 1;
        board.set_occupied(last - 1, true);
        p.advance(4, &mut board);

        assert_eq!(p.position, last);
        assert!(p.returning);
        assert!(board.is_occupied(last));
        assert!(!board.is_occupied(last - 1));
    }

    #[test]
    fn clamp_steps_back_over_an_occupied_last_tile() {
        let mut board = Board::new();
        let last = board.len();
        board.set_occupied(last, true);

        let mut p = Player::new();
        p.position = last - 1;
        board.set_occupied(last - 1, true);
        p.advance(6, &mut board);

        assert!(p.returning);
        assert_ne!(p.position, last);
    }

    #[test]
    fn advance_back_to_the_submarine_consumes_the_budget() {
        let mut board = Board::new();
        let mut p = Player::new();
        p.position = 2;
        p.returning = true;
        board.set_occupied(2, true);

        p.advance(6, &mut board);

        assert_eq!(p.position, 0);
        assert!(p.has_surfaced());
        assert!(!board.is_occupied(2));
    }

    #[test]
    fn advance_backward_skips_occupied_tiles_too() {
        let mut board = Board::new();
        board.set_occupied(3, true);

        let mut p = Player::new();
        p.position = 4;
        p.returning = true;
        board.set_occupied(4, true);

        p.advance(1, &mut board);
        assert_eq!(p.position, 2);
    }

    #[test]
    fn lightest_stack_is_minimum_sum_first_seen_on_ties() {
        let mut p = Player::new();
        assert_eq!(p.lightest_stack(), None);

        p.inventory = vec![vec![3], vec![0, 1], vec![2]];
        assert_eq!(p.lightest_stack(), Some(1));

        p.inventory = vec![vec![1], vec![0, 1], vec![1]];
        assert_eq!(p.lightest_stack(), Some(0));
    }

    #[test]
    fn begin_round_clears_everything_but_points() {
        let mut p = Player::new();
        p.position = 7;
        p.returning = true;
        p.dead = true;
        p.inventory.push(vec![2]);
        p.points = 13;

        p.begin_round();

        assert_eq!(p.position, 0);
        assert!(!p.returning);
        assert!(!p.dead);
        assert!(p.inventory.is_empty());
        assert_eq!(p.points, 13);
    }
}
