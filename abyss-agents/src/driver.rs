//! Headless game loop: seats one engine per diver and plays to the end.

use crate::DecisionEngine;
use abyss_core::{next_moved_this_turn, Move, RulesError, State, TurnContext};

/// Hard cap on decisions per game; a legal game ends orders of magnitude
/// sooner.
const MAX_TURNS: u32 = 10_000;

/// What a finished game looked like.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// Final points per seat.
    pub scores: Vec<i32>,
    /// First seat holding the maximal score.
    pub winner: usize,
    /// Decisions made across the whole game.
    pub moves_played: u32,
}

/// Play one full game. `seats` supplies the engine for each diver, in seat
/// order; `ctx` supplies dice and (typically sampled) chip scoring.
pub fn play_game(
    seats: &mut [Box<dyn DecisionEngine>],
    ctx: &mut TurnContext,
) -> Result<GameOutcome, RulesError> {
    let mut state = State::new(seats.len())?;
    let mut moved = false;
    let mut moves_played = 0;

    while !(state.is_terminal() && state.is_last_round()) {
        if moves_played >= MAX_TURNS {
            break;
        }

        let legal = state.possible_moves(moved);
        if legal[0] == Move::End {
            state = state.do_move(Move::End, ctx)?;
            moved = false;
            continue;
        }

        let player = state.current_player;
        let mv = seats[player].find_best_move(&state, player, moved)?;

        let prev_round = state.current_round;
        state = state.do_move(mv, ctx)?;
        moves_played += 1;

        // The action phase only follows a swim that kept the turn; a round
        // roll-over resets the phase no matter who acts next.
        moved = state.current_round == prev_round
            && next_moved_this_turn(mv, player, state.current_player);
    }

    let mut winner = 0;
    let mut best = i32::MIN;
    for (i, p) in state.players.iter().enumerate() {
        if p.points > best {
            best = p.points;
            winner = i;
        }
    }

    Ok(GameOutcome {
        scores: state.players.iter().map(|p| p.points).collect(),
        winner,
        moves_played,
    })
}
