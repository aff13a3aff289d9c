//! Single-threaded UCT worker: one tree, one arena, one RNG.

use crate::arena::NodePool;
use crate::node::{Node, NodeId, MAX_CHILDREN};
use abyss_core::{next_moved_this_turn, Move, RulesError, State, TurnContext, MAX_PLAYERS};
use rand::Rng;

/// Safety cap on rollout length.
const MAX_ROLLOUT_STEPS: u32 = 500;

/// Arena floor; searches with large budgets pre-size proportionally.
const MIN_POOL_NODES: usize = 100_000;

/// Per-root-child tallies a worker reports back for aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStats {
    pub mv: Move,
    pub visits: u64,
    /// Accumulated reward for the perspective player.
    pub wins: f64,
}

pub struct MctsWorker {
    iterations: u32,
    exploration: f64,
    ctx: TurnContext,
    pool: NodePool,
}

impl MctsWorker {
    pub fn new(iterations: u32, exploration: f64, seed: u64) -> Self {
        let capacity = MIN_POOL_NODES.max(iterations as usize / 10);
        Self {
            iterations,
            exploration,
            ctx: TurnContext::new_search(seed),
            pool: NodePool::with_capacity(capacity),
        }
    }

    /// Run one full UCT search and report visit/win tallies for the root's
    /// children, in first-expanded order.
    pub fn search(
        &mut self,
        root_state: &State,
        player_index: usize,
        moved_this_turn: bool,
    ) -> Result<Vec<MoveStats>, RulesError> {
        self.pool.reset();
        let num_players = root_state.players.len();
        let root = self.pool.alloc(Node::new(
            root_state.clone(),
            None,
            Move::LeaveTreasure,
            moved_this_turn,
        ));

        for _ in 0..self.iterations {
            let selected = self.select(root);
            let needs_expand = {
                let node = self.pool.get(selected);
                !node.is_terminal() && !node.unexpanded.is_empty()
            };
            let expanded = if needs_expand {
                self.expand(selected)?
            } else {
                selected
            };
            let rewards = self.simulate(expanded, num_players)?;
            self.backpropagate(expanded, &rewards);
        }

        let root_node = self.pool.get(root);
        let mut stats = Vec::with_capacity(root_node.child_count);
        for &cid in &root_node.children[..root_node.child_count] {
            let child = self.pool.get(cid);
            stats.push(MoveStats {
                mv: child.move_from_parent,
                visits: child.visits as u64,
                wins: child.wins[player_index],
            });
        }
        Ok(stats)
    }

    /// Nodes allocated by the last search.
    pub fn tree_size(&self) -> usize {
        self.pool.len()
    }

    /// Descend while fully expanded, maximizing UCB1 for the player to act
    /// at each node. First-seen wins ties.
    fn select(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.pool.get(id);
            if node.is_terminal() || !node.is_fully_expanded() || node.child_count == 0 {
                return id;
            }
            id = self.best_child(id);
        }
    }

    fn best_child(&self, id: NodeId) -> NodeId {
        let node = self.pool.get(id);
        let player = node.state.current_player;
        let parent_log = node.log_visits;

        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &cid in &node.children[..node.child_count] {
            let score = self.pool.get(cid).ucb1(player, self.exploration, parent_log);
            if score > best_score {
                best_score = score;
                best = cid;
            }
        }
        best
    }

    /// Expand one unexpanded move, chosen uniformly (swap-and-pop), and
    /// attach the resulting child. The child's phase bit is re-derived
    /// from the current-player delta.
    fn expand(&mut self, id: NodeId) -> Result<NodeId, RulesError> {
        let mv = {
            let node = self.pool.get_mut(id);
            let n = node.unexpanded.len();
            let i = if n <= 1 {
                0
            } else {
                self.ctx.rng.gen_range(0..n)
            };
            node.unexpanded.swap_remove(i)
        };

        let (next_state, moved) = {
            let node = self.pool.get(id);
            let next = node.state.do_move(mv, &mut self.ctx)?;
            let moved = next_moved_this_turn(mv, node.state.current_player, next.current_player);
            (next, moved)
        };

        let child = self.pool.alloc(Node::new(next_state, Some(id), mv, moved));
        let node = self.pool.get_mut(id);
        if node.child_count < MAX_CHILDREN {
            node.children[node.child_count] = child;
            node.child_count += 1;
        }
        Ok(child)
    }

    /// Uniform random playout to the end of the final round (or the step
    /// cap), then range-normalized rewards.
    fn simulate(
        &mut self,
        id: NodeId,
        num_players: usize,
    ) -> Result<[f64; MAX_PLAYERS], RulesError> {
        let (mut state, mut moved) = {
            let node = self.pool.get(id);
            (node.state.clone(), node.moved_this_turn)
        };

        let mut steps = 0;
        while !(state.is_terminal() && state.is_last_round()) && steps < MAX_ROLLOUT_STEPS {
            let moves = state.possible_moves(moved);
            if moves.is_empty() {
                // Defensive recovery: pass so the playout keeps moving.
                state = state.do_move(Move::LeaveTreasure, &mut self.ctx)?;
                moved = false;
                steps += 1;
                continue;
            }
            if moves[0] == Move::End {
                state = state.do_move(Move::End, &mut self.ctx)?;
                moved = false;
                steps += 1;
                continue;
            }

            let mv = moves[self.ctx.rng.gen_range(0..moves.len())];
            let prev = state.current_player;
            state = state.do_move(mv, &mut self.ctx)?;
            moved = next_moved_this_turn(mv, prev, state.current_player);
            steps += 1;
        }

        Ok(rewards(&state, num_players))
    }

    fn backpropagate(&mut self, mut id: NodeId, rewards: &[f64; MAX_PLAYERS]) {
        loop {
            let node = self.pool.get_mut(id);
            node.record_visit(rewards);
            match node.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }
}

/// Scoreboard range-normalized to [0,1]: best diver 1, worst 0. A fully
/// tied board pays everyone 1/n so the signal stays dense.
pub(crate) fn rewards(state: &State, num_players: usize) -> [f64; MAX_PLAYERS] {
    let mut out = [0.0; MAX_PLAYERS];

    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for p in &state.players[..num_players] {
        min = min.min(p.points);
        max = max.max(p.points);
    }

    if min == max {
        let equal = 1.0 / num_players as f64;
        for r in out.iter_mut().take(num_players) {
            *r = equal;
        }
    } else {
        let range = (max - min) as f64;
        for (r, p) in out.iter_mut().zip(state.players[..num_players].iter()) {
            *r = (p.points - min) as f64 / range;
        }
    }

    out
}
