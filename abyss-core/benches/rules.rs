use abyss_core::{Move, State, TurnContext};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic mid-game states produced by short random playouts.
fn gen_states(n: usize) -> Vec<(State, bool)> {
    let mut out = Vec::with_capacity(n);
    let mut ctx = TurnContext::new_search(0xA5A5_0123);
    let mut chooser = ChaCha8Rng::seed_from_u64(0x5A5A_4567);

    for i in 0..n {
        let mut s = State::new(2 + (i % 5)).unwrap();
        let mut moved = false;
        for _ in 0..(i % 40) {
            if s.is_terminal() && s.is_last_round() {
                break;
            }
            let moves = s.possible_moves(moved);
            let mv = moves[chooser.gen_range(0..moves.len())];
            let prev = s.current_player;
            let prev_round = s.current_round;
            s = s.do_move(mv, &mut ctx).unwrap();
            moved = mv.is_swim() && s.current_round == prev_round && s.current_player == prev;
        }
        out.push((s, moved));
    }
    out
}

fn bench_possible_moves(c: &mut Criterion) {
    let mut g = c.benchmark_group("abyss_core_rules");
    for &n in &[256usize, 1024usize] {
        let states = gen_states(n);
        g.bench_with_input(BenchmarkId::new("possible_moves_batch", n), &states, |b, s| {
            b.iter(|| {
                for (state, moved) in s.iter() {
                    black_box(state.possible_moves(black_box(*moved)));
                }
            })
        });
    }
    g.finish();
}

fn bench_do_move(c: &mut Criterion) {
    let mut g = c.benchmark_group("abyss_core_rules");
    for &n in &[256usize] {
        let states = gen_states(n);
        g.bench_with_input(BenchmarkId::new("do_move_first_legal", n), &states, |b, s| {
            b.iter(|| {
                let mut ctx = TurnContext::new_search(7);
                for (state, moved) in s.iter() {
                    let mv = state.possible_moves(*moved)[0];
                    if mv != Move::End {
                        black_box(state.do_move(mv, &mut ctx).unwrap());
                    }
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_possible_moves, bench_do_move);
criterion_main!(benches);
