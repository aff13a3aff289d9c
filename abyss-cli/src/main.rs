//! abyss: headless self-play runner.
//!
//! Seats AI engines against each other and plays full games, optionally
//! writing an NDJSON event log. Interactive play lives in a separate
//! frontend; this binary never prompts.

use std::env;
use std::process;
use std::time::Instant;

use abyss_agents::{play_game, DecisionEngine, FlatMonteCarlo, GameOutcome, HeuristicBot};
use abyss_core::{mix_seed, next_moved_this_turn, Config, Move, State, TurnContext};
use abyss_logging::{now_ms, DecisionEventV1, GameEventV1, NdjsonWriter};
use abyss_mcts::{ParallelMcts, SearchConfig};

fn print_help() {
    eprintln!(
        r#"abyss - deep-sea diving self-play runner

USAGE:
    abyss selfplay [GAMES] [OPTIONS]

OPTIONS:
    --games N         Number of games to play (default: 1)
    --players SEATS   One letter per seat, 2-6 seats (default: RB)
                        M = UCT search, single thread
                        R = UCT search, root-parallel
                        P = flat Monte-Carlo baseline
                        B = rule-based bot
    --iterations N    Total search iterations per decision
    --threads N       Search worker threads (0 = all cores)
    --rollouts N      Playouts per move for the flat baseline
    --seed S          Game RNG seed (default: 0)
    --config PATH     YAML config file; flags override it
    --log PATH        Append NDJSON events to PATH
"#
    );
}

fn parse_or_exit<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    let Some(raw) = value else {
        eprintln!("Missing value for {}", flag);
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        process::exit(1);
    })
}

fn cmd_selfplay(args: &[String]) {
    let mut cfg = Config::default();
    let mut log_path: Option<String> = None;

    // First pass: an optional --config, so flags can override it.
    let mut i = 0usize;
    while i < args.len() {
        if args[i] == "--config" {
            let path: String = parse_or_exit("--config", args.get(i + 1));
            cfg = Config::load(&path).unwrap_or_else(|e| {
                eprintln!("Failed to load {}: {}", path, e);
                process::exit(1);
            });
            i += 2;
        } else {
            i += 1;
        }
    }

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--config" => i += 2,
            "--games" => {
                cfg.selfplay.games = parse_or_exit("--games", args.get(i + 1));
                i += 2;
            }
            "--players" => {
                cfg.selfplay.seats = parse_or_exit("--players", args.get(i + 1));
                i += 2;
            }
            "--iterations" => {
                cfg.search.total_iterations = parse_or_exit("--iterations", args.get(i + 1));
                i += 2;
            }
            "--threads" => {
                cfg.search.threads = parse_or_exit("--threads", args.get(i + 1));
                i += 2;
            }
            "--rollouts" => {
                cfg.selfplay.rollouts_per_move = parse_or_exit("--rollouts", args.get(i + 1));
                i += 2;
            }
            "--seed" => {
                cfg.selfplay.seed = parse_or_exit("--seed", args.get(i + 1));
                i += 2;
            }
            "--log" => {
                log_path = Some(parse_or_exit("--log", args.get(i + 1)));
                i += 2;
            }
            other if !other.starts_with('-') && i == 0 => {
                // Bare leading positional: game count.
                cfg.selfplay.games = parse_or_exit("GAMES", args.get(i));
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `abyss selfplay`: {}", other);
                eprintln!("Run `abyss selfplay --help` for usage.");
                process::exit(1);
            }
        }
    }

    if let Some(path) = cfg.selfplay.log.clone() {
        log_path.get_or_insert(path);
    }

    let seats_spec = cfg.selfplay.seats.clone();
    let mut seats = build_seats(&seats_spec, &cfg).unwrap_or_else(|msg| {
        eprintln!("{}", msg);
        process::exit(1);
    });

    let mut writer = log_path.as_deref().map(|path| {
        NdjsonWriter::open_append(path).unwrap_or_else(|e| {
            eprintln!("Failed to open log {}: {}", path, e);
            process::exit(1);
        })
    });

    println!(
        "Playing {} game(s): seats={} iterations={} threads={} seed={}",
        cfg.selfplay.games,
        seats_spec,
        cfg.search.total_iterations,
        cfg.search.threads,
        cfg.selfplay.seed
    );

    let mut wins = vec![0u32; seats.len()];
    for game_id in 0..cfg.selfplay.games as u64 {
        let mut ctx = TurnContext::new(mix_seed(cfg.selfplay.seed, game_id));
        let start = Instant::now();

        let outcome = match writer.as_mut() {
            Some(w) => play_logged_game(&mut seats, &mut ctx, game_id, &seats_spec, w),
            None => play_game(&mut seats, &mut ctx).map_err(|e| e.to_string()),
        }
        .unwrap_or_else(|msg| {
            eprintln!("game {} failed: {}", game_id, msg);
            process::exit(1);
        });

        wins[outcome.winner] += 1;
        println!(
            "game {}: winner=seat{} scores={:?} moves={} ({:.2}s)",
            game_id,
            outcome.winner,
            outcome.scores,
            outcome.moves_played,
            start.elapsed().as_secs_f64()
        );
    }

    println!();
    println!("Wins by seat:");
    for (i, (letter, w)) in seats_spec.chars().zip(&wins).enumerate() {
        println!("  seat{} ({}): {}", i, letter, w);
    }
}

/// Like `play_game`, but timing every decision and writing NDJSON events.
fn play_logged_game(
    seats: &mut [Box<dyn DecisionEngine>],
    ctx: &mut TurnContext,
    game_id: u64,
    seats_spec: &str,
    writer: &mut NdjsonWriter,
) -> Result<GameOutcome, String> {
    let game_start = Instant::now();
    let mut state = State::new(seats.len()).map_err(|e| e.to_string())?;
    let mut moved = false;
    let mut moves_played = 0u32;

    while !(state.is_terminal() && state.is_last_round()) {
        if moves_played >= 10_000 {
            break;
        }

        let legal = state.possible_moves(moved);
        if legal[0] == Move::End {
            state = state.do_move(Move::End, ctx).map_err(|e| e.to_string())?;
            moved = false;
            continue;
        }

        let player = state.current_player;
        let decision_start = Instant::now();
        let mv = seats[player]
            .find_best_move(&state, player, moved)
            .map_err(|e| e.to_string())?;

        writer
            .write_event(&DecisionEventV1 {
                event: "decision",
                ts_ms: now_ms(),
                game_id,
                round: state.current_round,
                turn: moves_played,
                player,
                oxygen: state.oxygen,
                chosen_move: mv.name(),
                elapsed_ms: decision_start.elapsed().as_millis() as u64,
            })
            .map_err(|e| e.to_string())?;

        let prev_round = state.current_round;
        state = state.do_move(mv, ctx).map_err(|e| e.to_string())?;
        moves_played += 1;
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
    let outcome = GameOutcome {
        scores: state.players.iter().map(|p| p.points).collect(),
        winner,
        moves_played,
    };

    writer
        .write_event(&GameEventV1 {
            event: "game",
            ts_ms: now_ms(),
            game_id,
            num_players: seats.len(),
            seats: seats_spec.to_string(),
            winner: outcome.winner,
            scores: outcome.scores.clone(),
            moves_played: outcome.moves_played,
            elapsed_ms: game_start.elapsed().as_millis() as u64,
        })
        .map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())?;

    Ok(outcome)
}

fn build_seats(
    seats_spec: &str,
    cfg: &Config,
) -> Result<Vec<Box<dyn DecisionEngine>>, String> {
    let n = seats_spec.chars().count();
    if !(2..=6).contains(&n) {
        return Err(format!(
            "--players needs 2 to 6 seat letters, got {:?}",
            seats_spec
        ));
    }

    let search_base = cfg.search.seed.unwrap_or(cfg.selfplay.seed);
    let mut seats: Vec<Box<dyn DecisionEngine>> = Vec::with_capacity(n);
    for (i, letter) in seats_spec.chars().enumerate() {
        let engine_seed = mix_seed(search_base, 0x5EA7 + i as u64);
        let engine: Box<dyn DecisionEngine> = match letter.to_ascii_uppercase() {
            'M' => Box::new(
                ParallelMcts::new(SearchConfig {
                    exploration_constant: cfg.search.exploration_constant,
                    total_iterations: cfg.search.total_iterations,
                    num_threads: 1,
                    seed: Some(engine_seed),
                })
                .map_err(|e| e.to_string())?,
            ),
            'R' => Box::new(
                ParallelMcts::new(SearchConfig {
                    exploration_constant: cfg.search.exploration_constant,
                    total_iterations: cfg.search.total_iterations,
                    num_threads: cfg.search.threads,
                    seed: Some(engine_seed),
                })
                .map_err(|e| e.to_string())?,
            ),
            'P' => Box::new(FlatMonteCarlo::new(
                cfg.selfplay.rollouts_per_move,
                engine_seed,
            )),
            'B' => Box::new(HeuristicBot::new()),
            'H' => {
                return Err(
                    "seat letter H is the interactive frontend's job; this runner is headless"
                        .to_string(),
                )
            }
            other => {
                return Err(format!(
                    "unknown seat letter '{}' (use M, R, P or B)",
                    other
                ))
            }
        };
        seats.push(engine);
    }
    Ok(seats)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("selfplay") => cmd_selfplay(&args[1..]),
        Some("help") | Some("--help") | Some("-h") | None => print_help(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_help();
            process::exit(1);
        }
    }
}
