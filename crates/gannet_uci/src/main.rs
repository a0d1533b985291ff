//! UCI driver for the Gannet engine.
//!
//! Speaks the Universal Chess Interface over stdin/stdout so the engine can
//! plug into chess GUIs (Arena, Cute Chess, ...). Iterative deepening and
//! the clock live here; the search itself never polls the time.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use gannet_core::{Board, Engine, SearchLimits, move_to_uci, set_position_from_uci};
use gannet_search::{AlphaBetaEngine, MATE, MAX_PLY};

/// UCI score field: centipawns, or moves-to-mate inside the mate band.
fn format_score(score: i32) -> String {
    if score > MATE - MAX_PLY as i32 {
        format!("mate {}", (MATE - score + 1) / 2)
    } else if score < -MATE + MAX_PLY as i32 {
        format!("mate -{}", (MATE + score + 1) / 2)
    } else {
        format!("cp {score}")
    }
}

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut board = Board::startpos();
    let mut depth: u8 = 6;
    let mut engine = AlphaBetaEngine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name {}", engine.name()).ok();
                writeln!(stdout, "id author {}", engine.author()).ok();
                writeln!(stdout, "option name Depth type spin default 6 min 1 max 64").ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "setoption" => {
                // setoption name <name> value <value>
                let name = parts
                    .iter()
                    .position(|&x| x == "name")
                    .and_then(|idx| parts.get(idx + 1).copied());
                let value = parts
                    .iter()
                    .position(|&x| x == "value")
                    .and_then(|idx| parts.get(idx + 1).copied());

                match (name.map(str::to_lowercase).as_deref(), value) {
                    (Some("depth"), Some(v)) => {
                        if let Ok(d) = v.parse::<u8>() {
                            depth = d.clamp(1, MAX_PLY as u8);
                        }
                    }
                    (Some(n), Some(v)) => {
                        engine.set_option(n, v);
                    }
                    _ => {}
                }
            }
            "ucinewgame" => {
                board = Board::startpos();
                engine.new_game();
            }
            "position" => {
                set_position_from_uci(&mut board, &parts[1..]);
            }
            "go" => {
                let mut search_depth = depth;
                if let Some(idx) = parts.iter().position(|&x| x.eq_ignore_ascii_case("depth"))
                    && let Some(d) = parts.get(idx + 1).and_then(|s| s.parse::<u8>().ok())
                {
                    search_depth = d.clamp(1, MAX_PLY as u8);
                }

                let move_time: Option<Duration> = parts
                    .iter()
                    .position(|&x| x.eq_ignore_ascii_case("movetime"))
                    .and_then(|idx| parts.get(idx + 1))
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_millis);

                let base_limits = SearchLimits::new(search_depth, move_time);

                // Iterative deepening; the clock is shared across iterations
                // and only consulted between them.
                let mut final_mv = None;
                base_limits.start();

                for d in 1..=search_depth {
                    let limits = SearchLimits {
                        depth: d,
                        move_time,
                        time_control: base_limits.time_control.clone(),
                    };

                    let result = engine.search(&board, limits);

                    let Some(mv) = result.best_move else {
                        break; // mated or stalemated: nothing to report
                    };
                    final_mv = Some(mv);

                    let pv_line: Vec<String> =
                        result.pv.iter().copied().map(move_to_uci).collect();
                    writeln!(
                        stdout,
                        "info depth {} score {} nodes {} time {} pv {}",
                        result.depth,
                        format_score(result.score),
                        result.nodes,
                        base_limits.time_control.elapsed().as_millis(),
                        pv_line.join(" ")
                    )
                    .ok();
                    stdout.flush().ok();

                    if result.stopped || base_limits.should_stop() {
                        break;
                    }
                }

                let stats = engine.stats();
                writeln!(
                    stdout,
                    "info string first-move fail-highs {}/{} ({:.2})",
                    stats.first,
                    stats.cuts,
                    stats.first_cut_ratio()
                )
                .ok();

                match final_mv {
                    Some(mv) => writeln!(stdout, "bestmove {}", move_to_uci(mv)).ok(),
                    None => writeln!(stdout, "bestmove 0000").ok(),
                };
                stdout.flush().ok();
            }
            "quit" => break,
            _ => {
                // Ignore unknown commands, per the protocol.
            }
        }
    }
}
