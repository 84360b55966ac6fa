use std::io::Write;

use amazons::game::{GameConfig, GameEngine, GameResult};
use amazons::playout::play_random_game;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_TURNS: usize = 200;
const DEFAULT_GAMES: usize = 100;

#[derive(Debug, Default)]
struct MatchResult {
    black_wins: u32,
    white_wins: u32,
    unfinished: u32,
    total_moves: usize,
}

fn run(size: usize, games: usize, rng: &mut StdRng) -> MatchResult {
    let mut result = MatchResult::default();
    for i in 0..games {
        let mut engine = GameEngine::new(GameConfig::new(size, false, 1, false));
        match play_random_game(&mut engine, rng, MAX_TURNS) {
            GameResult::BlackWins => result.black_wins += 1,
            GameResult::WhiteWins => result.white_wins += 1,
            GameResult::NoWinner => result.unfinished += 1,
        }
        result.total_moves += engine.current_move_index();
        if (i + 1) % 10 == 0 {
            eprint!(".");
            let _ = std::io::stderr().flush();
        }
    }
    eprintln!();
    result
}

fn main() {
    let mut args = std::env::args().skip(1);
    let games: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GAMES)
        .max(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);

    println!("Random self-play, {games} games per size, seed {seed}");
    for size in [8, 10] {
        let r = run(size, games, &mut rng);
        let avg = r.total_moves as f64 / games as f64;
        println!(
            "{size}x{size}: black {} / white {} / unfinished {}, average length {avg:.1} moves",
            r.black_wins, r.white_wins, r.unfinished
        );
    }
}
