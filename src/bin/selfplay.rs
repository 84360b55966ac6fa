use amazons::game::{GameConfig, GameEngine};
use amazons::playout::play_random_game;
use amazons::save::save_to_path;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_TURNS: usize = 200;

fn main() {
    let mut args = std::env::args().skip(1);
    let size: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let out = args.next();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(GameConfig::new(size, false, 1, false));
    let result = play_random_game(&mut engine, &mut rng, MAX_TURNS);

    for (i, line) in engine.history().iter().enumerate() {
        println!("{:>3}. {line}", i + 1);
    }
    println!();
    print!("{}", engine.board());
    eprintln!(
        "Game over after {} moves: {result} (seed {seed}, build {})",
        engine.current_move_index(),
        env!("BUILD_TIMESTAMP")
    );

    if let Some(path) = out {
        if let Err(e) = save_to_path(&engine, &path) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        eprintln!("Saved to {path}");
    }
}
