use amazons::game::GameResult;
use amazons::save::load_from_path;
use amazons::state::GameSnapshot;

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: replay <save-file> [moves]");
        std::process::exit(2);
    };

    let saved = match load_from_path(&path) {
        Ok(saved) => saved,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if saved.skipped > 0 {
        eprintln!("{path}: skipped {} unreadable line(s)", saved.skipped);
    }
    let mut engine = saved.replay();
    let dropped = saved.moves.len().saturating_sub(engine.total_moves());
    if dropped > 0 {
        eprintln!("{path}: {dropped} saved move(s) could not be applied");
    }
    if let Some(keep) = args.next().and_then(|s| s.parse().ok()) {
        engine.rewind_to_move_count(keep);
    }

    println!(
        "Move {} of {}, {} to move",
        engine.current_move_index(),
        engine.total_moves(),
        if engine.is_black_to_move() { "black" } else { "white" }
    );
    print!("{}", engine.board());
    let result = engine.check_for_winner();
    if result != GameResult::NoWinner {
        println!("{result}");
    }

    match serde_json::to_string_pretty(&GameSnapshot::capture(&engine)) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("cannot serialise snapshot: {e}"),
    }
}
