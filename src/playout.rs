//! Random legal play, for tools and randomized tests. Picks uniformly among
//! complete turns; there is no evaluation or search.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{GameEngine, GameResult};
use crate::moves::Square;

/// A full turn: amazon origin, destination, arrow square.
pub type Turn = (Square, Square, Square);

/// Every complete turn available to the side to move.
pub fn legal_turns(engine: &GameEngine) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mover = engine.side_to_move();
    for piece in engine.board().pieces_of(mover) {
        let from = piece.square();
        for to in engine.legal_moves(from.0, from.1) {
            for arrow in engine.legal_arrows(from.0, from.1, to.0, to.1) {
                turns.push((from, to, arrow));
            }
        }
    }
    turns
}

pub fn random_turn<R: Rng + ?Sized>(engine: &GameEngine, rng: &mut R) -> Option<Turn> {
    legal_turns(engine).choose(rng).copied()
}

/// Play random turns until someone wins or `max_turns` is reached.
pub fn play_random_game<R: Rng + ?Sized>(engine: &mut GameEngine, rng: &mut R, max_turns: usize) -> GameResult {
    for _ in 0..max_turns {
        let result = engine.check_for_winner();
        if result != GameResult::NoWinner {
            return result;
        }
        let Some((from, to, arrow)) = random_turn(engine, rng) else {
            break;
        };
        engine.make_move(from.0, from.1, to.0, to.1, arrow.0, arrow.1);
    }
    engine.check_for_winner()
}
