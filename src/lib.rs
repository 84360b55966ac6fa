pub mod board;
pub mod game;
pub mod history;
pub mod moves;
pub mod piece;
pub mod save;
pub mod state;

#[cfg(not(target_arch = "wasm32"))]
pub mod playout;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use game::{GameConfig, GameEngine, GameResult};
