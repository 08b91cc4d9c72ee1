use once_cell::sync::OnceCell;
use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod narration;
pub mod session;
pub mod types;

pub use ai::{Computer, ComputerConfig, ComputerState, Strategy};
pub use board::{Board, Colour, Meeple, MeepleId, MeepleValue, Position, Square};
pub use error::{GameError, GameResult};
pub use game::{Game, MoveResult};
pub use narration::{describe_computer_move, describe_player_move};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Routes `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    });
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
