use serde::Serialize;

use crate::board::{Colour, Position};
use crate::game::{Game, MoveResult};

/// Public game state handed to the presentation layer.
///
/// Values are deliberately absent: a meeple's value only becomes public in the
/// [`MoveView`] of a move it made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Occupant colour per square, 0..=17.
    pub squares: Vec<Option<Colour>>,
    pub player: Colour,
    pub computer: Colour,
    /// Remaining meeples per colour, in canonical colour order.
    pub counts: Vec<u8>,
    pub last_moved_square: Option<u8>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        let board = game.board();
        Self {
            squares: Position::all()
                .map(|pos| board.meeple_at(pos).map(|m| m.colour))
                .collect(),
            player: game.player(),
            computer: game.computer(),
            counts: game.counts().to_array().to_vec(),
            last_moved_square: game
                .last_moved()
                .and_then(|id| board.position_of(id))
                .map(Position::number),
        }
    }
}

/// One applied move, with its narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveView {
    pub origin: u8,
    pub destination: u8,
    pub colour: Colour,
    pub value: u8,
    pub captured: Option<Colour>,
    pub message: String,
}

impl MoveView {
    pub fn new(result: &MoveResult, message: String) -> Self {
        Self {
            origin: result.origin.number(),
            destination: result.destination.number(),
            colour: result.moved.colour,
            value: result.moved.value.steps(),
            captured: result.captured,
            message,
        }
    }
}
