//! Human-readable descriptions of applied moves.

use crate::board::Colour;
use crate::game::{Game, MoveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mover {
    Player,
    Computer,
}

pub fn describe_player_move(game: &Game, result: &MoveResult) -> String {
    describe(game, result, Mover::Player)
}

pub fn describe_computer_move(game: &Game, result: &MoveResult) -> String {
    describe(game, result, Mover::Computer)
}

fn describe(game: &Game, result: &MoveResult, mover: Mover) -> String {
    let subject = match mover {
        Mover::Player => "You",
        Mover::Computer => "They",
    };
    let steps = result.moved.value.steps();

    let Some(captured) = result.captured else {
        return format!("{subject} moved {steps} spaces into an empty square");
    };

    if game.is_eliminated(captured) {
        let owner = final_owner(game, captured, mover);
        format!("{subject} moved {steps} spaces and pushed in {owner} final {captured} Meeple.")
    } else {
        format!("{subject} moved {steps} spaces and pushed in a {captured} Meeple")
    }
}

fn final_owner(game: &Game, captured: Colour, mover: Mover) -> &'static str {
    if captured == game.player() {
        "your"
    } else if captured == game.computer() {
        match mover {
            Mover::Player => "the computer's",
            Mover::Computer => "their",
        }
    } else {
        "the"
    }
}
