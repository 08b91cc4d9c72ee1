use std::collections::HashMap;

use crate::board::{Colour, Meeple, MeepleId, MeepleValue, Position};
use crate::game::{Game, MoveResult};

pub const MIN_SCORE: f32 = f32::NEG_INFINITY;
const SELF_CAPTURE_SCORE: f32 = -1.0;
const QUIET_SCORE: f32 = 0.0;
const OPPONENT_CAPTURE_SCORE: f32 = 1.0;

/// Meeples whose values the computer has seen, learned by watching them move.
///
/// Colours are public on the board; a value only becomes known once that
/// particular meeple has moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Knowledge {
    observed: HashMap<MeepleId, Meeple>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, result: &MoveResult) {
        self.observed.insert(result.moved.id, result.moved);
    }

    pub fn is_known(&self, id: MeepleId) -> bool {
        self.observed.contains_key(&id)
    }

    pub fn known_count(&self) -> usize {
        self.observed.len()
    }

    /// Values an unobserved meeple of `colour` might still have. Each
    /// (colour, value) pair exists once, so observed values are ruled out.
    pub fn possible_values(&self, colour: Colour) -> Vec<MeepleValue> {
        MeepleValue::ALL
            .into_iter()
            .filter(|&value| {
                !self
                    .observed
                    .values()
                    .any(|m| m.colour == colour && m.value == value)
            })
            .collect()
    }

    /// Scores moving the meeple on `position` from `own`'s point of view.
    ///
    /// Known values score the single landing square: -1 onto `own` colour, 0
    /// onto an empty or neutral square, +1 onto the opponent. Unknown values
    /// sum that outcome over [`Self::possible_values`] and divide by
    /// `denominator`. Empty squares and a zero denominator give [`MIN_SCORE`].
    pub fn score_square(
        &self,
        game: &Game,
        own: Colour,
        position: Position,
        denominator: u8,
    ) -> f32 {
        let Some(meeple) = game.board().meeple_at(position) else {
            return MIN_SCORE;
        };

        if self.is_known(meeple.id) {
            return landing_score(game, own, position.advance(meeple.value.steps()));
        }

        if denominator == 0 {
            return MIN_SCORE;
        }
        let total: f32 = self
            .possible_values(meeple.colour)
            .into_iter()
            .map(|value| landing_score(game, own, position.advance(value.steps())))
            .sum();
        total / denominator as f32
    }
}

fn landing_score(game: &Game, own: Colour, destination: Position) -> f32 {
    match game.board().meeple_at(destination) {
        None => QUIET_SCORE,
        Some(target) if target.colour == own => SELF_CAPTURE_SCORE,
        Some(target) if target.colour == opponent_of(game, own) => OPPONENT_CAPTURE_SCORE,
        Some(_) => QUIET_SCORE,
    }
}

fn opponent_of(game: &Game, own: Colour) -> Colour {
    if own == game.computer() {
        game.player()
    } else {
        game.computer()
    }
}
