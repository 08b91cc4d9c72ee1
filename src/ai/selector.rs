use log::debug;
use rand::{Rng, RngCore};

use crate::ai::knowledge::{Knowledge, MIN_SCORE};
use crate::board::{MeepleId, NUM_SQUARES, Position};
use crate::error::{GameError, GameResult};
use crate::game::Game;

/// What a selector may look at when choosing the computer's source square.
pub struct SelectionContext<'a> {
    pub game: &'a Game,
    pub knowledge: &'a Knowledge,
    /// The meeple reported as last moved, barred in addition to the engine's own record.
    pub excluded: Option<MeepleId>,
}

impl SelectionContext<'_> {
    pub fn is_candidate(&self, position: Position) -> bool {
        self.game.is_movable(position)
            && self
                .game
                .board()
                .meeple_at(position)
                .is_some_and(|m| Some(m.id) != self.excluded)
    }

    pub fn candidates(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_candidate(pos)).collect()
    }
}

pub trait MoveSelector {
    fn select_move(&self, ctx: &SelectionContext<'_>, rng: &mut dyn RngCore)
    -> GameResult<Position>;
}

/// Lowest-numbered square that may be played.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(
        &self,
        ctx: &SelectionContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> GameResult<Position> {
        Position::all()
            .find(|&pos| ctx.is_candidate(pos))
            .ok_or(GameError::ExhaustedSearch {
                attempts: NUM_SQUARES as u32,
            })
    }
}

/// Draws squares at random until one may be played, then falls back to a
/// uniform pick among the playable squares once the draws run out.
#[derive(Debug, Clone, Copy)]
pub struct RandomMoveSelector {
    max_attempts: u32,
}

impl RandomMoveSelector {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(
        &self,
        ctx: &SelectionContext<'_>,
        rng: &mut dyn RngCore,
    ) -> GameResult<Position> {
        for _ in 0..self.max_attempts {
            let square = rng.random_range(0..NUM_SQUARES as u8);
            let position = Position::new(square)?;
            if ctx.is_candidate(position) {
                return Ok(position);
            }
        }

        let candidates = ctx.candidates();
        if candidates.is_empty() {
            return Err(GameError::ExhaustedSearch {
                attempts: self.max_attempts,
            });
        }
        debug!(
            "no hit in {} random draws, picking among {} candidates",
            self.max_attempts,
            candidates.len()
        );
        Ok(candidates[rng.random_range(0..candidates.len())])
    }
}

/// Plays the square with the best expected outcome for the computer's colour.
/// Equal scores are broken at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringMoveSelector;

impl MoveSelector for ScoringMoveSelector {
    fn select_move(
        &self,
        ctx: &SelectionContext<'_>,
        rng: &mut dyn RngCore,
    ) -> GameResult<Position> {
        let own = ctx.game.computer();
        let mut best_score = MIN_SCORE;
        let mut best: Vec<Position> = Vec::new();

        for position in ctx.candidates() {
            let Some(meeple) = ctx.game.board().meeple_at(position) else {
                continue;
            };
            let denominator = ctx.knowledge.possible_values(meeple.colour).len() as u8;
            let score = ctx.knowledge.score_square(ctx.game, own, position, denominator);
            debug!("square {position} scores {score}");

            if best.is_empty() || score > best_score {
                best_score = score;
                best.clear();
                best.push(position);
            } else if score == best_score {
                best.push(position);
            }
        }

        if best.is_empty() {
            return Err(GameError::ExhaustedSearch {
                attempts: NUM_SQUARES as u32,
            });
        }
        Ok(best[rng.random_range(0..best.len())])
    }
}
