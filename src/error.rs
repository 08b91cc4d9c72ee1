use crate::board::{Colour, MEEPLES_PER_COLOUR, NUM_SQUARES};

/// Errors raised by the move engine and the computer opponent.
///
/// Every variant is recoverable: a rejected move leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("square {0} is outside the track (0..{len})", len = NUM_SQUARES)]
    InvalidSquare(u8),

    #[error("move not allowed - square {0} is empty")]
    EmptySquare(u8),

    #[error("move not allowed - the meeple on square {0} was the last piece moved")]
    RepeatMove(u8),

    #[error("no legal square found after {attempts} attempts")]
    ExhaustedSearch { attempts: u32 },

    #[error("meeple id {0} appears on more than one square")]
    DuplicateMeeple(u8),

    #[error("{0} has more than {max} meeples on the track", max = MEEPLES_PER_COLOUR)]
    TooManyMeeples(Colour),

    #[error("player and computer cannot share the colour {0}")]
    IndistinctColours(Colour),

    #[error("the computer was asked to decide without thinking first")]
    NotThinking,
}

pub type GameResult<T> = Result<T, GameError>;
