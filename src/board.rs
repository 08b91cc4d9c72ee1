use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::{GameError, GameResult};

pub const NUM_SQUARES: usize = 18;
pub const NUM_COLOURS: usize = 6;
pub const MEEPLES_PER_COLOUR: u8 = 3;

/// The six meeple colours, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White,
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
}

impl Colour {
    pub const ALL: [Colour; NUM_COLOURS] = [
        Colour::White,
        Colour::Blue,
        Colour::Red,
        Colour::Green,
        Colour::Yellow,
        Colour::Orange,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "White",
            Colour::Blue => "Blue",
            Colour::Red => "Red",
            Colour::Green => "Green",
            Colour::Yellow => "Yellow",
            Colour::Orange => "Orange",
        }
    }

    /// Picks one of the six colours uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..NUM_COLOURS)]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many squares a meeple advances when played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeepleValue {
    One = 1,
    Two = 2,
    Three = 3,
}

impl MeepleValue {
    pub const ALL: [MeepleValue; MEEPLES_PER_COLOUR as usize] =
        [MeepleValue::One, MeepleValue::Two, MeepleValue::Three];

    pub fn steps(self) -> u8 {
        self as u8
    }
}

/// Stable identity of one physical meeple, assigned when the layout is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeepleId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meeple {
    pub id: MeepleId,
    pub colour: Colour,
    pub value: MeepleValue,
}

impl Meeple {
    pub fn new(id: u8, colour: Colour, value: MeepleValue) -> Self {
        Self {
            id: MeepleId(id),
            colour,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Square {
    #[default]
    Empty,
    Occupied(Meeple),
}

impl Square {
    pub fn meeple(&self) -> Option<&Meeple> {
        match self {
            Square::Occupied(meeple) => Some(meeple),
            Square::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }
}

/// A square index on the closed track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    pub fn new(square: u8) -> GameResult<Self> {
        if square as usize >= NUM_SQUARES {
            return Err(GameError::InvalidSquare(square));
        }
        Ok(Self(square))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The square `steps` ahead, wrapping past 17 back to 0.
    pub fn advance(self, steps: u8) -> Self {
        Self(((self.0 as usize + steps as usize) % NUM_SQUARES) as u8)
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES as u8).map(Position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meeples still on the board, per colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts([u8; NUM_COLOURS]);

impl Counts {
    pub fn get(&self, colour: Colour) -> u8 {
        self.0[colour.index()]
    }

    /// Removes one meeple of `colour`. Mirrors board occupancy, so it never
    /// underflows on a consistent game.
    pub fn decrement(&mut self, colour: Colour) {
        let count = &mut self.0[colour.index()];
        debug_assert!(*count > 0, "{colour} count would go below zero");
        *count = count.saturating_sub(1);
    }

    pub fn to_array(&self) -> [u8; NUM_COLOURS] {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_array(counts: [u8; NUM_COLOURS]) -> Self {
        Self(counts)
    }

    fn from_board(board: &Board) -> Self {
        let mut counts = [0u8; NUM_COLOURS];
        for meeple in board.meeples() {
            counts[meeple.colour.index()] += 1;
        }
        Self(counts)
    }
}

impl Default for Counts {
    fn default() -> Self {
        initial_counts()
    }
}

/// The 18-square circular track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Square; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [Square::Empty; NUM_SQUARES],
        }
    }

    /// Builder used to lay out fixed positions.
    pub fn with_meeple(mut self, position: Position, meeple: Meeple) -> Self {
        self.squares[position.index()] = Square::Occupied(meeple);
        self
    }

    pub fn square(&self, position: Position) -> &Square {
        &self.squares[position.index()]
    }

    pub fn meeple_at(&self, position: Position) -> Option<&Meeple> {
        self.square(position).meeple()
    }

    /// Vacates `position`, returning what was there.
    pub fn take(&mut self, position: Position) -> Square {
        std::mem::take(&mut self.squares[position.index()])
    }

    /// Puts `meeple` on `position`, returning the square's previous content.
    pub fn put(&mut self, position: Position, meeple: Meeple) -> Square {
        std::mem::replace(
            &mut self.squares[position.index()],
            Square::Occupied(meeple),
        )
    }

    pub fn position_of(&self, id: MeepleId) -> Option<Position> {
        Position::all().find(|&pos| self.meeple_at(pos).is_some_and(|m| m.id == id))
    }

    pub fn meeples(&self) -> impl Iterator<Item = &Meeple> {
        self.squares.iter().filter_map(Square::meeple)
    }

    pub fn meeple_count(&self) -> usize {
        self.meeples().count()
    }

    pub fn counts(&self) -> Counts {
        Counts::from_board(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// One meeple of every (colour, value) pair, shuffled across the track.
pub fn generate_initial_layout<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut meeples: Vec<Meeple> = Colour::ALL
        .iter()
        .flat_map(|&colour| MeepleValue::ALL.iter().map(move |&value| (colour, value)))
        .enumerate()
        .map(|(id, (colour, value))| Meeple::new(id as u8, colour, value))
        .collect();

    // Fisher-Yates shuffle.
    meeples.shuffle(rng);

    let mut board = Board::empty();
    for (square, meeple) in board.squares.iter_mut().zip(meeples) {
        *square = Square::Occupied(meeple);
    }
    board
}

pub fn initial_counts() -> Counts {
    Counts([MEEPLES_PER_COLOUR; NUM_COLOURS])
}
