use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::board::{
    Board, Colour, Counts, MEEPLES_PER_COLOUR, Meeple, MeepleId, Position, Square,
    generate_initial_layout, initial_counts,
};
use crate::error::{GameError, GameResult};

/// What a single applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: Meeple,
    pub origin: Position,
    pub destination: Position,
    pub captured: Option<Colour>,
}

/// One play session: the track, the remaining counts and the two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    counts: Counts,
    player: Colour,
    computer: Colour,
    last_moved: Option<MeepleId>,
}

impl Game {
    /// Random colours for both sides and a freshly shuffled track.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let player = Colour::random(rng);
        let mut computer = Colour::random(rng);
        while computer == player {
            computer = Colour::random(rng);
        }

        info!("new game: player is {player}, computer is {computer}");
        Self {
            board: generate_initial_layout(rng),
            counts: initial_counts(),
            player,
            computer,
            last_moved: None,
        }
    }

    /// Builds a game around a fixed layout. Counts follow board occupancy.
    pub fn with_board(board: Board, player: Colour, computer: Colour) -> GameResult<Self> {
        if player == computer {
            return Err(GameError::IndistinctColours(player));
        }

        let mut ids = HashSet::new();
        if let Some(dup) = board.meeples().find(|m| !ids.insert(m.id)) {
            return Err(GameError::DuplicateMeeple(dup.id.0));
        }
        let counts = board.counts();
        if let Some(&colour) = Colour::ALL
            .iter()
            .find(|&&c| counts.get(c) > MEEPLES_PER_COLOUR)
        {
            return Err(GameError::TooManyMeeples(colour));
        }

        Ok(Self {
            counts,
            board,
            player,
            computer,
            last_moved: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn player(&self) -> Colour {
        self.player
    }

    pub fn computer(&self) -> Colour {
        self.computer
    }

    pub fn last_moved(&self) -> Option<MeepleId> {
        self.last_moved
    }

    pub fn is_eliminated(&self, colour: Colour) -> bool {
        self.counts.get(colour) == 0
    }

    /// True when `position` holds a meeple that may move this turn.
    pub fn is_movable(&self, position: Position) -> bool {
        self.check_move(position).is_ok()
    }

    /// Every square that may be played this turn, in track order.
    pub fn movable_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_movable(pos)).collect()
    }

    /// Moves the meeple on `position` forward by its value, capturing whatever
    /// sits on the destination. Nothing changes when the move is rejected.
    pub fn apply_move(&mut self, position: Position) -> GameResult<MoveResult> {
        let meeple = self.check_move(position)?;

        let destination = position.advance(meeple.value.steps());
        self.board.take(position);
        self.last_moved = Some(meeple.id);

        let captured = match self.board.put(destination, meeple) {
            Square::Occupied(victim) => {
                self.counts.decrement(victim.colour);
                if self.is_eliminated(victim.colour) {
                    info!("{} has lost its final meeple", victim.colour);
                }
                Some(victim.colour)
            }
            Square::Empty => None,
        };

        debug!(
            "{} {} moved {} -> {}, captured {:?}",
            meeple.colour,
            meeple.value.steps(),
            position,
            destination,
            captured
        );

        Ok(MoveResult {
            moved: meeple,
            origin: position,
            destination,
            captured,
        })
    }

    fn check_move(&self, position: Position) -> GameResult<Meeple> {
        let meeple = *self
            .board
            .meeple_at(position)
            .ok_or(GameError::EmptySquare(position.number()))?;
        if self.last_moved == Some(meeple.id) {
            return Err(GameError::RepeatMove(position.number()));
        }
        Ok(meeple)
    }

    #[cfg(test)]
    pub(crate) fn set_counts_for_test(&mut self, colour: Colour, count: u8) {
        let mut counts = self.counts.to_array();
        counts[colour.index()] = count;
        self.counts = Counts::from_array(counts);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::board::{MeepleValue, NUM_SQUARES};

    fn pos(square: u8) -> Position {
        Position::new(square).unwrap()
    }

    fn white(value: MeepleValue) -> Meeple {
        Meeple::new(value as u8 - 1, Colour::White, value)
    }

    fn blue(value: MeepleValue) -> Meeple {
        Meeple::new(2 + value as u8, Colour::Blue, value)
    }

    fn captured_total(game: &Game) -> usize {
        Colour::ALL
            .iter()
            .map(|&c| 3 - game.counts().get(c) as usize)
            .sum()
    }

    #[test]
    fn new_game_is_fully_formed() {
        for seed in 0..200 {
            let game = Game::new(&mut StdRng::seed_from_u64(seed));

            assert_ne!(game.player(), game.computer());
            assert_eq!(game.board().meeple_count(), NUM_SQUARES);
            assert_eq!(game.last_moved(), None);
            for colour in Colour::ALL {
                assert_eq!(game.counts().get(colour), 3);
            }
        }
    }

    #[test]
    fn with_board_rejects_shared_colour() {
        let err = Game::with_board(Board::empty(), Colour::Red, Colour::Red).unwrap_err();

        assert_eq!(err, GameError::IndistinctColours(Colour::Red));
    }

    #[test]
    fn with_board_rejects_a_meeple_id_used_twice() {
        let board = Board::empty()
            .with_meeple(pos(0), Meeple::new(0, Colour::White, MeepleValue::One))
            .with_meeple(pos(5), Meeple::new(0, Colour::Blue, MeepleValue::One));

        let err = Game::with_board(board, Colour::White, Colour::Red).unwrap_err();

        assert_eq!(err, GameError::DuplicateMeeple(0));
    }

    #[test]
    fn with_board_rejects_a_fourth_meeple_of_one_colour() {
        let board = Board::empty()
            .with_meeple(pos(1), blue(MeepleValue::One))
            .with_meeple(pos(4), blue(MeepleValue::Two))
            .with_meeple(pos(7), blue(MeepleValue::Three))
            .with_meeple(pos(10), Meeple::new(7, Colour::Blue, MeepleValue::One));

        let err = Game::with_board(board, Colour::White, Colour::Red).unwrap_err();

        assert_eq!(err, GameError::TooManyMeeples(Colour::Blue));
    }

    #[test]
    fn move_into_empty_square_changes_no_counts() {
        let board = Board::empty().with_meeple(pos(0), white(MeepleValue::Three));
        let mut game = Game::with_board(board, Colour::White, Colour::Blue).unwrap();
        let before = *game.counts();

        let result = game.apply_move(pos(0)).unwrap();

        assert_eq!(result.destination, pos(3));
        assert_eq!(result.origin, pos(0));
        assert_eq!(result.captured, None);
        assert!(game.board().square(pos(0)).is_empty());
        assert_eq!(game.board().meeple_at(pos(3)), Some(&white(MeepleValue::Three)));
        assert_eq!(*game.counts(), before);
    }

    #[test]
    fn move_onto_occupied_square_captures() {
        let board = Board::empty()
            .with_meeple(pos(0), white(MeepleValue::Two))
            .with_meeple(pos(2), blue(MeepleValue::One))
            .with_meeple(pos(5), blue(MeepleValue::Two))
            .with_meeple(pos(9), blue(MeepleValue::Three));
        let mut game = Game::with_board(board, Colour::White, Colour::Red).unwrap();
        assert_eq!(game.counts().get(Colour::Blue), 3);

        let result = game.apply_move(pos(0)).unwrap();

        assert_eq!(result.captured, Some(Colour::Blue));
        assert_eq!(game.counts().get(Colour::Blue), 2);
        assert_eq!(game.board().meeple_at(pos(2)), Some(&white(MeepleValue::Two)));
        assert_eq!(game.board().meeple_count(), 3);
    }

    #[test]
    fn last_blue_capture_eliminates_blue() {
        let board = Board::empty()
            .with_meeple(pos(0), white(MeepleValue::Two))
            .with_meeple(pos(2), blue(MeepleValue::One));
        let mut game = Game::with_board(board, Colour::White, Colour::Red).unwrap();
        assert_eq!(game.counts().get(Colour::Blue), 1);

        game.apply_move(pos(0)).unwrap();

        assert_eq!(game.counts().get(Colour::Blue), 0);
        assert!(game.is_eliminated(Colour::Blue));
    }

    #[test]
    fn move_wraps_around_the_track() {
        let board = Board::empty().with_meeple(pos(17), white(MeepleValue::Two));
        let mut game = Game::with_board(board, Colour::White, Colour::Red).unwrap();

        let result = game.apply_move(pos(17)).unwrap();

        assert_eq!(result.destination, pos(1));
    }

    #[test]
    fn empty_square_is_rejected_without_changes() {
        let mut game = Game::new(&mut StdRng::seed_from_u64(3));
        let origin = game.movable_positions()[0];
        game.apply_move(origin).unwrap();
        let before = game.clone();

        let err = game.apply_move(origin).unwrap_err();

        assert_eq!(err, GameError::EmptySquare(origin.number()));
        assert_eq!(game, before);
    }

    #[test]
    fn moving_same_meeple_twice_is_rejected() {
        let board = Board::empty()
            .with_meeple(pos(0), white(MeepleValue::One))
            .with_meeple(pos(10), blue(MeepleValue::One));
        let mut game = Game::with_board(board, Colour::White, Colour::Blue).unwrap();

        let first = game.apply_move(pos(0)).unwrap();
        let before = game.clone();
        let err = game.apply_move(first.destination).unwrap_err();

        assert_eq!(err, GameError::RepeatMove(1));
        assert_eq!(game, before);
        assert!(!game.is_movable(pos(1)));

        game.apply_move(pos(10)).unwrap();
        assert!(game.apply_move(pos(1)).is_ok());
    }

    #[test]
    fn captures_conserve_meeples_across_random_play() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = Game::new(&mut rng);

        for _ in 0..200 {
            let movable = game.movable_positions();
            if movable.is_empty() {
                break;
            }
            let before = *game.counts();
            let origin = movable[rng.random_range(0..movable.len())];
            let destination_occupied = !game
                .board()
                .square(origin.advance(game.board().meeple_at(origin).unwrap().value.steps()))
                .is_empty();

            let result = game.apply_move(origin).unwrap();

            assert_eq!(game.board().meeple_count() + captured_total(&game), NUM_SQUARES);
            let changed: Vec<_> = Colour::ALL
                .iter()
                .filter(|&&c| game.counts().get(c) != before.get(c))
                .collect();
            if destination_occupied {
                let colour = result.captured.unwrap();
                assert_eq!(changed, vec![&colour]);
                assert_eq!(game.counts().get(colour), before.get(colour) - 1);
            } else {
                assert!(changed.is_empty());
                assert_eq!(result.captured, None);
            }
        }
    }
}
