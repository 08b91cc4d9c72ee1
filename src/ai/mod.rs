//! The computer opponent.

pub mod knowledge;
pub mod pause;
pub mod selector;

use log::{debug, warn};
use rand::rngs::StdRng;
use serde::Deserialize;
use web_time::{Duration, Instant};

use crate::board::Position;
use crate::error::{GameError, GameResult};
use crate::game::{Game, MoveResult};

use self::knowledge::Knowledge;
use self::pause::Pause;
use self::selector::{
    FirstLegalMoveSelector, MoveSelector, RandomMoveSelector, ScoringMoveSelector,
    SelectionContext,
};

const DEFAULT_THINKING_DELAY_MS: u64 = 2000;
const DEFAULT_MAX_RANDOM_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    FirstLegal,
    Random,
    #[default]
    Scoring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerConfig {
    pub thinking_delay: Duration,
    pub strategy: Strategy,
    pub max_random_attempts: u32,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(DEFAULT_THINKING_DELAY_MS),
            strategy: Strategy::default(),
            max_random_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
        }
    }
}

impl ComputerConfig {
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_random_attempts(mut self, attempts: u32) -> Self {
        self.max_random_attempts = attempts;
        self
    }

    fn selector(&self) -> Box<dyn MoveSelector> {
        match self.strategy {
            Strategy::FirstLegal => Box::new(FirstLegalMoveSelector),
            Strategy::Random => Box::new(RandomMoveSelector::new(self.max_random_attempts)),
            Strategy::Scoring => Box::new(ScoringMoveSelector),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerState {
    Idle,
    Thinking,
}

pub struct Computer {
    state: ComputerState,
    knowledge: Knowledge,
    config: ComputerConfig,
    selector: Box<dyn MoveSelector>,
    rng: StdRng,
    thinking_since: Option<Instant>,
}

impl Computer {
    pub fn new(config: ComputerConfig, rng: StdRng) -> Self {
        Self {
            state: ComputerState::Idle,
            knowledge: Knowledge::new(),
            selector: config.selector(),
            config,
            rng,
            thinking_since: None,
        }
    }

    pub fn state(&self) -> ComputerState {
        self.state
    }

    pub fn config(&self) -> &ComputerConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Records the moved meeple's value. Call after every move, either side's.
    pub fn observe_move(&mut self, result: &MoveResult) {
        self.knowledge.observe(result);
        debug!(
            "computer now knows {} meeple values",
            self.knowledge.known_count()
        );
    }

    /// Waits out the thinking delay, then decides.
    pub async fn request_move(
        &mut self,
        game: &Game,
        last_move: Option<&MoveResult>,
        pause: &dyn Pause,
    ) -> GameResult<Position> {
        self.begin_thinking();
        pause.pause(self.config.thinking_delay).await;
        self.decide(game, last_move)
    }

    /// Enters `Thinking`. Pair with [`Self::decide`] when the computer must not
    /// stay borrowed during the delay.
    pub fn begin_thinking(&mut self) {
        if self.state == ComputerState::Thinking {
            warn!("computer asked to think while already thinking");
        }
        self.state = ComputerState::Thinking;
        self.thinking_since = Some(Instant::now());
    }

    /// Picks a square holding a meeple other than the one in `last_move` or
    /// the engine's last-moved record, and returns to `Idle`.
    pub fn decide(
        &mut self,
        game: &Game,
        last_move: Option<&MoveResult>,
    ) -> GameResult<Position> {
        if self.state != ComputerState::Thinking {
            return Err(GameError::NotThinking);
        }
        self.state = ComputerState::Idle;

        let excluded = last_move.map(|mv| mv.moved.id);
        if excluded.is_some() && excluded != game.last_moved() {
            warn!("reported last move disagrees with the game's last moved meeple");
        }

        let ctx = SelectionContext {
            game,
            knowledge: &self.knowledge,
            excluded,
        };
        let chosen = self.selector.select_move(&ctx, &mut self.rng);

        let elapsed = self.thinking_since.take().map(|start| start.elapsed());
        match &chosen {
            Ok(position) => debug!(
                "computer ({:?}) chose square {position} after {elapsed:?}",
                self.config.strategy
            ),
            Err(err) => warn!("computer could not choose a move: {err}"),
        }
        chosen
    }
}
