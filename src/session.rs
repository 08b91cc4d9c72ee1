use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_time::Duration;

use crate::ai::pause::{JsTimeout, Pause};
use crate::ai::{Computer, ComputerConfig, Strategy};
use crate::board::Position;
use crate::error::GameResult;
use crate::game::{Game, MoveResult};
use crate::narration::{describe_computer_move, describe_player_move};
use crate::types::{GameView, MoveView};

/// Options accepted by `new GameSession(options)`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionOptions {
    pub seed: Option<u64>,
    pub thinking_delay_ms: Option<u64>,
    pub strategy: Option<Strategy>,
    pub max_random_attempts: Option<u32>,
}

impl SessionOptions {
    pub fn computer_config(&self) -> ComputerConfig {
        let mut config = ComputerConfig::default();
        if let Some(ms) = self.thinking_delay_ms {
            config = config.with_thinking_delay(Duration::from_millis(ms));
        }
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if let Some(attempts) = self.max_random_attempts {
            config = config.with_max_random_attempts(attempts);
        }
        config
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Applies a move, lets the computer watch it, and narrates it.
pub fn play_turn(
    game: &mut Game,
    computer: &mut Computer,
    square: u8,
    narrate: fn(&Game, &MoveResult) -> String,
) -> GameResult<(MoveResult, MoveView)> {
    let position = Position::new(square)?;
    let result = game.apply_move(position)?;
    computer.observe_move(&result);
    let view = MoveView::new(&result, narrate(game, &result));
    Ok((result, view))
}

#[wasm_bindgen]
pub struct GameSession {
    game: Rc<RefCell<Game>>,
    computer: Rc<RefCell<Computer>>,
    last_move: Rc<RefCell<Option<MoveResult>>>,
    config: ComputerConfig,
    rng: StdRng,
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<GameSession, JsValue> {
        let options: SessionOptions = if options.is_undefined() || options.is_null() {
            SessionOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid session options: {e}")))?
        };

        let config = options.computer_config();
        let mut rng = options.rng();
        let game = Game::new(&mut rng);
        let computer = Computer::new(config, StdRng::from_rng(&mut rng));

        Ok(GameSession {
            game: Rc::new(RefCell::new(game)),
            computer: Rc::new(RefCell::new(computer)),
            last_move: Rc::new(RefCell::new(None)),
            config,
            rng,
        })
    }

    /// Starts over with new colours, a new shuffle and a computer that knows nothing.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        *self.game.borrow_mut() = Game::new(&mut self.rng);
        let rng = StdRng::from_rng(&mut self.rng);
        *self.computer.borrow_mut() = Computer::new(self.config, rng);
        *self.last_move.borrow_mut() = None;
        info!("session restarted");
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = GameView::from(&*self.game.borrow());
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize game: {e}")))
    }

    /// The human plays the meeple on `square`.
    pub fn play(&mut self, square: u8) -> Result<JsValue, JsValue> {
        let (result, view) = play_turn(
            &mut self.game.borrow_mut(),
            &mut self.computer.borrow_mut(),
            square,
            describe_player_move,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        *self.last_move.borrow_mut() = Some(result);

        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize move: {e}")))
    }

    /// Resolves with the computer's move once its thinking delay has passed.
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&self) -> js_sys::Promise {
        let game = Rc::clone(&self.game);
        let computer = Rc::clone(&self.computer);
        let last_move = Rc::clone(&self.last_move);
        let delay = self.config.thinking_delay;

        wasm_bindgen_futures::future_to_promise(async move {
            computer.borrow_mut().begin_thinking();
            JsTimeout.pause(delay).await;

            let reported = *last_move.borrow();
            let square = computer
                .borrow_mut()
                .decide(&game.borrow(), reported.as_ref())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            let (result, view) = play_turn(
                &mut game.borrow_mut(),
                &mut computer.borrow_mut(),
                square.number(),
                describe_computer_move,
            )
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
            *last_move.borrow_mut() = Some(result);

            serde_wasm_bindgen::to_value(&view)
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize move: {e}")))
        })
    }

    #[wasm_bindgen(js_name = isPlayerEliminated)]
    pub fn is_player_eliminated(&self) -> bool {
        let game = self.game.borrow();
        game.is_eliminated(game.player())
    }

    #[wasm_bindgen(js_name = isComputerEliminated)]
    pub fn is_computer_eliminated(&self) -> bool {
        let game = self.game.borrow();
        game.is_eliminated(game.computer())
    }
}
