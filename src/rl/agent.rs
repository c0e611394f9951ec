//! Greedy tabular Q-learning agent
//!
//! The agent plays whole games against the engine, one tick at a time.
//! Each tick it looks up the triplet for the state it is in, takes the
//! best known command, watches what happens, and folds the reward back
//! into the slot it acted from. There is no exploration noise; fresh
//! states start at zero and ties fall toward going straight, so new
//! behavior appears only where the table says nothing yet.

use super::{
    config::AgentConfig,
    encoder::{encode_state, StateKey},
    store::{QTriplet, ValueStore},
};
use crate::game::{GameEngine, GameState, Position, TurnCommand};
use anyhow::Result;

/// What one agent tick produced.
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    pub command: TurnCommand,
    pub reward: f64,
    pub ate_food: bool,
    pub game_over: bool,
}

/// Key and triplet of the state the agent is about to act from. Carried
/// between ticks so each state is fetched from the store once.
struct CurrentState {
    key: StateKey,
    values: QTriplet,
}

/// Drives the game with a pure greedy policy over stored values and
/// learns online with a TD(0) update after every tick.
///
/// One agent spans many episodes: the table keeps growing and the
/// hunger counter keeps running when a new game starts.
pub struct QAgent<S: ValueStore> {
    store: S,
    config: AgentConfig,
    since_food: u32,
    current: Option<CurrentState>,
}

impl<S: ValueStore> QAgent<S> {
    pub fn new(store: S, config: AgentConfig) -> Self {
        config.validate().expect("Invalid agent configuration");

        Self {
            store,
            config,
            since_food: 0,
            current: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Act once: pick the best known command for the current state, step
    /// the game, then write the updated value for that command back.
    ///
    /// The tick that ends the game still learns. Its update bootstraps
    /// from the terminal state's triplet, which gets a row in the store
    /// like any other state.
    pub fn tick(&mut self, engine: &mut GameEngine, state: &mut GameState) -> Result<TickOutcome> {
        if state.game_over {
            return Ok(TickOutcome {
                command: TurnCommand::Straight,
                reward: 0.0,
                ate_food: false,
                game_over: true,
            });
        }

        let current = match self.current.take() {
            Some(current) => current,
            None => {
                let key = encode_state(state.food, &state.snake.body);
                let values = self.store.get(&key)?;
                CurrentState { key, values }
            }
        };

        let command = current.values.best_command();
        let old_head = state.snake.head();
        let food = state.food;

        let info = engine.step(state, command);

        let next_key = encode_state(state.food, &state.snake.body);
        let next_values = self.store.get(&next_key)?;

        let reward = self.reward(old_head, state.snake.head(), food, state.game_over);

        let old_value = current.values.get(command);
        let learned = old_value
            + self.config.alpha * (reward + self.config.gamma * next_values.max() - old_value);
        let mut updated = current.values;
        updated.set(command, learned);
        self.store.put(&current.key, updated)?;

        self.current = if state.game_over {
            None
        } else {
            Some(CurrentState {
                key: next_key,
                values: next_values,
            })
        };

        Ok(TickOutcome {
            command,
            reward,
            ate_food: info.ate_food,
            game_over: state.game_over,
        })
    }

    /// Reward for the move that just happened. `food` is where the food
    /// was before the move.
    fn reward(
        &mut self,
        old_head: Position,
        new_head: Position,
        food: Position,
        game_over: bool,
    ) -> f64 {
        // Not a true Manhattan distance: food.x feeds both terms, and the
        // second term of the new distance pairs it with the head's y.
        // Existing tables were learned against this metric.
        let old_distance = (food.x - old_head.x).abs() + (food.x - old_head.x).abs();
        let new_distance = (food.x - new_head.x).abs() + (food.x - new_head.y).abs();

        self.since_food += 1;
        if game_over {
            return -1.0;
        }
        if new_head == food {
            self.since_food = 0;
            return 1.0;
        }
        if self.since_food > self.config.stall_limit {
            return -1.0;
        }
        if old_distance > new_distance {
            return 0.0;
        }
        -0.1
    }
}
