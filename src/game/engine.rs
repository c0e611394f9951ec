use super::{
    action::{Direction, TurnCommand},
    config::{ConfigError, GameConfig},
    grid::{Cell, Grid},
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that ended the game, if this tick was fatal
    pub collision: Option<CollisionType>,
}

impl StepInfo {
    const QUIET: Self = Self {
        ate_food: false,
        collision: None,
    };
}

/// The game engine that handles all game logic. Owns the RNG used for
/// food placement so that states themselves stay plain data.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Engine for the given grid, rejecting undersized configurations
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Fix the RNG seed, for reproducible food placement
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the starting position: a three-segment snake on the center
    /// row heading right, food two cells short of the right wall
    pub fn reset(&self) -> GameState {
        let center_y = (self.config.height / 2) as i32;
        let snake = Snake::new(Position::new(3, center_y), Direction::Right, 3);
        let food = Position::new(self.config.width as i32 - 2, center_y);
        GameState::new(
            snake,
            food,
            Grid::new(self.config.width, self.config.height),
        )
    }

    /// Execute one tick of the game. A finished game is frozen: stepping
    /// it again changes nothing and reports nothing.
    ///
    /// The eat check runs before the collision checks, so a tick that
    /// lands on food never ends the game.
    pub fn step(&mut self, state: &mut GameState, command: TurnCommand) -> StepInfo {
        if state.game_over {
            return StepInfo::QUIET;
        }

        state.snake.direction = state.snake.direction.turned(command);

        let new_head = state.snake.head().shifted(state.snake.direction);
        state.snake.body.insert(0, new_head);
        state.grid.set(new_head, Cell::Head);
        state.grid.set(state.snake.body[1], Cell::Body);

        if new_head == state.food {
            state.score += 1;
            self.place_food(state);
            return StepInfo {
                ate_food: true,
                collision: None,
            };
        }

        if state.is_border(new_head) {
            state.game_over = true;
            return StepInfo {
                ate_food: false,
                collision: Some(CollisionType::Wall),
            };
        }

        if state.snake.overlaps_body(new_head) {
            state.game_over = true;
            return StepInfo {
                ate_food: false,
                collision: Some(CollisionType::SelfCollision),
            };
        }

        if let Some(tail) = state.snake.body.pop() {
            state.grid.set(tail, Cell::Empty);
        }
        StepInfo::QUIET
    }

    /// Move the food to a uniformly random empty interior cell. A full
    /// board leaves nowhere to put it, which ends the game.
    fn place_food(&mut self, state: &mut GameState) {
        let open = state.grid.empty_interior_cells();
        match open.choose(&mut self.rng) {
            Some(&cell) => {
                state.food = cell;
                state.grid.set(cell, Cell::Food);
            }
            None => state.game_over = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default())
            .expect("default config is valid")
            .with_seed(42)
    }

    #[test]
    fn test_rejects_undersized_config() {
        assert!(GameEngine::new(GameConfig::new(9, 10)).is_err());
    }

    #[test]
    fn test_reset_layout() {
        let state = engine().reset();

        assert_eq!(
            state.snake.body,
            vec![
                Position::new(3, 5),
                Position::new(2, 5),
                Position::new(1, 5)
            ]
        );
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.food, Position::new(8, 5));
        assert_eq!(state.score, 0);
        assert!(!state.game_over);

        assert_eq!(state.grid.get(Position::new(3, 5)), Cell::Head);
        assert_eq!(state.grid.get(Position::new(2, 5)), Cell::Body);
        assert_eq!(state.grid.get(Position::new(8, 5)), Cell::Food);
    }

    #[test]
    fn test_plain_step_moves_and_trims_tail() {
        let mut engine = engine();
        let mut state = engine.reset();

        let info = engine.step(&mut state, TurnCommand::Straight);

        assert_eq!(info, StepInfo::QUIET);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5)
            ]
        );
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.grid.get(Position::new(4, 5)), Cell::Head);
        assert_eq!(state.grid.get(Position::new(3, 5)), Cell::Body);
        assert_eq!(state.grid.get(Position::new(2, 5)), Cell::Body);
        assert_eq!(state.grid.get(Position::new(1, 5)), Cell::Empty);
    }

    #[test]
    fn test_eating_grows_scores_and_respawns_food() {
        let mut engine = engine();
        let mut state = engine.reset();

        for _ in 0..4 {
            let info = engine.step(&mut state, TurnCommand::Straight);
            assert!(!info.ate_food);
        }
        let info = engine.step(&mut state, TurnCommand::Straight);

        assert!(info.ate_food);
        assert_eq!(info.collision, None);
        assert_eq!(state.score, 1);
        assert!(!state.game_over);
        // The tail stays on the eat tick, so the snake grows by one.
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(8, 5),
                Position::new(7, 5),
                Position::new(6, 5),
                Position::new(5, 5)
            ]
        );
        assert_eq!(state.grid.get(Position::new(8, 5)), Cell::Head);
        assert_eq!(state.grid.get(Position::new(5, 5)), Cell::Body);

        // Relocated food sits on a free interior cell.
        assert_ne!(state.food, Position::new(8, 5));
        assert_eq!(state.grid.get(state.food), Cell::Food);
        assert!(!state.is_border(state.food));
        assert!(!state.snake.body.contains(&state.food));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut engine = engine();
        let mut state = engine.reset();

        for _ in 0..5 {
            engine.step(&mut state, TurnCommand::Straight);
        }
        let info = engine.step(&mut state, TurnCommand::Straight);

        assert_eq!(info.collision, Some(CollisionType::Wall));
        assert!(state.game_over);
        assert_eq!(state.snake.head(), Position::new(9, 5));
        // The score survives the crash.
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let mut engine = engine();
        let mut state = engine.reset();

        while !state.game_over {
            engine.step(&mut state, TurnCommand::Straight);
        }

        let frozen = state.clone();
        for command in [
            TurnCommand::Straight,
            TurnCommand::TurnLeft,
            TurnCommand::TurnRight,
        ] {
            let info = engine.step(&mut state, command);
            assert_eq!(info, StepInfo::QUIET);
            assert_eq!(state, frozen);
        }
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut engine = engine();

        // Four segments hanging down from (4,5), food well out of the way.
        let snake = Snake::new(Position::new(4, 5), Direction::Up, 4);
        let mut state = GameState::new(snake, Position::new(8, 2), Grid::new(10, 10));

        // Straight and then three lefts loop the head back onto the
        // cell where the tail still sits.
        engine.step(&mut state, TurnCommand::Straight);
        engine.step(&mut state, TurnCommand::TurnLeft);
        engine.step(&mut state, TurnCommand::TurnLeft);
        let info = engine.step(&mut state, TurnCommand::TurnLeft);

        assert_eq!(info.collision, Some(CollisionType::SelfCollision));
        assert!(state.game_over);
        assert_eq!(state.snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_one_head_cell_while_alive() {
        let mut engine = engine();
        let mut state = engine.reset();

        loop {
            engine.step(&mut state, TurnCommand::Straight);
            if state.game_over {
                break;
            }
            assert_eq!(state.grid.count(Cell::Head), 1);
            assert_eq!(state.grid.count(Cell::Food), 1);
        }
    }

    #[test]
    fn test_turn_changes_heading_before_moving() {
        let mut engine = engine();
        let mut state = engine.reset();

        engine.step(&mut state, TurnCommand::TurnLeft);

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(3, 4));
    }
}
