use super::{
    action::{Action, Direction},
    board::{Board, Food},
    config::{GameConfig, INITIAL_SNAKE_LENGTH},
    state::{Cell, CollisionType, GameState, Snake, Status},
};
use rand::{SeedableRng, rngs::StdRng};

/// Where the head of a fresh snake starts
const START_HEAD: Cell = Cell { x: 3, y: 1 };

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Apple eaten this step, if any
    pub eaten: Option<Food>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn unchanged(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                eaten: None,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: starting snake facing right plus the variant's apples
    pub fn reset(&mut self) -> GameState {
        let variant = self.config.variant;
        let mut board = Board::new(self.config.grid_width, self.config.grid_height, variant);
        let snake = Snake::new(START_HEAD, Direction::Right, INITIAL_SNAKE_LENGTH);

        board.spawn_food(&snake.body, variant.initial_food_count(), &mut self.rng);

        GameState::new(board, snake)
    }

    /// Execute one tick: turn, move, eat, then check for collisions
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        match state.status {
            Status::Over => return StepResult::unchanged(true),
            Status::Paused => return StepResult::unchanged(false),
            Status::Running => {}
        }

        state.snake.turn(action.direction());
        state.snake.advance();

        let eaten = state.snake.eat(&mut state.board, &mut self.rng);
        if let Some(food) = eaten {
            log::debug!(
                "ate apple of size {} at {:?}, {} growth pending",
                food.size,
                food.cell,
                state.snake.pending_growth
            );
        }

        state.turns += 1;

        let collision_type = self.check_collision(state);
        if let Some(collision) = collision_type {
            state.status = Status::Over;
            state.collision = Some(collision);
            log::info!(
                "game over after {} turns: snake {}, score {}",
                state.turns,
                collision.describe(),
                state.score()
            );
        }

        StepResult {
            terminated: collision_type.is_some(),
            info: StepInfo {
                eaten,
                collision_type,
            },
        }
    }

    /// Check whether the snake's current head is fatal
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !state.board.is_in_bounds(head) {
            return Some(CollisionType::OutOfBounds);
        }

        if state.board.is_wall(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.bites_itself() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
