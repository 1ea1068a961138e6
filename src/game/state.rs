use rand::Rng;

use super::{
    action::Direction,
    board::{Board, Food},
};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
    /// Upcoming moves that keep the last segment in place
    pub pending_growth: u32,
}

impl Snake {
    /// Create a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Every segment after the head
    pub fn tail(&self) -> &[Cell] {
        &self.body[1..]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether the head sits on one of the other segments
    pub fn bites_itself(&self) -> bool {
        self.tail().contains(&self.head())
    }

    /// Change direction unless `direction` is missing or would reverse the snake.
    /// Returns true when the direction changed.
    pub fn turn(&mut self, direction: Option<Direction>) -> bool {
        match direction {
            Some(direction) if !direction.is_opposite(self.direction) => {
                let changed = direction != self.direction;
                self.direction = direction;
                changed
            }
            _ => false,
        }
    }

    /// Step one cell forward, keeping the last segment while growth is pending.
    /// Returns the new head.
    pub fn advance(&mut self) -> Cell {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_growth == 0 {
            self.body.pop();
        } else {
            self.pending_growth -= 1;
        }

        new_head
    }

    /// Eat the apple under the head, if any. The board gets one replacement
    /// apple away from the body and the remaining apples.
    pub fn eat<R: Rng + ?Sized>(&mut self, board: &mut Board, rng: &mut R) -> Option<Food> {
        let food = board.take_food(self.head())?;
        self.pending_growth += food.size;
        board.spawn_food(&self.body, 1, rng);
        Some(food)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    OutOfBounds,
    /// Snake hit a wall cell
    Wall,
    /// Snake hit itself
    SelfCollision,
}

impl CollisionType {
    pub fn describe(&self) -> &'static str {
        match self {
            CollisionType::OutOfBounds => "left the field",
            CollisionType::Wall => "hit the wall",
            CollisionType::SelfCollision => "bit its own tail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Over,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub turns: u32,
    pub status: Status,
    /// Set once the game is over
    pub collision: Option<CollisionType>,
}

impl GameState {
    pub fn new(board: Board, snake: Snake) -> Self {
        Self {
            board,
            snake,
            turns: 0,
            status: Status::Running,
            collision: None,
        }
    }

    /// Score is the length of the snake
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Over
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    /// Switch between running and paused. Does nothing once the game is over
    /// or when the variant cannot pause. Returns true if the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.board.variant().supports_pause() {
            return false;
        }

        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::Over => return false,
        };
        true
    }
}
