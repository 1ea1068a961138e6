/// Direction the snake can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx + ox == 0 && dy + oy == 0
    }

    /// Returns the unit offset (dx, dy) for one step in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Input applied to the game on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Try to turn towards a direction before moving
    Turn(Direction),
    /// Keep going the current way
    Continue,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Turn(direction) => Some(direction),
            Action::Continue => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Turn(direction)
    }
}

impl From<Option<Direction>> for Action {
    fn from(direction: Option<Direction>) -> Self {
        direction.map_or(Action::Continue, Action::Turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Up));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Down));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_action_from_optional_direction() {
        assert_eq!(Action::from(None), Action::Continue);
        assert_eq!(
            Action::from(Some(Direction::Left)),
            Action::Turn(Direction::Left)
        );
        assert_eq!(Action::Turn(Direction::Up).direction(), Some(Direction::Up));
        assert_eq!(Action::Continue.direction(), None);
    }
}
