use super::action::Direction;
use super::grid::{Cell, Grid};

/// A grid coordinate; x runs right and y runs down from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent position one cell over in the given direction
    pub fn shifted(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake: body segments head-first plus the current heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments in order, head first
    pub body: Vec<Position>,
    /// Heading the next step follows
    pub direction: Direction,
}

impl Snake {
    /// Lay out a snake of `length` segments with the head at `head` and
    /// the body trailing opposite to the heading.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as i32)
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Every segment behind the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// True if `pos` lies on a body segment. The head itself does not
    /// count, only the trail behind it.
    pub fn overlaps_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Segment count, head included
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// A snake always has at least a head; this exists to pair with `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the head ran into on a fatal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Ran into the border wall
    Wall,
    /// Ran into its own body
    SelfCollision,
}

/// Complete game state: the cell matrix plus the entities drawn on it.
///
/// Owned and mutated exclusively through `GameEngine::step`; pure data,
/// so terminal states can be compared bit-for-bit in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid: Grid,
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    /// Assemble a state from a bordered grid, marking the snake and food cells
    pub fn new(snake: Snake, food: Position, mut grid: Grid) -> Self {
        grid.set(snake.head(), Cell::Head);
        for &segment in snake.body_segments() {
            grid.set(segment, Cell::Body);
        }
        grid.set(food, Cell::Food);

        Self {
            snake,
            food,
            grid,
            score: 0,
            game_over: false,
        }
    }

    /// True if the position lies on the permanent wall border
    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0
            || pos.x == self.grid.width() as i32 - 1
            || pos.y == 0
            || pos.y == self.grid.height() as i32 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_follows_unit_deltas() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.shifted(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.shifted(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.shifted(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.shifted(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_trails_behind_head() {
        let snake = Snake::new(Position::new(3, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 5));
        assert_eq!(snake.body[1], Position::new(2, 5));
        assert_eq!(snake.body[2], Position::new(1, 5));

        // A downward snake trails upward.
        let snake = Snake::new(Position::new(4, 4), Direction::Down, 2);
        assert_eq!(snake.body, vec![Position::new(4, 4), Position::new(4, 3)]);
    }

    #[test]
    fn test_overlap_excludes_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.overlaps_body(Position::new(5, 5)));
        assert!(snake.overlaps_body(Position::new(4, 5)));
        assert!(snake.overlaps_body(Position::new(3, 5)));
        assert!(!snake.overlaps_body(Position::new(8, 8)));
    }

    #[test]
    fn test_state_marks_cells() {
        let snake = Snake::new(Position::new(3, 5), Direction::Right, 3);
        let state = GameState::new(snake, Position::new(8, 5), Grid::new(10, 10));

        assert_eq!(state.grid.get(Position::new(3, 5)), Cell::Head);
        assert_eq!(state.grid.get(Position::new(2, 5)), Cell::Body);
        assert_eq!(state.grid.get(Position::new(1, 5)), Cell::Body);
        assert_eq!(state.grid.get(Position::new(8, 5)), Cell::Food);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_border_check() {
        let snake = Snake::new(Position::new(3, 5), Direction::Right, 3);
        let state = GameState::new(snake, Position::new(8, 5), Grid::new(10, 10));

        assert!(state.is_border(Position::new(0, 4)));
        assert!(state.is_border(Position::new(9, 4)));
        assert!(state.is_border(Position::new(4, 0)));
        assert!(state.is_border(Position::new(4, 9)));
        assert!(!state.is_border(Position::new(1, 1)));
        assert!(!state.is_border(Position::new(8, 8)));
    }
}
