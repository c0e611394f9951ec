/// Direction the snake is heading, stored as a unit delta on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step (dx, dy) for this heading; y grows downward
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// New heading after applying a turn command relative to the current
    /// heading (player-relative, not screen-relative).
    pub fn turned(self, command: TurnCommand) -> Direction {
        match command {
            TurnCommand::Straight => self,
            TurnCommand::TurnLeft => match self {
                Direction::Left => Direction::Down,
                Direction::Right => Direction::Up,
                Direction::Up => Direction::Left,
                Direction::Down => Direction::Right,
            },
            TurnCommand::TurnRight => match self {
                Direction::Left => Direction::Up,
                Direction::Right => Direction::Down,
                Direction::Up => Direction::Right,
                Direction::Down => Direction::Left,
            },
        }
    }
}

/// Per-tick movement command, relative to the snake's current heading.
///
/// This is the whole action space: the game takes one of these each tick,
/// and the agent's Q-triplet holds one value per variant in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnCommand {
    /// Keep the current heading
    Straight,
    /// Rotate 90° counter-clockwise relative to the heading
    TurnLeft,
    /// Rotate 90° clockwise relative to the heading
    TurnRight,
}

impl TurnCommand {
    /// All commands in action-index order: Straight(0), TurnLeft(1), TurnRight(2)
    pub const ALL: [TurnCommand; 3] = [
        TurnCommand::Straight,
        TurnCommand::TurnLeft,
        TurnCommand::TurnRight,
    ];

    /// Action index used by the Q-triplet
    pub fn index(&self) -> usize {
        match self {
            TurnCommand::Straight => 0,
            TurnCommand::TurnLeft => 1,
            TurnCommand::TurnRight => 2,
        }
    }

    /// Command for an action index; out-of-range indices mean Straight
    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => TurnCommand::TurnLeft,
            2 => TurnCommand::TurnRight,
            _ => TurnCommand::Straight,
        }
    }
}
