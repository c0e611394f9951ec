use super::state::Position;

/// What occupies a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Body,
    Head,
    Food,
}

/// Fixed W×H matrix of cell kinds.
///
/// Border cells (x or y at 0 or max) are walls from construction on. The
/// engine rewrites interior cells while the game runs; the one exception
/// is a wall crash, which leaves the head stamped on the border cell it
/// died on.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with wall borders and an empty interior
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = vec![Cell::Empty; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || x == width - 1 || y == 0 || y == height - 1 {
                    cells[y * width + x] = Cell::Wall;
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// Cell kind at a position (must be in bounds)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Overwrite the cell kind at a position (must be in bounds)
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// All currently-empty interior cells, in row-major order.
    ///
    /// This is the candidate set for food relocation: the border is
    /// excluded by construction and occupied cells are not Empty.
    pub fn empty_interior_cells(&self) -> Vec<Position> {
        let mut empty = Vec::new();
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                let pos = Position::new(x as i32, y as i32);
                if self.get(pos) == Cell::Empty {
                    empty.push(pos);
                }
            }
        }
        empty
    }

    /// Number of cells of a given kind (test/diagnostic helper)
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borders_are_walls() {
        let grid = Grid::new(10, 10);
        for x in 0..10 {
            assert_eq!(grid.get(Position::new(x, 0)), Cell::Wall);
            assert_eq!(grid.get(Position::new(x, 9)), Cell::Wall);
        }
        for y in 0..10 {
            assert_eq!(grid.get(Position::new(0, y)), Cell::Wall);
            assert_eq!(grid.get(Position::new(9, y)), Cell::Wall);
        }
        assert_eq!(grid.get(Position::new(1, 1)), Cell::Empty);
        assert_eq!(grid.get(Position::new(8, 8)), Cell::Empty);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(10, 10);
        let pos = Position::new(4, 7);
        assert_eq!(grid.get(pos), Cell::Empty);
        grid.set(pos, Cell::Food);
        assert_eq!(grid.get(pos), Cell::Food);
    }

    #[test]
    fn test_empty_interior_excludes_border_and_occupied() {
        let mut grid = Grid::new(10, 10);
        grid.set(Position::new(3, 5), Cell::Head);
        grid.set(Position::new(2, 5), Cell::Body);
        grid.set(Position::new(8, 5), Cell::Food);

        let empty = grid.empty_interior_cells();
        // 8x8 interior minus the three occupied cells
        assert_eq!(empty.len(), 64 - 3);
        assert!(!empty.contains(&Position::new(3, 5)));
        assert!(!empty.contains(&Position::new(8, 5)));
        assert!(empty.iter().all(|p| p.x > 0 && p.x < 9 && p.y > 0 && p.y < 9));
    }

    #[test]
    fn test_wall_count_is_perimeter() {
        let grid = Grid::new(10, 12);
        // 2 full rows + 2 columns minus shared corners
        assert_eq!(grid.count(Cell::Wall), 2 * 10 + 2 * 12 - 4);
    }
}
