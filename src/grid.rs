use crate::error::ConfigError;
use crate::input::Direction;

/// Side length of the square, toroidal play field.
///
/// Only constructible with a non-zero side, so wraparound arithmetic never
/// divides by zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    side: u16,
}

impl GridSize {
    /// Validates `side` and wraps it.
    pub fn new(side: u16) -> Result<Self, ConfigError> {
        if side == 0 {
            return Err(ConfigError::InvalidGridSize);
        }

        Ok(Self { side })
    }

    /// Number of cells along each axis.
    #[must_use]
    pub fn side(self) -> u16 {
        self.side
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }

    /// Fixed cell a fresh run starts from.
    #[must_use]
    pub fn origin(self) -> Position {
        let centre = i32::from(self.side / 2);
        Position {
            x: centre,
            y: centre,
        }
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let side = i32::from(self.side);
        (0..side).flat_map(move |y| (0..side).map(move |x| Position { x, y }))
    }
}

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_within(self, grid: GridSize) -> bool {
        let side = i32::from(grid.side);
        (0..side).contains(&self.x) && (0..side).contains(&self.y)
    }

    /// Returns this position wrapped into the grid on both axes.
    #[must_use]
    pub fn wrapped(self, grid: GridSize) -> Self {
        let side = i32::from(grid.side);
        Self {
            x: self.x.rem_euclid(side),
            y: self.y.rem_euclid(side),
        }
    }

    /// Squared straight-line distance, ignoring wraparound.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// Next cell from `cell` one step in `direction`, wrapping at the edges.
#[must_use]
pub fn advance(cell: Position, direction: Direction, grid: GridSize) -> Position {
    let (dx, dy) = direction.delta();
    Position {
        x: cell.x + dx,
        y: cell.y + dy,
    }
    .wrapped(grid)
}
