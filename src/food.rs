use std::collections::HashSet;

use rand::Rng;

use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Samples drawn before the distance requirement is waived.
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 10;

/// Upper bound on the difficulty factor.
const MAX_DIFFICULTY_FACTOR: f64 = 0.7;

/// Difficulty added per body cell.
const DIFFICULTY_PER_CELL: f64 = 0.05;

/// Minimum head-to-food distance wanted for a snake of `length` cells.
#[must_use]
pub fn min_food_distance(grid: GridSize, length: usize) -> f64 {
    let factor = (length as f64 * DIFFICULTY_PER_CELL).min(MAX_DIFFICULTY_FACTOR);
    f64::from(grid.side()) * factor
}

/// Random draws tried before falling back to walking the grid.
const RANDOM_DRAW_LIMIT: usize = 32;

/// Uniformly random free cell, or `None` when the snake fills the grid.
///
/// While the snake covers less than half the board a uniform draw lands on a
/// free cell at least half the time, so cells are drawn directly. Longer
/// snakes (or a long losing streak) pick the n-th free cell instead.
pub fn spawn_anywhere<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len().saturating_mul(2) < grid.total_cells() {
        let side = i32::from(grid.side());
        for _ in 0..RANDOM_DRAW_LIMIT {
            let candidate = Position {
                x: rng.gen_range(0..side),
                y: rng.gen_range(0..side),
            };
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
    }

    nth_free_cell(rng, grid, snake)
}

fn nth_free_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Position> {
    let body: HashSet<Position> = snake.segments().copied().collect();
    let free = grid.total_cells().saturating_sub(body.len());
    if free == 0 {
        return None;
    }

    let index = rng.gen_range(0..free);
    grid.cells().filter(|cell| !body.contains(cell)).nth(index)
}

/// Places food after the snake has grown, biased away from the new head.
///
/// Draws up to [`FOOD_PLACEMENT_ATTEMPTS`] free cells and keeps the first one
/// far enough from the head; the final draw is kept regardless. Candidates
/// come from the free cells only, so food never lands on the snake.
pub fn place_after_growth<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let min_distance = min_food_distance(grid, snake.len());
    biased_sample(rng, grid, snake, min_distance)
}

fn biased_sample<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
    min_distance: f64,
) -> Option<Position> {
    let head = snake.head();
    let min_distance_squared = min_distance * min_distance;

    for attempt in 1..=FOOD_PLACEMENT_ATTEMPTS {
        let candidate = spawn_anywhere(rng, grid, snake)?;
        let far_enough = candidate.distance_squared(head) as f64 >= min_distance_squared;

        if far_enough || attempt == FOOD_PLACEMENT_ATTEMPTS {
            return Some(candidate);
        }
    }

    None
}
