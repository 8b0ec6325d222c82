use crate::grid::Position;
use crate::snake::Snake;

/// The one branching decision of every tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The new head lands on a body cell that is not vacated this tick.
    SelfCollision,
    /// The new head lands on the food; the tail stays.
    Grow,
    /// Plain move; the tail is vacated.
    Advance,
}

/// Classifies a proposed head against the snake as it is before the move.
///
/// The current tail never counts as a collision: it is vacated in the same
/// tick the head moves.
#[must_use]
pub fn classify(new_head: Position, snake: &Snake, food: Position) -> StepOutcome {
    if snake.blocks(new_head) {
        StepOutcome::SelfCollision
    } else if new_head == food {
        StepOutcome::Grow
    } else {
        StepOutcome::Advance
    }
}
