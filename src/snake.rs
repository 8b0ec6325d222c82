use std::collections::{VecDeque, vec_deque};

use crate::grid::Position;

/// Ordered body cells, head first.
///
/// Never empty: every constructor seeds at least one cell and movement only
/// drops the tail after pushing a new head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Falls back to a single cell at the origin of the coordinate space when
    /// `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        if segments.is_empty() {
            return Self::new(Position { x: 0, y: 0 });
        }

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Adds `head` and drops the tail; length is unchanged.
    pub fn advance_to(&mut self, head: Position) {
        self.body.push_front(head);
        let _ = self.body.pop_back();
    }

    /// Adds `head` and keeps the tail; length grows by one.
    pub fn grow_to(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if `position` hits a segment that stays in place next
    /// tick, i.e. any segment except the tail.
    #[must_use]
    pub fn blocks(&self, position: Position) -> bool {
        let staying = self.body.len() - 1;
        self.body.iter().take(staying).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> vec_deque::Iter<'_, Position> {
        self.body.iter()
    }
}
