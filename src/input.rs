use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Cell offset of one step, with y growing downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Single-slot directional mailbox between key events and the simulation.
///
/// Contract:
/// - `set_intent` may be called any number of times between two steps; only
///   the last accepted call is seen by the next step (last write wins, no
///   queue).
/// - An intent that reverses the last *applied* direction is dropped on
///   arrival.
/// - The simulation reads the slot exactly once per step through
///   [`InputBuffer::resolve`], which also records the applied direction.
///
/// Writers and the reader are serialized by the single-threaded event loop,
/// so no locking is involved.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InputBuffer {
    intent: Direction,
    last_applied: Direction,
}

impl InputBuffer {
    /// Creates a buffer heading in `direction`.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            intent: direction,
            last_applied: direction,
        }
    }

    /// Overwrites the pending intent unless it reverses the last applied move.
    pub fn set_intent(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.last_applied, direction) {
            return;
        }
        self.intent = direction;
    }

    /// Returns the direction the next step will use.
    #[must_use]
    pub fn effective(&self) -> Direction {
        if direction_change_is_valid(self.last_applied, self.intent) {
            self.intent
        } else {
            self.last_applied
        }
    }

    /// Consumes the pending intent for one step and records it as applied.
    pub fn resolve(&mut self) -> Direction {
        let effective = self.effective();
        self.intent = effective;
        self.last_applied = effective;
        effective
    }

    /// Pending intent, which is the heading shown to the player.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.intent
    }

    /// Direction used by the most recent step.
    #[must_use]
    pub fn last_applied(&self) -> Direction {
        self.last_applied
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Reset,
    CycleTheme,
    Confirm,
    Quit,
}

/// Translates one terminal key press into a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Char('p' | 'P' | ' ') => GameInput::Pause,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Char('t' | 'T') => GameInput::CycleTheme,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Waits up to `timeout` for one key press and maps it.
///
/// Returns `Ok(None)` on timeout and for events that are not game inputs.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, InputBuffer, direction_change_is_valid, map_key};

    const ALL_DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn direction_change_rejects_reverse() {
        for direction in ALL_DIRECTIONS {
            assert!(!direction_change_is_valid(direction, direction.opposite()));
            assert!(direction_change_is_valid(direction, direction));
        }
        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
    }

    #[test]
    fn reversal_intent_is_dropped() {
        let mut buffer = InputBuffer::new(Direction::Up);

        buffer.set_intent(Direction::Down);

        assert_eq!(buffer.resolve(), Direction::Up);
    }

    #[test]
    fn last_write_wins_between_steps() {
        let mut buffer = InputBuffer::new(Direction::Right);

        buffer.set_intent(Direction::Up);
        buffer.set_intent(Direction::Down);

        assert_eq!(buffer.resolve(), Direction::Down);
        assert_eq!(buffer.last_applied(), Direction::Down);
    }

    #[test]
    fn two_quick_turns_cannot_reverse_within_one_step() {
        // Up is accepted, then Left would reverse the still-applied Right.
        let mut buffer = InputBuffer::new(Direction::Right);

        buffer.set_intent(Direction::Up);
        buffer.set_intent(Direction::Left);

        assert_eq!(buffer.resolve(), Direction::Up);
    }

    #[test]
    fn no_intent_sequence_produces_a_reversal() {
        // Exhaustive over every three-intent burst between consecutive steps.
        for start in ALL_DIRECTIONS {
            for a in ALL_DIRECTIONS {
                for b in ALL_DIRECTIONS {
                    for c in ALL_DIRECTIONS {
                        let mut buffer = InputBuffer::new(start);
                        let mut previous = start;
                        for intent in [a, b, c] {
                            buffer.set_intent(intent);
                            let applied = buffer.resolve();
                            assert_ne!(applied, previous.opposite());
                            previous = applied;
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn keys_map_to_inputs() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
