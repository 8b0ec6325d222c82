use std::fmt;
use std::time::Duration;

use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{StepOutcome, classify};
use crate::config::GameConfig;
use crate::food;
use crate::grid::{Position, advance};
use crate::input::{Direction, InputBuffer};
use crate::scheduler::Simulation;
use crate::snake::Snake;
use crate::speed::tick_interval_ms;

/// Direction every fresh run starts with.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Whether the scheduler should be driving the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Start screen; nothing has moved yet.
    Ready,
    Playing,
    Paused,
}

/// Everything one run mutates, owned by [`Game`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SimulationState {
    pub snake: Snake,
    pub food: Position,
    /// Buffered intent plus the direction applied by the previous step.
    pub input: InputBuffer,
    pub tick_interval_ms: u64,
    pub score: u32,
    pub tick_count: u64,
}

impl SimulationState {
    /// Pending heading for the next step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.input.direction()
    }

    #[must_use]
    pub fn last_applied_direction(&self) -> Direction {
        self.input.last_applied()
    }
}

type ScoreListener = Box<dyn FnMut(u32)>;

/// One snake session: the simulation state, its configuration, and the
/// start/pause/reset surface the front end drives.
pub struct Game {
    config: GameConfig,
    state: SimulationState,
    status: GameStatus,
    best_score: u32,
    rng: StdRng,
    score_listener: Option<ScoreListener>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("best_score", &self.best_score)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a session seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = initial_state(config, &mut rng);

        Self {
            config,
            state,
            status: GameStatus::Ready,
            best_score: 0,
            rng,
            score_listener: None,
        }
    }

    /// Registers the callback fired with every new score.
    pub fn set_score_listener(&mut self, listener: impl FnMut(u32) + 'static) {
        self.score_listener = Some(Box::new(listener));
    }

    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for tests and scripted setups.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Highest score reached in this session.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Forwards a steering intent to the input buffer.
    pub fn set_intent(&mut self, direction: Direction) {
        self.state.input.set_intent(direction);
    }

    pub fn start(&mut self) {
        if self.status != GameStatus::Playing {
            info!("run started");
            self.status = GameStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            info!("run paused at score {}", self.state.score);
            self.status = GameStatus::Paused;
        }
    }

    /// Restarts the run in place; the session status is left alone.
    pub fn reset(&mut self) {
        info!("run reset at score {}", self.state.score);
        self.restart_run();
    }

    /// Applies one simulation tick and reports which branch it took.
    pub fn step(&mut self) -> StepOutcome {
        let direction = self.state.input.resolve();
        let head = advance(self.state.snake.head(), direction, self.config.grid);
        let outcome = classify(head, &self.state.snake, self.state.food);
        self.state.tick_count += 1;

        match outcome {
            StepOutcome::SelfCollision => {
                info!(
                    "self collision at ({}, {}) with length {}",
                    head.x,
                    head.y,
                    self.state.snake.len()
                );
                self.restart_run();
            }
            StepOutcome::Grow => self.grow(head),
            StepOutcome::Advance => {
                trace!("advance to ({}, {})", head.x, head.y);
                self.state.snake.advance_to(head);
            }
        }

        outcome
    }

    fn grow(&mut self, head: Position) {
        self.state.snake.grow_to(head);
        let length = self.state.snake.len();
        self.state.tick_interval_ms = tick_interval_ms(self.config.base_speed_ms, length);

        let placed = food::place_after_growth(&mut self.rng, self.config.grid, &self.state.snake);
        let Some(placed) = placed else {
            info!("snake filled the grid at length {length}");
            self.restart_run();
            return;
        };

        self.state.food = placed;
        let score = u32::try_from(length - 1).unwrap_or(u32::MAX);
        debug!(
            "grew to length {length}, tick interval {} ms, food at ({}, {})",
            self.state.tick_interval_ms, placed.x, placed.y
        );
        self.set_score(score);
    }

    fn restart_run(&mut self) {
        self.state = initial_state(self.config, &mut self.rng);
        self.set_score(0);
    }

    fn set_score(&mut self, score: u32) {
        self.state.score = score;
        self.best_score = self.best_score.max(score);
        if let Some(listener) = self.score_listener.as_mut() {
            listener(score);
        }
    }
}

impl Simulation for Game {
    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.tick_interval_ms)
    }

    fn tick(&mut self) {
        let _ = self.step();
    }
}

fn initial_state(config: GameConfig, rng: &mut StdRng) -> SimulationState {
    let snake = Snake::new(config.grid.origin());
    // A one-cell grid has no free cell; food then shares the origin and the
    // first step eats it, which restarts the run.
    let food = food::spawn_anywhere(rng, config.grid, &snake).unwrap_or(config.grid.origin());

    SimulationState {
        snake,
        food,
        input: InputBuffer::new(INITIAL_DIRECTION),
        tick_interval_ms: config.base_speed_ms,
        score: 0,
        tick_count: 0,
    }
}
