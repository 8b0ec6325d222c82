//! Real-time toroidal snake: a fixed-timestep simulation core driven by a
//! variable-rate frame scheduler, plus the terminal front end that renders it.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod speed;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
