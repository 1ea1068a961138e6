//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time through [`GameEngine::step`].

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use board::{Board, Food};
pub use config::{GameConfig, Variant};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{Cell, CollisionType, GameState, Snake, Status};
