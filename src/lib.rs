//! tui_snake - Snake in the terminal
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - Key mapping (input module) and ratatui drawing (render module)
//! - The interactive loop (modes module)
//! - Per-game statistics (metrics module) and file logging (logging module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
