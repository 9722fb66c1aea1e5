//! CLI module for the timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output printed after the terminal is restored

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands};
pub use display::Display;
