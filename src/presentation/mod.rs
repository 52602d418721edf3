//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the calculator with ratatui and routes keyboard
//! and mouse events into the application controller.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
