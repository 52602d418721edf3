//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the calculator and translating button presses into commands.

pub mod keypad;
pub mod state;

pub use keypad::*;
pub use state::*;
