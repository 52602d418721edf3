//! scicalc - Terminal Scientific Calculator Library
//!
//! A scientific calculator with a clickable terminal keypad, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
