//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! configuration files and the system clipboard.

pub mod clipboard;
pub mod config;

pub use clipboard::*;
pub use config::*;
