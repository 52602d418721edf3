//! Domain layer: the expression language and the calculator buffer.

pub mod errors;
pub mod models;
pub mod parser;
pub mod services;

pub use errors::*;
pub use models::*;
pub use parser::*;
pub use services::*;
