//! Command-line surface.

pub mod generate;

pub use generate::{GenerateArgs, run};
