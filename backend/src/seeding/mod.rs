//! Deterministic sample data for local runs and demos.

mod config;
mod generator;
mod startup;

pub use config::SeedSettings;
pub use generator::{GenerationError, generate_animals};
pub use startup::{SeedOutcome, SeedingError, seed_on_startup};
