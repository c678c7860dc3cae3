//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! All failures are synchronous and signal caller error: a bad option at
//! construction, a bad argument at call time, or engine state that became
//! invalid after construction.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genepool::error::{GeneticError, Result};
//!
//! fn check_probability(p: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(GeneticError::Configuration(format!("bad probability {}", p)));
//!     }
//!     Ok(p)
//! }
//!
//! assert!(check_probability(0.5).is_ok());
//! assert!(check_probability(50.0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genepool::error::{GeneticError, OptionExt};
//!
//! fn last_fitness(values: &[f64]) -> genepool::error::Result<f64> {
//!     values.last().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(last_fitness(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or driving the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// An option passed at construction is missing or out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An argument passed to an operation violates its preconditions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Engine state mutated after construction is not usable.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The fitness function returned NaN or infinity.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for engine operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
