//! # GeneticOperators Trait
//!
//! The `GeneticOperators` trait is the contract for the crossover and mutation
//! operators that the drivers apply to chromosomes. The engine itself never
//! calls them; it only asks them, at construction, whether the configured
//! operator codes are legal.
//!
//! ## Example
//!
//! ```rust
//! use genepool::error::{GeneticError, Result};
//! use genepool::operators::GeneticOperators;
//! use genepool::rng::RandomNumberGenerator;
//!
//! #[derive(Debug)]
//! struct Averaging;
//!
//! impl GeneticOperators<f64> for Averaging {
//!     fn cross(&self, p1: &f64, p2: &f64, _cross_type: u32, _rng: &mut RandomNumberGenerator) -> f64 {
//!         (p1 + p2) / 2.0
//!     }
//!
//!     fn mutate(&self, c: &f64, _mut_type: u32, rng: &mut RandomNumberGenerator) -> f64 {
//!         c + rng.uniform(-0.1, 0.1)
//!     }
//!
//!     // Only one kind of crossover is implemented.
//!     fn check_cross_type(&self, cross_type: u32) -> Result<()> {
//!         if cross_type != 1 {
//!             return Err(GeneticError::Configuration(format!("unsupported cross_type {}", cross_type)));
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for the crossover and mutation operators of a concrete GA.
///
/// `cross_type` and `mut_type` are operator codes chosen by the implementor.
/// The base configuration only guarantees they are at least 1; the `check_*`
/// hooks narrow that further and are run when the engine is built with
/// `StandardGaBuilder::build_for`.
pub trait GeneticOperators<C>: Debug {
    /// Combines two parents into one offspring chromosome.
    fn cross(&self, parent1: &C, parent2: &C, cross_type: u32, rng: &mut RandomNumberGenerator)
        -> C;

    /// Returns a mutated copy of `chromosome`.
    fn mutate(&self, chromosome: &C, mut_type: u32, rng: &mut RandomNumberGenerator) -> C;

    /// Validates the crossover code. Every code accepted by the base
    /// configuration is accepted by default.
    fn check_cross_type(&self, _cross_type: u32) -> Result<()> {
        Ok(())
    }

    /// Validates the mutation code. Every code accepted by the base
    /// configuration is accepted by default.
    fn check_mut_type(&self, _mut_type: u32) -> Result<()> {
        Ok(())
    }
}
