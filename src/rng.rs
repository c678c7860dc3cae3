//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for the
//! engine. It wraps the `rand` crate's `StdRng` and provides uniform draws,
//! Bernoulli trials and sampling of distinct indices.
//!
//! ## Example
//!
//! ```rust
//! use genepool::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let random_numbers = rng.fetch_uniform(0.0, 1.0, 5);
//! assert_eq!(random_numbers.len(), 5);
//!
//! let indices = rng.sample_distinct(10, 3, 0).unwrap();
//! assert_eq!(indices.len(), 3);
//! ```

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use std::collections::VecDeque;

use crate::error::{GeneticError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the random
/// primitives used by selection and by the drivers.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a specified number of random floating-point numbers within the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }

    /// Draws a single value from `[from, to)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty (`from >= to`) or either bound is not finite.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        self.rng.gen_range(from..to)
    }

    /// Returns `true` with probability `probability`.
    ///
    /// Values outside `[0, 1]` are clamped.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Produces `n` distinct integers from the half-open range `[start, stop)`.
    ///
    /// When the whole range is requested the result is the range itself in
    /// ascending order and no randomness is consumed. Otherwise the values are
    /// sampled uniformly without replacement and come back in no particular
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `start > stop` or if `n` exceeds `stop - start`.
    pub fn sample_distinct(&mut self, stop: usize, n: usize, start: usize) -> Result<Vec<usize>> {
        if start > stop {
            return Err(GeneticError::InvalidArgument(format!(
                "Range start ({}) is greater than stop ({})",
                start, stop
            )));
        }

        let length = stop - start;
        if n > length {
            return Err(GeneticError::InvalidArgument(format!(
                "Cannot draw {} distinct values from a range of {}",
                n, length
            )));
        }

        if n == length {
            return Ok((start..stop).collect());
        }

        Ok(index::sample(&mut self.rng, length, n)
            .into_iter()
            .map(|i| i + start)
            .collect())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
