//! # Individual
//!
//! An `Individual` pairs a chromosome with its evaluated fitness value. The
//! chromosome is opaque to the engine: only the fitness function and the
//! genetic operators interpret it.
//!
//! ## Example
//!
//! ```rust
//! use genepool::individual::Individual;
//!
//! let individual = Individual::new(vec![1, 2, 3], 25.0);
//!
//! assert_eq!(individual.chromosome, vec![1, 2, 3]);
//! assert_eq!(individual.fitness_val, 25.0);
//! assert_eq!(individual, Individual::new(vec![1, 2, 3], 25.0));
//! ```

/// A chromosome together with its fitness value.
///
/// Equality is structural: two individuals are equal when both the chromosome
/// and the fitness value are equal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<C> {
    /// The candidate solution.
    pub chromosome: C,
    /// The fitness of `chromosome` as computed by the fitness function.
    pub fitness_val: f64,
}

impl<C> Individual<C> {
    /// Creates a new `Individual`.
    pub fn new(chromosome: C, fitness_val: f64) -> Self {
        Self {
            chromosome,
            fitness_val,
        }
    }

    /// Splits the individual back into its chromosome and fitness value.
    pub fn into_parts(self) -> (C, f64) {
        (self.chromosome, self.fitness_val)
    }
}

impl<C> From<(C, f64)> for Individual<C> {
    fn from((chromosome, fitness_val): (C, f64)) -> Self {
        Self::new(chromosome, fitness_val)
    }
}
