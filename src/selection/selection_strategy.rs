use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A strategy picks two parents from a population that has already been
/// ranked, i.e. the best individual is the last element. The returned values
/// are indices into `population`, first parent first.
///
/// # Examples
///
/// ```
/// use genepool::individual::Individual;
/// use genepool::rng::RandomNumberGenerator;
/// use genepool::selection::{compute_rank_wheel_sum, ParentSelection, RankSelection};
///
/// let population = vec![
///     Individual::new('a', 1.0),
///     Individual::new('b', 2.0),
///     Individual::new('c', 3.0),
/// ];
/// let mut rng = RandomNumberGenerator::new();
///
/// let wheel_sum = compute_rank_wheel_sum(population.len());
/// let (first, second) = RankSelection
///     .select_pair(&population, Some(wheel_sum), &mut rng)
///     .unwrap();
///
/// assert!(first < population.len() && second < population.len());
/// ```
pub trait ParentSelection<C>: Debug {
    /// Selects two parents from the ranked `population`.
    ///
    /// # Arguments
    ///
    /// * `population` - The ranked population, worst first and best last.
    /// * `wheel_sum` - The total wheel weight for wheel-based strategies.
    ///   Strategies that do not spin a wheel ignore it.
    /// * `rng` - The random number generator to draw from.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments violate the strategy's preconditions.
    /// No randomness is consumed in that case.
    fn select_pair(
        &self,
        population: &[Individual<C>],
        wheel_sum: Option<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)>;
}
