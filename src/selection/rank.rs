use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::ParentSelection;
use crate::selection::{require_wheel_sum, spin_wheel};

/// Returns the total rank weight of a population of `size` individuals.
///
/// Ranks run from 1 (worst) to `size` (best), so the total is
/// `size * (size + 1) / 2`.
///
/// ```
/// use genepool::selection::compute_rank_wheel_sum;
///
/// assert_eq!(compute_rank_wheel_sum(5), 15.0);
/// assert_eq!(compute_rank_wheel_sum(1000), 500500.0);
/// ```
pub fn compute_rank_wheel_sum(size: usize) -> f64 {
    let n = size as u128;
    (n * (n + 1) / 2) as f64
}

/// A selection strategy that weights each individual by its rank.
///
/// The individual at position `i` of the ranked population has weight `i + 1`,
/// so the best individual is the most likely pick regardless of the spread of
/// raw fitness values. The two parents are drawn independently and may be the
/// same individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSelection;

impl RankSelection {
    fn select_one(
        population_size: usize,
        wheel_sum: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        spin_wheel((1..=population_size).map(|rank| rank as f64), wheel_sum, rng)
    }
}

impl<C> ParentSelection<C> for RankSelection {
    fn select_pair(
        &self,
        population: &[Individual<C>],
        wheel_sum: Option<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        let wheel_sum = require_wheel_sum(wheel_sum)?;
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let first = Self::select_one(population.len(), wheel_sum, rng)?;
        let second = Self::select_one(population.len(), wheel_sum, rng)?;
        trace!(first, second, "rank selection");

        Ok((first, second))
    }
}
