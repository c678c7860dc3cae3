use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::ParentSelection;
use crate::selection::{require_wheel_sum, spin_wheel};

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their fitness value. The wheel
/// sum is supplied by the caller and is expected to be the sum of the fitness
/// values of the population.
///
/// Fitness values are used as weights as they are, so they must be
/// non-negative. Problems that minimize, or whose fitness can be negative,
/// should shift the values before evaluating or use rank selection instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    fn select_one<C>(
        population: &[Individual<C>],
        wheel_sum: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        spin_wheel(population.iter().map(|ind| ind.fitness_val), wheel_sum, rng)
    }
}

impl<C> ParentSelection<C> for RouletteWheelSelection {
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

        let first = Self::select_one(population, wheel_sum, rng)?;
        let second = Self::select_one(population, wheel_sum, rng)?;
        trace!(first, second, "roulette selection");

        Ok((first, second))
    }
}
