use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::ParentSelection;

/// A selection strategy that selects parents through tournament selection.
///
/// A tournament samples `tournament_size` distinct positions of the ranked
/// population and keeps the two highest ones. Because the ranked population
/// keeps better individuals at higher positions, comparing positions is the
/// same as comparing fitness, in either optimization direction.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// # Examples
///
/// ```
/// use genepool::individual::Individual;
/// use genepool::rng::RandomNumberGenerator;
/// use genepool::selection::{ParentSelection, TournamentSelection};
///
/// // Ranked for maximization: best last.
/// let population = vec![
///     Individual::new('a', 1.0),
///     Individual::new('b', 2.0),
///     Individual::new('c', 3.0),
/// ];
/// let mut rng = RandomNumberGenerator::new();
///
/// let selection = TournamentSelection::new(3).unwrap();
/// let (best, second) = selection.select_pair(&population, None, &mut rng).unwrap();
///
/// assert_eq!((best, second), (2, 1));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament of `size` contestants over a population of
    /// `population_size` individuals.
    ///
    /// Returns the largest and the second largest sampled index, larger first.
    /// A tournament of one contestant returns that index twice.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the population is empty, if `size` is 0 or
    /// if `size` exceeds the population size.
    pub fn conduct(
        population_size: usize,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        if population_size == 0 {
            return Err(GeneticError::InvalidArgument(
                "Tournament requires a non-empty population".to_string(),
            ));
        }

        if size == 0 || size > population_size {
            return Err(GeneticError::InvalidArgument(format!(
                "Tournament size must be between 1 and {}, got {}",
                population_size, size
            )));
        }

        let mut contestants = rng.sample_distinct(population_size, size, 0)?;
        contestants.sort_unstable_by(|a, b| b.cmp(a));

        let best = contestants[0];
        let second = contestants.get(1).copied().unwrap_or(best);
        trace!(?contestants, best, second, "tournament conducted");

        Ok((best, second))
    }
}

impl<C> ParentSelection<C> for TournamentSelection {
    fn select_pair(
        &self,
        population: &[Individual<C>],
        _wheel_sum: Option<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        Self::conduct(population.len(), self.tournament_size, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_selection_invalid_size() {
        assert!(TournamentSelection::new(0).is_err());
        assert_eq!(TournamentSelection::new(4).unwrap().tournament_size(), 4);
    }

    #[test]
    fn test_conduct_whole_population() {
        let mut rng = RandomNumberGenerator::new();

        for _ in 0..20 {
            assert_eq!(TournamentSelection::conduct(5, 5, &mut rng).unwrap(), (4, 3));
        }
    }

    #[test]
    fn test_conduct_partial_population() {
        let mut rng = RandomNumberGenerator::from_seed(42);

        for _ in 0..200 {
            let (best, second) = TournamentSelection::conduct(10, 3, &mut rng).unwrap();
            assert!(best < 10);
            assert!(second < best);
        }
    }

    #[test]
    fn test_conduct_single_contestant() {
        let mut rng = RandomNumberGenerator::from_seed(1);

        let (best, second) = TournamentSelection::conduct(6, 1, &mut rng).unwrap();
        assert_eq!(best, second);
        assert!(best < 6);
    }

    #[test]
    fn test_conduct_invalid_arguments() {
        let mut rng = RandomNumberGenerator::new();

        for (population_size, size) in [(0, 4), (0, 0), (3, 0), (3, 4)] {
            let result = TournamentSelection::conduct(population_size, size, &mut rng);
            assert!(matches!(result, Err(GeneticError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_select_pair_ignores_wheel_sum() {
        let population = vec![
            Individual::new(1, 7.0),
            Individual::new(2, 6.0),
            Individual::new(3, 5.0),
        ];
        let mut rng = RandomNumberGenerator::new();
        let selection = TournamentSelection::new(3).unwrap();

        assert_eq!(
            selection.select_pair(&population, Some(-1.0), &mut rng).unwrap(),
            (2, 1)
        );
    }
}
