//! # StandardGa
//!
//! `StandardGa` is the selection and population engine of a generational
//! genetic algorithm. It owns the population and the best solution seen so
//! far, ranks the population, selects parents and merges offspring back in.
//!
//! The population is kept ranked so that the best individual, by the
//! configured optimization direction, is always the **last** element and the
//! worst is the first. Tournament selection, elitism and solution tracking
//! only ever compare positions and never look at the direction again.
//!
//! The engine does not breed. A driver (see `EvolutionLauncher` and
//! `DiffusionGa`) selects parents here, produces offspring with its operators
//! and hands the offspring back through `extend_population`.
//!
//! ## Example
//!
//! ```rust
//! use genepool::evolution::{GaOptions, StandardGa};
//! use genepool::individual::Individual;
//! use genepool::rng::RandomNumberGenerator;
//!
//! let options = GaOptions::builder().optim("min").build().unwrap();
//! let mut ga = StandardGa::builder()
//!     .with_challenge(|x: &f64| x * x)
//!     .with_options(options)
//!     .build()
//!     .unwrap();
//!
//! ga.init_population(vec![-3.0, 2.0, 0.5, 4.0]).unwrap();
//! assert_eq!(ga.best_solution(), Some((&0.5, 0.25)));
//!
//! let mut rng = RandomNumberGenerator::new();
//! let wheel_sum = ga.wheel_sum(ga.population());
//! let (p1, p2) = ga.select_parents(ga.population(), wheel_sum, &mut rng).unwrap();
//! let child = (p1.chromosome + p2.chromosome) / 2.0;
//!
//! ga.extend_population(vec![Individual::new(child, child * child)]);
//! assert_eq!(ga.population().len(), 5);
//! ```

use std::fmt;

use tracing::{debug, trace};

use super::builder::StandardGaBuilder;
use super::challenge::Challenge;
use super::options::{GaOptions, Optim};
use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::{
    compute_rank_wheel_sum, ParentSelection, RankSelection, RouletteWheelSelection,
    SelectionKind, TournamentSelection,
};

/// Smallest number of chromosomes `init_population` accepts.
pub const MIN_POPULATION_SIZE: usize = 3;

pub struct StandardGa<C, F> {
    options: GaOptions,
    selection: String,
    challenge: F,
    population: Vec<Individual<C>>,
    best: Option<(C, f64)>,
}

impl<C, F> StandardGa<C, F>
where
    C: Clone,
    F: Challenge<C>,
{
    /// Creates an engine from an already validated configuration.
    ///
    /// Prefer `StandardGa::builder()`, which also rejects a missing fitness
    /// function and can check operator codes.
    pub fn new(challenge: F, options: GaOptions) -> Self {
        Self {
            selection: options.selection().to_string(),
            options,
            challenge,
            population: Vec::new(),
            best: None,
        }
    }

    /// Returns a builder for creating a `StandardGa` instance.
    pub fn builder() -> StandardGaBuilder<C, F> {
        StandardGaBuilder::new()
    }

    /// The configuration the engine was built with.
    ///
    /// The live selection name may differ, see `selection`.
    pub fn options(&self) -> &GaOptions {
        &self.options
    }

    pub fn optim(&self) -> Optim {
        self.options.optim()
    }

    /// The name of the selection strategy used by `select_parents`.
    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Replaces the selection strategy by name.
    ///
    /// The name is not checked here. An unknown name makes the next call to
    /// `select_parents` fail with `InvalidState`.
    pub fn set_selection(&mut self, selection: impl Into<String>) {
        self.selection = selection.into();
    }

    pub fn population(&self) -> &[Individual<C>] {
        &self.population
    }

    /// Mutable access to the population.
    ///
    /// Callers that reorder or insert individuals must call `sort_population`
    /// afterwards to restore the best-last ordering.
    pub fn population_mut(&mut self) -> &mut Vec<Individual<C>> {
        &mut self.population
    }

    /// The best chromosome and fitness tracked so far, if any.
    pub fn best_solution(&self) -> Option<(&C, f64)> {
        self.best
            .as_ref()
            .map(|(chromosome, fitness)| (chromosome, *fitness))
    }

    /// Overwrites the tracked best solution, e.g. when resuming a run.
    pub fn set_best_solution(&mut self, chromosome: C, fitness: f64) {
        self.best = Some((chromosome, fitness));
    }

    /// Evaluates `chromosome` with the fitness function.
    ///
    /// # Errors
    ///
    /// Returns `FitnessCalculation` if the score is NaN or infinite.
    pub fn evaluate(&self, chromosome: &C) -> Result<f64> {
        let score = self.challenge.score(chromosome);
        if !score.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                score
            )));
        }
        Ok(score)
    }

    /// Re-sorts the population so that the best individual is last.
    pub fn sort_population(&mut self) {
        self.optim().rank(&mut self.population);
        debug!(size = self.population.len(), optim = %self.optim(), "population ranked");
    }

    /// Offers a candidate to the solution tracker.
    ///
    /// The candidate replaces the tracked solution only if it is strictly
    /// better; on a tie the earlier solution is kept. When nothing is tracked
    /// yet the candidate is adopted. Returns whether the tracker changed.
    pub fn update_solution(&mut self, chromosome: &C, fitness: f64) -> bool {
        let improved = match &self.best {
            Some((_, best_fitness)) => self.optim().is_better(fitness, *best_fitness),
            None => true,
        };

        if improved {
            debug!(fitness, "best solution improved");
            self.best = Some((chromosome.clone(), fitness));
        }

        improved
    }

    /// Appends `new_individuals`, offers each of them to the solution tracker
    /// and re-ranks the population.
    ///
    /// An empty batch only re-ranks.
    pub fn extend_population(&mut self, new_individuals: Vec<Individual<C>>) {
        let added = new_individuals.len();

        for individual in &new_individuals {
            self.update_solution(&individual.chromosome, individual.fitness_val);
        }

        self.population.extend(new_individuals);
        self.sort_population();
        debug!(added, size = self.population.len(), "population extended");
    }

    /// Replaces the population with `chromosomes`, evaluated by the fitness
    /// function and ranked. The best of them is offered to the solution tracker.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if fewer than `MIN_POPULATION_SIZE`
    /// chromosomes are given, or `FitnessCalculation` if any score is not
    /// finite. The engine is left untouched on error.
    pub fn init_population(&mut self, chromosomes: Vec<C>) -> Result<()> {
        if chromosomes.len() < MIN_POPULATION_SIZE {
            return Err(GeneticError::InvalidArgument(format!(
                "Initial population needs at least {} chromosomes, got {}",
                MIN_POPULATION_SIZE,
                chromosomes.len()
            )));
        }

        let mut population = Vec::with_capacity(chromosomes.len());
        for chromosome in chromosomes {
            let fitness = self.evaluate(&chromosome)?;
            population.push(Individual::new(chromosome, fitness));
        }

        self.population = population;
        self.sort_population();

        if let Some(best) = self.population.last().cloned() {
            self.update_solution(&best.chromosome, best.fitness_val);
        }

        Ok(())
    }

    /// The wheel sum the live selection strategy expects for `population`:
    /// the closed-form rank total for rank selection, the fitness total for
    /// roulette, and `None` otherwise.
    pub fn wheel_sum(&self, population: &[Individual<C>]) -> Option<f64> {
        match self.selection.parse::<SelectionKind>() {
            Ok(SelectionKind::Rank) => Some(compute_rank_wheel_sum(population.len())),
            Ok(SelectionKind::Roulette) => Some(population.iter().map(|i| i.fitness_val).sum()),
            _ => None,
        }
    }

    /// Selects two parents from the ranked `population` with the live
    /// selection strategy.
    ///
    /// `wheel_sum` is required and must be positive for rank and roulette
    /// selection; tournament selection ignores it and uses the configured
    /// tournament size.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the selection name is unknown, or is
    ///   `"tournament"` while no tournament size was configured.
    /// - `InvalidArgument` if the wheel sum or the population does not meet the
    ///   strategy's preconditions.
    pub fn select_parents<'p>(
        &self,
        population: &'p [Individual<C>],
        wheel_sum: Option<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(&'p Individual<C>, &'p Individual<C>)> {
        let kind = self.selection.parse::<SelectionKind>().map_err(|_| {
            GeneticError::InvalidState(format!("Unknown selection type \"{}\"", self.selection))
        })?;

        let (first, second) = match kind {
            SelectionKind::Rank => RankSelection.select_pair(population, wheel_sum, rng)?,
            SelectionKind::Roulette => {
                RouletteWheelSelection.select_pair(population, wheel_sum, rng)?
            }
            SelectionKind::Tournament => {
                let size = self.options.tournament_size().ok_or_else_genetic(|| {
                    GeneticError::InvalidState(
                        "Tournament selection without a configured tournament size".to_string(),
                    )
                })?;
                self.conduct_tournament(population, size, rng)?
            }
        };
        trace!(%kind, first, second, "parents selected");

        Ok((&population[first], &population[second]))
    }

    /// Samples `size` distinct positions of the ranked `population` and
    /// returns the two highest, i.e. the best and second best contestants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the population is empty or `size` is not
    /// between 1 and the population size.
    pub fn conduct_tournament(
        &self,
        population: &[Individual<C>],
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        TournamentSelection::conduct(population.len(), size, rng)
    }
}

impl<C: fmt::Debug, F> fmt::Debug for StandardGa<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardGa")
            .field("options", &self.options)
            .field("selection", &self.selection)
            .field("population", &self.population)
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}
