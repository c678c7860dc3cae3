//! # DiffusionGa
//!
//! A diffusion (cellular) model of a genetic algorithm. Chromosomes live on a
//! square grid that wraps around at the edges. Each generation, every cell is
//! crossed with a parent chosen from its four neighbours (up, down, left and
//! right) and replaced by the child. Parent choice uses the selection strategy
//! of the wrapped `StandardGa`, so the tournament size cannot exceed four.
//!
//! ## Example
//!
//! ```rust
//! use genepool::evolution::{DiffusionGa, GaOptions, LaunchOptions, LogLevel, StandardGa};
//! use genepool::operators::GeneticOperators;
//! use genepool::rng::RandomNumberGenerator;
//!
//! #[derive(Debug)]
//! struct Blend;
//!
//! impl GeneticOperators<f64> for Blend {
//!     fn cross(&self, p1: &f64, p2: &f64, _: u32, _: &mut RandomNumberGenerator) -> f64 {
//!         (p1 + p2) / 2.0
//!     }
//!
//!     fn mutate(&self, c: &f64, _: u32, rng: &mut RandomNumberGenerator) -> f64 {
//!         c + rng.uniform(-0.5, 0.5)
//!     }
//! }
//!
//! let options = GaOptions::builder().optim("min").build().unwrap();
//! let ga = StandardGa::builder()
//!     .with_challenge(|x: &f64| (x - 3.0).abs())
//!     .with_options(options)
//!     .build()
//!     .unwrap();
//!
//! let mut diffusion = DiffusionGa::new(ga, Blend).unwrap();
//! diffusion.init_population((0..9).map(f64::from).collect()).unwrap();
//!
//! let mut rng = RandomNumberGenerator::new();
//! let progress = diffusion
//!     .run(&LaunchOptions::new(5, LogLevel::None), &mut rng)
//!     .unwrap();
//!
//! assert_eq!(progress.len(), 6);
//! assert!(diffusion.best_solution().is_some());
//! ```

use tracing::{debug, info};

use super::{
    challenge::Challenge,
    engine::StandardGa,
    launcher::breed_child,
    options::{LaunchOptions, LogLevel, Optim},
};
use crate::{
    error::{GeneticError, Result},
    individual::Individual,
    operators::GeneticOperators,
    rng::RandomNumberGenerator,
    selection::SelectionKind,
};

/// Number of neighbours of a cell.
pub const NEIGHBOURHOOD_SIZE: usize = 4;

/// Smallest number of chromosomes `DiffusionGa::init_population` accepts.
pub const MIN_GRID_POPULATION: usize = 4;

#[derive(Debug)]
pub struct DiffusionGa<C, F, O> {
    ga: StandardGa<C, F>,
    operators: O,
    side: usize,
    chromosomes: Vec<C>,
    fitness: Vec<f64>,
}

impl<C, F, O> DiffusionGa<C, F, O>
where
    C: Clone,
    F: Challenge<C>,
    O: GeneticOperators<C>,
{
    /// Wraps `ga` in a diffusion model bred with `operators`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the tournament size exceeds the
    /// neighbourhood size, or if the operators reject the configured codes.
    pub fn new(ga: StandardGa<C, F>, operators: O) -> Result<Self> {
        let options = ga.options();

        if options.selection() == SelectionKind::Tournament {
            if let Some(size) = options.tournament_size() {
                if size > NEIGHBOURHOOD_SIZE {
                    return Err(GeneticError::Configuration(format!(
                        "Tournament size {} exceeds the neighbourhood size {}",
                        size, NEIGHBOURHOOD_SIZE
                    )));
                }
            }
        }

        operators.check_cross_type(options.cross_type())?;
        operators.check_mut_type(options.mut_type())?;

        Ok(Self {
            ga,
            operators,
            side: 0,
            chromosomes: Vec::new(),
            fitness: Vec::new(),
        })
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &StandardGa<C, F> {
        &self.ga
    }

    /// The grid side length; 0 before initialization.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The chromosome grid and the fitness grid, both row-major.
    pub fn population(&self) -> (&[C], &[f64]) {
        (&self.chromosomes, &self.fitness)
    }

    pub fn best_solution(&self) -> Option<(&C, f64)> {
        self.ga.best_solution()
    }

    /// Lays `chromosomes` out on the grid and evaluates them.
    ///
    /// The grid side is the integer square root of the number of chromosomes;
    /// chromosomes that do not fit a full square are dropped from the end.
    /// The best cell is offered to the solution tracker.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for fewer than `MIN_GRID_POPULATION`
    /// chromosomes, or `FitnessCalculation` if a score is not finite.
    pub fn init_population(&mut self, mut chromosomes: Vec<C>) -> Result<()> {
        if chromosomes.len() < MIN_GRID_POPULATION {
            return Err(GeneticError::InvalidArgument(format!(
                "Diffusion grid needs at least {} chromosomes, got {}",
                MIN_GRID_POPULATION,
                chromosomes.len()
            )));
        }

        let side = integer_sqrt(chromosomes.len());
        chromosomes.truncate(side * side);

        let fitness = chromosomes
            .iter()
            .map(|chromosome| self.ga.evaluate(chromosome))
            .collect::<Result<Vec<_>>>()?;

        let (best, _) = critical_cells(self.ga.optim(), &fitness);
        self.ga.update_solution(&chromosomes[best], fitness[best]);

        self.side = side;
        self.chromosomes = chromosomes;
        self.fitness = fitness;
        debug!(side, "diffusion grid initialized");

        Ok(())
    }

    /// Runs the model for `options.max_generation()` generations. Each
    /// generation replaces the whole grid.
    ///
    /// # Returns
    ///
    /// The mean fitness of every generation followed by the mean fitness of
    /// the final grid, `max_generation + 1` values in total.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `max_generation` is zero,
    /// `EmptyPopulation` if the grid was never initialized, and any
    /// selection or fitness error raised while breeding.
    pub fn run(
        &mut self,
        options: &LaunchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<f64>> {
        if options.max_generation() < 1 {
            return Err(GeneticError::InvalidArgument(
                "At least one generation is required".to_string(),
            ));
        }

        if self.chromosomes.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut fitness_progress = Vec::with_capacity(options.max_generation() + 1);

        for generation in 0..options.max_generation() {
            fitness_progress.push(self.mean_fitness());
            self.next_generation(rng)?;

            if options.log_level() != LogLevel::None {
                info!(
                    generation,
                    mean_fitness = self.mean_fitness(),
                    "diffusion generation complete"
                );
            }
        }

        fitness_progress.push(self.mean_fitness());

        Ok(fitness_progress)
    }

    fn next_generation(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let cells = self.chromosomes.len();
        let mut chromosomes = Vec::with_capacity(cells);
        let mut fitness = Vec::with_capacity(cells);

        for cell in 0..cells {
            let neighbour = self.select_neighbour(cell, rng)?;
            let child = breed_child(
                &self.operators,
                &self.chromosomes[cell],
                &neighbour,
                &self.ga,
                rng,
            );
            fitness.push(self.ga.evaluate(&child)?);
            chromosomes.push(child);
        }

        let (best, worst) = critical_cells(self.ga.optim(), &fitness);

        if self.ga.options().elitism() {
            if let Some((elite, elite_fitness)) = self.ga.best_solution() {
                chromosomes[worst] = elite.clone();
                fitness[worst] = elite_fitness;
            }
        }

        self.ga.update_solution(&chromosomes[best], fitness[best]);

        self.chromosomes = chromosomes;
        self.fitness = fitness;

        Ok(())
    }

    /// Picks one parent among the four neighbours of `cell`.
    fn select_neighbour(&self, cell: usize, rng: &mut RandomNumberGenerator) -> Result<C> {
        let mut neighbours: Vec<Individual<C>> = self
            .neighbour_cells(cell)
            .iter()
            .map(|&n| Individual::new(self.chromosomes[n].clone(), self.fitness[n]))
            .collect();
        self.ga.optim().rank(&mut neighbours);

        let wheel_sum = self.ga.wheel_sum(&neighbours);
        let (parent, _) = self.ga.select_parents(&neighbours, wheel_sum, rng)?;

        Ok(parent.chromosome.clone())
    }

    /// Up, down, left and right neighbours, wrapping at the edges.
    fn neighbour_cells(&self, cell: usize) -> [usize; NEIGHBOURHOOD_SIZE] {
        let side = self.side;
        let (row, column) = (cell / side, cell % side);

        let up = (row + side - 1) % side;
        let down = (row + 1) % side;
        let left = (column + side - 1) % side;
        let right = (column + 1) % side;

        [
            up * side + column,
            down * side + column,
            row * side + left,
            row * side + right,
        ]
    }

    fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.0;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

/// Positions of the first best and the first worst value of `fitness`.
fn critical_cells(optim: Optim, fitness: &[f64]) -> (usize, usize) {
    let mut best = 0;
    let mut worst = 0;

    for (i, &value) in fitness.iter().enumerate().skip(1) {
        if optim.is_better(value, fitness[best]) {
            best = i;
        }
        if optim.is_better(fitness[worst], value) {
            worst = i;
        }
    }

    (best, worst)
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::GaOptions;

    #[derive(Debug)]
    struct Keep;

    impl GeneticOperators<u32> for Keep {
        fn cross(&self, p1: &u32, _: &u32, _: u32, _: &mut RandomNumberGenerator) -> u32 {
            *p1
        }

        fn mutate(&self, c: &u32, _: u32, _: &mut RandomNumberGenerator) -> u32 {
            *c
        }
    }

    type Fitness = fn(&u32) -> f64;

    fn diffusion(options: GaOptions) -> Result<DiffusionGa<u32, Fitness, Keep>> {
        let fitness: Fitness = |x| f64::from(*x);
        DiffusionGa::new(StandardGa::new(fitness, options), Keep)
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(8), 2);
        assert_eq!(integer_sqrt(9), 3);
        assert_eq!(integer_sqrt(626), 25);
    }

    #[test]
    fn test_critical_cells_first_occurrence() {
        let fitness = [3.0, 1.0, 7.0, 1.0, 7.0];

        assert_eq!(critical_cells(Optim::Max, &fitness), (2, 1));
        assert_eq!(critical_cells(Optim::Min, &fitness), (1, 2));
    }

    #[test]
    fn test_neighbour_cells_wrap() {
        let mut model = diffusion(GaOptions::default()).unwrap();
        model.init_population((0..9).collect()).unwrap();

        // Grid:
        // 0 1 2
        // 3 4 5
        // 6 7 8
        assert_eq!(model.neighbour_cells(0), [6, 3, 2, 1]);
        assert_eq!(model.neighbour_cells(4), [1, 7, 3, 5]);
        assert_eq!(model.neighbour_cells(8), [5, 2, 7, 6]);
    }

    #[test]
    fn test_tournament_larger_than_neighbourhood() {
        let options = GaOptions::builder()
            .selection("tournament")
            .tournament_size(5)
            .build()
            .unwrap();

        assert!(matches!(
            diffusion(options),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_init_population_truncates_to_square() {
        let mut model = diffusion(GaOptions::default()).unwrap();
        model.init_population((1..=10).collect()).unwrap();

        let (chromosomes, fitness) = model.population();
        assert_eq!(model.side(), 3);
        assert_eq!(chromosomes, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(fitness.len(), 9);
        assert_eq!(model.best_solution(), Some((&9, 9.0)));
    }

    #[test]
    fn test_init_population_too_small() {
        let mut model = diffusion(GaOptions::default()).unwrap();

        assert!(model.init_population(vec![1, 2, 3]).is_err());
        assert!(model.init_population(vec![1, 2, 3, 4]).is_ok());
    }
}
