use tracing::{debug, info};

use super::{
    challenge::Challenge,
    engine::StandardGa,
    options::{LaunchOptions, LogLevel},
};
use crate::{
    error::{GeneticError, Result},
    individual::Individual,
    operators::GeneticOperators,
    rng::RandomNumberGenerator,
};

/// Drives a `StandardGa` through successive generations using a set of
/// genetic operators.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<O> {
    operators: O,
}

impl<O> EvolutionLauncher<O> {
    /// Creates a new `EvolutionLauncher` with the operators used to breed offspring.
    pub fn new(operators: O) -> Self {
        Self { operators }
    }

    pub fn operators(&self) -> &O {
        &self.operators
    }

    /// Evolves the engine's population for `options.max_generation()` generations.
    ///
    /// Every generation refills the population with offspring: two parents are
    /// selected, crossed with probability `cross_prob` (otherwise the first
    /// parent is copied), mutated with probability `mut_prob` and evaluated.
    /// With elitism the best individual of the previous generation takes one
    /// of the slots. The offspring then replace the population through
    /// `extend_population`, which re-ranks it and updates the best solution.
    ///
    /// # Returns
    ///
    /// The mean fitness of every generation followed by the mean fitness of
    /// the final population, `max_generation + 1` values in total.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - `max_generation` is zero
    /// - the population is empty
    /// - the operators reject the configured operator codes
    /// - selection or fitness evaluation fails
    ///
    /// A generation that fails leaves the population of the previous one in place.
    pub fn run<C, F>(
        &self,
        ga: &mut StandardGa<C, F>,
        options: &LaunchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<f64>>
    where
        C: Clone + std::fmt::Debug,
        F: Challenge<C>,
        O: GeneticOperators<C>,
    {
        if options.max_generation() < 1 {
            return Err(GeneticError::InvalidArgument(
                "At least one generation is required".to_string(),
            ));
        }

        if ga.population().is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        self.operators.check_cross_type(ga.options().cross_type())?;
        self.operators.check_mut_type(ga.options().mut_type())?;

        let mut fitness_progress = Vec::with_capacity(options.max_generation() + 1);

        for generation in 0..options.max_generation() {
            fitness_progress.push(mean_fitness(ga.population()));

            let offspring = self.breed_generation(ga, rng)?;
            ga.population_mut().clear();
            ga.extend_population(offspring);

            match options.log_level() {
                LogLevel::Minimal => info!(
                    generation,
                    best_fitness = ?ga.best_solution().map(|(_, fitness)| fitness),
                    "generation complete"
                ),
                LogLevel::Verbose => {
                    info!(generation, "generation complete");
                    ga.population().iter().for_each(|individual| {
                        debug!(
                            generation,
                            chromosome = ?individual.chromosome,
                            fitness = individual.fitness_val,
                            "individual"
                        );
                    });
                }
                LogLevel::None => {}
            }
        }

        fitness_progress.push(mean_fitness(ga.population()));

        Ok(fitness_progress)
    }

    fn breed_generation<C, F>(
        &self,
        ga: &StandardGa<C, F>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual<C>>>
    where
        C: Clone,
        F: Challenge<C>,
        O: GeneticOperators<C>,
    {
        let population = ga.population();
        let wheel_sum = ga.wheel_sum(population);
        let elite = if ga.options().elitism() {
            population.last().cloned()
        } else {
            None
        };

        let slots = population.len() - usize::from(elite.is_some());
        let mut offspring = Vec::with_capacity(population.len());

        for _ in 0..slots {
            let (parent1, parent2) = ga.select_parents(population, wheel_sum, rng)?;
            let child = breed_child(
                &self.operators,
                &parent1.chromosome,
                &parent2.chromosome,
                ga,
                rng,
            );
            let fitness = ga.evaluate(&child)?;
            offspring.push(Individual::new(child, fitness));
        }

        offspring.extend(elite);

        Ok(offspring)
    }
}

/// Crosses two parents with probability `cross_prob` (copying the first
/// parent otherwise) and mutates the result with probability `mut_prob`.
pub(crate) fn breed_child<C, F, O>(
    operators: &O,
    parent1: &C,
    parent2: &C,
    ga: &StandardGa<C, F>,
    rng: &mut RandomNumberGenerator,
) -> C
where
    C: Clone,
    F: Challenge<C>,
    O: GeneticOperators<C>,
{
    let options = ga.options();

    let child = if rng.chance(options.cross_prob()) {
        operators.cross(parent1, parent2, options.cross_type(), rng)
    } else {
        parent1.clone()
    };

    if rng.chance(options.mut_prob()) {
        operators.mutate(&child, options.mut_type(), rng)
    } else {
        child
    }
}

pub(crate) fn mean_fitness<C>(population: &[Individual<C>]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(|i| i.fitness_val).sum::<f64>() / population.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::GaOptions;

    #[derive(Debug, Clone)]
    struct Shift;

    impl GeneticOperators<i64> for Shift {
        fn cross(&self, p1: &i64, p2: &i64, _: u32, _: &mut RandomNumberGenerator) -> i64 {
            (p1 + p2) / 2
        }

        fn mutate(&self, c: &i64, _: u32, rng: &mut RandomNumberGenerator) -> i64 {
            if rng.chance(0.5) {
                c + 1
            } else {
                c - 1
            }
        }
    }

    #[test]
    fn test_mean_fitness() {
        assert_eq!(mean_fitness::<i64>(&[]), 0.0);
        assert_eq!(
            mean_fitness(&[Individual::new(1, 1.0), Individual::new(2, 3.0)]),
            2.0
        );
    }

    #[test]
    fn test_breed_child_without_operators() {
        let options = GaOptions::builder()
            .cross_prob(0.0)
            .mut_prob(0.0)
            .build()
            .unwrap();
        let ga: StandardGa<i64, _> = StandardGa::new(|x: &i64| *x as f64, options);
        let mut rng = RandomNumberGenerator::from_seed(4);

        assert_eq!(breed_child(&Shift, &10, &20, &ga, &mut rng), 10);
    }

    #[test]
    fn test_breed_child_always_crossed() {
        let options = GaOptions::builder()
            .cross_prob(1.0)
            .mut_prob(0.0)
            .build()
            .unwrap();
        let ga: StandardGa<i64, _> = StandardGa::new(|x: &i64| *x as f64, options);
        let mut rng = RandomNumberGenerator::from_seed(4);

        assert_eq!(breed_child(&Shift, &10, &20, &ga, &mut rng), 15);
    }

    #[test]
    fn test_run_requires_generations() {
        let mut ga: StandardGa<i64, _> = StandardGa::new(|x: &i64| *x as f64, GaOptions::default());
        ga.init_population(vec![1, 2, 3]).unwrap();
        let mut rng = RandomNumberGenerator::new();

        let result = EvolutionLauncher::new(Shift).run(
            &mut ga,
            &LaunchOptions::new(0, LogLevel::None),
            &mut rng,
        );
        assert!(matches!(result, Err(GeneticError::InvalidArgument(_))));
    }

    #[test]
    fn test_run_requires_population() {
        let mut ga: StandardGa<i64, _> = StandardGa::new(|x: &i64| *x as f64, GaOptions::default());
        let mut rng = RandomNumberGenerator::new();

        let result = EvolutionLauncher::new(Shift).run(&mut ga, &LaunchOptions::default(), &mut rng);
        assert_eq!(result, Err(GeneticError::EmptyPopulation));
    }
}
