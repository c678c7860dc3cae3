//! Property-based tests for the selection and population invariants.

use genepool::{
    compute_rank_wheel_sum,
    evolution::{GaOptions, StandardGa},
    selection::TournamentSelection,
    Individual, Optim, RandomNumberGenerator,
};
use proptest::prelude::*;

type Fitness = fn(&f64) -> f64;

fn identity(x: &f64) -> f64 {
    *x
}

fn engine(optim: &str) -> StandardGa<f64, Fitness> {
    StandardGa::builder()
        .with_challenge(identity as Fitness)
        .with_options(GaOptions::builder().optim(optim).build().unwrap())
        .build()
        .unwrap()
}

fn optim_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("min"), Just("max")]
}

proptest! {
    #[test]
    fn sample_distinct_is_distinct_and_in_range(
        start in 0usize..50,
        length in 0usize..50,
        seed in any::<u64>(),
        ratio in 0.0f64..=1.0,
    ) {
        let stop = start + length;
        let n = (length as f64 * ratio) as usize;
        let mut rng = RandomNumberGenerator::from_seed(seed);

        let mut sample = rng.sample_distinct(stop, n, start).unwrap();
        prop_assert_eq!(sample.len(), n);
        prop_assert!(sample.iter().all(|i| (start..stop).contains(i)));

        sample.sort_unstable();
        sample.dedup();
        prop_assert_eq!(sample.len(), n);
    }

    #[test]
    fn sample_distinct_rejects_oversized_requests(
        start in 0usize..50,
        length in 0usize..50,
        extra in 1usize..10,
    ) {
        let mut rng = RandomNumberGenerator::from_seed(0);
        prop_assert!(rng.sample_distinct(start + length, length + extra, start).is_err());
    }

    #[test]
    fn rank_wheel_sum_matches_weights(size in 0usize..2000) {
        let expected: f64 = (1..=size).map(|w| w as f64).sum();
        prop_assert_eq!(compute_rank_wheel_sum(size), expected);
    }

    #[test]
    fn rank_puts_best_last(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..40),
        optim in optim_strategy(),
    ) {
        let optim: Optim = optim.parse().unwrap();
        let mut population: Vec<Individual<()>> =
            values.iter().map(|v| Individual::new((), *v)).collect();
        optim.rank(&mut population);

        let last = population.last().unwrap().fitness_val;
        prop_assert!(population.iter().all(|i| !optim.is_better(i.fitness_val, last)));
        prop_assert!(population
            .windows(2)
            .all(|pair| !optim.is_better(pair[0].fitness_val, pair[1].fitness_val)));
    }

    #[test]
    fn update_solution_never_regresses(
        offers in prop::collection::vec(-1000.0f64..1000.0, 1..40),
        optim in optim_strategy(),
    ) {
        let mut ga = engine(optim);
        let direction = ga.optim();
        let mut best: Option<f64> = None;

        for fitness in offers {
            ga.update_solution(&fitness, fitness);
            let tracked = ga.best_solution().unwrap().1;
            if let Some(previous) = best {
                prop_assert!(!direction.is_better(previous, tracked));
            }
            best = Some(tracked);
        }
    }

    #[test]
    fn tournament_winner_is_highest_sampled(
        population_size in 1usize..100,
        ratio in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let size = 1 + ((population_size - 1) as f64 * ratio) as usize;
        let mut rng = RandomNumberGenerator::from_seed(seed);

        let (best, second) = TournamentSelection::conduct(population_size, size, &mut rng).unwrap();
        prop_assert!(best < population_size);
        if size == 1 {
            prop_assert_eq!(best, second);
        } else {
            prop_assert!(best > second);
        }
    }

    #[test]
    fn init_population_tracks_ranked_best(
        values in prop::collection::vec(-1000.0f64..1000.0, 3..40),
        optim in optim_strategy(),
    ) {
        let mut ga = engine(optim);
        ga.init_population(values).unwrap();

        let last = ga.population().last().unwrap().fitness_val;
        prop_assert_eq!(ga.best_solution().unwrap().1, last);
    }
}
