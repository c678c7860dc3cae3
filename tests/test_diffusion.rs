use genepool::{
    error::GeneticError,
    evolution::{DiffusionGa, GaOptions, LaunchOptions, LogLevel, StandardGa},
    operators::GeneticOperators,
    rng::RandomNumberGenerator,
};

#[derive(Debug)]
struct Blend;

impl GeneticOperators<f64> for Blend {
    fn cross(&self, parent1: &f64, parent2: &f64, _: u32, _: &mut RandomNumberGenerator) -> f64 {
        (parent1 + parent2) / 2.0
    }

    fn mutate(&self, chromosome: &f64, _: u32, rng: &mut RandomNumberGenerator) -> f64 {
        chromosome + rng.uniform(-0.5, 0.5)
    }
}

type Fitness = fn(&f64) -> f64;

fn sine(x: &f64) -> f64 {
    x.sin()
}

fn model(options: GaOptions) -> DiffusionGa<f64, Fitness, Blend> {
    let ga = StandardGa::builder()
        .with_challenge(sine as Fitness)
        .with_options(options)
        .build()
        .unwrap();
    DiffusionGa::new(ga, Blend).unwrap()
}

fn chromosomes() -> Vec<f64> {
    (0..16).map(|i| f64::from(i) * 0.4).collect()
}

#[test]
fn test_diffusion_run_all_selections() {
    let selections = [
        GaOptions::builder().optim("max").selection("rank").build(),
        GaOptions::builder()
            .optim("max")
            .selection("tournament")
            .tournament_size(4)
            .build(),
        GaOptions::builder()
            .optim("min")
            .selection("tournament")
            .tournament_size(2)
            .build(),
    ];

    for options in selections {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut diffusion = model(options.unwrap());
        diffusion.init_population(chromosomes()).unwrap();

        let progress = diffusion
            .run(&LaunchOptions::new(10, LogLevel::Minimal), &mut rng)
            .unwrap();

        assert_eq!(progress.len(), 11);
        let (chromosomes, fitness) = diffusion.population();
        assert_eq!(chromosomes.len(), 16);
        assert_eq!(fitness.len(), 16);
    }
}

#[test]
fn test_diffusion_best_never_regresses() {
    let mut rng = RandomNumberGenerator::from_seed(3);
    let mut diffusion = model(GaOptions::builder().optim("max").build().unwrap());
    diffusion.init_population(chromosomes()).unwrap();
    let mut previous = diffusion.best_solution().unwrap().1;

    for _ in 0..20 {
        diffusion
            .run(&LaunchOptions::new(1, LogLevel::None), &mut rng)
            .unwrap();
        let best = diffusion.best_solution().unwrap().1;
        assert!(best >= previous);
        previous = best;
    }
}

#[test]
fn test_diffusion_elitism_keeps_best_on_grid() {
    let mut rng = RandomNumberGenerator::from_seed(12);
    let options = GaOptions::builder()
        .optim("min")
        .mut_prob(1.0)
        .elitism(true)
        .build()
        .unwrap();
    let mut diffusion = model(options);
    diffusion.init_population(chromosomes()).unwrap();

    for _ in 0..10 {
        let best_before = diffusion.best_solution().unwrap().1;
        diffusion
            .run(&LaunchOptions::new(1, LogLevel::None), &mut rng)
            .unwrap();

        let (_, fitness) = diffusion.population();
        assert!(fitness.iter().any(|f| *f <= best_before));
    }
}

#[test]
fn test_diffusion_run_errors() {
    let mut rng = RandomNumberGenerator::new();
    let mut diffusion = model(GaOptions::default());

    let result = diffusion.run(&LaunchOptions::new(3, LogLevel::None), &mut rng);
    assert!(matches!(result, Err(GeneticError::EmptyPopulation)));

    diffusion.init_population(chromosomes()).unwrap();
    let result = diffusion.run(&LaunchOptions::new(0, LogLevel::None), &mut rng);
    assert!(matches!(result, Err(GeneticError::InvalidArgument(_))));
}
