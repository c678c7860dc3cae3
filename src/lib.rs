pub mod error;
pub mod evolution;
pub mod individual;
pub mod operators;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{
    Challenge, DiffusionGa, EvolutionLauncher, GaOptions, LaunchOptions, LogLevel, Optim,
    StandardGa,
};
pub use individual::Individual;
pub use operators::GeneticOperators;
pub use rng::RandomNumberGenerator;
pub use selection::{compute_rank_wheel_sum, SelectionKind};
