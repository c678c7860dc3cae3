pub mod builder;
pub mod challenge;
pub mod diffusion;
pub mod engine;
pub mod launcher;
pub mod options;

pub use builder::StandardGaBuilder;
pub use challenge::Challenge;
pub use diffusion::DiffusionGa;
pub use engine::{StandardGa, MIN_POPULATION_SIZE};
pub use launcher::EvolutionLauncher;
pub use options::{ElitismSetting, GaOptions, GaOptionsBuilder, LaunchOptions, LogLevel, Optim};
