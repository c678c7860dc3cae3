//! # GaOptions
//!
//! The `GaOptions` struct holds the validated configuration of the engine:
//! optimization direction, selection strategy, operator probabilities and
//! codes, and elitism. It is produced by `GaOptionsBuilder`, whose setters
//! accept loosely typed values and whose `build` method rejects anything out
//! of range before a `GaOptions` exists.
//!
//! ## Example
//!
//! ```rust
//! use genepool::evolution::options::{GaOptions, Optim};
//! use genepool::selection::SelectionKind;
//!
//! let options = GaOptions::builder()
//!     .optim("min")
//!     .selection("tournament")
//!     .tournament_size(3)
//!     .mut_prob(0.1)
//!     .elitism(1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.optim(), Optim::Min);
//! assert_eq!(options.selection(), SelectionKind::Tournament);
//! assert!(options.elitism());
//!
//! // Probabilities outside [0, 1] are rejected.
//! assert!(GaOptions::builder().cross_prob(50.0).build().is_err());
//! ```
//!
//! `LaunchOptions` configures the drivers that repeatedly call into the engine.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::selection::SelectionKind;

/// Whether smaller or larger fitness values are better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optim {
    Min,
    Max,
}

impl Optim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Optim::Min => "min",
            Optim::Max => "max",
        }
    }

    /// Returns `true` if `candidate` is strictly better than `current`.
    pub fn is_better(&self, candidate: f64, current: f64) -> bool {
        match self {
            Optim::Min => candidate < current,
            Optim::Max => candidate > current,
        }
    }

    /// Orders two fitness values so that the better one compares greater.
    ///
    /// Sorting ascending with this ordering puts the best value last.
    pub fn rank_cmp(&self, a: f64, b: f64) -> Ordering {
        match self {
            Optim::Max => a.total_cmp(&b),
            Optim::Min => b.total_cmp(&a),
        }
    }

    /// Sorts `population` so that the worst individual comes first and the
    /// best comes last: ascending fitness when maximizing, descending when
    /// minimizing. The sort is stable.
    pub fn rank<C>(&self, population: &mut [Individual<C>]) {
        population.sort_by(|a, b| self.rank_cmp(a.fitness_val, b.fitness_val));
    }
}

impl fmt::Display for Optim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Optim {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "min" => Ok(Optim::Min),
            "max" => Ok(Optim::Max),
            other => Err(GeneticError::Configuration(format!(
                "Unknown optimization direction \"{}\", expected \"min\" or \"max\"",
                other
            ))),
        }
    }
}

/// An elitism value as supplied by a caller.
///
/// Only `true`, `false`, `1` and `0` are accepted when the options are built.
/// Every other integer and every string is rejected; nothing is coerced by
/// truthiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElitismSetting {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl ElitismSetting {
    /// Resolves the setting into a flag.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error for any value other than a boolean, `0` or `1`.
    pub fn resolve(&self) -> Result<bool> {
        match self {
            ElitismSetting::Flag(flag) => Ok(*flag),
            ElitismSetting::Integer(0) => Ok(false),
            ElitismSetting::Integer(1) => Ok(true),
            ElitismSetting::Integer(other) => Err(GeneticError::Configuration(format!(
                "Elitism must be a boolean, 0 or 1, got {}",
                other
            ))),
            ElitismSetting::Text(text) => Err(GeneticError::Configuration(format!(
                "Elitism must be a boolean, 0 or 1, got \"{}\"",
                text
            ))),
        }
    }
}

impl From<bool> for ElitismSetting {
    fn from(value: bool) -> Self {
        ElitismSetting::Flag(value)
    }
}

impl From<i32> for ElitismSetting {
    fn from(value: i32) -> Self {
        ElitismSetting::Integer(i64::from(value))
    }
}

impl From<&str> for ElitismSetting {
    fn from(value: &str) -> Self {
        ElitismSetting::Text(value.to_string())
    }
}

impl From<String> for ElitismSetting {
    fn from(value: String) -> Self {
        ElitismSetting::Text(value)
    }
}

/// Validated engine configuration.
///
/// With the `serde` feature, deserialized values go through
/// `GaOptionsBuilder::build` and are rejected the same way.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGaOptions"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaOptions {
    optim: Optim,
    selection: SelectionKind,
    tournament_size: Option<usize>,
    mut_prob: f64,
    cross_prob: f64,
    mut_type: u32,
    cross_type: u32,
    elitism: bool,
}

impl GaOptions {
    pub const DEFAULT_MUT_PROB: f64 = 0.05;
    pub const DEFAULT_CROSS_PROB: f64 = 0.95;

    /// Returns a builder for creating a `GaOptions` instance.
    pub fn builder() -> GaOptionsBuilder {
        GaOptionsBuilder::default()
    }

    pub fn optim(&self) -> Optim {
        self.optim
    }

    pub fn selection(&self) -> SelectionKind {
        self.selection
    }

    /// The tournament size. Always present when the selection is
    /// `SelectionKind::Tournament`.
    pub fn tournament_size(&self) -> Option<usize> {
        self.tournament_size
    }

    pub fn mut_prob(&self) -> f64 {
        self.mut_prob
    }

    pub fn cross_prob(&self) -> f64 {
        self.cross_prob
    }

    pub fn mut_type(&self) -> u32 {
        self.mut_type
    }

    pub fn cross_type(&self) -> u32 {
        self.cross_type
    }

    pub fn elitism(&self) -> bool {
        self.elitism
    }
}

impl Default for GaOptions {
    fn default() -> Self {
        Self {
            optim: Optim::Max,
            selection: SelectionKind::Rank,
            tournament_size: None,
            mut_prob: Self::DEFAULT_MUT_PROB,
            cross_prob: Self::DEFAULT_CROSS_PROB,
            mut_type: 1,
            cross_type: 1,
            elitism: true,
        }
    }
}

/// Unchecked `GaOptions` fields as they appear in serialized form.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGaOptions {
    optim: Optim,
    selection: SelectionKind,
    tournament_size: Option<usize>,
    mut_prob: f64,
    cross_prob: f64,
    mut_type: u32,
    cross_type: u32,
    elitism: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGaOptions> for GaOptions {
    type Error = GeneticError;

    fn try_from(raw: RawGaOptions) -> Result<Self> {
        let mut builder = GaOptions::builder()
            .optim(raw.optim.as_str())
            .selection(raw.selection.as_str())
            .mut_prob(raw.mut_prob)
            .cross_prob(raw.cross_prob)
            .mut_type(i64::from(raw.mut_type))
            .cross_type(i64::from(raw.cross_type))
            .elitism(raw.elitism);

        if let Some(size) = raw.tournament_size {
            let size = i64::try_from(size).map_err(|_| {
                GeneticError::Configuration(format!("tournament_size {} is too large", size))
            })?;
            builder = builder.tournament_size(size);
        }

        builder.build()
    }
}

/// Builder for `GaOptions`.
///
/// Every setter stores the raw value; all checks happen in `build`, which
/// fails on the first invalid option.
#[derive(Debug, Clone, Default)]
pub struct GaOptionsBuilder {
    optim: Option<String>,
    selection: Option<String>,
    tournament_size: Option<i64>,
    mut_prob: Option<f64>,
    cross_prob: Option<f64>,
    mut_type: Option<i64>,
    cross_type: Option<i64>,
    elitism: Option<ElitismSetting>,
}

impl GaOptionsBuilder {
    /// Sets the optimization direction, `"min"` or `"max"`.
    pub fn optim(mut self, value: impl Into<String>) -> Self {
        self.optim = Some(value.into());
        self
    }

    /// Sets the selection strategy, `"rank"`, `"roulette"` or `"tournament"`.
    pub fn selection(mut self, value: impl Into<String>) -> Self {
        self.selection = Some(value.into());
        self
    }

    /// Sets the tournament size. Required for tournament selection and
    /// ignored by the other strategies.
    pub fn tournament_size(mut self, value: i64) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the mutation probability.
    pub fn mut_prob(mut self, value: f64) -> Self {
        self.mut_prob = Some(value);
        self
    }

    /// Sets the crossover probability.
    pub fn cross_prob(mut self, value: f64) -> Self {
        self.cross_prob = Some(value);
        self
    }

    /// Sets the mutation operator code.
    pub fn mut_type(mut self, value: i64) -> Self {
        self.mut_type = Some(value);
        self
    }

    /// Sets the crossover operator code.
    pub fn cross_type(mut self, value: i64) -> Self {
        self.cross_type = Some(value);
        self
    }

    /// Sets elitism from a boolean, `0`/`1`, or any other value (which `build` rejects).
    pub fn elitism(mut self, value: impl Into<ElitismSetting>) -> Self {
        self.elitism = Some(value.into());
        self
    }

    /// Validates the collected values and builds the `GaOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if any option is invalid.
    pub fn build(self) -> Result<GaOptions> {
        let defaults = GaOptions::default();

        let optim = match self.optim {
            Some(name) => name.parse::<Optim>()?,
            None => defaults.optim,
        };

        let selection = match self.selection {
            Some(name) => name.parse::<SelectionKind>()?,
            None => defaults.selection,
        };

        // The size only matters to tournament selection and is dropped otherwise.
        let tournament_size = match (selection, self.tournament_size) {
            (SelectionKind::Tournament, Some(size)) => {
                Some(positive_integer("tournament_size", size)? as usize)
            }
            (SelectionKind::Tournament, None) => {
                return Err(GeneticError::Configuration(
                    "Tournament selection requires a tournament size".to_string(),
                ))
            }
            _ => None,
        };

        let mut_prob = probability("mut_prob", self.mut_prob.unwrap_or(defaults.mut_prob))?;
        let cross_prob = probability(
            "cross_prob",
            self.cross_prob.unwrap_or(defaults.cross_prob),
        )?;

        let mut_type = match self.mut_type {
            Some(code) => positive_integer("mut_type", code)?,
            None => defaults.mut_type,
        };

        let cross_type = match self.cross_type {
            Some(code) => positive_integer("cross_type", code)?,
            None => defaults.cross_type,
        };

        let elitism = match self.elitism {
            Some(setting) => setting.resolve()?,
            None => defaults.elitism,
        };

        Ok(GaOptions {
            optim,
            selection,
            tournament_size,
            mut_prob,
            cross_prob,
            mut_type,
            cross_type,
            elitism,
        })
    }
}

fn probability(name: &str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Configuration(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )));
    }
    Ok(value)
}

fn positive_integer(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            GeneticError::Configuration(format!(
                "{} must be a positive integer, got {}",
                name, value
            ))
        })
}

/// Verbosity of the per-generation progress the drivers emit through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every individual of every generation at `debug`.
    Verbose,
    /// One `info` line per generation.
    Minimal,
    #[default]
    None,
}

/// Options for the drivers that run the engine for several generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    max_generation: usize,
    log_level: LogLevel,
}

impl LaunchOptions {
    pub fn new(max_generation: usize, log_level: LogLevel) -> Self {
        Self {
            max_generation,
            log_level,
        }
    }

    pub fn max_generation(&self) -> usize {
        self.max_generation
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the number of generations.
    pub fn set_max_generation(&mut self, max_generation: usize) {
        self.max_generation = max_generation;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self::new(100, LogLevel::None)
    }
}
