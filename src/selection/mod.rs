//! # Parent Selection
//!
//! Three interchangeable strategies pick two parents out of a ranked
//! population: rank-weighted, fitness-weighted (roulette) and tournament.
//! All of them rely on the population being ranked so that the best
//! individual sits at the highest index, whatever the optimization direction.
//!
//! Strategies return indices into the population slice; the engine
//! dereferences them.

pub mod rank;
pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

pub use rank::{compute_rank_wheel_sum, RankSelection};
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::ParentSelection;
pub use tournament::TournamentSelection;

/// The names a selection strategy can be configured with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Rank,
    Roulette,
    Tournament,
}

impl SelectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionKind::Rank => "rank",
            SelectionKind::Roulette => "roulette",
            SelectionKind::Tournament => "tournament",
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionKind {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rank" => Ok(SelectionKind::Rank),
            "roulette" => Ok(SelectionKind::Roulette),
            "tournament" => Ok(SelectionKind::Tournament),
            other => Err(GeneticError::Configuration(format!(
                "Unknown selection type \"{}\", expected \"rank\", \"roulette\" or \"tournament\"",
                other
            ))),
        }
    }
}

/// Checks that a wheel sum was supplied and is a positive, finite number.
pub(crate) fn require_wheel_sum(wheel_sum: Option<f64>) -> Result<f64> {
    match wheel_sum {
        Some(sum) if sum.is_finite() && sum > 0.0 => Ok(sum),
        Some(sum) => Err(GeneticError::InvalidArgument(format!(
            "Wheel sum must be positive, got {}",
            sum
        ))),
        None => Err(GeneticError::InvalidArgument(
            "Wheel sum is required for rank and roulette selection".to_string(),
        )),
    }
}

/// Draws a value in `[0, wheel_sum)` and returns the index of the first
/// weight whose running total exceeds it.
///
/// Weights are walked in population order, worst to best. If rounding leaves
/// the draw above the final total, the last index is returned.
pub(crate) fn spin_wheel<I>(weights: I, wheel_sum: f64, rng: &mut RandomNumberGenerator) -> Result<usize>
where
    I: IntoIterator<Item = f64>,
{
    let draw = rng.uniform(0.0, wheel_sum);
    let mut cumulative = 0.0;
    let mut last = None;

    for (i, weight) in weights.into_iter().enumerate() {
        cumulative += weight;
        if cumulative > draw {
            trace!(draw, index = i, "wheel stopped");
            return Ok(i);
        }
        last = Some(i);
    }

    last.ok_or(GeneticError::EmptyPopulation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_kind_round_trip() {
        for kind in [
            SelectionKind::Rank,
            SelectionKind::Roulette,
            SelectionKind::Tournament,
        ] {
            assert_eq!(kind.to_string().parse::<SelectionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_selection_kind_unknown() {
        let result = "unknown".parse::<SelectionKind>();
        assert!(matches!(result, Err(GeneticError::Configuration(_))));

        // Names are case sensitive.
        assert!("Rank".parse::<SelectionKind>().is_err());
    }

    #[test]
    fn test_require_wheel_sum() {
        assert_eq!(require_wheel_sum(Some(15.0)), Ok(15.0));

        for bad in [None, Some(0.0), Some(-1.0), Some(f64::NAN), Some(f64::INFINITY)] {
            assert!(matches!(
                require_wheel_sum(bad),
                Err(GeneticError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_spin_wheel_single_weight() {
        let mut rng = RandomNumberGenerator::from_seed(3);

        for _ in 0..20 {
            assert_eq!(spin_wheel([4.0], 4.0, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_spin_wheel_skips_zero_weights() {
        let mut rng = RandomNumberGenerator::from_seed(9);

        for _ in 0..50 {
            assert_eq!(spin_wheel([0.0, 0.0, 2.0, 0.0], 2.0, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_spin_wheel_overshoot_falls_back_to_last() {
        let mut rng = RandomNumberGenerator::from_seed(11);

        // The stated sum exceeds the real total, so some draws run off the end.
        for _ in 0..50 {
            let idx = spin_wheel([0.0, 0.0, 0.0], 100.0, &mut rng).unwrap();
            assert_eq!(idx, 2);
        }
    }

    #[test]
    fn test_spin_wheel_no_weights() {
        let mut rng = RandomNumberGenerator::new();

        let result = spin_wheel(std::iter::empty(), 1.0, &mut rng);
        assert_eq!(result, Err(GeneticError::EmptyPopulation));
    }
}
