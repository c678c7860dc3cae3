use std::marker::PhantomData;

use crate::{
    error::{GeneticError, Result},
    operators::GeneticOperators,
};

use super::{Challenge, GaOptions, StandardGa};

/// Builder for `StandardGa`.
///
/// A fitness function is mandatory; options default to `GaOptions::default()`.
pub struct StandardGaBuilder<C, F> {
    challenge: Option<F>,
    options: Option<GaOptions>,
    _marker: PhantomData<C>,
}

impl<C, F> StandardGaBuilder<C, F>
where
    C: Clone,
    F: Challenge<C>,
{
    pub fn new() -> Self {
        Self {
            challenge: None,
            options: None,
            _marker: PhantomData,
        }
    }

    pub fn with_challenge(mut self, challenge: F) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_options(mut self, options: GaOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if no fitness function was given.
    pub fn build(self) -> Result<StandardGa<C, F>> {
        let challenge = self.challenge.ok_or_else(|| {
            GeneticError::Configuration("Fitness function not specified".to_string())
        })?;

        Ok(StandardGa::new(challenge, self.options.unwrap_or_default()))
    }

    /// Builds the engine after letting `operators` narrow the accepted
    /// crossover and mutation codes.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if no fitness function was given, or
    /// whatever error the operators report for the configured codes.
    pub fn build_for<O>(self, operators: &O) -> Result<StandardGa<C, F>>
    where
        O: GeneticOperators<C>,
    {
        let options = self.options.clone().unwrap_or_default();
        operators.check_cross_type(options.cross_type())?;
        operators.check_mut_type(options.mut_type())?;

        self.build()
    }
}

impl<C, F> Default for StandardGaBuilder<C, F>
where
    C: Clone,
    F: Challenge<C>,
{
    fn default() -> Self {
        Self::new()
    }
}
