/// The fitness function of an optimization problem.
///
/// Any closure `Fn(&C) -> f64` is a `Challenge<C>`.
///
/// ```
/// use genepool::evolution::Challenge;
///
/// let sine = |x: &f64| x.sin();
/// assert_eq!(sine.score(&0.0), 0.0);
/// ```
pub trait Challenge<C> {
    fn score(&self, chromosome: &C) -> f64;
}

impl<C, F> Challenge<C> for F
where
    F: Fn(&C) -> f64,
{
    fn score(&self, chromosome: &C) -> f64 {
        self(chromosome)
    }
}
