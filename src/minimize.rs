use crate::error::MinimizerError;

pub mod nelder_mead;
pub mod objective;
pub mod simplex;

pub use self::nelder_mead::{
    NelderMead, NelderMeadOptions, NelderMeadResult, SimplexObserver, Step, StepCounts,
};
pub use self::objective::{MultiDimFn, ObjFn};
pub use self::simplex::Simplex;

pub trait Minimizer<T, U> {
    /// Run the optimization with the given options
    fn minimize(
        &mut self,
        opt: &dyn MinimizerOptions,
    ) -> Result<Box<dyn MinimizerResult<T, U>>, MinimizerError>;
}

pub trait MinimizerOptions {
    fn dimension(&self) -> usize;
    fn max_iterations(&self) -> usize;
    fn tolerance(&self) -> f64;
    fn verbosity(&self) -> usize;
}

pub trait MinimizerResult<T, U> {
    fn xmin(&self) -> T;
    fn fmin(&self) -> U;
    fn fn_evals(&self) -> usize;
    fn iters(&self) -> usize;
    fn converged(&self) -> bool;
    fn history(&self) -> Vec<U>;
}
