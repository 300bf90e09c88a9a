//! Downhill simplex (Nelder-Mead) minimization.
//!
//! A [`Simplex`](minimize::Simplex) keeps `dimension + 1` points ordered by
//! their evaluation and [`NelderMead`](minimize::NelderMead) reshapes it by
//! reflection, expansion, contraction and shrinking until the evaluations
//! agree or the iteration cap is reached.
//!
//! ```
//! use downhill::prelude::*;
//!
//! let mut opt = NelderMeadOptions::default();
//! opt.set_seed(Some(1));
//! opt.set_max_iterations(500);
//! opt.set_tolerance(1e-9);
//!
//! let f = |p: &Point| (p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2);
//! let mut nm = NelderMead::with_options(f, opt).unwrap();
//! let result = nm.minimize_opt().unwrap();
//! assert!(result.fmin < 1e-4);
//! ```
pub mod draw;
pub mod error;
pub mod file;
pub mod minimize;
pub mod point;
pub mod prelude;

/// Create a **[`Point`](point::Point)** from its coordinates.
///
/// ```
/// use downhill::point;
/// let p = point![1.0, 2.0];
///
/// assert_eq!(p.dims(), 2);
/// assert_eq!(p[1], 2.0);
/// ```
///
/// Panics when no coordinates are given.
#[macro_export]
macro_rules! point {
    ($($x:expr),+ $(,)*) => {{
        $crate::point::Point::from_vec(vec![$($x),+]).expect("a point needs at least one coordinate")
    }};
}
