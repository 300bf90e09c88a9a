use crate::error::MinimizerError;
use ndarray::prelude::*;
use rand::Rng;
use std::fmt;
use std::ops::Index;

/// Default contraction coefficient used by [`Point::contract`]
pub const CONTRACT_COEFF: f64 = 0.5;

/// A fixed-dimension point in the search space.
///
/// Every arithmetic operation borrows its operands and allocates a new point,
/// so points held by a simplex are never changed behind its back.
#[derive(Debug, Clone, PartialEq)]
pub struct Point(Array1<f64>);

impl Point {
    /// Create a point from its coordinates
    pub fn new(terms: Array1<f64>) -> Result<Self, MinimizerError> {
        if terms.is_empty() {
            return Err(MinimizerError::InvalidDimension);
        }
        Ok(Point(terms))
    }

    pub fn from_vec(terms: Vec<f64>) -> Result<Self, MinimizerError> {
        Point::new(Array1::from_vec(terms))
    }

    pub fn zeros(dims: usize) -> Result<Self, MinimizerError> {
        Point::new(Array1::zeros(dims))
    }

    /// Create a point whose coordinates are drawn uniformly from `[lower, upper)`
    pub fn random<R: Rng>(
        dims: usize,
        lower: f64,
        upper: f64,
        rng: &mut R,
    ) -> Result<Self, MinimizerError> {
        if !(lower < upper) || !(upper - lower).is_finite() {
            return Err(MinimizerError::InvalidParameters(format!(
                "sampling range [{}, {}) is empty or too wide",
                lower, upper
            )));
        }
        Point::new(Array1::from_shape_fn(dims, |_| {
            rng.random_range(lower..upper)
        }))
    }

    /// Number of coordinates
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    pub fn terms(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.0
    }

    fn check_dims(&self, other: &Point) -> Result<(), MinimizerError> {
        if self.dims() != other.dims() {
            return Err(MinimizerError::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        Ok(())
    }

    /// Element-wise multiplication by `scalar`
    pub fn scale(&self, scalar: f64) -> Point {
        Point(&self.0 * scalar)
    }

    /// Element-wise sum of one or more points of the same dimension
    pub fn sum(points: &[&Point]) -> Result<Point, MinimizerError> {
        let (first, rest) = points.split_first().ok_or(MinimizerError::EmptyInput)?;
        let mut acc = first.0.clone();
        for p in rest {
            first.check_dims(p)?;
            acc += &p.0;
        }
        Ok(Point(acc))
    }

    /// Arithmetic mean of the given points
    pub fn centroid(points: &[&Point]) -> Result<Point, MinimizerError> {
        let sum = Point::sum(points)?;
        Ok(sum.scale(1.0 / points.len() as f64))
    }

    /// Reflect `point` through `center` with a coefficient of one
    pub fn reflect(center: &Point, point: &Point) -> Result<Point, MinimizerError> {
        Point::sum(&[&center.scale(2.0), &point.scale(-1.0)])
    }

    /// Move `point` halfway toward `center`
    pub fn contract(center: &Point, point: &Point) -> Result<Point, MinimizerError> {
        Point::contract_by(center, point, CONTRACT_COEFF)
    }

    /// `center + coeff * (point - center)`
    pub fn contract_by(center: &Point, point: &Point, coeff: f64) -> Result<Point, MinimizerError> {
        let offset = Point::sum(&[point, &center.scale(-1.0)])?;
        Point::sum(&[center, &offset.scale(coeff)])
    }

    /// `center + coeff * (point - center)` for a coefficient larger than one
    pub fn expand(center: &Point, point: &Point, coeff: f64) -> Result<Point, MinimizerError> {
        Point::contract_by(center, point, coeff)
    }

    /// Pull `point` toward `best` by `coeff`
    pub fn shrink_toward(best: &Point, point: &Point, coeff: f64) -> Result<Point, MinimizerError> {
        Point::contract_by(best, point, coeff)
    }

    /// `best + coeff * (best - point)`, which pushes `point` through `best`
    pub fn mirror_through(best: &Point, point: &Point, coeff: f64) -> Result<Point, MinimizerError> {
        let offset = Point::sum(&[best, &point.scale(-1.0)])?;
        Point::sum(&[best, &offset.scale(coeff)])
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = MinimizerError;

    fn try_from(terms: Vec<f64>) -> Result<Self, Self::Error> {
        Point::from_vec(terms)
    }
}

impl TryFrom<Array1<f64>> for Point {
    type Error = MinimizerError;

    fn try_from(terms: Array1<f64>) -> Result<Self, Self::Error> {
        Point::new(terms)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms: Vec<String> = self.0.iter().map(|t| format!("{:.6}", t)).collect();
        write!(f, "{}", terms.join(","))
    }
}
