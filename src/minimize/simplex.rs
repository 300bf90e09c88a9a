use crate::{error::MinimizerError, point::Point};
use std::fmt;

/// A set of `dimension + 1` points kept sorted by evaluation, best first.
///
/// The simplex is filled one point at a time with
/// [`insert_during_fill`](Simplex::insert_during_fill) and afterwards only
/// changes through [`improve`](Simplex::improve), which swaps the worst entry
/// for a better one without breaking the ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    dimension: usize,
    points: Vec<Point>,
    evaluations: Vec<f64>,
    num_initialized: usize,
}

impl Simplex {
    pub fn new(dimension: usize) -> Result<Self, MinimizerError> {
        if dimension == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        Ok(Simplex {
            dimension,
            points: Vec::with_capacity(dimension + 1),
            evaluations: Vec::with_capacity(dimension + 1),
            num_initialized: 0,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points a full simplex holds
    pub fn capacity(&self) -> usize {
        self.dimension + 1
    }

    pub fn num_initialized(&self) -> usize {
        self.num_initialized
    }

    pub fn is_full(&self) -> bool {
        self.num_initialized == self.capacity()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn evaluations(&self) -> &[f64] {
        &self.evaluations
    }

    pub fn best(&self) -> Option<(&Point, f64)> {
        self.points.first().map(|p| (p, self.evaluations[0]))
    }

    pub fn worst(&self) -> Option<(&Point, f64)> {
        self.points
            .last()
            .map(|p| (p, self.evaluations[self.evaluations.len() - 1]))
    }

    fn check_point(&self, point: &Point) -> Result<(), MinimizerError> {
        if point.dims() != self.dimension {
            return Err(MinimizerError::DimensionMismatch {
                expected: self.dimension,
                found: point.dims(),
            });
        }
        Ok(())
    }

    /// Insert a point while the simplex is still being filled.
    ///
    /// The point goes after every entry whose evaluation is less than or equal
    /// to `evaluation`. Once `dimension + 1` points are held further calls fail
    /// with [`MinimizerError::FillOverflow`]. A NaN evaluation is rejected with
    /// [`MinimizerError::FunctionEvaluationError`].
    pub fn insert_during_fill(&mut self, point: Point, evaluation: f64) -> Result<(), MinimizerError> {
        if self.is_full() {
            return Err(MinimizerError::FillOverflow {
                capacity: self.capacity(),
            });
        }
        self.check_point(&point)?;
        if evaluation.is_nan() {
            return Err(MinimizerError::FunctionEvaluationError);
        }

        let i = self.evaluations.partition_point(|&e| e <= evaluation);
        self.points.insert(i, point);
        self.evaluations.insert(i, evaluation);
        self.num_initialized += 1;
        Ok(())
    }

    /// Replace the worst entry with a better one, keeping the order.
    ///
    /// Fails with [`MinimizerError::NonImprovingValue`] unless `evaluation` is
    /// strictly less than the current worst evaluation; the simplex is left
    /// untouched in that case.
    pub fn improve(&mut self, point: Point, evaluation: f64) -> Result<(), MinimizerError> {
        if !self.is_full() {
            return Err(MinimizerError::NotInitialized {
                filled: self.num_initialized,
                capacity: self.capacity(),
            });
        }
        self.check_point(&point)?;

        let worst = self.evaluations[self.dimension];
        let i = self.evaluations.partition_point(|&e| e <= evaluation);
        if i > self.dimension || evaluation.is_nan() {
            return Err(MinimizerError::NonImprovingValue {
                value: evaluation,
                worst,
            });
        }

        // The worst entry falls off the end
        self.points.pop();
        self.evaluations.pop();
        self.points.insert(i, point);
        self.evaluations.insert(i, evaluation);
        Ok(())
    }

    /// Overwrite the entry at `index` without restoring the order.
    ///
    /// Callers must follow up with [`resort`](Simplex::resort).
    pub(crate) fn replace_at(
        &mut self,
        index: usize,
        point: Point,
        evaluation: f64,
    ) -> Result<(), MinimizerError> {
        self.check_point(&point)?;
        if index >= self.points.len() {
            return Err(MinimizerError::InvalidParameters(format!(
                "index {} outside simplex of {} points",
                index,
                self.points.len()
            )));
        }
        self.points[index] = point;
        self.evaluations[index] = evaluation;
        Ok(())
    }

    /// Stable sort of the entries by evaluation, best first
    pub fn resort(&mut self) {
        let mut order: Vec<usize> = (0..self.evaluations.len()).collect();
        order.sort_by(|&a, &b| self.evaluations[a].total_cmp(&self.evaluations[b]));

        let points = order.iter().map(|&i| self.points[i].clone()).collect();
        let evaluations = order.iter().map(|&i| self.evaluations[i]).collect();
        self.points = points;
        self.evaluations = evaluations;
    }

    /// Representative objective value: the best evaluation held
    pub fn cost(&self) -> Option<f64> {
        self.evaluations.first().copied()
    }

    /// Sum of every evaluation held
    pub fn evaluation_sum(&self) -> f64 {
        self.evaluations.iter().sum()
    }

    /// Population standard deviation of the evaluations
    pub fn standard_deviation(&self) -> f64 {
        let n = self.evaluations.len();
        if n == 0 {
            return 0.0;
        }
        let mean = self.evaluations.iter().sum::<f64>() / n as f64;
        let var = self
            .evaluations
            .iter()
            .map(|e| (e - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        var.sqrt()
    }

    /// Centroid of every point except the worst one
    pub fn centroid_without_worst(&self) -> Result<Point, MinimizerError> {
        if !self.is_full() {
            return Err(MinimizerError::NotInitialized {
                filled: self.num_initialized,
                capacity: self.capacity(),
            });
        }
        let rest: Vec<&Point> = self.points[..self.dimension].iter().collect();
        Point::centroid(&rest)
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (p, e)) in self.points.iter().zip(self.evaluations.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}] = {}", p, e)?;
        }
        write!(f, "}}")
    }
}
