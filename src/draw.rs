//! Geometry for drawing a two-dimensional simplex on a pixel canvas.
//!
//! The outline is produced by centring the points on their mean, shifting
//! them so every coordinate is non-negative and scaling the result to fit the
//! canvas. Only the first two axes are used.

use crate::{error::MinimizerError, minimize::Simplex, point::Point};
use ndarray::prelude::*;

/// Canvas size in pixels, `(width, height)`
pub const DEFAULT_CANVAS: (f64, f64) = (850.0, 850.0);

fn refs(points: &[Point]) -> Vec<&Point> {
    points.iter().collect()
}

fn check_planar(points: &[Point]) -> Result<(), MinimizerError> {
    match points.first() {
        None => Err(MinimizerError::EmptyInput),
        Some(p) if p.dims() < 2 => Err(MinimizerError::InvalidDimension),
        Some(_) => Ok(()),
    }
}

/// Shift `points` so that their mean sits at the origin
pub fn subtract_mean(points: &[Point]) -> Result<Vec<Point>, MinimizerError> {
    let offset = Point::centroid(&refs(points))?.scale(-1.0);
    points.iter().map(|p| Point::sum(&[p, &offset])).collect()
}

/// Shift `points` so that the smallest coordinate on every axis is zero
pub fn translate_to_positive(points: &[Point]) -> Result<Vec<Point>, MinimizerError> {
    let (first, rest) = points.split_first().ok_or(MinimizerError::EmptyInput)?;
    let mut mins: Array1<f64> = first.terms().clone();
    for p in rest {
        if p.dims() != first.dims() {
            return Err(MinimizerError::DimensionMismatch {
                expected: first.dims(),
                found: p.dims(),
            });
        }
        mins.zip_mut_with(p.terms(), |m, &t| *m = m.min(t));
    }
    let offset = Point::new(-mins)?;
    points.iter().map(|p| Point::sum(&[p, &offset])).collect()
}

fn span(vals: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    hi - lo
}

/// Width and height of the bounding box of the first two axes
pub fn extent(points: &[Point]) -> Result<(f64, f64), MinimizerError> {
    check_planar(points)?;
    let width = span(points.iter().map(|p| p[0]));
    let height = span(points.iter().map(|p| p[1]));
    Ok((width, height))
}

/// Pixels per unit so that a box of `extent` fits inside `canvas`
pub fn pixel_scale(extent: (f64, f64), canvas: (f64, f64)) -> Result<f64, MinimizerError> {
    let (width, height) = extent;
    let (canvas_w, canvas_h) = canvas;
    if !(canvas_w > 0.0 && canvas_h > 0.0) {
        return Err(MinimizerError::InvalidParameters(format!(
            "canvas must have positive size, got {}x{}",
            canvas_w, canvas_h
        )));
    }
    let scale = (canvas_w / width).min(canvas_h / height);
    if !scale.is_finite() {
        return Err(MinimizerError::InvalidParameters(
            "simplex has no extent to draw".to_string(),
        ));
    }
    Ok(scale)
}

/// Closed polyline of the simplex in pixel coordinates.
///
/// The first vertex is repeated at the end so consecutive pairs give every
/// edge of the outline.
pub fn outline(simplex: &Simplex, canvas: (f64, f64)) -> Result<Vec<(f64, f64)>, MinimizerError> {
    if !simplex.is_full() {
        return Err(MinimizerError::NotInitialized {
            filled: simplex.num_initialized(),
            capacity: simplex.capacity(),
        });
    }
    check_planar(simplex.points())?;

    let scale = pixel_scale(extent(simplex.points())?, canvas)?;
    let placed = translate_to_positive(&subtract_mean(simplex.points())?)?;

    let mut path: Vec<(f64, f64)> = placed.iter().map(|p| (p[0] * scale, p[1] * scale)).collect();
    if let Some(&start) = path.first() {
        path.push(start);
    }
    Ok(path)
}
