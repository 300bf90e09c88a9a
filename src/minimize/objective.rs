use crate::point::Point;
use dyn_clone::DynClone;

// Define a trait for the objective function
pub trait ObjFn: DynClone {
    fn call(&self, x: &Point) -> f64;
}
dyn_clone::clone_trait_object!(ObjFn);

impl<F> ObjFn for F
where
    F: Fn(&Point) -> f64 + Clone,
{
    fn call(&self, x: &Point) -> f64 {
        self(x)
    }
}

// Wrapper for closures written against plain coordinate slices
#[derive(Clone)]
pub struct MultiDimFn<F>(pub F)
where
    F: Fn(&[f64]) -> f64 + Clone;

impl<F> MultiDimFn<F>
where
    F: Fn(&[f64]) -> f64 + Clone,
{
    pub fn new(f: F) -> Self {
        MultiDimFn(f)
    }
}

impl<F> ObjFn for MultiDimFn<F>
where
    F: Fn(&[f64]) -> f64 + Clone,
{
    fn call(&self, x: &Point) -> f64 {
        (self.0)(&x.to_vec())
    }
}
