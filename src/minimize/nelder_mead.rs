use crate::{
    error::MinimizerError,
    minimize::{Minimizer, MinimizerOptions, MinimizerResult, objective::ObjFn, simplex::Simplex},
    point::Point,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

/// Adjustment applied to the simplex in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Reflect,
    Expand,
    Contract,
    Shrink,
}

impl Step {
    pub fn to_str(&self) -> &'static str {
        match self {
            Step::Reflect => "Reflect",
            Step::Expand => "Expand",
            Step::Contract => "Contract",
            Step::Shrink => "Shrink",
        }
    }
}

/// Number of times each adjustment was applied during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub reflect: usize,
    pub expand: usize,
    pub contract: usize,
    pub shrink: usize,
}

impl StepCounts {
    fn record(&mut self, step: Step) {
        match step {
            Step::Reflect => self.reflect += 1,
            Step::Expand => self.expand += 1,
            Step::Contract => self.contract += 1,
            Step::Shrink => self.shrink += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.reflect + self.expand + self.contract + self.shrink
    }
}

/// Receives the simplex after initialization (`step` is `None`) and after
/// every iteration.
pub trait SimplexObserver {
    fn observe(&mut self, iteration: usize, simplex: &Simplex, step: Option<Step>);
}

impl<F> SimplexObserver for F
where
    F: FnMut(usize, &Simplex, Option<Step>),
{
    fn observe(&mut self, iteration: usize, simplex: &Simplex, step: Option<Step>) {
        self(iteration, simplex, step)
    }
}

/// Result of Nelder-Mead optimization
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub xmin: Point,
    pub fmin: f64,
    pub iters: usize,
    pub fn_evals: usize,
    pub converged: bool,
    pub history: Vec<f64>,
    pub steps: StepCounts,
    pub simplex: Simplex,
}

impl MinimizerResult<Point, f64> for NelderMeadResult {
    fn converged(&self) -> bool {
        self.converged
    }

    fn fmin(&self) -> f64 {
        self.fmin
    }

    fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn xmin(&self) -> Point {
        self.xmin.clone()
    }

    fn history(&self) -> Vec<f64> {
        self.history.clone()
    }
}

#[derive(Debug, Clone)]
pub struct NelderMeadOptions {
    dimension: usize,
    max_iterations: usize,
    tolerance: f64,    // Threshold on the spread of the evaluations
    lower: f64,        // Lower bound for random initial coordinates
    upper: f64,        // Upper bound (exclusive) for random initial coordinates
    gamma: f64,        // Expansion coefficient
    beta: f64,         // Contraction coefficient
    rho: f64,          // Shrink coefficient
    legacy_expand: bool,
    legacy_shrink: bool,
    seed: Option<u64>,
    verbosity: usize,
}

impl NelderMeadOptions {
    pub fn new(
        dimension: usize,
        max_iters: Option<usize>,
        tol: Option<f64>,
        bounds: Option<(f64, f64)>,
        gamma: Option<f64>,
        beta: Option<f64>,
        rho: Option<f64>,
        verbosity: Option<usize>,
    ) -> Self {
        let (lower, upper) = bounds.unwrap_or((0.0, 10.0));
        Self {
            dimension,
            max_iterations: max_iters.unwrap_or(200),
            tolerance: tol.unwrap_or(0.01),
            lower,
            upper,
            gamma: gamma.unwrap_or(2.0),
            beta: beta.unwrap_or(0.5),
            rho: rho.unwrap_or(0.5),
            legacy_expand: false,
            legacy_shrink: false,
            seed: None,
            verbosity: verbosity.unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), MinimizerError> {
        if self.dimension == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        if !(self.tolerance >= 0.0) {
            return Err(MinimizerError::InvalidParameters(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if !(self.lower < self.upper) || !(self.upper - self.lower).is_finite() {
            return Err(MinimizerError::InvalidParameters(format!(
                "sampling range [{}, {}) is empty or too wide",
                self.lower, self.upper
            )));
        }
        if !(self.gamma > 1.0) || !self.gamma.is_finite() {
            return Err(MinimizerError::InvalidParameters(format!(
                "expansion coefficient must exceed 1, got {}",
                self.gamma
            )));
        }
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(MinimizerError::InvalidParameters(format!(
                "contraction coefficient must lie in (0, 1), got {}",
                self.beta
            )));
        }
        if !(self.rho > 0.0 && self.rho < 1.0) {
            return Err(MinimizerError::InvalidParameters(format!(
                "shrink coefficient must lie in (0, 1), got {}",
                self.rho
            )));
        }
        Ok(())
    }

    pub fn set_dimension(&mut self, dimension: usize) {
        self.dimension = dimension;
    }

    pub fn set_max_iterations(&mut self, iters: usize) {
        self.max_iterations = iters;
    }

    pub fn set_tolerance(&mut self, tol: f64) {
        self.tolerance = tol;
    }

    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        self.lower = lower;
        self.upper = upper;
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
    }

    pub fn set_beta(&mut self, beta: f64) {
        self.beta = beta;
    }

    pub fn set_rho(&mut self, rho: f64) {
        self.rho = rho;
    }

    /// Keep the expanded point with the reflected evaluation when expansion
    /// does not beat reflection
    pub fn set_legacy_expand(&mut self, val: bool) {
        self.legacy_expand = val;
    }

    /// Shrink with `best + rho * (best - x)` instead of pulling toward the best
    pub fn set_legacy_shrink(&mut self, val: bool) {
        self.legacy_shrink = val;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn set_verbosity(&mut self, val: usize) {
        self.verbosity = val;
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        NelderMeadOptions::new(2, None, None, None, None, None, None, None)
    }
}

impl MinimizerOptions for NelderMeadOptions {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn verbosity(&self) -> usize {
        self.verbosity
    }
}

struct Silent;

impl SimplexObserver for Silent {
    fn observe(&mut self, _iteration: usize, _simplex: &Simplex, _step: Option<Step>) {}
}

/// Downhill simplex minimizer started from randomly sampled points.
pub struct NelderMead {
    f: Box<dyn ObjFn>,
    opt: NelderMeadOptions,
    rng: StdRng,
    fn_evals: usize,
    iters: usize,
}

impl NelderMead {
    pub fn new<F>(f: F) -> Self
    where
        F: ObjFn + 'static,
    {
        NelderMead {
            f: Box::new(f),
            opt: NelderMeadOptions::default(),
            rng: StdRng::from_os_rng(),
            fn_evals: 0,
            iters: 0,
        }
    }

    pub fn new_boxed(f: Box<dyn ObjFn>) -> Self {
        NelderMead {
            f,
            opt: NelderMeadOptions::default(),
            rng: StdRng::from_os_rng(),
            fn_evals: 0,
            iters: 0,
        }
    }

    pub fn with_options<F>(f: F, opt: NelderMeadOptions) -> Result<Self, MinimizerError>
    where
        F: ObjFn + 'static,
    {
        let mut nm = NelderMead::new(f);
        nm.set_options(opt)?;
        Ok(nm)
    }

    /// Replace the options; a seed in the options reseeds the random source
    pub fn set_options(&mut self, opt: NelderMeadOptions) -> Result<(), MinimizerError> {
        opt.validate()?;
        if let Some(seed) = opt.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.opt = opt;
        Ok(())
    }

    pub fn options(&self) -> &NelderMeadOptions {
        &self.opt
    }

    /// Use `rng` to sample the initial simplex
    pub fn set_rng(&mut self, rng: StdRng) {
        self.rng = rng;
    }

    pub fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    pub fn iterations(&self) -> usize {
        self.iters
    }

    fn name(&self) -> &str {
        "NelderMead"
    }

    pub fn calc_obj(&mut self, x: &Point) -> Result<f64, MinimizerError> {
        let value = self.f.call(x);
        self.fn_evals += 1;
        if value.is_nan() {
            return Err(MinimizerError::FunctionEvaluationError);
        }
        Ok(value)
    }

    /// Sample and evaluate `dimension + 1` random points
    pub fn initial_simplex(&mut self) -> Result<Simplex, MinimizerError> {
        let n = self.opt.dimension;
        let (lower, upper) = self.opt.bounds();
        let mut simplex = Simplex::new(n)?;
        for _ in 0..=n {
            let p = Point::random(n, lower, upper, &mut self.rng)?;
            let value = self.calc_obj(&p)?;
            trace!("initial point {} = {}", p, value);
            simplex.insert_during_fill(p, value)?;
        }
        Ok(simplex)
    }

    /// Apply one reflect / expand / contract / shrink adjustment to a full simplex
    pub fn step(&mut self, simplex: &mut Simplex) -> Result<Step, MinimizerError> {
        let n = simplex.dimension();
        let centroid = simplex.centroid_without_worst()?;
        let best = simplex.evaluations()[0];
        let worst = simplex.evaluations()[n];
        let worst_point = simplex.points()[n].clone();

        let reflected = Point::reflect(&centroid, &worst_point)?;
        let f_r = self.calc_obj(&reflected)?;

        if best <= f_r && f_r < worst {
            debug!("reflect: {} -> {}", worst, f_r);
            simplex.improve(reflected, f_r)?;
            return Ok(Step::Reflect);
        }

        if f_r < best {
            let expanded = Point::expand(&centroid, &reflected, self.opt.gamma)?;
            let f_e = self.calc_obj(&expanded)?;
            if f_e < f_r {
                debug!("expand: {} -> {}", worst, f_e);
                simplex.improve(expanded, f_e)?;
                return Ok(Step::Expand);
            }
            debug!("reflect past best: {} -> {}", worst, f_r);
            if self.opt.legacy_expand {
                simplex.improve(expanded, f_r)?;
            } else {
                simplex.improve(reflected, f_r)?;
            }
            return Ok(Step::Reflect);
        }

        let contracted = Point::contract_by(&centroid, &worst_point, self.opt.beta)?;
        let f_c = self.calc_obj(&contracted)?;
        if f_c < worst {
            debug!("contract: {} -> {}", worst, f_c);
            simplex.improve(contracted, f_c)?;
            return Ok(Step::Contract);
        }

        debug!("shrink toward {}", best);
        let best_point = simplex.points()[0].clone();
        for i in 1..=n {
            let x = &simplex.points()[i];
            let shrunk = if self.opt.legacy_shrink {
                Point::mirror_through(&best_point, x, self.opt.rho)?
            } else {
                Point::shrink_toward(&best_point, x, self.opt.rho)?
            };
            let value = self.calc_obj(&shrunk)?;
            simplex.replace_at(i, shrunk, value)?;
        }
        simplex.resort();
        Ok(Step::Shrink)
    }

    pub fn minimize_opt(&mut self) -> Result<NelderMeadResult, MinimizerError> {
        self.minimize_observed(&mut Silent)
    }

    /// Run to termination, reporting the simplex to `observer` along the way
    pub fn minimize_observed(
        &mut self,
        observer: &mut dyn SimplexObserver,
    ) -> Result<NelderMeadResult, MinimizerError> {
        self.opt.validate()?;
        self.iters = 0;
        self.fn_evals = 0;
        let mut history: Vec<f64> = vec![];
        let mut steps = StepCounts::default();

        let mut simplex = self.initial_simplex()?;
        observer.observe(0, &simplex, None);

        let converged = loop {
            let best = simplex.evaluations()[0];
            let spread = simplex.standard_deviation();
            history.push(best);
            if self.opt.verbosity > 1 {
                info!(
                    "iteration: {}\tcost: {}\tspread: {}",
                    self.iters, best, spread
                );
            }

            if spread < self.opt.tolerance {
                break true;
            }
            if self.iters >= self.opt.max_iterations {
                break false;
            }
            self.iters += 1;

            let step = self.step(&mut simplex)?;
            steps.record(step);
            if self.opt.verbosity > 1 {
                info!("{}", step.to_str());
            }
            observer.observe(self.iters, &simplex, Some(step));
        };

        let (xmin, fmin) = match simplex.best() {
            Some((p, f)) => (p.clone(), f),
            None => return Err(MinimizerError::InvalidDimension),
        };
        info!(
            "{} finished after {} iterations and {} evaluations ({}): cost {} at {}",
            self.name(),
            self.iters,
            self.fn_evals,
            if converged { "converged" } else { "iteration cap" },
            fmin,
            xmin
        );

        Ok(NelderMeadResult {
            xmin,
            fmin,
            iters: self.iters,
            fn_evals: self.fn_evals,
            converged,
            history,
            steps,
            simplex,
        })
    }
}

impl Minimizer<Point, f64> for NelderMead {
    fn minimize(
        &mut self,
        opt: &dyn MinimizerOptions,
    ) -> Result<Box<dyn MinimizerResult<Point, f64>>, MinimizerError> {
        let mut concrete_opt = self.opt.clone();
        concrete_opt.set_dimension(opt.dimension());
        concrete_opt.set_max_iterations(opt.max_iterations());
        concrete_opt.set_tolerance(opt.tolerance());
        concrete_opt.set_verbosity(opt.verbosity());
        self.set_options(concrete_opt)?;

        let result = self.minimize_opt()?;
        Ok(Box::new(result))
    }
}

#[cfg(test)]
mod minimize_neldermead_tests {
    use super::*;
    use crate::minimize::objective::MultiDimFn;
    use float_cmp::{F64Margin, approx_eq};

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-12,
        ulps: 10,
    };

    fn seeded(seed: u64, max_iters: usize, tol: f64) -> NelderMeadOptions {
        let mut opt = NelderMeadOptions::new(2, Some(max_iters), Some(tol), None, None, None, None, None);
        opt.set_seed(Some(seed));
        opt
    }

    fn pt(terms: &[f64]) -> Point {
        Point::from_vec(terms.to_vec()).unwrap()
    }

    fn fill<const D: usize>(values: &[([f64; D], f64)]) -> Simplex {
        let mut s = Simplex::new(D).unwrap();
        for (p, e) in values {
            s.insert_during_fill(pt(p), *e).unwrap();
        }
        s
    }

    #[test]
    fn test_default_options() {
        let opt = NelderMeadOptions::default();
        assert_eq!(opt.dimension(), 2);
        assert_eq!(opt.max_iterations(), 200);
        assert_eq!(opt.tolerance(), 0.01);
        assert_eq!(opt.bounds(), (0.0, 10.0));
        assert!(opt.validate().is_ok());
    }

    #[test]
    fn test_step_names() {
        fn names(steps: &[Step]) -> Vec<&'static str> {
            steps.iter().map(|s| s.to_str()).collect()
        }
        let steps = vec![Step::Reflect, Step::Expand, Step::Contract, Step::Shrink];
        let labels = names(&steps);
        drop(steps);
        assert_eq!(labels, vec!["Reflect", "Expand", "Contract", "Shrink"]);
    }

    #[test]
    fn test_invalid_options() {
        let mut opt = NelderMeadOptions::default();
        opt.set_bounds(5.0, 5.0);
        assert!(matches!(
            opt.validate(),
            Err(MinimizerError::InvalidParameters(_))
        ));

        let mut opt = NelderMeadOptions::default();
        opt.set_beta(1.5);
        assert!(opt.validate().is_err());

        let mut opt = NelderMeadOptions::default();
        opt.set_tolerance(f64::NAN);
        assert!(opt.validate().is_err());

        let mut opt = NelderMeadOptions::default();
        opt.set_bounds(-1e308, 1e308);
        opt.set_seed(Some(1));
        assert!(matches!(
            opt.validate(),
            Err(MinimizerError::InvalidParameters(_))
        ));
        let mut nm = NelderMead::new(|p: &Point| p[0] * p[0] + p[1] * p[1]);
        assert!(nm.set_options(opt).is_err());
        assert!(nm.minimize_opt().is_ok());

        let mut opt = NelderMeadOptions::default();
        opt.set_dimension(0);
        assert!(matches!(
            NelderMead::with_options(|p: &Point| p[0], opt),
            Err(MinimizerError::InvalidDimension)
        ));
    }

    #[test]
    fn test_initial_simplex() {
        let mut nm = NelderMead::with_options(|p: &Point| p[0] + p[1], seeded(1, 10, 0.01)).unwrap();
        let s = nm.initial_simplex().unwrap();
        assert!(s.is_full());
        assert_eq!(s.len(), 3);
        assert_eq!(nm.fn_evals(), 3);
        assert!(s.evaluations().windows(2).all(|w| w[0] <= w[1]));
        for (p, e) in s.points().iter().zip(s.evaluations()) {
            assert!(p.terms().iter().all(|&t| (0.0..10.0).contains(&t)));
            assert_eq!(p[0] + p[1], *e);
        }
    }

    #[test]
    fn test_step_reflect() {
        // Centroid of the two best points is (1, 0); reflecting (1, 2) gives (1, -2)
        let mut s = fill(&[([0.0, 0.0], 0.0), ([2.0, 0.0], 2.0), ([1.0, 2.0], 10.0)]);
        let mut nm = NelderMead::new(|p: &Point| p[0].abs() + p[1].abs());
        let step = nm.step(&mut s).unwrap();
        assert_eq!(step, Step::Reflect);
        assert_eq!(s.evaluations(), &[0.0, 2.0, 3.0]);
        assert_eq!(s.points()[2], pt(&[1.0, -2.0]));
        assert_eq!(nm.fn_evals(), 1);
    }

    #[test]
    fn test_step_expand() {
        // f decreases along x; reflected (6, 0) beats the best, expanded (10, 0) beats that
        let mut s = fill(&[([2.0, 1.0], 8.0), ([2.0, -1.0], 8.0), ([-2.0, 0.0], 12.0)]);
        let mut nm = NelderMead::new(|p: &Point| 10.0 - p[0]);
        let step = nm.step(&mut s).unwrap();
        assert_eq!(step, Step::Expand);
        assert_eq!(s.points()[0], pt(&[10.0, 0.0]));
        assert_eq!(s.evaluations(), &[0.0, 8.0, 8.0]);
        assert_eq!(nm.fn_evals(), 2);
    }

    #[test]
    fn test_step_expand_rejected() {
        // Minimum at x = 3: reflected (3, 0) is best, expanded (5, 0) is worse
        let f = |p: &Point| (p[0] - 3.0).abs() + p[1].abs();
        let start = [([1.0, 1.0], 3.0), ([1.0, -1.0], 3.0), ([-1.0, 0.0], 4.0)];

        let mut s = fill(&start);
        let mut nm = NelderMead::new(f);
        assert_eq!(nm.step(&mut s).unwrap(), Step::Reflect);
        assert_eq!(s.points()[0], pt(&[3.0, 0.0]));
        assert_eq!(s.evaluations()[0], 0.0);

        let mut s = fill(&start);
        let mut opt = NelderMeadOptions::default();
        opt.set_legacy_expand(true);
        let mut nm = NelderMead::with_options(f, opt).unwrap();
        assert_eq!(nm.step(&mut s).unwrap(), Step::Reflect);
        assert_eq!(s.points()[0], pt(&[5.0, 0.0]));
        assert_eq!(s.evaluations()[0], 0.0);
    }

    #[test]
    fn test_step_contract() {
        // Reflected (1, -3) is worse than the worst; contracted (1, 1.5) is not
        let f = |p: &Point| (p[0] - 1.0).powi(2) + (p[1] - 1.0).powi(2);
        let mut s = fill(&[([0.0, 0.0], 2.0), ([2.0, 0.0], 2.0), ([1.0, 3.0], 4.0)]);
        let mut nm = NelderMead::new(f);
        let step = nm.step(&mut s).unwrap();
        assert_eq!(step, Step::Contract);
        assert_eq!(s.points()[0], pt(&[1.0, 1.5]));
        assert_eq!(s.evaluations(), &[0.25, 2.0, 2.0]);
        assert_eq!(nm.fn_evals(), 2);
    }

    // Flat ridge above y = 0.5 and a wall below y = -0.5
    fn ridge(p: &Point) -> f64 {
        if p[1] < -0.5 {
            1000.0
        } else if p[1] > 0.5 {
            100.0
        } else {
            p[0].abs()
        }
    }

    #[test]
    fn test_step_shrink() {
        let mut s = fill(&[([0.0, 0.0], 0.0), ([4.0, 0.0], 4.0), ([2.0, 2.0], 100.0)]);
        let mut nm = NelderMead::new(ridge);
        let step = nm.step(&mut s).unwrap();
        assert_eq!(step, Step::Shrink);
        assert_eq!(s.points(), &[pt(&[0.0, 0.0]), pt(&[2.0, 0.0]), pt(&[1.0, 1.0])]);
        assert_eq!(s.evaluations(), &[0.0, 2.0, 100.0]);
        // reflect, contract and two shrink evaluations
        assert_eq!(nm.fn_evals(), 4);
    }

    #[test]
    fn test_step_legacy_shrink() {
        let mut s = fill(&[([0.0, 0.0], 0.0), ([4.0, 0.0], 4.0), ([2.0, 2.0], 100.0)]);
        let mut opt = NelderMeadOptions::default();
        opt.set_legacy_shrink(true);
        let mut nm = NelderMead::with_options(ridge, opt).unwrap();
        assert_eq!(nm.step(&mut s).unwrap(), Step::Shrink);
        assert_eq!(s.points(), &[pt(&[0.0, 0.0]), pt(&[-2.0, 0.0]), pt(&[-1.0, -1.0])]);
        assert_eq!(s.evaluations(), &[0.0, 2.0, 1000.0]);
    }

    #[test]
    fn test_unbounded_objective() {
        let mut nm = NelderMead::with_options(|p: &Point| 10.0 - p[0], seeded(3, 25, 0.0)).unwrap();
        let mut best_seen: Vec<f64> = vec![];
        let mut observer = |_: usize, s: &Simplex, _: Option<Step>| best_seen.push(s.evaluations()[0]);
        let result = nm.minimize_observed(&mut observer).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iters, 25);
        assert_eq!(result.steps.total(), 25);
        assert_eq!(best_seen.len(), 26);
        assert!(best_seen.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.fmin < best_seen[0]);
    }

    #[test]
    fn test_2d_quadratic() {
        // f(x,y) = (x-4)² + (y-3)², minimum at (4,3)
        let func = |x: &[f64]| (x[0] - 4.0).powi(2) + (x[1] - 3.0).powi(2);
        let mut nm = NelderMead::with_options(MultiDimFn::new(func), seeded(11, 2000, 1e-10)).unwrap();
        let result = nm.minimize_opt().unwrap();

        assert!(result.converged);
        assert!((result.xmin[0] - 4.0).abs() < 1e-3);
        assert!((result.xmin[1] - 3.0).abs() < 1e-3);
        assert!(result.fmin < 1e-6);
        assert_eq!(result.fmin, result.simplex.evaluations()[0]);
        assert_eq!(result.fn_evals, nm.fn_evals());
    }

    #[test]
    fn test_3d_sphere() {
        let mut opt = seeded(5, 2000, 1e-12);
        opt.set_dimension(3);
        opt.set_bounds(-5.0, 5.0);
        let mut nm = NelderMead::with_options(
            MultiDimFn::new(|x: &[f64]| x.iter().map(|v| v * v).sum()),
            opt,
        )
        .unwrap();
        let result = nm.minimize_opt().unwrap();
        assert!(result.converged);
        assert_eq!(result.xmin.dims(), 3);
        assert!(result.fmin < 1e-6);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let f = |p: &Point| (p[0] - 1.0).powi(2) + 2.0 * (p[1] + 0.5).powi(2);
        let a = NelderMead::with_options(f, seeded(42, 50, 1e-8))
            .unwrap()
            .minimize_opt()
            .unwrap();
        let b = NelderMead::with_options(f, seeded(42, 50, 1e-8))
            .unwrap()
            .minimize_opt()
            .unwrap();
        assert_eq!(a.simplex, b.simplex);
        assert_eq!(a.history, b.history);
        assert!(approx_eq!(f64, a.fmin, b.fmin, MARGIN));
    }

    #[test]
    fn test_zero_iterations() {
        let mut nm = NelderMead::with_options(|p: &Point| p[0], seeded(9, 0, 0.0)).unwrap();
        let result = nm.minimize_opt().unwrap();
        assert_eq!(result.iters, 0);
        assert_eq!(result.fn_evals, 3);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_nan_objective() {
        let mut nm = NelderMead::with_options(|_: &Point| f64::NAN, seeded(9, 10, 0.01)).unwrap();
        assert!(matches!(
            nm.minimize_opt(),
            Err(MinimizerError::FunctionEvaluationError)
        ));
    }

    #[test]
    fn test_minimizer_trait() {
        let mut nm = NelderMead::new(|p: &Point| (p[0] - 2.0).powi(2) + (p[1] - 2.0).powi(2));
        nm.set_rng(StdRng::seed_from_u64(8));
        let opt = NelderMeadOptions::new(2, Some(2000), Some(1e-9), None, None, None, None, None);
        let result = nm.minimize(&opt).unwrap();
        assert!(result.converged());
        assert!(result.fmin() < 1e-6);
        assert_eq!(result.xmin().dims(), 2);
        assert_eq!(result.history().len(), result.iters() + 1);
    }
}
