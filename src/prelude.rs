//! downhill prelude.
//!
//! This module contains the most used types, traits and functions, which you
//! can import easily as a group.
//!
//! ```
//! use downhill::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::draw::{DEFAULT_CANVAS, outline};

#[doc(no_inline)]
pub use crate::error::MinimizerError;

#[doc(no_inline)]
pub use crate::file::{TraceWriter, read_trace, read_trace_file, write_simplex};

#[doc(no_inline)]
pub use crate::minimize::{
    Minimizer, MinimizerOptions, MinimizerResult, MultiDimFn, NelderMead, NelderMeadOptions,
    NelderMeadResult, ObjFn, Simplex, SimplexObserver, Step, StepCounts,
};

#[doc(no_inline)]
pub use crate::point::Point;
