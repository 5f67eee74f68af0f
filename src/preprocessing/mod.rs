//! Feature preprocessing applied before the grid search
//!
//! Both transforms are fitted once on training data and then reused
//! unchanged for evaluation and prediction.

pub mod normalize;
pub mod reduce;

pub use self::normalize::{fit_transform, NormalizationParams};
pub use self::reduce::ReductionParams;
