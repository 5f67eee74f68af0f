//! Model selection for Support Vector Machines
//!
//! Wraps an external SVM engine (anything implementing [`BaseLearner`]) with
//! z-score normalization, PCA reduction, k-fold cross-validation and an
//! exhaustive hyperparameter grid search.

pub mod api;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod persistence;
pub mod preprocessing;
pub mod search;

// Re-export main types for convenience
pub use crate::api::{ModelSelector, TrainingReport};
pub use crate::core::config::*;
pub use crate::core::error::*;
pub use crate::core::params::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::read_dataset;
pub use crate::evaluation::{EvaluationReport, Evaluator};
pub use crate::persistence::ModelArtifact;
pub use crate::preprocessing::{NormalizationParams, ReductionParams};
pub use crate::search::{GridSearch, GridSearchEntry, Progress};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
