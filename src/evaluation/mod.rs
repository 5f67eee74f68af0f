//! Metric aggregation for classifiers and regressors
//!
//! Evaluators are pure functions of `(predicted, actual)` pairs. The
//! [`Evaluator`] enum picks the right one for a learner type.

pub mod classification;
pub mod regression;

pub use self::classification::{ClassReport, ClassificationReport};
pub use self::regression::RegressionReport;

use crate::core::{Predictor, Result, Sample, SelectionError, SvmType};
use serde::{Deserialize, Serialize};

/// Metrics produced by either evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationReport {
    Classification(ClassificationReport),
    Regression(RegressionReport),
}

impl EvaluationReport {
    /// Worst-class fscore, for classification reports
    pub fn fscore(&self) -> Option<f64> {
        match self {
            Self::Classification(r) => Some(r.fscore),
            Self::Regression(_) => None,
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        match self {
            Self::Classification(r) => Some(r.accuracy),
            Self::Regression(_) => None,
        }
    }

    /// Mean squared error, for regression reports
    pub fn mse(&self) -> Option<f64> {
        match self {
            Self::Classification(_) => None,
            Self::Regression(r) => Some(r.mse),
        }
    }

    /// Number of evaluated examples
    pub fn size(&self) -> usize {
        match self {
            Self::Classification(r) => r.size,
            Self::Regression(r) => r.size,
        }
    }

    pub fn as_classification(&self) -> Option<&ClassificationReport> {
        match self {
            Self::Classification(r) => Some(r),
            Self::Regression(_) => None,
        }
    }

    pub fn as_regression(&self) -> Option<&RegressionReport> {
        match self {
            Self::Classification(_) => None,
            Self::Regression(r) => Some(r),
        }
    }
}

/// Which metric family applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    Classification,
    Regression,
}

impl Evaluator {
    /// Default evaluator for a learner type
    pub fn for_svm_type(svm_type: SvmType) -> Self {
        if svm_type.is_classification() {
            Self::Classification
        } else {
            Self::Regression
        }
    }

    /// Compute metrics from `(predicted, actual)` pairs
    pub fn compute(self, predictions: &[(f64, f64)]) -> Result<EvaluationReport> {
        match self {
            Self::Classification => {
                classification::compute(predictions).map(EvaluationReport::Classification)
            }
            Self::Regression => regression::compute(predictions).map(EvaluationReport::Regression),
        }
    }

    /// Run a trained predictor over `samples` and compute metrics
    pub fn evaluate<P: Predictor + ?Sized>(
        self,
        predictor: &P,
        samples: &[Sample],
    ) -> Result<EvaluationReport> {
        self.compute(&predict_pairs(predictor, samples)?)
    }
}

/// `(predicted, actual)` for every sample
pub fn predict_pairs<P: Predictor + ?Sized>(
    predictor: &P,
    samples: &[Sample],
) -> Result<Vec<(f64, f64)>> {
    if samples.is_empty() {
        return Err(SelectionError::InvalidArgument(
            "test set cannot be empty".to_string(),
        ));
    }
    samples
        .iter()
        .map(|s| Ok((predictor.predict(&s.features)?, s.label)))
        .collect()
}
