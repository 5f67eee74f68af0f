//! Regression error statistics

use crate::core::{Result, SelectionError};
use serde::{Deserialize, Serialize};

/// Statistics of `predicted - actual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Mean squared error
    pub mse: f64,
    /// Population standard deviation of the error
    pub std: f64,
    /// Mean error (bias)
    pub mean: f64,
    pub size: usize,
}

/// Compute the report from `(predicted, actual)` pairs
pub fn compute(predictions: &[(f64, f64)]) -> Result<RegressionReport> {
    if predictions.is_empty() {
        return Err(SelectionError::InvalidArgument(
            "cannot evaluate an empty set of predictions".to_string(),
        ));
    }

    let n = predictions.len() as f64;
    let errors: Vec<f64> = predictions.iter().map(|(p, a)| p - a).collect();
    let mean = errors.iter().sum::<f64>() / n;
    let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;
    let variance = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;

    Ok(RegressionReport {
        mse,
        std: variance.sqrt(),
        mean,
        size: predictions.len(),
    })
}
