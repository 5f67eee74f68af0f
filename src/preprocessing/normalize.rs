//! Z-score feature normalization

use crate::core::{Dataset, Result, SelectionError};
use serde::{Deserialize, Serialize};

/// Per-feature mean and population standard deviation
///
/// A zero standard deviation (constant feature) scales by 1, so the feature
/// is only centred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    pub mu: Vec<f64>,
    pub sigma: Vec<f64>,
}

impl NormalizationParams {
    /// Compute statistics from a training dataset
    pub fn fit(dataset: &Dataset) -> Result<Self> {
        let n = dataset.len() as f64;
        let m = dataset.dim();

        let mut mu = vec![0.0; m];
        for sample in dataset {
            for (acc, &x) in mu.iter_mut().zip(&sample.features) {
                *acc += x;
            }
        }
        mu.iter_mut().for_each(|v| *v /= n);

        let mut sigma = vec![0.0; m];
        for sample in dataset {
            for ((acc, &x), &mean) in sigma.iter_mut().zip(&sample.features).zip(&mu) {
                *acc += (x - mean).powi(2);
            }
        }
        sigma.iter_mut().for_each(|v| *v = (*v / n).sqrt());

        Ok(Self { mu, sigma })
    }

    /// Parameters that leave features untouched
    pub fn identity(dim: usize) -> Self {
        Self {
            mu: vec![0.0; dim],
            sigma: vec![1.0; dim],
        }
    }

    /// Number of features these parameters expect
    pub fn dim(&self) -> usize {
        self.mu.len()
    }

    /// Normalize one feature vector
    pub fn apply_features(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.dim() {
            return Err(SelectionError::InvalidArgument(format!(
                "expected {} features, got {}",
                self.dim(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mu.iter().zip(&self.sigma))
            .map(|(&x, (&mean, &std))| {
                let scale = if std == 0.0 { 1.0 } else { std };
                (x - mean) / scale
            })
            .collect())
    }

    /// Normalize every sample of a dataset
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        dataset.map_features(|x| self.apply_features(x))
    }
}

/// Fit on `dataset` and return it normalized along with the parameters
pub fn fit_transform(dataset: &Dataset) -> Result<(Dataset, NormalizationParams)> {
    let params = NormalizationParams::fit(dataset)?;
    let normalized = params.apply(dataset)?;
    Ok((normalized, params))
}
