//! Variance-retaining PCA projection
//!
//! The empirical covariance `C = XᵗX / n` of the (already normalized) feature
//! matrix is decomposed with an SVD. The first `k` left singular vectors form
//! the projection, where `k` is the smallest count whose singular values keep
//! at least the requested share of the total.

use crate::core::{Dataset, Result, SelectionError};
use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Singular values below `largest * RELATIVE_TOLERANCE` count as zero
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Projection matrix and the variance share it keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionParams {
    /// `m x k` projection, row-major
    pub u: Vec<Vec<f64>>,
    /// Fraction of the total variance kept by the `k` retained directions
    pub retained_variance: f64,
}

impl ReductionParams {
    /// Compute the projection keeping at least `min_retained_variance`
    pub fn fit(dataset: &Dataset, min_retained_variance: f64) -> Result<Self> {
        if !(min_retained_variance > 0.0 && min_retained_variance <= 1.0) {
            return Err(SelectionError::InvalidArgument(format!(
                "retained variance must be in (0, 1], got: {min_retained_variance}"
            )));
        }

        let n = dataset.len();
        let m = dataset.dim();
        let x = DMatrix::from_row_iterator(
            n,
            m,
            dataset.iter().flat_map(|s| s.features.iter().copied()),
        );
        let covariance = (x.transpose() * &x) / n as f64;

        let svd = covariance.svd(true, false);
        let u_full = svd.u.ok_or_else(|| {
            SelectionError::InvalidArgument("SVD did not produce left singular vectors".to_string())
        })?;

        // nalgebra does not promise any ordering of the singular values
        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| {
            svd.singular_values[b]
                .partial_cmp(&svd.singular_values[a])
                .unwrap_or(Ordering::Equal)
        });

        let largest = svd.singular_values[order[0]];
        let values: Vec<f64> = order
            .iter()
            .map(|&i| svd.singular_values[i])
            .map(|s| if s <= largest * RELATIVE_TOLERANCE { 0.0 } else { s })
            .collect();

        let (k, retained_variance) = choose_components(&values, min_retained_variance);
        debug!(
            "PCA keeps {k} of {m} directions ({:.4} of the variance)",
            retained_variance
        );

        let u = (0..m)
            .map(|row| (0..k).map(|col| u_full[(row, order[col])]).collect())
            .collect();

        Ok(Self {
            u,
            retained_variance,
        })
    }

    /// Projection that keeps every feature as is
    pub fn identity(dim: usize) -> Self {
        let u = (0..dim)
            .map(|i| (0..dim).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self {
            u,
            retained_variance: 1.0,
        }
    }

    /// Number of input features (m)
    pub fn input_dim(&self) -> usize {
        self.u.len()
    }

    /// Number of retained directions (k)
    pub fn output_dim(&self) -> usize {
        self.u.first().map_or(0, Vec::len)
    }

    /// Project one feature vector: `x · U`
    pub fn apply_features(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.input_dim() {
            return Err(SelectionError::InvalidArgument(format!(
                "expected {} features, got {}",
                self.input_dim(),
                features.len()
            )));
        }

        let mut reduced = vec![0.0; self.output_dim()];
        for (&x, row) in features.iter().zip(&self.u) {
            for (acc, &w) in reduced.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        Ok(reduced)
    }

    /// Project every sample of a dataset
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        dataset.map_features(|x| self.apply_features(x))
    }
}

/// Smallest `k` whose leading values reach `threshold` of the total
///
/// `values` must be sorted in descending order. Starting from all of them, `k`
/// shrinks while dropping one more direction still meets the threshold.
fn choose_components(values: &[f64], threshold: f64) -> (usize, f64) {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return (1, 1.0);
    }

    let prefix: Vec<f64> = values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect();

    let mut k = values.len();
    let mut retained = prefix[k - 1] / total;
    while k > 1 {
        let ratio = prefix[k - 2] / total;
        if ratio < threshold {
            break;
        }
        k -= 1;
        retained = ratio;
    }
    (k, retained)
}
