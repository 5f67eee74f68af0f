//! Core type definitions for the model-selection pipeline

use crate::core::{Result, SelectionError};
use serde::{Deserialize, Serialize};

/// Labelled example with a dense feature vector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature vector
    pub features: Vec<f64>,
    /// Class label or regression target
    pub label: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label }
    }

    /// Number of features
    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

impl From<(Vec<f64>, f64)> for Sample {
    fn from((features, label): (Vec<f64>, f64)) -> Self {
        Self::new(features, label)
    }
}

/// Non-empty collection of samples sharing the same feature length
///
/// The invariants (at least one sample, at least one feature, identical
/// feature lengths) are checked once by [`Dataset::new`], so every consumer
/// can rely on them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    samples: Vec<Sample>,
    dimensions: usize,
}

impl Dataset {
    /// Build a dataset, validating its shape
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        let first = samples
            .first()
            .ok_or_else(|| SelectionError::InvalidArgument("dataset cannot be empty".to_string()))?;

        let dimensions = first.dim();
        if dimensions == 0 {
            return Err(SelectionError::InvalidArgument(
                "number of features must be greater than 0".to_string(),
            ));
        }

        if let Some((i, bad)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.dim() != dimensions)
        {
            return Err(SelectionError::InvalidArgument(format!(
                "sample {i} has {} features, expected {dimensions}",
                bad.dim()
            )));
        }

        Ok(Self {
            samples,
            dimensions,
        })
    }

    /// Build a dataset from `(features, label)` pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vec<f64>, f64)>,
    {
        Self::new(pairs.into_iter().map(Sample::from).collect())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: a dataset holds at least one sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of features per sample
    pub fn dim(&self) -> usize {
        self.dimensions
    }

    /// All samples, in input order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over the samples
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// All labels, in sample order
    pub fn labels(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Values of one feature column
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.samples.iter().map(|s| s.features[index]).collect()
    }

    /// Replace every feature vector, keeping labels
    ///
    /// The mapping must produce vectors of one common length; the result is
    /// validated like any other dataset.
    pub fn map_features<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>>,
    {
        let samples = self
            .samples
            .iter()
            .map(|s| Ok(Sample::new(f(&s.features)?, s.label)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(samples)
    }

    /// Take the samples out of the dataset
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// One train/test partition produced by k-fold splitting
#[derive(Clone, Debug)]
pub struct Fold {
    pub train: Dataset,
    pub test: Vec<Sample>,
}
