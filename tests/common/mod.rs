//! Stand-in base learners for integration tests

#![allow(dead_code)]

use rsvm_select::{BaseLearner, Dataset, Predictor, Result, SelectionError, SvmParams};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn xor() -> Dataset {
    Dataset::from_pairs(vec![
        (vec![0.0, 0.0], 0.0),
        (vec![0.0, 1.0], 1.0),
        (vec![1.0, 0.0], 1.0),
        (vec![1.0, 1.0], 0.0),
    ])
    .expect("valid dataset")
}

/// Two well separated clusters of `per_class` samples each
pub fn clusters(per_class: usize) -> Dataset {
    let mut pairs = Vec::new();
    for i in 0..per_class {
        let offset = i as f64 * 0.1;
        pairs.push((vec![offset, 1.0 + offset, 5.0], 0.0));
        pairs.push((vec![10.0 + offset, 12.0 - offset, 5.0], 1.0));
    }
    Dataset::from_pairs(pairs).expect("valid dataset")
}

/// 1-nearest-neighbour "engine": predicts the label of the closest
/// training sample and counts how often it was trained
#[derive(Default)]
pub struct NearestNeighbor {
    pub trainings: AtomicUsize,
}

impl NearestNeighbor {
    pub fn trainings(&self) -> usize {
        self.trainings.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorizedModel {
    pub samples: Vec<(Vec<f64>, f64)>,
}

impl Predictor for MemorizedModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        let distance = |x: &[f64]| -> f64 {
            x.iter()
                .zip(features)
                .map(|(a, b)| (a - b).powi(2))
                .sum()
        };
        self.samples
            .iter()
            .min_by(|a, b| distance(&a.0).total_cmp(&distance(&b.0)))
            .map(|(_, label)| *label)
            .ok_or_else(|| SelectionError::learner("model holds no samples"))
    }
}

impl BaseLearner for NearestNeighbor {
    type Model = MemorizedModel;

    fn train(&self, dataset: &Dataset, _params: &SvmParams) -> Result<MemorizedModel> {
        self.trainings.fetch_add(1, Ordering::SeqCst);
        Ok(MemorizedModel {
            samples: dataset
                .iter()
                .map(|s| (s.features.clone(), s.label))
                .collect(),
        })
    }
}

/// Fails for every configuration whose cost exceeds `max_c`
pub struct CostLimited {
    pub max_c: f64,
}

impl BaseLearner for CostLimited {
    type Model = MemorizedModel;

    fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<MemorizedModel> {
        match params.c {
            Some(c) if c > self.max_c => Err(SelectionError::learner(format!(
                "cost {c} exceeds {}",
                self.max_c
            ))),
            _ => NearestNeighbor::default().train(dataset, params),
        }
    }
}

/// Regressor predicting the training mean scaled by `c`, so the best cost
/// is the one closest to 1
pub struct ScaledMean;

pub struct ConstantModel(pub f64);

impl Predictor for ConstantModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }
}

impl BaseLearner for ScaledMean {
    type Model = ConstantModel;

    fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<ConstantModel> {
        let mean = dataset.iter().map(|s| s.label).sum::<f64>() / dataset.len() as f64;
        Ok(ConstantModel(mean * params.c.unwrap_or(1.0)))
    }
}
