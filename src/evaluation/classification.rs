//! Multi-class classification metrics

use crate::core::{Result, SelectionError};
use serde::{Deserialize, Serialize};

/// Metrics of a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub label: f64,
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
    /// Number of examples whose actual label is this class
    pub size: usize,
}

/// Classification metrics over a set of `(predicted, actual)` pairs
///
/// The top-level precision, recall and fscore are those of the worst class,
/// so a single neglected class drags the summary down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub fscore: f64,
    pub precision: f64,
    pub recall: f64,
    /// Per-class metrics, sorted by label
    pub class: Vec<ClassReport>,
    pub size: usize,
}

impl ClassificationReport {
    /// Metrics of one class, if it appeared in the predictions or the truth
    pub fn class(&self, label: f64) -> Option<&ClassReport> {
        self.class.iter().find(|c| c.label == label)
    }
}

/// Harmonic mean of precision and recall
pub fn fscore(precision: f64, recall: f64) -> f64 {
    if precision == 0.0 && recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compute the report from `(predicted, actual)` pairs
pub fn compute(predictions: &[(f64, f64)]) -> Result<ClassificationReport> {
    if predictions.is_empty() {
        return Err(SelectionError::InvalidArgument(
            "cannot evaluate an empty set of predictions".to_string(),
        ));
    }

    // labels only ever predicted still need a row: they lower precision elsewhere
    let mut labels: Vec<f64> = predictions
        .iter()
        .flat_map(|&(predicted, actual)| [predicted, actual])
        .collect();
    labels.sort_by(f64::total_cmp);
    labels.dedup();

    let class: Vec<ClassReport> = labels
        .into_iter()
        .map(|label| {
            let mut tp = 0;
            let mut predicted_count = 0;
            let mut actual_count = 0;
            for &(predicted, actual) in predictions {
                if predicted == label {
                    predicted_count += 1;
                }
                if actual == label {
                    actual_count += 1;
                    if predicted == label {
                        tp += 1;
                    }
                }
            }

            let precision = ratio(tp, predicted_count);
            let recall = ratio(tp, actual_count);
            ClassReport {
                label,
                precision,
                recall,
                fscore: fscore(precision, recall),
                size: actual_count,
            }
        })
        .collect();

    let correct = predictions.iter().filter(|(p, a)| p == a).count();
    let worst = |f: fn(&ClassReport) -> f64| class.iter().map(f).fold(f64::INFINITY, f64::min);

    Ok(ClassificationReport {
        accuracy: ratio(correct, predictions.len()),
        fscore: worst(|c| c.fscore),
        precision: worst(|c| c.precision),
        recall: worst(|c| c.recall),
        size: predictions.len(),
        class,
    })
}
