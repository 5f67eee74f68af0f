//! Exhaustive cross-validated search over a hyperparameter grid

use crate::core::{
    BaseLearner, Dataset, Fold, ProgressObserver, Result, SelectionError, SvmConfig, SvmParams,
    SvmType,
};
use crate::evaluation::{predict_pairs, EvaluationReport, Evaluator};
use crate::search::combinations::{expand_grid, validate_grid};
use crate::search::progress::ProgressTracker;
use crate::search::split::split;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSearchEntry {
    pub params: SvmParams,
    pub report: EvaluationReport,
}

/// Entries in configuration-expansion order
pub type GridSearchResult = Vec<GridSearchEntry>;

/// Cross-validates every configuration of an [`SvmConfig`] grid
pub struct GridSearch<'a, L: BaseLearner> {
    learner: &'a L,
    config: &'a SvmConfig,
    observer: Option<&'a dyn ProgressObserver>,
}

impl<'a, L: BaseLearner> GridSearch<'a, L> {
    pub fn new(learner: &'a L, config: &'a SvmConfig) -> Self {
        Self {
            learner,
            config,
            observer: None,
        }
    }

    /// Notify `observer` after each configuration completes
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Evaluate the whole grid on `dataset`
    ///
    /// The first failing trial aborts the search. With `parallelism > 1`
    /// trials run on a dedicated thread pool; entries still come back in
    /// expansion order.
    pub fn search(&self, dataset: &Dataset) -> Result<GridSearchResult> {
        validate_search(self.config, dataset)?;

        let grid = expand_grid(self.config)?;
        let folds = match self.config.seed {
            Some(seed) => split(dataset, self.config.k_fold, &mut StdRng::seed_from_u64(seed))?,
            None => split(dataset, self.config.k_fold, &mut rand::thread_rng())?,
        };
        let evaluator = Evaluator::for_svm_type(self.config.svm_type);

        info!(
            "Grid search: {} configurations, {} folds, {} samples",
            grid.len(),
            folds.len(),
            dataset.len()
        );

        let tracker = Mutex::new(ProgressTracker::new(grid.len()));
        let run = |params: &SvmParams| -> Result<GridSearchEntry> {
            let entry = self.run_trial(params, &folds, evaluator)?;
            self.notify(&tracker);
            Ok(entry)
        };

        let results = if self.config.parallelism > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.parallelism)
                .build()
                .map_err(|e| {
                    SelectionError::InvalidArgument(format!("cannot start worker pool: {e}"))
                })?;
            pool.install(|| grid.par_iter().map(run).collect::<Result<Vec<_>>>())?
        } else {
            grid.iter().map(run).collect::<Result<Vec<_>>>()?
        };

        info!("Grid search finished");
        Ok(results)
    }

    /// Train on every fold, pool the test predictions, evaluate once
    fn run_trial(
        &self,
        params: &SvmParams,
        folds: &[Fold],
        evaluator: Evaluator,
    ) -> Result<GridSearchEntry> {
        let mut pairs = Vec::new();
        for fold in folds {
            let model = self
                .learner
                .train(&fold.train, params)
                .map_err(|e| trial_failure(params, e))?;
            pairs.extend(predict_pairs(&model, &fold.test).map_err(|e| trial_failure(params, e))?);
        }

        let report = evaluator.compute(&pairs)?;
        debug!("{params}: {}", summary(&report));
        Ok(GridSearchEntry {
            params: params.clone(),
            report,
        })
    }

    fn notify(&self, tracker: &Mutex<ProgressTracker>) {
        // the lock is held while notifying so observers see completions in order
        let mut tracker = match tracker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let progress = tracker.advance();
        if let Some(observer) = self.observer {
            observer.on_progress(&progress);
        }
    }
}

/// Reject a configuration the search cannot run on `dataset`
///
/// Covers the scalar settings, one-class learners, empty required axes and
/// more folds than samples.
pub fn validate_search(config: &SvmConfig, dataset: &Dataset) -> Result<()> {
    config.validate()?;
    if config.svm_type == SvmType::OneClass {
        return Err(SelectionError::InvalidArgument(
            "grid search is not available for one-class learners".to_string(),
        ));
    }
    validate_grid(config)?;
    if config.k_fold > dataset.len() {
        return Err(SelectionError::InvalidArgument(format!(
            "cannot split {} samples into {} folds",
            dataset.len(),
            config.k_fold
        )));
    }
    Ok(())
}

fn trial_failure(params: &SvmParams, err: SelectionError) -> SelectionError {
    match err {
        SelectionError::LearnerFailure(msg) => {
            SelectionError::LearnerFailure(format!("{params}: {msg}"))
        }
        other => SelectionError::LearnerFailure(format!("{params}: {other}")),
    }
}

fn summary(report: &EvaluationReport) -> String {
    match report {
        EvaluationReport::Classification(r) => {
            format!("accuracy={:.4} fscore={:.4}", r.accuracy, r.fscore)
        }
        EvaluationReport::Regression(r) => format!("mse={:.6} std={:.6}", r.mse, r.std),
    }
}

/// Best entry of a search: highest fscore for classifiers, lowest mse for
/// regressors. Ties keep the earliest entry.
pub fn best_entry(entries: &[GridSearchEntry], svm_type: SvmType) -> Option<&GridSearchEntry> {
    let mut best: Option<(&GridSearchEntry, f64)> = None;
    for entry in entries {
        let score = if svm_type.is_regression() {
            entry.report.mse().map(|mse| -mse)
        } else {
            entry.report.fscore()
        };
        let Some(score) = score else { continue };
        match best {
            Some((_, current)) if current >= score => {}
            _ => best = Some((entry, score)),
        }
    }
    best.map(|(entry, _)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KernelType, Predictor, Sample};
    use crate::evaluation::{ClassificationReport, RegressionReport};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Memorises the training set when `c >= 1`, otherwise predicts the
    /// first training label for everything
    struct Threshold;

    struct ThresholdModel {
        samples: Vec<Sample>,
        exact: bool,
    }

    impl Predictor for ThresholdModel {
        fn predict(&self, features: &[f64]) -> Result<f64> {
            if !self.exact {
                return Ok(self.samples[0].label);
            }
            self.samples
                .iter()
                .find(|s| s.features == features)
                .map(|s| s.label)
                .ok_or_else(|| SelectionError::learner("unseen sample"))
        }
    }

    impl BaseLearner for Threshold {
        type Model = ThresholdModel;

        fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<ThresholdModel> {
            Ok(ThresholdModel {
                samples: dataset.samples().to_vec(),
                exact: params.c.unwrap_or(0.0) >= 1.0,
            })
        }
    }

    struct Rejecting;

    impl BaseLearner for Rejecting {
        type Model = ThresholdModel;

        fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<ThresholdModel> {
            match params.c {
                Some(c) if c > 1.0 => Err(SelectionError::learner("cost too high")),
                _ => Threshold.train(dataset, params),
            }
        }
    }

    fn two_class() -> Dataset {
        Dataset::from_pairs(vec![
            (vec![0.0], 0.0),
            (vec![1.0], 1.0),
            (vec![2.0], 0.0),
            (vec![3.0], 1.0),
        ])
        .unwrap()
    }

    fn linear_config(c: Vec<f64>) -> SvmConfig {
        SvmConfig::new(SvmType::CSvc, KernelType::Linear)
            .with_c(c)
            .with_k_fold(1)
    }

    #[test]
    fn test_one_entry_per_configuration() {
        let config = linear_config(vec![0.5, 1.0, 2.0]);
        let entries = GridSearch::new(&Threshold, &config)
            .search(&two_class())
            .unwrap();

        assert_eq!(entries.len(), 3);
        let cs: Vec<_> = entries.iter().map(|e| e.params.c).collect();
        assert_eq!(cs, vec![Some(0.5), Some(1.0), Some(2.0)]);
        assert_eq!(entries[0].report.fscore(), Some(0.0));
        assert_eq!(entries[1].report.fscore(), Some(1.0));
    }

    #[test]
    fn test_progress_is_reported_per_configuration() {
        let config = linear_config(vec![0.5, 1.0, 2.0, 4.0]);
        let calls = AtomicUsize::new(0);
        let observer = |p: &crate::search::Progress| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            assert_eq!(p.completed, n);
            assert_eq!(p.total, 4);
        };
        GridSearch::new(&Threshold, &config)
            .with_observer(&observer)
            .search(&two_class())
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_learner_failure_aborts() {
        let config = linear_config(vec![0.5, 2.0, 1.0]);
        let err = GridSearch::new(&Rejecting, &config)
            .search(&two_class())
            .unwrap_err();
        assert!(matches!(err, SelectionError::LearnerFailure(_)));
        assert!(err.to_string().contains("cost too high"));
    }

    #[test]
    fn test_one_class_is_rejected() {
        let config = SvmConfig::new(SvmType::OneClass, KernelType::Linear).with_k_fold(1);
        let err = GridSearch::new(&Threshold, &config)
            .search(&two_class())
            .unwrap_err();
        assert!(matches!(err, SelectionError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_search() {
        let dataset = two_class();
        assert!(validate_search(&linear_config(vec![1.0]), &dataset).is_ok());

        let too_many_folds = linear_config(vec![1.0]).with_k_fold(5);
        assert!(matches!(
            validate_search(&too_many_folds, &dataset),
            Err(SelectionError::InvalidArgument(_))
        ));

        let no_cost = linear_config(Vec::new());
        assert!(matches!(
            validate_search(&no_cost, &dataset),
            Err(SelectionError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_parallel_search_keeps_order() {
        let c: Vec<f64> = (0..12).map(|i| i as f64 * 0.25).collect();
        let sequential = linear_config(c.clone());
        let parallel = linear_config(c).with_parallelism(4);

        let a = GridSearch::new(&Threshold, &sequential)
            .search(&two_class())
            .unwrap();
        let b = GridSearch::new(&Threshold, &parallel)
            .search(&two_class())
            .unwrap();
        assert_eq!(a, b);
    }

    fn classification_entry(c: f64, fscore: f64) -> GridSearchEntry {
        let mut params = SvmParams::new(SvmType::CSvc, KernelType::Linear);
        params.c = Some(c);
        GridSearchEntry {
            params,
            report: EvaluationReport::Classification(ClassificationReport {
                accuracy: fscore,
                fscore,
                precision: fscore,
                recall: fscore,
                class: Vec::new(),
                size: 4,
            }),
        }
    }

    fn regression_entry(c: f64, mse: f64) -> GridSearchEntry {
        let mut params = SvmParams::new(SvmType::EpsilonSvr, KernelType::Linear);
        params.c = Some(c);
        GridSearchEntry {
            params,
            report: EvaluationReport::Regression(RegressionReport {
                mse,
                std: 0.0,
                mean: 0.0,
                size: 4,
            }),
        }
    }

    #[test]
    fn test_best_entry_by_fscore() {
        let entries = vec![
            classification_entry(1.0, 0.5),
            classification_entry(2.0, 0.9),
            classification_entry(3.0, 0.9),
        ];
        let best = best_entry(&entries, SvmType::CSvc).unwrap();
        assert_eq!(best.params.c, Some(2.0));
    }

    #[test]
    fn test_best_entry_by_mse() {
        let entries = vec![
            regression_entry(1.0, 0.4),
            regression_entry(2.0, 0.1),
            regression_entry(3.0, 0.3),
        ];
        let best = best_entry(&entries, SvmType::EpsilonSvr).unwrap();
        assert_eq!(best.params.c, Some(2.0));
        assert!(best_entry(&[], SvmType::NuSvr).is_none());
    }
}
