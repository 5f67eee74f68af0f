//! Model selection front end
//!
//! [`ModelSelector`] chains the whole pipeline: normalize, reduce, grid
//! search, pick the best configuration, then retrain on every sample.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rsvm_select::api::ModelSelector;
//! use rsvm_select::core::{BaseLearner, Dataset, KernelType, SvmConfig, SvmType};
//!
//! # fn run<L: BaseLearner>(learner: L, dataset: &Dataset) -> rsvm_select::core::Result<()> {
//! let config = SvmConfig::new(SvmType::CSvc, KernelType::Rbf).with_k_fold(4);
//! let mut selector = ModelSelector::new(learner, config);
//!
//! let (_model, report) = selector.train(dataset)?;
//! println!("best: {} fscore={:?}", report.params, report.report.fscore());
//!
//! let label = selector.predict(&[0.5, 1.5])?;
//! # Ok(())
//! # }
//! ```

use crate::core::{
    BaseLearner, Dataset, Predictor, ProgressObserver, Result, SelectionError, SvmConfig,
    SvmParams,
};
use crate::evaluation::{EvaluationReport, Evaluator};
use crate::persistence::{ArtifactParams, ModelArtifact};
use crate::preprocessing::{NormalizationParams, ReductionParams};
use crate::search::{best_entry, validate_search, GridSearch};
use log::info;
use serde::{Deserialize, Serialize};

/// Outcome of [`ModelSelector::train`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Cross-validated metrics of the winning configuration
    pub report: EvaluationReport,
    /// Variance share kept by the projection (1 without reduction)
    pub retained_variance: f64,
    /// The winning configuration
    pub params: SvmParams,
    /// Number of configurations evaluated
    pub configurations: usize,
}

struct TrainedState<M> {
    model: M,
    normalization: NormalizationParams,
    reduction: ReductionParams,
    params: SvmParams,
}

/// Selects hyperparameters for a [`BaseLearner`] and holds the final model
pub struct ModelSelector<L: BaseLearner> {
    learner: L,
    config: SvmConfig,
    observer: Option<Box<dyn ProgressObserver>>,
    state: Option<TrainedState<L::Model>>,
}

impl<L: BaseLearner> ModelSelector<L> {
    /// Create an untrained selector for `learner`
    pub fn new(learner: L, config: SvmConfig) -> Self {
        Self {
            learner,
            config,
            observer: None,
            state: None,
        }
    }

    /// Receive grid-search progress during [`ModelSelector::train`]
    pub fn with_observer<O: ProgressObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Rebuild a trained selector from a saved artifact
    ///
    /// The configuration is reconstructed from the artifact with the
    /// winning values as single-candidate axes.
    pub fn restore(learner: L, artifact: ModelArtifact<L::Model>) -> Result<Self> {
        artifact.params.validate()?;
        let ArtifactParams {
            svm,
            normalize,
            reduce,
            retained_variance,
            ..
        } = &artifact.params;

        let mut config = SvmConfig::new(svm.svm_type, svm.kernel_type)
            .with_normalize(*normalize)
            .with_reduce(*reduce)
            .with_retained_variance(*retained_variance);
        for param in crate::core::Hyperparameter::ALL {
            config = config.with_candidates(param, svm.get(param).into_iter().collect());
        }
        config.eps = svm.eps;
        config.cache_size = svm.cache_size;
        config.probability = svm.probability;

        let state = TrainedState {
            normalization: artifact.params.normalization(),
            reduction: artifact.params.reduction(),
            params: artifact.params.svm,
            model: artifact.model,
        };

        Ok(Self {
            learner,
            config,
            observer: None,
            state: Some(state),
        })
    }

    /// Run the full selection pipeline on `dataset`
    ///
    /// Any previously trained model is replaced only when the whole
    /// pipeline succeeds.
    pub fn train(&mut self, dataset: &Dataset) -> Result<(&L::Model, TrainingReport)> {
        validate_search(&self.config, dataset)?;

        info!(
            "Training {:?}/{:?} on {} samples with {} features",
            self.config.svm_type,
            self.config.kernel_type,
            dataset.len(),
            dataset.dim()
        );

        let normalization = if self.config.normalize {
            NormalizationParams::fit(dataset)?
        } else {
            NormalizationParams::identity(dataset.dim())
        };
        let normalized = normalization.apply(dataset)?;

        let reduction = if self.config.reduce {
            ReductionParams::fit(&normalized, self.config.retained_variance)?
        } else {
            ReductionParams::identity(normalized.dim())
        };
        let transformed = reduction.apply(&normalized)?;
        if self.config.reduce {
            info!(
                "Reduced {} features to {} ({:.4} of the variance)",
                reduction.input_dim(),
                reduction.output_dim(),
                reduction.retained_variance
            );
        }

        let mut search = GridSearch::new(&self.learner, &self.config);
        if let Some(observer) = self.observer.as_deref() {
            search = search.with_observer(observer);
        }
        let results = search.search(&transformed)?;

        let best = best_entry(&results, self.config.svm_type)
            .cloned()
            .ok_or_else(|| {
                SelectionError::InvalidArgument("grid search produced no results".to_string())
            })?;
        info!("Best configuration: {}", best.params);

        let model = self
            .learner
            .train(&transformed, &best.params)
            .map_err(|e| match e {
                SelectionError::LearnerFailure(_) => e,
                other => SelectionError::learner(other),
            })?;

        let report = TrainingReport {
            report: best.report,
            retained_variance: reduction.retained_variance,
            params: best.params.clone(),
            configurations: results.len(),
        };
        let state = self.state.insert(TrainedState {
            model,
            normalization,
            reduction,
            params: best.params,
        });
        Ok((&state.model, report))
    }

    /// Metrics of the trained model on `testset`
    ///
    /// The testset goes through the training-time normalization and
    /// projection; nothing is refitted.
    pub fn evaluate(&self, testset: &Dataset) -> Result<EvaluationReport> {
        let state = self.trained()?;
        let transformed = state.reduction.apply(&state.normalization.apply(testset)?)?;
        Evaluator::for_svm_type(state.params.svm_type).evaluate(&state.model, transformed.samples())
    }

    /// Label one raw feature vector
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let state = self.trained()?;
        state.model.predict(&state.transform(features)?)
    }

    /// Label several raw feature vectors
    pub fn predict_batch(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>> {
        let state = self.trained()?;
        let transformed = batch
            .iter()
            .map(|x| state.transform(x))
            .collect::<Result<Vec<_>>>()?;
        state.model.predict_batch(&transformed)
    }

    /// Whether a model is held, from training or a restored artifact
    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Get the configuration
    pub fn config(&self) -> &SvmConfig {
        &self.config
    }

    /// Get the base learner
    pub fn learner(&self) -> &L {
        &self.learner
    }

    /// Get the final model, if trained
    pub fn trained_model(&self) -> Option<&L::Model> {
        self.state.as_ref().map(|s| &s.model)
    }

    /// Normalization fitted at training time
    pub fn normalization(&self) -> Option<&NormalizationParams> {
        self.state.as_ref().map(|s| &s.normalization)
    }

    /// Projection fitted at training time
    pub fn reduction(&self) -> Option<&ReductionParams> {
        self.state.as_ref().map(|s| &s.reduction)
    }

    /// Configuration the held model was trained with
    pub fn best_params(&self) -> Option<&SvmParams> {
        self.state.as_ref().map(|s| &s.params)
    }

    /// Borrowing artifact of the trained pipeline, ready to serialize
    pub fn artifact(&self) -> Result<ModelArtifact<&L::Model>> {
        let state = self.trained()?;
        Ok(ModelArtifact::new(
            &state.model,
            ArtifactParams::new(
                state.params.clone(),
                self.config.normalize,
                &state.normalization,
                self.config.reduce,
                &state.reduction,
            ),
        ))
    }

    fn trained(&self) -> Result<&TrainedState<L::Model>> {
        self.state.as_ref().ok_or(SelectionError::NotTrained)
    }
}

impl<M> TrainedState<M> {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.reduction
            .apply_features(&self.normalization.apply_features(features)?)
    }
}
