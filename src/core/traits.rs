//! Seams between the pipeline and the external SVM engine

use crate::core::{Dataset, Result, SvmParams};
use crate::search::Progress;

/// A trained model able to label feature vectors
pub trait Predictor: Send + Sync {
    /// Predict the label (or regression target) of one feature vector
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Predict several vectors
    fn predict_batch(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>> {
        batch.iter().map(|x| self.predict(x)).collect()
    }
}

/// The external training engine
///
/// Every call to [`BaseLearner::train`] must produce an independent model:
/// the grid search relies on this to run trials without shared state.
/// Implementations report engine errors as
/// [`SelectionError::LearnerFailure`](crate::core::SelectionError::LearnerFailure).
pub trait BaseLearner: Send + Sync {
    type Model: Predictor;

    /// Fit a fresh model on `dataset` using one concrete configuration
    fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<Self::Model>;
}

impl<L: BaseLearner + ?Sized> BaseLearner for &L {
    type Model = L::Model;

    fn train(&self, dataset: &Dataset, params: &SvmParams) -> Result<Self::Model> {
        (**self).train(dataset, params)
    }
}

/// Receives grid-search progress
///
/// Notifications arrive after each configuration completes, in
/// non-decreasing order of `completed`, and always before the search returns.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}
