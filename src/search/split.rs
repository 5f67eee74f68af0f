//! K-fold dataset splitting

use crate::core::{Dataset, Fold, Result, Sample, SelectionError};
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `dataset` and cut it into `k` train/test folds
///
/// Each chunk holds `floor(n / k)` samples; the remaining `n mod k` samples
/// are left out of every fold. With `k == 1` the single fold trains and
/// tests on the whole dataset.
pub fn split<R: Rng + ?Sized>(dataset: &Dataset, k: usize, rng: &mut R) -> Result<Vec<Fold>> {
    if k == 0 {
        return Err(SelectionError::InvalidArgument(
            "k_fold must be at least 1".to_string(),
        ));
    }
    if k > dataset.len() {
        return Err(SelectionError::InvalidArgument(format!(
            "cannot split {} samples into {k} folds",
            dataset.len()
        )));
    }

    if k == 1 {
        return Ok(vec![Fold {
            train: dataset.clone(),
            test: dataset.samples().to_vec(),
        }]);
    }

    let mut samples: Vec<Sample> = dataset.samples().to_vec();
    samples.shuffle(rng);

    let chunk_size = samples.len() / k;
    let dropped = samples.len() - chunk_size * k;
    if dropped > 0 {
        warn!(
            "{dropped} of {} samples do not fit in {k} equal folds and are left out",
            samples.len()
        );
    }

    let chunks: Vec<&[Sample]> = samples.chunks(chunk_size).take(k).collect();

    (0..k)
        .map(|i| {
            let train = chunks
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, chunk)| chunk.iter().cloned())
                .collect();
            Ok(Fold {
                train: Dataset::new(train)?,
                test: chunks[i].to_vec(),
            })
        })
        .collect()
}

/// [`split`] with the thread-local RNG
pub fn split_dataset(dataset: &Dataset, k: usize) -> Result<Vec<Fold>> {
    split(dataset, k, &mut rand::thread_rng())
}
