//! Expansion of a hyperparameter grid into concrete configurations

use crate::core::{Hyperparameter, Result, SelectionError, SvmConfig, SvmParams};

/// Cartesian product of the given axes
///
/// The first axis varies fastest. An empty axis does not multiply the
/// product; it contributes `None` to every combination.
pub fn cross_combinations(axes: &[&[f64]]) -> Vec<Vec<Option<f64>>> {
    let sizes: Vec<usize> = axes.iter().map(|a| a.len().max(1)).collect();
    let total: usize = sizes.iter().product();

    (0..total)
        .map(|index| {
            let mut rest = index;
            axes.iter()
                .zip(&sizes)
                .map(|(axis, &size)| {
                    let position = rest % size;
                    rest /= size;
                    axis.get(position).copied()
                })
                .collect()
        })
        .collect()
}

/// Check that every axis the learner/kernel needs has candidates
pub fn validate_grid(config: &SvmConfig) -> Result<()> {
    for param in config.required_axes() {
        if config.candidates(param).is_empty() {
            return Err(SelectionError::MissingParameter {
                parameter: param.name(),
                svm_type: config.svm_type,
                kernel_type: config.kernel_type,
            });
        }
    }
    Ok(())
}

/// Every configuration of the grid, in expansion order
///
/// Axes the learner/kernel does not use are left out of the product and
/// stay unset in the resulting parameters.
pub fn expand_grid(config: &SvmConfig) -> Result<Vec<SvmParams>> {
    validate_grid(config)?;

    let unused: &[f64] = &[];
    let axes: Vec<&[f64]> = Hyperparameter::ALL
        .iter()
        .map(|&p| {
            if p.is_required(config.svm_type, config.kernel_type) {
                config.candidates(p)
            } else {
                unused
            }
        })
        .collect();

    let base = config.base_params();
    Ok(cross_combinations(&axes)
        .into_iter()
        .map(|values| {
            let mut params = base.clone();
            for (&param, value) in Hyperparameter::ALL.iter().zip(values) {
                params.set(param, value);
            }
            params
        })
        .collect())
}
