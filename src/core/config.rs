//! Immutable pipeline configuration
//!
//! A configuration is resolved once per run: defaults are chosen from the
//! learner type and kernel, then user overrides are merged on top by the pure
//! function [`SvmConfig::merge`]. Nothing in the crate keeps a process-wide
//! default around.

use crate::core::params::{Hyperparameter, KernelType, SvmParams, SvmType};
use crate::core::{Result, SelectionError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DEFAULT_C: [f64; 5] = [0.01, 0.125, 0.5, 1.0, 2.0];
const DEFAULT_GAMMA: [f64; 3] = [0.001, 0.01, 0.5];
const DEFAULT_EPSILON: [f64; 4] = [0.01, 0.125, 0.5, 1.0];
const DEFAULT_NU: [f64; 4] = [0.01, 0.125, 0.5, 1.0];
const DEFAULT_DEGREE: [f64; 3] = [2.0, 3.0, 4.0];
const DEFAULT_COEF0: [f64; 4] = [0.125, 0.5, 0.0, 1.0];

/// Complete configuration of a model-selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmConfig {
    pub svm_type: SvmType,
    pub kernel_type: KernelType,
    /// Candidate costs
    pub c: Vec<f64>,
    pub gamma: Vec<f64>,
    pub epsilon: Vec<f64>,
    pub nu: Vec<f64>,
    pub degree: Vec<f64>,
    pub coef0: Vec<f64>,
    /// Z-score normalize features before searching
    pub normalize: bool,
    /// Project features with PCA before searching
    pub reduce: bool,
    /// Minimum fraction of variance the PCA projection must keep
    pub retained_variance: f64,
    /// Number of cross-validation folds; 1 trains and tests on everything
    pub k_fold: usize,
    /// Solver stopping tolerance passed to the learner
    pub eps: f64,
    /// Kernel cache size in MB passed to the learner
    pub cache_size: usize,
    pub probability: bool,
    /// Number of worker threads for the grid search (1 = sequential)
    pub parallelism: usize,
    /// Seed for fold shuffling; `None` uses the thread RNG
    pub seed: Option<u64>,
}

impl SvmConfig {
    /// Defaults for a learner/kernel combination
    ///
    /// Candidate lists are only filled for the axes the combination uses.
    pub fn new(svm_type: SvmType, kernel_type: KernelType) -> Self {
        let axis = |param: Hyperparameter, values: &[f64]| {
            if param.is_required(svm_type, kernel_type) {
                values.to_vec()
            } else {
                Vec::new()
            }
        };

        Self {
            svm_type,
            kernel_type,
            c: axis(Hyperparameter::C, &DEFAULT_C),
            gamma: axis(Hyperparameter::Gamma, &DEFAULT_GAMMA),
            epsilon: axis(Hyperparameter::Epsilon, &DEFAULT_EPSILON),
            nu: axis(Hyperparameter::Nu, &DEFAULT_NU),
            degree: axis(Hyperparameter::Degree, &DEFAULT_DEGREE),
            coef0: axis(Hyperparameter::Coef0, &DEFAULT_COEF0),
            normalize: true,
            reduce: true,
            retained_variance: 0.99,
            k_fold: 4,
            eps: 1e-3,
            cache_size: 100,
            probability: false,
            parallelism: 1,
            seed: None,
        }
    }

    /// Resolve defaults for the overridden learner/kernel, then apply overrides
    pub fn merge(overrides: &ConfigOverrides) -> Self {
        let svm_type = overrides.svm_type.unwrap_or_default();
        let kernel_type = overrides.kernel_type.unwrap_or_default();
        let mut config = Self::new(svm_type, kernel_type);

        for param in Hyperparameter::ALL {
            if let Some(values) = overrides.candidates(param) {
                *config.candidates_mut(param) = values.to_vec();
            }
        }

        if let Some(v) = overrides.normalize {
            config.normalize = v;
        }
        if let Some(v) = overrides.reduce {
            config.reduce = v;
        }
        if let Some(v) = overrides.retained_variance {
            config.retained_variance = v;
        }
        if let Some(v) = overrides.k_fold {
            config.k_fold = v;
        }
        if let Some(v) = overrides.eps {
            config.eps = v;
        }
        if let Some(v) = overrides.cache_size {
            config.cache_size = v;
        }
        if let Some(v) = overrides.probability {
            config.probability = v;
        }
        if let Some(v) = overrides.parallelism {
            config.parallelism = v;
        }
        if overrides.seed.is_some() {
            config.seed = overrides.seed;
        }
        config
    }

    /// Candidate values of one axis
    pub fn candidates(&self, param: Hyperparameter) -> &[f64] {
        match param {
            Hyperparameter::C => &self.c,
            Hyperparameter::Gamma => &self.gamma,
            Hyperparameter::Epsilon => &self.epsilon,
            Hyperparameter::Nu => &self.nu,
            Hyperparameter::Degree => &self.degree,
            Hyperparameter::Coef0 => &self.coef0,
        }
    }

    fn candidates_mut(&mut self, param: Hyperparameter) -> &mut Vec<f64> {
        match param {
            Hyperparameter::C => &mut self.c,
            Hyperparameter::Gamma => &mut self.gamma,
            Hyperparameter::Epsilon => &mut self.epsilon,
            Hyperparameter::Nu => &mut self.nu,
            Hyperparameter::Degree => &mut self.degree,
            Hyperparameter::Coef0 => &mut self.coef0,
        }
    }

    /// Axes used by the configured learner/kernel, in expansion order
    pub fn required_axes(&self) -> Vec<Hyperparameter> {
        Hyperparameter::ALL
            .into_iter()
            .filter(|p| p.is_required(self.svm_type, self.kernel_type))
            .collect()
    }

    /// Learner parameters with every axis still unassigned
    pub fn base_params(&self) -> SvmParams {
        let mut params = SvmParams::new(self.svm_type, self.kernel_type);
        params.eps = self.eps;
        params.cache_size = self.cache_size;
        params.probability = self.probability;
        params
    }

    /// Check scalar settings
    pub fn validate(&self) -> Result<()> {
        if !(self.retained_variance > 0.0 && self.retained_variance <= 1.0) {
            return Err(SelectionError::InvalidArgument(format!(
                "retained variance must be in (0, 1], got: {}",
                self.retained_variance
            )));
        }
        if self.k_fold == 0 {
            return Err(SelectionError::InvalidArgument(
                "k_fold must be at least 1".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(SelectionError::InvalidArgument(
                "parallelism must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set candidate values for an axis
    pub fn with_candidates(mut self, param: Hyperparameter, values: Vec<f64>) -> Self {
        *self.candidates_mut(param) = values;
        self
    }

    /// Set candidate costs
    pub fn with_c(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::C, values)
    }

    /// Set candidate kernel widths
    pub fn with_gamma(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::Gamma, values)
    }

    /// Set candidate SVR tube widths
    pub fn with_epsilon(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::Epsilon, values)
    }

    /// Set candidate nu values
    pub fn with_nu(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::Nu, values)
    }

    /// Set candidate polynomial degrees
    pub fn with_degree(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::Degree, values)
    }

    /// Set candidate kernel offsets
    pub fn with_coef0(self, values: Vec<f64>) -> Self {
        self.with_candidates(Hyperparameter::Coef0, values)
    }

    /// Enable or disable z-score normalization
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enable or disable PCA reduction
    pub fn with_reduce(mut self, reduce: bool) -> Self {
        self.reduce = reduce;
        self
    }

    /// Minimum variance share the projection keeps
    pub fn with_retained_variance(mut self, retained_variance: f64) -> Self {
        self.retained_variance = retained_variance;
        self
    }

    /// Set the number of cross-validation folds
    pub fn with_k_fold(mut self, k_fold: usize) -> Self {
        self.k_fold = k_fold;
        self
    }

    /// Run up to `threads` trials at once
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = threads;
        self
    }

    /// Make fold shuffling reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self::new(SvmType::default(), KernelType::default())
    }
}

/// A scalar or a list of candidate values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidates {
    One(f64),
    Many(Vec<f64>),
}

impl Candidates {
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::One(v) => vec![*v],
            Self::Many(vs) => vs.clone(),
        }
    }
}

/// User-supplied settings; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub svm_type: Option<SvmType>,
    pub kernel_type: Option<KernelType>,
    pub c: Option<Candidates>,
    pub gamma: Option<Candidates>,
    pub epsilon: Option<Candidates>,
    pub nu: Option<Candidates>,
    pub degree: Option<Candidates>,
    pub coef0: Option<Candidates>,
    pub normalize: Option<bool>,
    pub reduce: Option<bool>,
    pub retained_variance: Option<f64>,
    pub k_fold: Option<usize>,
    pub eps: Option<f64>,
    pub cache_size: Option<usize>,
    pub probability: Option<bool>,
    pub parallelism: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Parse overrides from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn candidates(&self, param: Hyperparameter) -> Option<&Candidates> {
        match param {
            Hyperparameter::C => self.c.as_ref(),
            Hyperparameter::Gamma => self.gamma.as_ref(),
            Hyperparameter::Epsilon => self.epsilon.as_ref(),
            Hyperparameter::Nu => self.nu.as_ref(),
            Hyperparameter::Degree => self.degree.as_ref(),
            Hyperparameter::Coef0 => self.coef0.as_ref(),
        }
    }
}
