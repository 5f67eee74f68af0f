//! Model artifact serialization
//!
//! An artifact bundles the learner's model with everything needed to feed it
//! raw inputs again: the chosen configuration and the normalization and
//! projection parameters fitted at training time.

use crate::core::{Result, SelectionError, SvmParams};
use crate::preprocessing::{NormalizationParams, ReductionParams};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable trained pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact<M> {
    /// The Base Learner's own model representation
    pub model: M,
    pub params: ArtifactParams,
    pub metadata: ArtifactMetadata,
}

/// Best configuration merged with the preprocessing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactParams {
    #[serde(flatten)]
    pub svm: SvmParams,
    pub normalize: bool,
    pub mu: Vec<f64>,
    pub sigma: Vec<f64>,
    pub reduce: bool,
    pub retained_variance: f64,
    /// `m x k` projection, row-major
    pub u: Vec<Vec<f64>>,
}

/// Provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Library version used to create the artifact
    pub library_version: String,
    pub created_at: DateTime<Utc>,
}

impl ArtifactParams {
    pub fn new(
        svm: SvmParams,
        normalize: bool,
        normalization: &NormalizationParams,
        reduce: bool,
        reduction: &ReductionParams,
    ) -> Self {
        Self {
            svm,
            normalize,
            mu: normalization.mu.clone(),
            sigma: normalization.sigma.clone(),
            reduce,
            retained_variance: reduction.retained_variance,
            u: reduction.u.clone(),
        }
    }

    pub fn normalization(&self) -> NormalizationParams {
        NormalizationParams {
            mu: self.mu.clone(),
            sigma: self.sigma.clone(),
        }
    }

    pub fn reduction(&self) -> ReductionParams {
        ReductionParams {
            u: self.u.clone(),
            retained_variance: self.retained_variance,
        }
    }

    /// Check that the preprocessing parameters fit together
    pub fn validate(&self) -> Result<()> {
        let m = self.mu.len();
        if m == 0 {
            return Err(SelectionError::InvalidArgument(
                "artifact has no normalization parameters".to_string(),
            ));
        }
        if self.sigma.len() != m || self.u.len() != m {
            return Err(SelectionError::InvalidArgument(format!(
                "artifact dimensions disagree: mu={m}, sigma={}, u rows={}",
                self.sigma.len(),
                self.u.len()
            )));
        }
        let k = self.u[0].len();
        if k == 0 || self.u.iter().any(|row| row.len() != k) {
            return Err(SelectionError::InvalidArgument(
                "artifact projection matrix is malformed".to_string(),
            ));
        }
        Ok(())
    }
}

impl<M> ModelArtifact<M> {
    /// Stamp a new artifact with the current version and time
    pub fn new(model: M, params: ArtifactParams) -> Self {
        Self {
            model,
            params,
            metadata: ArtifactMetadata {
                library_version: crate::VERSION.to_string(),
                created_at: Utc::now(),
            },
        }
    }

    /// Convert the model representation, keeping params and metadata
    pub fn map_model<N, F: FnOnce(M) -> N>(self, f: F) -> ModelArtifact<N> {
        ModelArtifact {
            model: f(self.model),
            params: self.params,
            metadata: self.metadata,
        }
    }
}

impl<M: Serialize> ModelArtifact<M> {
    /// Write the artifact as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<M: DeserializeOwned> ModelArtifact<M> {
    /// Read an artifact written by [`ModelArtifact::save_to_file`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file))?;
        artifact.params.validate()?;
        Ok(artifact)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        artifact.params.validate()?;
        Ok(artifact)
    }
}
