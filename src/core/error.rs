//! Error types for the model-selection pipeline

use crate::core::params::{KernelType, SvmType};
use thiserror::Error;

/// Coarse classification of a [`SelectionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MissingParameter,
    NotTrained,
    LearnerFailure,
    Io,
    Parse,
    Serialization,
}

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing parameter: '{parameter}' requires at least one value for {svm_type:?} with {kernel_type:?} kernel")]
    MissingParameter {
        parameter: &'static str,
        svm_type: SvmType,
        kernel_type: KernelType,
    },

    #[error("Model not trained")]
    NotTrained,

    #[error("Learner failure: {0}")]
    LearnerFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SelectionError {
    /// Tag identifying the kind of failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::MissingParameter { .. } => ErrorKind::MissingParameter,
            Self::NotTrained => ErrorKind::NotTrained,
            Self::LearnerFailure(_) => ErrorKind::LearnerFailure,
            Self::IoError(_) => ErrorKind::Io,
            Self::ParseError(_) => ErrorKind::Parse,
            Self::SerializationError(_) => ErrorKind::Serialization,
        }
    }

    /// Wrap anything displayable coming out of a base learner
    pub fn learner<E: std::fmt::Display>(err: E) -> Self {
        Self::LearnerFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SelectionError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(SelectionError::NotTrained.kind(), ErrorKind::NotTrained);
        assert_eq!(
            SelectionError::learner("solver diverged").kind(),
            ErrorKind::LearnerFailure
        );
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = SelectionError::MissingParameter {
            parameter: "gamma",
            svm_type: SvmType::CSvc,
            kernel_type: KernelType::Rbf,
        };
        let msg = err.to_string();
        assert!(msg.contains("gamma"));
        assert!(msg.contains("CSvc"));
        assert!(msg.contains("Rbf"));
    }
}
