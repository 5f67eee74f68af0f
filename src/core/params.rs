//! Learner variants, kernels and the hyperparameters they consume

use serde::{Deserialize, Serialize};
use std::fmt;

/// SVM formulation handed to the base learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SvmType {
    /// Multi-class classification with cost C
    #[default]
    CSvc,
    /// Multi-class classification with nu
    NuSvc,
    /// Distribution estimation
    OneClass,
    /// Regression with epsilon-insensitive loss
    EpsilonSvr,
    /// Regression with nu
    NuSvr,
}

impl SvmType {
    /// Labels are classes; one-class counts as classification
    pub fn is_classification(self) -> bool {
        matches!(self, Self::CSvc | Self::NuSvc | Self::OneClass)
    }

    /// Labels are real-valued targets
    pub fn is_regression(self) -> bool {
        matches!(self, Self::EpsilonSvr | Self::NuSvr)
    }
}

/// Kernel function the base learner should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KernelType {
    /// K(x, y) = x·y
    Linear,
    /// K(x, y) = (gamma x·y + coef0)^degree
    Poly,
    /// K(x, y) = exp(-gamma |x - y|²)
    #[default]
    Rbf,
    /// K(x, y) = tanh(gamma x·y + coef0)
    Sigmoid,
}

/// Grid axes, in expansion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hyperparameter {
    C,
    Gamma,
    Epsilon,
    Nu,
    Degree,
    Coef0,
}

impl Hyperparameter {
    pub const ALL: [Hyperparameter; 6] = [
        Self::C,
        Self::Gamma,
        Self::Epsilon,
        Self::Nu,
        Self::Degree,
        Self::Coef0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Gamma => "gamma",
            Self::Epsilon => "epsilon",
            Self::Nu => "nu",
            Self::Degree => "degree",
            Self::Coef0 => "coef0",
        }
    }

    /// Whether the axis is consumed by the given learner/kernel combination
    pub fn is_required(self, svm_type: SvmType, kernel_type: KernelType) -> bool {
        use KernelType::*;
        use SvmType::*;

        match self {
            Self::C => matches!(svm_type, CSvc | EpsilonSvr | NuSvr),
            Self::Nu => matches!(svm_type, NuSvc | OneClass | NuSvr),
            Self::Epsilon => svm_type == EpsilonSvr,
            Self::Gamma => matches!(kernel_type, Poly | Rbf | Sigmoid),
            Self::Degree => kernel_type == Poly,
            Self::Coef0 => matches!(kernel_type, Poly | Sigmoid),
        }
    }
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One concrete point of the grid
///
/// Axes that do not apply to `(svm_type, kernel_type)` stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmParams {
    pub svm_type: SvmType,
    pub kernel_type: KernelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coef0: Option<f64>,
    /// Solver stopping tolerance
    pub eps: f64,
    /// Kernel cache size in MB
    pub cache_size: usize,
    /// Whether the learner should fit probability estimates
    pub probability: bool,
}

impl SvmParams {
    /// Parameters with no hyperparameter assigned yet
    pub fn new(svm_type: SvmType, kernel_type: KernelType) -> Self {
        Self {
            svm_type,
            kernel_type,
            c: None,
            gamma: None,
            epsilon: None,
            nu: None,
            degree: None,
            coef0: None,
            eps: 1e-3,
            cache_size: 100,
            probability: false,
        }
    }

    pub fn get(&self, param: Hyperparameter) -> Option<f64> {
        match param {
            Hyperparameter::C => self.c,
            Hyperparameter::Gamma => self.gamma,
            Hyperparameter::Epsilon => self.epsilon,
            Hyperparameter::Nu => self.nu,
            Hyperparameter::Degree => self.degree,
            Hyperparameter::Coef0 => self.coef0,
        }
    }

    pub fn set(&mut self, param: Hyperparameter, value: Option<f64>) {
        let slot = match param {
            Hyperparameter::C => &mut self.c,
            Hyperparameter::Gamma => &mut self.gamma,
            Hyperparameter::Epsilon => &mut self.epsilon,
            Hyperparameter::Nu => &mut self.nu,
            Hyperparameter::Degree => &mut self.degree,
            Hyperparameter::Coef0 => &mut self.coef0,
        };
        *slot = value;
    }
}

impl fmt::Display for SvmParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.svm_type, self.kernel_type)?;
        for param in Hyperparameter::ALL {
            if let Some(value) = self.get(param) {
                write!(f, " {param}={value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_by_svm_type() {
        use Hyperparameter::*;
        let k = KernelType::Linear;

        assert!(C.is_required(SvmType::CSvc, k));
        assert!(!C.is_required(SvmType::NuSvc, k));
        assert!(C.is_required(SvmType::EpsilonSvr, k));
        assert!(C.is_required(SvmType::NuSvr, k));

        assert!(Nu.is_required(SvmType::NuSvc, k));
        assert!(Nu.is_required(SvmType::OneClass, k));
        assert!(!Nu.is_required(SvmType::EpsilonSvr, k));

        assert!(Epsilon.is_required(SvmType::EpsilonSvr, k));
        assert!(!Epsilon.is_required(SvmType::NuSvr, k));
    }

    #[test]
    fn test_required_by_kernel() {
        use Hyperparameter::*;
        let s = SvmType::CSvc;

        assert!(!Gamma.is_required(s, KernelType::Linear));
        assert!(Gamma.is_required(s, KernelType::Rbf));
        assert!(Degree.is_required(s, KernelType::Poly));
        assert!(!Degree.is_required(s, KernelType::Sigmoid));
        assert!(Coef0.is_required(s, KernelType::Sigmoid));
        assert!(!Coef0.is_required(s, KernelType::Rbf));
    }

    #[test]
    fn test_svm_type_families() {
        assert_eq!(SvmType::default(), SvmType::CSvc);
        assert_eq!(KernelType::default(), KernelType::Rbf);

        for svm_type in [SvmType::CSvc, SvmType::NuSvc, SvmType::OneClass] {
            assert!(svm_type.is_classification());
            assert!(!svm_type.is_regression());
        }
        for svm_type in [SvmType::EpsilonSvr, SvmType::NuSvr] {
            assert!(svm_type.is_regression());
            assert!(!svm_type.is_classification());
        }
    }

    #[test]
    fn test_params_display() {
        let mut params = SvmParams::new(SvmType::CSvc, KernelType::Rbf);
        params.set(Hyperparameter::C, Some(1.0));
        params.set(Hyperparameter::Gamma, Some(0.5));
        assert_eq!(params.to_string(), "CSvc/Rbf c=1 gamma=0.5");
    }

    #[test]
    fn test_params_serde_names() {
        let params = SvmParams::new(SvmType::EpsilonSvr, KernelType::Linear);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"EPSILON_SVR\""));
        assert!(json.contains("\"LINEAR\""));
        assert!(!json.contains("gamma"));
    }
}
