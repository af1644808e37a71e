use std::fmt;

use crate::model_client::ModelError;

/// Ways the model-backed path can fail to produce a judgment.
///
/// These never reach callers of [`Classifier::classify`](super::Classifier::classify);
/// every variant resolves to the keyword fallback. They are surfaced by
/// [`Classifier::try_model_judgment`](super::Classifier::try_model_judgment) so the
/// failure taxonomy can be inspected.
#[derive(Debug)]
pub enum AnalysisError {
    /// The classifier was built without a model client
    NotConfigured,
    /// The model-call collaborator returned an error
    CallFailure(ModelError),
    /// The response held no JSON object, or the object did not parse
    ParseFailure(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("No model client configured"),
            Self::CallFailure(err) => write!(f, "Model call failed: {}", err),
            Self::ParseFailure(msg) => write!(f, "Unparseable model response: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CallFailure(err) => Some(err),
            Self::NotConfigured | Self::ParseFailure(_) => None,
        }
    }
}

impl From<ModelError> for AnalysisError {
    fn from(err: ModelError) -> Self {
        AnalysisError::CallFailure(err)
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::ParseFailure(err.to_string())
    }
}

/// Errors raised while configuring a classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<ModelError> for ClassifierError {
    fn from(err: ModelError) -> Self {
        ClassifierError::BuildError(err.to_string())
    }
}
