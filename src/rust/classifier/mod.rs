mod batch;
pub mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod error;
pub mod fallback;
mod judgment;
mod prompt;
pub mod response;
mod utils;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use error::{AnalysisError, ClassifierError};
pub use fallback::{keyword_judgment, SignalCounts, FALLBACK_CONFIDENCE, FALLBACK_REASONING};
pub use judgment::{Judgment, Sentiment};
pub use prompt::build_prompt;
pub use response::{parse_judgment, DEFAULT_MODEL_CONFIDENCE};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierInfo {
    /// Whether a model client is configured for the primary path
    pub model_backed: bool,
    /// Token budget passed to each model call
    pub max_tokens: u32,
}
