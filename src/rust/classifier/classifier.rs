use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use super::error::AnalysisError;
use super::fallback::keyword_judgment;
use super::judgment::Judgment;
use super::prompt::build_prompt;
use super::response::parse_judgment;
use crate::model_client::ModelCall;

/// Classifies feedback text into a [`Judgment`].
///
/// The model-backed path is tried first. Any failure there (call error,
/// missing or unparseable JSON) resolves to the deterministic keyword
/// heuristic, so [`classify`](Self::classify) always returns a judgment.
///
/// ```rust
/// # tokio_test::block_on(async {
/// use feedback_triage::{Classifier, Sentiment};
///
/// // No model client: every text goes through the keyword heuristic.
/// let classifier = Classifier::builder().build().unwrap();
/// let judgment = classifier.classify("The app is broken in production").await;
/// assert_eq!(judgment.sentiment, Sentiment::Negative);
/// assert_eq!(judgment.urgency, 5);
/// assert!(judgment.is_fallback());
/// # });
/// ```
///
/// # Thread Safety
///
/// The model client is held behind an `Arc<dyn ModelCall>` which is
/// `Send + Sync`, so a classifier can be shared across tasks with `Arc`.
#[derive(Clone)]
pub struct Classifier {
    pub(crate) model: Option<Arc<dyn ModelCall>>,
    pub(crate) max_tokens: u32,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("model_backed", &self.model.is_some())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// A classifier that never calls a model.
    pub fn keyword_only() -> Self {
        Self {
            model: None,
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
        }
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_backed: self.model.is_some(),
            max_tokens: self.max_tokens,
        }
    }

    /// Classifies `text`, falling back to the keyword heuristic on any failure.
    ///
    /// Empty or whitespace-only text is classified like any other input.
    pub async fn classify(&self, text: &str) -> Judgment {
        match self.try_model_judgment(text).await {
            Ok(judgment) => judgment,
            Err(AnalysisError::NotConfigured) => {
                debug!("No model configured, using keyword analysis");
                keyword_judgment(text)
            }
            Err(err) => {
                warn!("Falling back to keyword analysis: {}", err);
                keyword_judgment(text)
            }
        }
    }

    /// Runs only the model-backed path, exposing why it failed.
    pub async fn try_model_judgment(&self, text: &str) -> Result<Judgment, AnalysisError> {
        let model = self.model.as_ref().ok_or(AnalysisError::NotConfigured)?;
        let prompt = build_prompt(text);
        let raw = model.complete(&prompt, self.max_tokens).await?;
        debug!("Raw model response: {}", raw);
        parse_judgment(&raw)
    }
}
