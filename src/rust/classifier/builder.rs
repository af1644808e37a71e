use std::fmt;
use std::sync::Arc;

use log::info;

use super::classifier::Classifier;
use super::error::ClassifierError;
use crate::config::{ClientConfig, DEFAULT_MAX_TOKENS};
use crate::model_client::{HttpModelClient, ModelCall};

/// Upper bound on the output budget; a judgment is a few dozen tokens.
const MAX_TOKEN_BUDGET: u32 = 4096;

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Default)]
pub struct ClassifierBuilder {
    model: Option<Arc<dyn ModelCall>>,
    max_tokens: Option<u32>,
}

impl fmt::Debug for ClassifierBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierBuilder")
            .field("model_backed", &self.model.is_some())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use feedback_triage::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            model: None,
            max_tokens: None,
        }
    }

    /// Sets the model-call collaborator used for the primary path
    ///
    /// # Arguments
    /// * `model` - Any [`ModelCall`] implementation, e.g. [`HttpModelClient`] or a test double
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder, or an error if a model was already set
    pub fn with_model_client(
        mut self,
        model: impl ModelCall + 'static,
    ) -> Result<Self, ClassifierError> {
        if self.model.is_some() {
            return Err(ClassifierError::BuildError("Model client already set".to_string()));
        }
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Configures an [`HttpModelClient`] from `config`
    ///
    /// The config's `max_tokens` becomes the output budget unless
    /// [`with_max_tokens`](Self::with_max_tokens) overrides it. Without an
    /// API key no client is created and the classifier stays keyword-only.
    ///
    /// # Example
    /// ```
    /// use feedback_triage::{ClassifierBuilder, ClientConfig};
    ///
    /// let classifier = ClassifierBuilder::new()
    ///     .with_http_client(ClientConfig::default())
    ///     .and_then(|builder| builder.build());
    /// assert!(classifier.is_ok());
    /// ```
    pub fn with_http_client(mut self, config: ClientConfig) -> Result<Self, ClassifierError> {
        if self.max_tokens.is_none() {
            self.max_tokens = Some(config.max_tokens);
        }
        if config.api_key.is_none() {
            info!("No API key configured; classifications will use keyword analysis");
            return Ok(self);
        }
        let client = HttpModelClient::new(config)?;
        self.with_model_client(client)
    }

    /// Sets the token budget passed to every model call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier, or a
    ///   `ValidationError` if the token budget is zero or above 4096
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 || max_tokens > MAX_TOKEN_BUDGET {
            return Err(ClassifierError::ValidationError(format!(
                "Token budget must be between 1 and {}, got {}",
                MAX_TOKEN_BUDGET, max_tokens
            )));
        }

        Ok(Classifier {
            model: self.model,
            max_tokens,
        })
    }
}
