//! Sentiment and urgency triage for short feedback text.
//!
//! A [`Classifier`] asks a language model for a JSON judgment and repairs
//! whatever comes back. When the call fails or the reply cannot be parsed it
//! falls back to a deterministic keyword heuristic, so classification always
//! yields a [`Judgment`].
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use feedback_triage::{Classifier, ClientConfig};
//!
//! let classifier = Classifier::builder()
//!     .with_http_client(ClientConfig::load(None)?)?
//!     .build()?;
//!
//! let judgment = classifier.classify("Checkout is down in production!").await;
//! println!("{} (urgency {})", judgment.sentiment, judgment.urgency);
//! # Ok(())
//! # }
//! ```
//!
//! # Batches
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use feedback_triage::Classifier;
//!
//! let classifier = Classifier::keyword_only();
//! let items = vec![("a", "Great docs"), ("b", "Upload fails every time")];
//! let results = classifier
//!     .batch_classify_with_progress(&items, |done, total| println!("{}/{}", done, total))
//!     .await;
//! assert_eq!(results.len(), 2);
//! # });
//! ```

pub mod classifier;
pub mod config;
pub mod model_client;
pub mod pipeline;
pub mod store;

pub use classifier::{
    AnalysisError, Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, Judgment,
    Sentiment,
};
pub use config::{ClientConfig, ConfigError};
pub use model_client::{HttpModelClient, ModelCall, ModelError};
pub use pipeline::{analyze_pending, ingest};
pub use store::{
    FeedbackFilter, FeedbackItem, FeedbackStats, FeedbackStore, NewFeedback, Source, StoreError,
};

pub fn init_logger() {
    env_logger::init();
}
