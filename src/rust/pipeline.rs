//! Glue between the classifier and the feedback store.

use log::info;

use crate::classifier::Classifier;
use crate::store::{FeedbackItem, FeedbackStore, NewFeedback, StoreError};

/// Stores `new` and classifies it straight away.
///
/// The row is inserted before the model is consulted; since classification
/// cannot fail, the returned item is always analyzed.
pub async fn ingest(
    store: &FeedbackStore,
    classifier: &Classifier,
    new: NewFeedback,
) -> Result<FeedbackItem, StoreError> {
    let item = store.insert(new).await?;
    let judgment = classifier.classify(&item.content).await;
    store.apply_judgment(item.id, &judgment).await
}

/// Classifies up to `limit` unanalyzed rows and writes the results back.
///
/// Returns the number of rows updated. `progress(done, total)` is called after
/// each item.
pub async fn analyze_pending<F>(
    store: &FeedbackStore,
    classifier: &Classifier,
    limit: usize,
    progress: F,
) -> usize
where
    F: FnMut(usize, usize),
{
    let pending = store.pending(limit).await;
    if pending.is_empty() {
        info!("No pending feedback to analyze");
        return 0;
    }

    info!("Analyzing {} pending feedback items", pending.len());
    let judgments = classifier.batch_classify_with_progress(&pending, progress).await;
    store.apply_all(&judgments).await
}
