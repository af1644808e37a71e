use std::collections::HashMap;
use std::hash::Hash;

use log::info;

use super::classifier::Classifier;
use super::judgment::Judgment;

impl Classifier {
    /// Classifies `items` one at a time, in order.
    ///
    /// See [`batch_classify_with_progress`](Self::batch_classify_with_progress).
    pub async fn batch_classify<I, T>(&self, items: &[(I, T)]) -> HashMap<I, Judgment>
    where
        I: Eq + Hash + Clone,
        T: AsRef<str>,
    {
        self.batch_classify_with_progress(items, |_, _| {}).await
    }

    /// Classifies `items` strictly sequentially, calling `progress(done, total)`
    /// after each one.
    ///
    /// Each model call completes before the next starts. The result holds one
    /// entry per distinct identifier; if an identifier repeats, the later item's
    /// judgment wins. Progress is still reported once per item.
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// use feedback_triage::Classifier;
    ///
    /// let classifier = Classifier::keyword_only();
    /// let items = vec![(1, "Love it"), (2, "Crashes on start")];
    /// let mut seen = Vec::new();
    /// let results = classifier
    ///     .batch_classify_with_progress(&items, |done, total| seen.push((done, total)))
    ///     .await;
    /// assert_eq!(results.len(), 2);
    /// assert_eq!(seen, vec![(1, 2), (2, 2)]);
    /// # });
    /// ```
    pub async fn batch_classify_with_progress<I, T, F>(
        &self,
        items: &[(I, T)],
        mut progress: F,
    ) -> HashMap<I, Judgment>
    where
        I: Eq + Hash + Clone,
        T: AsRef<str>,
        F: FnMut(usize, usize),
    {
        let total = items.len();
        let mut results = HashMap::with_capacity(total);

        for (done, (id, text)) in items.iter().enumerate() {
            let judgment = self.classify(text.as_ref()).await;
            results.insert(id.clone(), judgment);
            progress(done + 1, total);
        }

        info!("Classified {} items", total);
        results
    }
}
