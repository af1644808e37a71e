use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::classifier::{Judgment, Sentiment};

pub type FeedbackId = u64;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Feedback {0} not found")]
    NotFound(FeedbackId),
    #[error("Feedback content cannot be empty")]
    EmptyContent,
}

/// Where a piece of feedback was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Github,
    Discord,
    Twitter,
    Support,
    Forum,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Github,
        Source::Discord,
        Source::Twitter,
        Source::Support,
        Source::Forum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Discord => "discord",
            Self::Twitter => "twitter",
            Self::Support => "support",
            Self::Forum => "forum",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown source '{}'", s))
    }
}

/// A stored feedback row. Judgment fields stay empty until analysis runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: FeedbackId,
    pub source: Source,
    pub author: Option<String>,
    pub content: String,
    /// Seconds since the Unix epoch
    pub created_at: u64,
    pub sentiment: Option<Sentiment>,
    pub urgency: Option<u8>,
    pub confidence: Option<f32>,
    pub analyzed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub source: Source,
    pub author: Option<String>,
    pub content: String,
}

impl NewFeedback {
    pub fn new(source: Source, content: impl Into<String>) -> Self {
        Self {
            source,
            author: None,
            content: content.into(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Criteria for [`FeedbackStore::list`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub source: Option<Source>,
    pub sentiment: Option<Sentiment>,
    pub min_urgency: Option<u8>,
    pub limit: Option<usize>,
}

impl FeedbackFilter {
    fn matches(&self, item: &FeedbackItem) -> bool {
        self.source.map_or(true, |s| item.source == s)
            && self.sentiment.map_or(true, |s| item.sentiment == Some(s))
            && self.min_urgency.map_or(true, |min| item.urgency.is_some_and(|u| u >= min))
    }
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total: usize,
    pub analyzed: usize,
    pub pending: usize,
    pub by_sentiment: BTreeMap<String, usize>,
    pub by_source: BTreeMap<String, usize>,
    /// Mean urgency over analyzed rows, `None` when nothing is analyzed
    pub average_urgency: Option<f64>,
    /// Analyzed rows with urgency 4 or 5
    pub critical: usize,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<FeedbackId, FeedbackItem>,
    next_id: FeedbackId,
}

/// In-memory feedback table.
///
/// Each operation takes the lock for its own duration only; there is no
/// multi-operation transaction.
#[derive(Default)]
pub struct FeedbackStore {
    inner: Mutex<Inner>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, new: NewFeedback) -> Result<FeedbackItem, StoreError> {
        if new.content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let item = FeedbackItem {
            id: inner.next_id,
            source: new.source,
            author: new.author,
            content: new.content,
            created_at: unix_now(),
            sentiment: None,
            urgency: None,
            confidence: None,
            analyzed: false,
        };
        inner.rows.insert(item.id, item.clone());
        Ok(item)
    }

    pub async fn get(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError> {
        let inner = self.inner.lock().await;
        inner.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Matching rows, newest first.
    pub async fn list(&self, filter: &FeedbackFilter) -> Vec<FeedbackItem> {
        let inner = self.inner.lock().await;
        inner
            .rows
            .values()
            .rev()
            .filter(|item| filter.matches(item))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Up to `limit` unanalyzed rows as (id, content), oldest first.
    pub async fn pending(&self, limit: usize) -> Vec<(FeedbackId, String)> {
        let inner = self.inner.lock().await;
        inner
            .rows
            .values()
            .filter(|item| !item.analyzed)
            .take(limit)
            .map(|item| (item.id, item.content.clone()))
            .collect()
    }

    pub async fn apply_judgment(
        &self,
        id: FeedbackId,
        judgment: &Judgment,
    ) -> Result<FeedbackItem, StoreError> {
        let mut inner = self.inner.lock().await;
        let item = inner.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.sentiment = Some(judgment.sentiment);
        item.urgency = Some(judgment.urgency);
        item.confidence = Some(judgment.confidence);
        item.analyzed = true;
        Ok(item.clone())
    }

    /// Applies every judgment whose row still exists; returns how many were updated.
    pub async fn apply_all(&self, judgments: &HashMap<FeedbackId, Judgment>) -> usize {
        let mut updated = 0;
        for (id, judgment) in judgments {
            match self.apply_judgment(*id, judgment).await {
                Ok(_) => updated += 1,
                Err(err) => log::warn!("Skipping judgment update: {}", err),
            }
        }
        updated
    }

    pub async fn delete(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.rows.remove(&id).ok_or(StoreError::NotFound(id))
    }

    pub async fn stats(&self) -> FeedbackStats {
        let inner = self.inner.lock().await;

        let mut by_sentiment: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
        let mut urgency_sum = 0u64;
        let mut analyzed = 0;
        let mut critical = 0;

        for item in inner.rows.values() {
            *by_source.entry(item.source.to_string()).or_default() += 1;
            if let Some(sentiment) = item.sentiment {
                *by_sentiment.entry(sentiment.to_string()).or_default() += 1;
            }
            if item.analyzed {
                analyzed += 1;
            }
            if let Some(urgency) = item.urgency {
                urgency_sum += u64::from(urgency);
                if urgency >= 4 {
                    critical += 1;
                }
            }
        }

        let urgency_count = inner.rows.values().filter(|item| item.urgency.is_some()).count();
        let total = inner.rows.len();
        FeedbackStats {
            total,
            analyzed,
            pending: total - analyzed,
            by_sentiment,
            by_source,
            average_urgency: (urgency_count > 0).then(|| urgency_sum as f64 / urgency_count as f64),
            critical,
        }
    }

    /// Inserts a fixed set of sample rows and returns how many were added.
    pub async fn seed_mock(&self) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for (source, author, content) in MOCK_FEEDBACK {
            self.insert(NewFeedback::new(*source, *content).with_author(*author)).await?;
            inserted += 1;
        }
        log::info!("Seeded {} mock feedback items", inserted);
        Ok(inserted)
    }
}

const MOCK_FEEDBACK: &[(Source, &str, &str)] = &[
    (
        Source::Github,
        "octo-dev",
        "App crashes on startup after the latest update. Production is down for our whole team!",
    ),
    (
        Source::Github,
        "mkern",
        "Feature request: it would be great to export reports as CSV.",
    ),
    (
        Source::Discord,
        "pixelfox",
        "Love the new dark mode, it looks amazing and the setup was easy.",
    ),
    (
        Source::Discord,
        "quietbyte",
        "Search has been really slow since Tuesday, anyone else seeing this issue?",
    ),
    (
        Source::Twitter,
        "@ana_builds",
        "Honestly the smoothest onboarding I've had with any tool. Fantastic work.",
    ),
    (
        Source::Twitter,
        "@rgrant",
        "Worst release yet. Sync is broken and I keep getting an error on save.",
    ),
    (
        Source::Support,
        "billing@acme.io",
        "Our invoices page returns a 500 error. This is a blocker for month-end close, \
         please fix immediately.",
    ),
    (Source::Support, "j.ortega", "How do I change the email address on my account?"),
    (
        Source::Forum,
        "lena_k",
        "The docs were helpful but the API pagination section could use an example.",
    ),
    (Source::Forum, "dtran", "Notifications arrive twice on Android. Minor, but a bit annoying."),
];

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
