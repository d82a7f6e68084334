use super::RepositoryError;
use crate::domain::video_search::{DurationClass, SortKey, SubscriberIndex, VideoRecord, VideoSearchFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Parameters of the single vendor search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: String,
    pub duration_class: DurationClass,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub sort_key: SortKey,
    pub max_results: u32,
}

impl SearchQuery {
    pub fn from_filter(filter: &VideoSearchFilter) -> Self {
        Self {
            keyword: filter.keyword.trim().to_string(),
            duration_class: filter.duration_class,
            published_after: filter.published_after,
            published_before: filter.published_before,
            sort_key: filter.sort_key,
            max_results: filter.upstream_page_size(),
        }
    }
}

/// Repository for video search operations.
/// Abstracts the underlying video vendor (YouTube Data API v3).
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Run a keyword search and return candidate video ids in vendor order
    async fn search_video_ids(&self, query: &SearchQuery) -> Result<Vec<String>, RepositoryError>;

    /// Fetch details for a batch of ids in one call
    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRecord>, RepositoryError>;

    /// Fetch subscriber counts for a batch of channel ids in one call.
    /// Channels the vendor omits are absent from the returned index.
    async fn subscriber_counts(
        &self,
        channel_ids: &[String],
    ) -> Result<SubscriberIndex, RepositoryError>;
}
