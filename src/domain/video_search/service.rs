use super::error::VideoSearchError;
use super::model::{SortKey, SubscriberIndex, VideoRecord, VideoSearchFilter};
use crate::infrastructure::repositories::{SearchQuery, VideoRepository};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoSearchResult {
    pub items: Vec<VideoRecord>,
    pub subscriber_index: SubscriberIndex,
}

pub struct VideoSearchService {
    video_repo: Arc<dyn VideoRepository>,
}

impl VideoSearchService {
    pub fn new(video_repo: Arc<dyn VideoRepository>) -> Self {
        Self { video_repo }
    }
}

#[async_trait]
pub trait VideoSearchServiceApi: Send + Sync {
    /// Search, filter, optionally enrich with subscriber counts, sort and truncate.
    ///
    /// This operation:
    /// - Rejects a blank keyword before any vendor call
    /// - Short-circuits to an empty result when the search matches nothing
    /// - Never fails because of the subscriber lookup
    async fn search(&self, filter: VideoSearchFilter)
        -> Result<VideoSearchResult, VideoSearchError>;
}

#[async_trait]
impl VideoSearchServiceApi for VideoSearchService {
    async fn search(
        &self,
        filter: VideoSearchFilter,
    ) -> Result<VideoSearchResult, VideoSearchError> {
        if filter.keyword.trim().is_empty() {
            return Err(VideoSearchError::Invalid("keyword is required".to_string()));
        }

        let query = SearchQuery::from_filter(&filter);
        tracing::info!(
            keyword = %query.keyword,
            duration_class = ?filter.duration_class,
            view_band = ?filter.view_band,
            sort_key = ?filter.sort_key,
            result_limit = filter.result_limit,
            "Video search request"
        );

        // 1. Candidate ids
        let ids = self.video_repo.search_video_ids(&query).await?;
        if ids.is_empty() {
            tracing::info!(keyword = %query.keyword, "Search matched no videos");
            return Ok(VideoSearchResult::default());
        }

        // 2. Details for every candidate in one batch
        let videos = self.video_repo.video_details(&ids).await?;
        let fetched = videos.len();

        // 3. Local filters
        let mut videos = apply_filters(videos, &filter);

        tracing::info!(
            candidates = ids.len(),
            fetched = fetched,
            kept = videos.len(),
            "Video filters applied"
        );

        // 4. Optional enrichment
        let subscriber_index = if filter.sort_key == SortKey::SubscriberCount {
            self.lookup_subscribers(&videos).await
        } else {
            SubscriberIndex::new()
        };

        // 5. Order and truncate
        sort_videos(&mut videos, filter.sort_key, &subscriber_index);
        videos.truncate(filter.effective_limit(videos.len()));

        Ok(VideoSearchResult {
            items: videos,
            subscriber_index,
        })
    }
}

impl VideoSearchService {
    /// Failure here only costs the ordering; counts default to 0
    async fn lookup_subscribers(&self, videos: &[VideoRecord]) -> SubscriberIndex {
        let channel_ids = distinct_channel_ids(videos);
        if channel_ids.is_empty() {
            return SubscriberIndex::new();
        }

        match self.video_repo.subscriber_counts(&channel_ids).await {
            Ok(index) => {
                tracing::info!(
                    channels_requested = channel_ids.len(),
                    channels_found = index.len(),
                    "Subscriber counts fetched"
                );
                index
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    channels_requested = channel_ids.len(),
                    "Subscriber lookup failed, defaulting counts to 0"
                );
                SubscriberIndex::new()
            }
        }
    }
}

/// Length cap, then duration class, then view band
fn apply_filters(mut videos: Vec<VideoRecord>, filter: &VideoSearchFilter) -> Vec<VideoRecord> {
    videos.retain(|v| filter.within_length_cap(v.duration_seconds));
    videos.retain(|v| filter.duration_class.admits(v.duration_seconds));
    videos.retain(|v| filter.view_band.admits(v.view_count));
    videos
}

/// Non-empty channel ids in first-seen order
fn distinct_channel_ids(videos: &[VideoRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut channel_ids = Vec::new();
    for video in videos {
        if !video.channel_id.is_empty() && seen.insert(video.channel_id.as_str()) {
            channel_ids.push(video.channel_id.clone());
        }
    }
    channel_ids
}

/// Stable sort; relevance keeps vendor order. Undated videos sort last by date.
fn sort_videos(videos: &mut [VideoRecord], sort_key: SortKey, subscribers: &SubscriberIndex) {
    match sort_key {
        SortKey::Relevance => {}
        SortKey::Date => {
            videos.sort_by(|a, b| b.published_timestamp().cmp(&a.published_timestamp()))
        }
        SortKey::ViewCount => videos.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        SortKey::SubscriberCount => {
            let count = |v: &VideoRecord| subscribers.get(&v.channel_id).copied().unwrap_or(0);
            videos.sort_by(|a, b| count(b).cmp(&count(a)))
        }
    }
}
