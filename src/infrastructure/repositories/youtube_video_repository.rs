use super::google_api::{read_json, transport_error};
use super::{RepositoryError, SearchQuery, VideoRepository};
use crate::domain::video_search::{
    parse_iso8601_duration, DurationClass, SortKey, SubscriberIndex, VideoRecord,
};
use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::Deserialize;

const SEARCH_API: &str = "search";
const VIDEOS_API: &str = "videos";
const CHANNELS_API: &str = "channels";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchListResponse {
    items: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResult {
    id: SearchResultId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchResultId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VideoListResponse {
    items: Vec<YouTubeVideo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct YouTubeVideo {
    id: String,
    snippet: VideoSnippet,
    content_details: ContentDetails,
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoSnippet {
    title: String,
    channel_title: String,
    channel_id: String,
    published_at: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoStatistics {
    view_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChannelListResponse {
    items: Vec<YouTubeChannel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct YouTubeChannel {
    id: String,
    statistics: ChannelStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChannelStatistics {
    subscriber_count: Option<String>,
}

/// YouTube reports counters as decimal strings
fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0)
}

impl From<YouTubeVideo> for VideoRecord {
    fn from(video: YouTubeVideo) -> Self {
        let snippet = video.snippet;
        let thumbnail_url = snippet
            .thumbnails
            .medium
            .or(snippet.thumbnails.fallback)
            .map(|t| t.url)
            .filter(|url| !url.is_empty());

        Self {
            id: video.id,
            title: snippet.title,
            channel_title: snippet.channel_title,
            channel_id: snippet.channel_id,
            published_at: snippet.published_at,
            thumbnail_url,
            duration_seconds: parse_iso8601_duration(&video.content_details.duration),
            view_count: parse_count(video.statistics.view_count.as_deref()),
        }
    }
}

fn video_duration_param(class: DurationClass) -> &'static str {
    match class {
        DurationClass::Any => "any",
        DurationClass::Short => "short",
        DurationClass::Long => "long",
    }
}

/// search.list has no subscriber ordering; that sort happens locally
fn order_param(sort_key: SortKey) -> &'static str {
    match sort_key {
        SortKey::Relevance | SortKey::SubscriberCount => "relevance",
        SortKey::Date => "date",
        SortKey::ViewCount => "viewCount",
    }
}

/// YouTube Data API v3 implementation of the video repository
pub struct YouTubeVideoRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeVideoRepository {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, RepositoryError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| RepositoryError::NotConfigured("Missing YT_API_KEY".to_string()))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        api: &str,
        params: Vec<(&str, String)>,
    ) -> Result<T, RepositoryError> {
        let key = self.api_key()?;
        let start_time = std::time::Instant::now();

        let response = self
            .http_client
            .get(format!("{}/{}", self.base_url, api))
            .query(&[("key", key)])
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error(api, e))?;

        let payload = read_json(response, api).await?;

        tracing::debug!(
            api = api,
            latency_ms = start_time.elapsed().as_millis(),
            "YouTube API call completed"
        );

        Ok(payload)
    }
}

#[async_trait]
impl VideoRepository for YouTubeVideoRepository {
    async fn search_video_ids(&self, query: &SearchQuery) -> Result<Vec<String>, RepositoryError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("q", query.keyword.clone()),
            ("maxResults", query.max_results.to_string()),
            ("order", order_param(query.sort_key).to_string()),
            ("videoDuration", video_duration_param(query.duration_class).to_string()),
        ];
        if let Some(after) = query.published_after {
            params.push(("publishedAfter", after.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(before) = query.published_before {
            params.push(("publishedBefore", before.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        tracing::info!(
            keyword = %query.keyword,
            max_results = query.max_results,
            order = order_param(query.sort_key),
            video_duration = video_duration_param(query.duration_class),
            "Calling YouTube search.list"
        );

        let payload: SearchListResponse = self.get(SEARCH_API, params).await?;

        Ok(payload
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .filter(|id| !id.is_empty())
            .collect())
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRecord>, RepositoryError> {
        let params = vec![
            ("part", "snippet,contentDetails,statistics".to_string()),
            ("id", ids.join(",")),
        ];

        tracing::info!(id_count = ids.len(), "Calling YouTube videos.list");

        let payload: VideoListResponse = self.get(VIDEOS_API, params).await?;

        Ok(payload.items.into_iter().map(VideoRecord::from).collect())
    }

    async fn subscriber_counts(
        &self,
        channel_ids: &[String],
    ) -> Result<SubscriberIndex, RepositoryError> {
        let params = vec![
            ("part", "statistics".to_string()),
            ("id", channel_ids.join(",")),
        ];

        tracing::info!(channel_count = channel_ids.len(), "Calling YouTube channels.list");

        let payload: ChannelListResponse = self.get(CHANNELS_API, params).await?;

        Ok(payload
            .items
            .into_iter()
            .filter(|channel| !channel.id.is_empty())
            .map(|channel| {
                let count = parse_count(channel.statistics.subscriber_count.as_deref());
                (channel.id, count)
            })
            .collect())
    }
}
