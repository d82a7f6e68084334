pub mod duration;
pub mod error;
pub mod model;
pub mod service;

pub use duration::parse_iso8601_duration;
pub use error::VideoSearchError;
pub use model::{
    DurationClass, SortKey, SubscriberIndex, VideoRecord, VideoSearchFilter, ViewBand,
};
pub use service::{VideoSearchResult, VideoSearchService, VideoSearchServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request for POST /video-search
///
/// Accepts both the descriptive field names and the short ones the search
/// page sends (`q`, `type`, `order`, `max`, `lengthCapSec`, `publishedRange`).
/// `null` is treated like an absent field.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSearchRequest {
    #[serde(alias = "q", deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(alias = "type", deserialize_with = "null_as_default")]
    pub duration_class: DurationClass,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub published_range: Option<PublishedRange>,
    #[serde(deserialize_with = "null_as_default")]
    pub view_band: ViewBand,
    #[serde(alias = "max")]
    pub result_limit: Option<u32>,
    #[serde(alias = "order", deserialize_with = "null_as_default")]
    pub sort_key: SortKey,
    #[serde(alias = "lengthCapSec")]
    pub length_cap_seconds: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishedRange {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<VideoSearchRequest> for VideoSearchFilter {
    fn from(request: VideoSearchRequest) -> Self {
        let range = request.published_range.unwrap_or_default();
        Self {
            keyword: request.keyword,
            duration_class: request.duration_class,
            published_after: request.published_after.or(range.after),
            published_before: request.published_before.or(range.before),
            view_band: request.view_band,
            result_limit: request.result_limit.unwrap_or(0),
            sort_key: request.sort_key,
            length_cap_seconds: request.length_cap_seconds,
        }
    }
}

/// Response for POST /video-search
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchResponse {
    pub items: Vec<VideoRecord>,
    pub subscriber_index: SubscriberIndex,
}

impl From<VideoSearchResult> for VideoSearchResponse {
    fn from(result: VideoSearchResult) -> Self {
        Self {
            items: result.items,
            subscriber_index: result.subscriber_index,
        }
    }
}
