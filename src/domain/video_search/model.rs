use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hard upper bound on returned results
pub const MAX_RESULTS: usize = 100;

/// Largest page the vendor search call will return
pub const MAX_UPSTREAM_PAGE_SIZE: u32 = 50;

/// Shorts are at most one minute long
pub const SHORT_MAX_SECONDS: u64 = 60;

/// Long-form videos run at least twenty minutes
pub const LONG_MIN_SECONDS: u64 = 20 * 60;

pub const VIEWS_100K: u64 = 100_000;
pub const VIEWS_1M: u64 = 1_000_000;

/// Channel id -> subscriber count, filled only when sorting by subscribers
pub type SubscriberIndex = BTreeMap<String, u64>;

/// Coarse length bucket requested by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    #[default]
    #[serde(alias = "all")]
    Any,
    Short,
    Long,
}

impl DurationClass {
    /// Product thresholds, independent of the vendor's own buckets
    pub fn admits(&self, duration_seconds: u64) -> bool {
        match self {
            DurationClass::Any => true,
            DurationClass::Short => duration_seconds <= SHORT_MAX_SECONDS,
            DurationClass::Long => duration_seconds >= LONG_MIN_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewBand {
    #[default]
    #[serde(rename = "any", alias = "all")]
    Any,
    #[serde(rename = "lt100k")]
    Under100k,
    #[serde(rename = "100k_1m")]
    From100kTo1m,
    #[serde(rename = "gte1m")]
    AtLeast1m,
}

impl ViewBand {
    pub fn admits(&self, view_count: u64) -> bool {
        match self {
            ViewBand::Any => true,
            ViewBand::Under100k => view_count < VIEWS_100K,
            ViewBand::From100kTo1m => (VIEWS_100K..VIEWS_1M).contains(&view_count),
            ViewBand::AtLeast1m => view_count >= VIEWS_1M,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Relevance,
    Date,
    ViewCount,
    SubscriberCount,
}

/// Validated search parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoSearchFilter {
    pub keyword: String,
    pub duration_class: DurationClass,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub view_band: ViewBand,
    /// 0 means "whatever the pipeline produced"
    pub result_limit: u32,
    pub sort_key: SortKey,
    pub length_cap_seconds: Option<u64>,
}

impl VideoSearchFilter {
    /// Page size for the vendor search call: the requested limit clamped to
    /// `1..=50`, with 0 asking for the full page.
    pub fn upstream_page_size(&self) -> u32 {
        match self.result_limit {
            0 => MAX_UPSTREAM_PAGE_SIZE,
            limit => limit.clamp(1, MAX_UPSTREAM_PAGE_SIZE),
        }
    }

    /// Number of results to keep out of `available`
    pub fn effective_limit(&self, available: usize) -> usize {
        let requested = match self.result_limit {
            0 => available,
            limit => limit as usize,
        };
        requested.min(MAX_RESULTS)
    }

    /// A cap of 0 is treated as "no cap"
    pub fn within_length_cap(&self, duration_seconds: u64) -> bool {
        match self.length_cap_seconds {
            Some(cap) if cap > 0 => duration_seconds <= cap,
            _ => true,
        }
    }
}

/// One video, merged from the search and details responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: u64,
    pub view_count: u64,
}

impl VideoRecord {
    pub fn published_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
