use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::video_search::{
        VideoSearchRequest, VideoSearchResponse, VideoSearchService, VideoSearchServiceApi,
    },
    error::AppResult,
};

pub struct VideoSearchController {
    video_search_service: Arc<VideoSearchService>,
}

impl VideoSearchController {
    pub fn new(video_search_service: Arc<VideoSearchService>) -> Self {
        Self {
            video_search_service,
        }
    }

    /// POST /video-search - Filtered, sorted video search
    pub async fn search(
        State(controller): State<Arc<VideoSearchController>>,
        payload: Result<Json<VideoSearchRequest>, JsonRejection>,
    ) -> AppResult<Json<VideoSearchResponse>> {
        let Json(request) = payload?;

        let result = controller
            .video_search_service
            .search(request.into())
            .await?;

        Ok(Json(result.into()))
    }
}
