pub mod health;
pub mod speech;
pub mod video_search;
