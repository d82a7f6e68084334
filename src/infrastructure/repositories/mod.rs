pub mod error;
mod google_api;
pub mod google_speech_repository;
pub mod speech_repository;
pub mod video_repository;
pub mod youtube_video_repository;

pub use error::RepositoryError;
pub use google_speech_repository::GoogleSpeechRepository;
pub use speech_repository::SpeechRepository;
pub use video_repository::{SearchQuery, VideoRepository};
pub use youtube_video_repository::YouTubeVideoRepository;
