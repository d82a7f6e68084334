pub mod google;

pub use google::{GoogleServiceAccountClient, ServiceAccountKey};
