use super::RepositoryError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error envelope shared by Google REST APIs
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
}

/// Turn a Google API response into `T`, surfacing the vendor's own message on failure
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    api: &str,
) -> Result<T, RepositoryError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = upstream_error_message(status, &body);
        tracing::error!(
            api = api,
            status = %status.as_u16(),
            error = %message,
            "Google API call failed"
        );
        return Err(RepositoryError::Upstream(message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| RepositoryError::Upstream(format!("Failed to parse {} response: {}", api, e)))
}

/// Map a transport failure (connect, timeout) to a repository error
pub fn transport_error(api: &str, err: reqwest::Error) -> RepositoryError {
    if err.is_timeout() {
        tracing::error!(api = api, error = %err, "Google API call timed out");
        RepositoryError::Upstream(format!("{} request timed out", api))
    } else {
        tracing::error!(api = api, error = %err, "Google API call failed to send");
        RepositoryError::Upstream(format!("{} request failed: {}", api, err))
    }
}

fn upstream_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<GoogleErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("upstream returned HTTP {}", status.as_u16()))
}
