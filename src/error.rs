use thiserror::Error;

/// Every failure the client surfaces. None of them are fatal; each one is
/// rendered inline and cleared by the next user action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Please enter a valid http/https URL.")]
    InvalidServerUrl { input: String },
    #[error(
        "Could not load music from {endpoint}. Make sure LocalStream is running and CORS is enabled."
    )]
    CatalogLoad { endpoint: String, reason: String },
    #[error("This item does not have a playable URL.")]
    NoPlayableUrl,
    #[error("Unable to start playback in this browser.")]
    PlaybackStart { reason: String },
    #[error("storage error: {reason}")]
    Storage { reason: String },
}

impl ClientError {
    pub fn catalog_load(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::CatalogLoad {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn storage(reason: impl ToString) -> Self {
        Self::Storage {
            reason: reason.to_string(),
        }
    }
}
