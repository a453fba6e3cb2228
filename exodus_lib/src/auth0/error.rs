use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not reach Auth0: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Auth0 rejected the request with status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}
