use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures talking to the news API. None of the variants carry the upstream
/// body or the request URL, which contains the access key.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream response larger than {0} bytes")]
    TooLarge(usize),
    #[error("upstream response is not a valid envelope: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.without_url())
    }
}

/// Everything that can abort a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid page number {0:?}")]
    InvalidPage(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

pub const GENERIC_FAILURE: &str = "Internal server error";

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "search request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_failure_is_a_bare_500() {
        let errors = [
            SearchError::InvalidPage("abc".into()),
            SearchError::Upstream(UpstreamError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
            SearchError::Upstream(UpstreamError::TooLarge(10)),
        ];
        for err in errors {
            let resp = err.into_response();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
            assert_eq!(&body[..], GENERIC_FAILURE.as_bytes());
        }
    }

    #[test]
    fn decode_error_message_has_no_body() {
        let err = serde_json::from_str::<crate::news::Results>("{\"status\": 5}").unwrap_err();
        let msg = SearchError::from(UpstreamError::from(err)).to_string();
        assert!(msg.starts_with("upstream response is not a valid envelope"));
    }
}
