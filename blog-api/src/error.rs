use thiserror::Error;
use tower_api_client::Error as ApiError;

/// A request that did not come back with a 2xx response.
///
/// `status` is `None` when the request never produced a response
/// (connection refused, DNS failure, undecodable 2xx body). It is also
/// `None` for a 4xx or 5xx response whose body is not valid UTF-8:
/// the underlying client reports that as a decoding error and drops the
/// status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {path} fail: {reason}")]
pub struct RequestError {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub reason: String,
}

impl RequestError {
    pub fn new(method: impl Into<String>, path: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status,
            reason: status.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    pub(crate) fn from_api(method: String, path: String, error: ApiError) -> Self {
        match error {
            ApiError::ClientError(status, _) | ApiError::ServerError(status, _) => {
                Self::new(method, path, Some(status.as_u16()))
            }
            e => Self {
                method,
                path,
                status: None,
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_status_code() {
        let err = RequestError::new("PATCH", "/posts/3", Some(404));
        assert_eq!(err.to_string(), "PATCH /posts/3 fail: 404");
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn test_display_without_status_uses_reason() {
        let err = RequestError {
            method: "GET".to_string(),
            path: "/comments".to_string(),
            status: None,
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "GET /comments fail: connection refused");
    }
}
