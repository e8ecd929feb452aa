//! Request-scoped caller identity and trace propagation.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

/// Header carrying the correlation id for downstream calls.
pub const TRACE_ID_HEADER: &str = "x-trace-id";
/// Header set by the authenticating proxy with the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Forwarded bearer credentials.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Values that travel with one inbound request to every store and gateway call.
///
/// Authentication happens upstream. This only records what the proxy
/// established: who the caller is and which token to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub trace_id: String,
    pub user_id: Option<String>,
    pub authorization: Option<String>,
}

impl RequestContext {
    /// Context with a fresh trace id and no caller.
    pub fn anonymous() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            user_id: None,
            authorization: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_authorization(mut self, token: impl Into<String>) -> Self {
        self.authorization = Some(token.into());
        self
    }

    /// The authenticated caller, if the proxy supplied one.
    pub fn caller(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let trace_id =
            header_value(parts, TRACE_ID_HEADER).unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            trace_id,
            user_id: header_value(parts, USER_ID_HEADER),
            authorization: header_value(parts, AUTHORIZATION_HEADER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> RequestContext {
        let (mut parts, _) = request.into_parts();
        RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_all_headers() {
        let request = Request::builder()
            .header("X-Trace-ID", "trace-1")
            .header("X-User-ID", "user-1")
            .header("Authorization", "Bearer abc")
            .body(())
            .unwrap();

        let ctx = extract(request).await;

        assert_eq!(ctx.trace_id, "trace-1");
        assert_eq!(ctx.caller(), Some("user-1"));
        assert_eq!(ctx.authorization.as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_generates_trace_id_when_missing() {
        let ctx = extract(Request::builder().body(()).unwrap()).await;

        assert!(Uuid::parse_str(&ctx.trace_id).is_ok());
        assert!(ctx.caller().is_none());
        assert!(ctx.authorization.is_none());
    }

    #[tokio::test]
    async fn test_blank_user_header_is_no_caller() {
        let request = Request::builder()
            .header("X-User-ID", "   ")
            .body(())
            .unwrap();

        assert!(extract(request).await.caller().is_none());
    }
}
