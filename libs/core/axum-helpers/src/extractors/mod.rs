//! Custom extractors for Axum handlers.

pub mod request_context;
pub mod validated_json;

pub use request_context::{AUTHORIZATION_HEADER, RequestContext, TRACE_ID_HEADER, USER_ID_HEADER};
pub use validated_json::ValidatedJson;
