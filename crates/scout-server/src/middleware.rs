use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Longest caller-supplied request id that is echoed back unchanged.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tags every request with an id: the caller's `x-request-id` when it is a
/// short non-blank string, otherwise a fresh `UUIDv4`.
///
/// The id lands in request extensions as [`RequestId`] (handlers copy it into
/// `meta.request_id`) and is echoed in the `x-request-id` response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }
    res
}
