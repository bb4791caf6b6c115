use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
///
/// # Response Format
/// ```json
/// {
///   "status": "pong",
///   "version": "0.1.0"
/// }
/// ```
///
/// Used by uptime checks; it does not touch the delegate store or the
/// text generation providers.
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong", "version": env!("CARGO_PKG_VERSION") }))
}
