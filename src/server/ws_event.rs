/// Centralized helpers for WebSocket event and HTTP error payloads.
///
/// Use these helpers to keep all client-visible frames consistent:
/// every event carries a name and a data object, every rejection a
/// stable code.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::{Value, json};

use crate::game::error::MoveError;

/// Formats a WebSocket event frame as a JSON string.
pub fn ws_event(event: &str, data: Value) -> String {
    json!({ "event": event, "data": data }).to_string()
}

/// Rejection frame for a refused move or teleport. Sent to the
/// originating connection only, never broadcast.
pub fn ws_illegal_move(err: &MoveError) -> String {
    ws_event(
        "illegalMove",
        json!({ "code": err.code(), "message": err.to_string() }),
    )
}

/// Frame sent to a session that is being disconnected by moderation.
pub fn ws_banned() -> String {
    ws_event("banned", json!({}))
}

/// Returns an HTTP error response with a JSON body, used when a
/// connection is refused before the WebSocket upgrade.
pub fn http_error_response(code: &str, message: &str, status: StatusCode) -> HttpResponse {
    let body = json!({ "error": { "code": code, "message": message } }).to_string();
    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}
