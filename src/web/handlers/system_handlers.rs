// src/web/handlers/system_handlers.rs
use crate::session::SessionContext;
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use rocket::State;

pub async fn health_handler(sessions: &State<SessionContext>) -> Json<TextResponse> {
    let message = match sessions.current().await {
        Some(session) => format!("LinkedIn import service is running (signed in: {})", session.email),
        None => "LinkedIn import service is running".to_string(),
    };

    Json(TextResponse::success(message, None))
}
