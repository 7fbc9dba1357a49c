// src/web/handlers/session_handlers.rs
use crate::session::{SessionContext, UserSession};
use crate::web::types::{
    ActionResponse, DataResponse, SignInRequest, StandardErrorResponse, StandardRequest,
    WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;

pub async fn sign_in_handler(
    request: Json<StandardRequest<SignInRequest>>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<UserSession>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let StandardRequest { data, .. } = request.into_inner();

    if data.user_id.trim().is_empty() || !data.email.contains('@') {
        return Err(Json(StandardErrorResponse::new(
            "A user id and a valid email are required".to_string(),
            "INVALID_SESSION".to_string(),
            vec!["Provide both user_id and email".to_string()],
            conversation_id,
        )));
    }

    let mut session = UserSession::new(data.user_id.trim(), data.email.trim());
    if let Some(display_name) = data.display_name.filter(|n| !n.trim().is_empty()) {
        session = session.with_display_name(display_name);
    }

    sessions.sign_in(session.clone()).await;

    Ok(Json(DataResponse::success(
        format!("Signed in as {}", session.email),
        session,
        conversation_id,
    )))
}

pub async fn sign_out_handler(sessions: &State<SessionContext>) -> Json<ActionResponse> {
    let message = match sessions.sign_out().await {
        Some(previous) => format!("Signed out {}", previous.email),
        None => "No active session".to_string(),
    };

    Json(
        ActionResponse::success(message, "signed_out".to_string(), None)
            .with_next_actions(vec!["Sign in to attribute new imports".to_string()]),
    )
}

pub async fn current_session_handler(
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<UserSession>>, Json<StandardErrorResponse>> {
    match sessions.current().await {
        Some(session) => Ok(Json(DataResponse::success(
            format!("Signed in as {}", session.email),
            session,
            None,
        ))),
        None => Err(Json(StandardErrorResponse::new(
            "No active session".to_string(),
            "NOT_SIGNED_IN".to_string(),
            vec!["Sign in with POST /api/session".to_string()],
            None,
        ))),
    }
}
