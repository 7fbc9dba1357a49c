// src/web/handlers/linkedin_handlers.rs
use crate::linkedin::pdf_text::read_pdf_file;
use crate::linkedin::{ImportError, LinkedInImport};
use crate::session::SessionContext;
use crate::upload::UploadError;
use crate::utils::{normalize_profile_name, profile_name_from_file};
use crate::web::types::{
    DataResponse, ImportData, ImportTextRequest, ImportUploadForm, ServerConfig,
    StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use std::path::Path;
use tracing::{error, info, warn};
use uuid::Uuid;

pub async fn import_pdf_handler(
    mut upload: Form<ImportUploadForm<'_>>,
    config: &State<ServerConfig>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<ImportData>>, Json<StandardErrorResponse>> {
    let content_type = upload.profile_pdf.content_type().map(|ct| ct.to_string());
    let file_size = upload.profile_pdf.len();
    let raw_name = upload
        .profile_pdf
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string());
    let safe_name = upload
        .profile_pdf
        .raw_name()
        .and_then(|n| n.as_str())
        .map(str::to_string);

    info!(
        "Received LinkedIn PDF upload ({} bytes, type: {})",
        file_size,
        content_type.as_deref().unwrap_or("unknown")
    );

    if let Err(e) = config
        .upload
        .validate(content_type.as_deref(), raw_name.as_deref(), file_size)
    {
        warn!("Rejected LinkedIn upload: {}", e);
        return Err(upload_error_response(&e));
    }

    let temp_path = config
        .temp_dir
        .join(format!("linkedin_upload_{}.pdf", Uuid::new_v4()));

    if let Err(e) = upload.profile_pdf.copy_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        remove_staged_file(&temp_path).await;
        return Err(Json(StandardErrorResponse::new(
            "Failed to process uploaded file".to_string(),
            "FILE_SAVE_ERROR".to_string(),
            vec!["Try uploading the file again".to_string()],
            None,
        )));
    }

    let bytes = read_pdf_file(&temp_path).await;
    remove_staged_file(&temp_path).await;

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read uploaded file: {:#}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to process uploaded file".to_string(),
                "FILE_READ_ERROR".to_string(),
                vec!["Try uploading the file again".to_string()],
                None,
            )));
        }
    };

    let import = match tokio::task::spawn_blocking(move || LinkedInImport::from_pdf(&bytes)).await
    {
        Ok(Ok(import)) => import,
        Ok(Err(e)) => return Err(parse_error_response(&e, None)),
        Err(e) => {
            error!("LinkedIn import task failed: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Internal server error".to_string(),
                "INTERNAL_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )));
        }
    };

    let fallback_name = safe_name.map(|name| profile_name_from_file(&name));
    let data = import_data(import, fallback_name, sessions).await;

    info!(
        "LinkedIn PDF imported as {} (profile: {})",
        data.import_id, data.suggested_profile
    );

    Ok(Json(DataResponse::success(
        "LinkedIn profile imported successfully".to_string(),
        data,
        None,
    )))
}

pub async fn import_text_handler(
    request: Json<StandardRequest<ImportTextRequest>>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<ImportData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    if request.data.text.trim().is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Profile text is empty".to_string(),
            "EMPTY_TEXT".to_string(),
            vec!["Paste the text of your LinkedIn profile export".to_string()],
            conversation_id,
        )));
    }

    let import = LinkedInImport::from_text(&request.data.text);
    let data = import_data(import, None, sessions).await;

    info!(
        "LinkedIn text imported as {} (profile: {})",
        data.import_id, data.suggested_profile
    );

    Ok(Json(DataResponse::success(
        "LinkedIn profile imported successfully".to_string(),
        data,
        conversation_id,
    )))
}

async fn import_data(
    import: LinkedInImport,
    fallback_name: Option<String>,
    sessions: &SessionContext,
) -> ImportData {
    let imported_by = sessions.current().await.map(|session| session.email);

    let suggested_profile = if import.profile.name.trim().is_empty() {
        fallback_name.unwrap_or_else(|| "linkedin_profile".to_string())
    } else {
        normalize_profile_name(import.profile.name.trim())
    };

    ImportData {
        import_id: Uuid::new_v4(),
        imported_by,
        suggested_profile,
        profile: import.profile,
        resume: import.resume,
    }
}

/// Missing files are fine; a copy may have failed before creating one
async fn remove_staged_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove staged upload {}: {}", path.display(), e),
    }
}

fn upload_error_response(e: &UploadError) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        e.to_string(),
        e.code().to_string(),
        e.suggestions(),
        None,
    ))
}

fn parse_error_response(
    e: &ImportError,
    conversation_id: Option<String>,
) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        e.to_string(),
        e.code().to_string(),
        vec![
            "Export your profile again with LinkedIn's \"Save to PDF\"".to_string(),
            "Make sure the file is not password protected".to_string(),
        ],
        conversation_id,
    ))
}
