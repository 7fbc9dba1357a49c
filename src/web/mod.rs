// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::environment::EnvironmentConfig;
use crate::session::{SessionContext, UserSession};
use crate::upload::{describe_limit, UploadValidator, DEFAULT_MAX_UPLOAD_BYTES};
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

/// Multipart overhead allowed on top of the configured file size
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/linkedin/import", data = "<upload>")]
pub async fn import_linkedin_pdf(
    upload: Form<ImportUploadForm<'_>>,
    config: &State<ServerConfig>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<ImportData>>, Json<StandardErrorResponse>> {
    handlers::import_pdf_handler(upload, config, sessions).await
}

#[post("/linkedin/import-text", data = "<request>")]
pub async fn import_linkedin_text(
    request: Json<StandardRequest<ImportTextRequest>>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<ImportData>>, Json<StandardErrorResponse>> {
    handlers::import_text_handler(request, sessions).await
}

#[post("/session", data = "<request>")]
pub async fn sign_in(
    request: Json<StandardRequest<SignInRequest>>,
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<UserSession>>, Json<StandardErrorResponse>> {
    handlers::sign_in_handler(request, sessions).await
}

#[delete("/session")]
pub async fn sign_out(sessions: &State<SessionContext>) -> Json<ActionResponse> {
    handlers::sign_out_handler(sessions).await
}

#[get("/session")]
pub async fn current_session(
    sessions: &State<SessionContext>,
) -> Result<Json<DataResponse<UserSession>>, Json<StandardErrorResponse>> {
    handlers::current_session_handler(sessions).await
}

#[get("/health")]
pub async fn health(sessions: &State<SessionContext>) -> Json<TextResponse> {
    handlers::health_handler(sessions).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large(request: &Request<'_>) -> Json<StandardErrorResponse> {
    let limit = request
        .rocket()
        .state::<ServerConfig>()
        .map_or(DEFAULT_MAX_UPLOAD_BYTES, |config| config.upload.max_bytes());

    Json(StandardErrorResponse::new(
        "Uploaded file is too large".to_string(),
        "FILE_TOO_LARGE".to_string(),
        vec![format!("Use a smaller file (max {})", describe_limit(limit))],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request is missing required fields".to_string(),
        "INVALID_REQUEST".to_string(),
        vec![
            "Send the PDF in the 'profile_pdf' form field".to_string(),
            "Send profile text as {\"text\": ...}".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

pub fn build_rocket(config: &EnvironmentConfig, sessions: SessionContext) -> Rocket<Build> {
    let form_limit = (config.max_upload_bytes + FORM_OVERHEAD_BYTES).bytes();
    let limits = Limits::default()
        .limit("file", form_limit)
        .limit("data-form", form_limit);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("limits", limits));

    let server_config = ServerConfig {
        upload: UploadValidator::new(config.max_upload_bytes),
        temp_dir: config.temp_dir(),
    };

    rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .manage(sessions)
        .register(
            "/api",
            catchers![bad_request, payload_too_large, unprocessable_entity, internal_error],
        )
        .mount(
            "/api",
            routes![
                import_linkedin_pdf,
                import_linkedin_text,
                sign_in,
                sign_out,
                current_session,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: EnvironmentConfig) -> Result<()> {
    config.ensure_directories().await?;

    info!("Starting LinkedIn import API server on port {}", config.port);
    info!(
        "Upload limit: {} bytes, staging in {}",
        config.max_upload_bytes,
        config.temp_dir().display()
    );

    build_rocket(&config, SessionContext::new())
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkedin::PARSE_FAILURE_MESSAGE;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    const SCENARIO: &str = "John Doe\nSoftware Engineer\nSummary Building scalable systems. Experience Acme Corp · Senior Engineer · Jan 2020 - Present 2 yrs Education MIT Bachelor's of Science in Computer Science 2016 - 2020 Skills Python JavaScript";
    const BOUNDARY: &str = "linkedin-import-boundary";

    async fn client(temp_dir: &std::path::Path) -> Client {
        client_with(EnvironmentConfig {
            temp_dir: Some(temp_dir.to_path_buf()),
            ..EnvironmentConfig::default()
        })
        .await
    }

    async fn client_with(config: EnvironmentConfig) -> Client {
        Client::tracked(build_rocket(&config, SessionContext::new()))
            .await
            .unwrap()
    }

    fn multipart(file_name: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"profile_pdf\"; filename=\"{f}\"\r\nContent-Type: {c}\r\n\r\n",
            b = BOUNDARY,
            f = file_name,
            c = content_type,
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn upload(client: &Client, body: Vec<u8>) -> Value {
        client
            .post("/api/linkedin/import")
            .header(ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY)))
            .body(body)
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["type"], "text");
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_import_text_records_signed_in_user() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let signed_in = client
            .post("/api/session")
            .json(&json!({ "user_id": "u-7", "email": "jane@example.com" }))
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(signed_in["data"]["email"], "jane@example.com");

        let body = client
            .post("/api/linkedin/import-text")
            .json(&json!({ "text": SCENARIO, "conversation_id": "c-1" }))
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["conversation_id"], "c-1");
        assert_eq!(body["data"]["imported_by"], "jane@example.com");
        assert_eq!(body["data"]["suggested_profile"], "john_doe");
        assert_eq!(body["data"]["profile"]["name"], "John Doe");
        assert_eq!(body["data"]["profile"]["experience"][0]["company"], "Acme Corp");
        assert_eq!(body["data"]["resume"]["metadata"]["source"], "linkedin_text");
        assert_eq!(body["data"]["resume"]["work_experience"][0]["current"], true);
    }

    #[tokio::test]
    async fn test_import_text_rejects_blank_text() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let body = client
            .post("/api/linkedin/import-text")
            .json(&json!({ "text": "   " }))
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "EMPTY_TEXT");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let body = client
            .get("/api/session")
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(body["error_code"], "NOT_SIGNED_IN");

        client
            .post("/api/session")
            .json(&json!({ "user_id": "u-1", "email": "a@example.com", "display_name": "A" }))
            .dispatch()
            .await;
        let body = client
            .get("/api/session")
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(body["data"]["display_name"], "A");

        let body = client
            .delete("/api/session")
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(body["action"], "signed_out");

        let body = client
            .post("/api/session")
            .json(&json!({ "user_id": "", "email": "nobody" }))
            .dispatch()
            .await
            .into_json::<Value>()
            .await
            .unwrap();
        assert_eq!(body["error_code"], "INVALID_SESSION");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let body = upload(&client, multipart("notes.txt", "text/plain", b"hello")).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "INVALID_FORMAT");
    }

    #[tokio::test]
    async fn test_upload_unreadable_pdf_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;

        let body = upload(
            &client,
            multipart("Profile.pdf", "application/pdf", b"this is not a pdf"),
        )
        .await;
        assert_eq!(body["error_code"], "PARSE_ERROR");
        assert_eq!(body["error"], PARSE_FAILURE_MESSAGE);

        // staged copy is removed
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_pdf_imports_profile() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;
        let pdf = crate::linkedin::pdf_text::pdf_fixture(&[
            &["Jane Roe", "Staff Engineer", "Experience", "Initech", "Staff Engineer", "Mar 2021 - Present"],
            &["Skills", "Rust"],
        ]);

        let body = upload(&client, multipart("Profile.pdf", "application/pdf", &pdf)).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["suggested_profile"], "jane_roe");
        assert_eq!(body["data"]["profile"]["experience"][0]["company"], "Initech");
        assert_eq!(body["data"]["resume"]["metadata"]["source"], "linkedin_pdf");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_staging_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-created");
        let client = client(&missing).await;

        let body = upload(
            &client,
            multipart("Profile.pdf", "application/pdf", b"%PDF-1.4"),
        )
        .await;
        assert_eq!(body["error_code"], "FILE_SAVE_ERROR");
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn test_too_large_catcher_uses_configured_limit() {
        let client = client_with(EnvironmentConfig {
            max_upload_bytes: 2 * 1024 * 1024,
            ..EnvironmentConfig::default()
        })
        .await;

        let request = client.post("/api/linkedin/import");
        let body = payload_too_large(request.inner());
        assert_eq!(body.error_code, "FILE_TOO_LARGE");
        assert_eq!(body.suggestions, vec!["Use a smaller file (max 2MB)".to_string()]);
    }
}
