pub mod cli;
pub mod environment;
pub mod linkedin;
pub mod session;
pub mod types;
pub mod upload;
pub mod utils;
pub mod web;

pub use environment::EnvironmentConfig;
pub use linkedin::{import_pdf, parse_profile_text, ImportError, LinkedInImport};
pub use session::{SessionContext, UserSession};
pub use types::{LinkedInProfile, ResumeData, ResumeFormat};
pub use upload::{UploadError, UploadValidator};
pub use web::{build_rocket, start_web_server};
