// src/upload.rs
//! Caller-side checks on an uploaded LinkedIn export before it reaches the pipeline

use thiserror::Error;

use crate::utils::validate_file_extension;

pub const PDF_MIME: &str = "application/pdf";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const MIB: u64 = 1024 * 1024;

/// Human-readable size limit, `10MB` for whole mebibytes
pub fn describe_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

fn limit_label(bytes: &u64) -> String {
    describe_limit(*bytes)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only PDF files are supported. Received: {received}")]
    InvalidFormat { received: String },
    #[error("File size exceeds {} limit", limit_label(.limit))]
    TooLarge { size: u64, limit: u64 },
    #[error("Uploaded file is empty")]
    Empty,
}

impl UploadError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::TooLarge { .. } => "FILE_TOO_LARGE",
            Self::Empty => "EMPTY_FILE",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFormat { .. } => vec![
                "Upload the PDF from LinkedIn's \"Save to PDF\" option".to_string(),
                "Make sure the file ends in .pdf".to_string(),
            ],
            Self::TooLarge { limit, .. } => vec![format!(
                "Use a smaller file (max {})",
                describe_limit(*limit)
            )],
            Self::Empty => vec!["Try uploading the file again".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UploadValidator {
    max_bytes: u64,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// A PDF content type wins; otherwise the file name must end in `.pdf`
    pub fn validate(
        &self,
        content_type: Option<&str>,
        file_name: Option<&str>,
        size: u64,
    ) -> Result<(), UploadError> {
        let is_pdf_type = content_type.is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_MIME))
        });
        let is_pdf_name = file_name.is_some_and(|name| validate_file_extension(name, &["pdf"]).is_ok());

        if !is_pdf_type && !is_pdf_name {
            return Err(UploadError::InvalidFormat {
                received: content_type.unwrap_or("unknown").to_string(),
            });
        }

        if size == 0 {
            return Err(UploadError::Empty);
        }

        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        Ok(())
    }
}
