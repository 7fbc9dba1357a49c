// src/types/mod.rs
pub mod profile;
pub mod resume;

pub use profile::{
    LinkedInCertification, LinkedInEducation, LinkedInExperience, LinkedInProfile,
    UNKNOWN_ISSUER,
};
pub use resume::{ResumeData, ResumeFormat};
