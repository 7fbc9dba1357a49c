// src/linkedin/mapper.rs
//! Maps a parsed LinkedIn profile onto the internal resume record

use crate::types::resume::{
    Certification, Education, Experience, PersonalInfo, ResumeData, ResumeMetadata,
};
use crate::types::{LinkedInProfile, UNKNOWN_ISSUER};

pub const RESUME_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Pdf,
    Text,
}

impl ImportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "linkedin_pdf",
            Self::Text => "linkedin_text",
        }
    }
}

pub struct ResumeMapper;

impl ResumeMapper {
    /// Every profile field has a counterpart; absent values become empty
    pub fn map(profile: &LinkedInProfile, source: ImportSource) -> ResumeData {
        let personal_info = PersonalInfo {
            name: profile.name.clone(),
            title: profile.headline.clone(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            location: profile.location.clone(),
            linkedin: profile.linkedin_url.clone().unwrap_or_default(),
            summary: profile.summary.clone().unwrap_or_default(),
        };

        let work_experience = profile
            .experience
            .iter()
            .map(|exp| {
                let description = exp.description.clone().unwrap_or_default();
                Experience {
                    company: exp.company.clone(),
                    title: exp.title.clone(),
                    location: exp.location.clone().unwrap_or_default(),
                    start_date: exp.start_date.clone(),
                    end_date: exp.end_date.clone().unwrap_or_default(),
                    current: exp.is_current(),
                    duration: exp.duration.clone().unwrap_or_default(),
                    achievements: derive_achievements(&description),
                    description,
                }
            })
            .collect();

        let education = profile
            .education
            .iter()
            .map(|edu| Education {
                institution: edu.school.clone(),
                degree: edu.degree.clone(),
                field: edu.field.clone().unwrap_or_default(),
                start_date: edu.start_date.clone().unwrap_or_default(),
                end_date: edu.end_date.clone().unwrap_or_default(),
                gpa: edu.grade.clone().unwrap_or_default(),
            })
            .collect();

        let certifications = profile
            .certifications
            .iter()
            .map(|cert| Certification {
                name: cert.name.clone(),
                issuer: if cert.issuer.trim().is_empty() {
                    UNKNOWN_ISSUER.to_string()
                } else {
                    cert.issuer.clone()
                },
                date: cert.issue_date.clone().unwrap_or_default(),
                credential_id: cert.credential_id.clone().unwrap_or_default(),
            })
            .collect();

        ResumeData {
            personal_info,
            work_experience,
            education,
            skills: profile.skills.iter().cloned().collect(),
            certifications,
            metadata: ResumeMetadata {
                source: source.as_str().to_string(),
                version: RESUME_SCHEMA_VERSION.to_string(),
            },
        }
    }
}

/// Split a description into bullet points, stripping list markers
pub fn derive_achievements(description: &str) -> Vec<String> {
    description
        .split(['\n', '•'])
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '–', '·'])
                .trim()
                .to_string()
        })
        .filter(|point| !point.is_empty())
        .collect()
}
