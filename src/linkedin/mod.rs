// src/linkedin/mod.rs
//! LinkedIn PDF export import: text extraction, section segmentation,
//! field extraction and mapping onto the internal resume record.

pub mod error;
pub mod extractors;
pub mod mapper;
pub mod pdf_text;
pub mod sections;

pub use error::{ImportError, PARSE_FAILURE_MESSAGE};
pub use mapper::{ImportSource, ResumeMapper};

use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{LinkedInProfile, ResumeData};

/// Segment and extract a profile from flattened export text
pub fn parse_profile_text(text: &str) -> LinkedInProfile {
    let sections = sections::segment(text);
    let identity = extractors::extract_identity(&sections.header);
    let contact = extractors::extract_contact(&sections.header, text);

    let profile = LinkedInProfile {
        name: identity.name,
        headline: identity.headline,
        location: identity.location,
        email: contact.email,
        phone: contact.phone,
        linkedin_url: contact.linkedin_url,
        summary: extractors::extract_summary(&sections.summary),
        experience: extractors::extract_experience(&sections.experience),
        education: extractors::extract_education(&sections.education),
        skills: extractors::extract_skills(&sections.skills),
        certifications: extractors::extract_certifications(&sections.certifications),
    };

    debug!(
        "Parsed profile: {} experience, {} education, {} skills, {} certifications",
        profile.experience.len(),
        profile.education.len(),
        profile.skills.len(),
        profile.certifications.len()
    );

    profile
}

/// Full pipeline from PDF bytes to profile
pub fn import_pdf(bytes: &[u8]) -> Result<LinkedInProfile, ImportError> {
    let text = pdf_text::extract_pdf_text(bytes).map_err(|e| {
        warn!("LinkedIn PDF extraction failed: {}", e.reason());
        e
    })?;
    Ok(parse_profile_text(&text))
}

/// A parsed profile together with its mapped resume record
#[derive(Debug, Clone, Serialize)]
pub struct LinkedInImport {
    pub profile: LinkedInProfile,
    pub resume: ResumeData,
}

impl LinkedInImport {
    pub fn from_pdf(bytes: &[u8]) -> Result<Self, ImportError> {
        let profile = import_pdf(bytes)?;
        Ok(Self::from_profile(profile, ImportSource::Pdf))
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_profile(parse_profile_text(text), ImportSource::Text)
    }

    pub fn from_profile(profile: LinkedInProfile, source: ImportSource) -> Self {
        let resume = ResumeMapper::map(&profile, source);
        Self { profile, resume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "John Doe\nSoftware Engineer\nSummary Building scalable systems. Experience Acme Corp · Senior Engineer · Jan 2020 - Present 2 yrs Education MIT Bachelor's of Science in Computer Science 2016 - 2020 Skills Python JavaScript";

    const GOLDEN: &str = "Contact
jane.roe@example.com
www.linkedin.com/in/jane-roe (LinkedIn)
Jane Roe
Staff Engineer at Initech
Austin, Texas
Summary
I build reliable data platforms
and mentor engineers.
Experience
Initech · Staff Engineer · Mar 2021 - Present 3 yrs 2 mos
Austin, Texas
• Led the billing migration
• Cut infra spend 30%
Hooli · Software Engineer · Jun 2017 - Feb 2021 (3 yrs 9 mos)
Built the search indexer.
Education
University of Texas at Austin
Bachelor of Science, Computer Science · (2013 - 2017)
Top Skills
Rust
Distributed Systems
PostgreSQL
Licenses & Certifications
Certified Kubernetes Administrator · CNCF · Issued Jan 2022 · Credential ID CKA-42
Page 1 of 1";

    #[test]
    fn test_end_to_end_scenario() {
        let profile = parse_profile_text(SCENARIO);

        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.headline, "Software Engineer");
        assert_eq!(profile.summary.as_deref(), Some("Building scalable systems."));

        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert_eq!(profile.experience[0].title, "Senior Engineer");
        assert_eq!(profile.experience[0].end_date, None);
        assert_eq!(profile.experience[0].duration.as_deref(), Some("2 yrs"));

        assert_eq!(profile.education.len(), 1);
        assert!(profile.education[0].school.contains("MIT"));

        assert!(profile.skills.contains("Python"));
        assert!(profile.skills.contains("JavaScript"));
        assert!(profile.certifications.is_empty());
    }

    #[test]
    fn test_golden_text_fixture() {
        let profile = parse_profile_text(GOLDEN);

        assert_eq!(profile.name, "Jane Roe");
        assert_eq!(profile.headline, "Staff Engineer at Initech");
        assert_eq!(profile.location, "Austin, Texas");
        assert_eq!(profile.email.as_deref(), Some("jane.roe@example.com"));
        assert_eq!(
            profile.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/in/jane-roe")
        );
        assert_eq!(profile.phone, None);
        assert_eq!(
            profile.summary.as_deref(),
            Some("I build reliable data platforms and mentor engineers.")
        );

        assert_eq!(profile.experience.len(), 2);
        let current = &profile.experience[0];
        assert_eq!(current.company, "Initech");
        assert_eq!(current.title, "Staff Engineer");
        assert_eq!(current.start_date, "Mar 2021");
        assert_eq!(current.end_date, None);
        assert_eq!(current.duration.as_deref(), Some("3 yrs 2 mos"));
        assert_eq!(current.location.as_deref(), Some("Austin, Texas"));
        assert_eq!(
            current.description.as_deref(),
            Some("• Led the billing migration\n• Cut infra spend 30%")
        );
        let previous = &profile.experience[1];
        assert_eq!(previous.company, "Hooli");
        assert_eq!(previous.title, "Software Engineer");
        assert_eq!(previous.start_date, "Jun 2017");
        assert_eq!(previous.end_date.as_deref(), Some("Feb 2021"));
        assert_eq!(previous.description.as_deref(), Some("Built the search indexer."));

        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].school, "University of Texas at Austin");
        assert_eq!(profile.education[0].degree, "Bachelor of Science");
        assert_eq!(profile.education[0].field.as_deref(), Some("Computer Science"));
        assert_eq!(profile.education[0].start_date.as_deref(), Some("2013"));
        assert_eq!(profile.education[0].end_date.as_deref(), Some("2017"));

        assert_eq!(
            profile.skills.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Distributed Systems", "PostgreSQL", "Rust"]
        );

        assert_eq!(profile.certifications.len(), 1);
        assert_eq!(profile.certifications[0].name, "Certified Kubernetes Administrator");
        assert_eq!(profile.certifications[0].issuer, "CNCF");
        assert_eq!(profile.certifications[0].issue_date.as_deref(), Some("Jan 2022"));
        assert_eq!(profile.certifications[0].credential_id.as_deref(), Some("CKA-42"));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_profile_text(GOLDEN);
        let second = parse_profile_text(GOLDEN);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_reordered_sections_extract_identically() {
        let reordered = "Jane Roe
Staff Engineer at Initech
Austin, Texas
Top Skills
Rust
Distributed Systems
PostgreSQL
Licenses & Certifications
Certified Kubernetes Administrator · CNCF · Issued Jan 2022 · Credential ID CKA-42
Education
University of Texas at Austin
Bachelor of Science, Computer Science · (2013 - 2017)
Experience
Initech · Staff Engineer · Mar 2021 - Present 3 yrs 2 mos
Austin, Texas
• Led the billing migration
• Cut infra spend 30%
Hooli · Software Engineer · Jun 2017 - Feb 2021 (3 yrs 9 mos)
Built the search indexer.
Summary
I build reliable data platforms
and mentor engineers.";

        let canonical = parse_profile_text(GOLDEN);
        let shuffled = parse_profile_text(reordered);

        assert_eq!(canonical.summary, shuffled.summary);
        assert_eq!(canonical.experience, shuffled.experience);
        assert_eq!(canonical.education, shuffled.education);
        assert_eq!(canonical.skills, shuffled.skills);
        assert_eq!(canonical.certifications, shuffled.certifications);
    }

    #[test]
    fn test_missing_certifications_anchor() {
        let text = GOLDEN
            .split("Licenses & Certifications")
            .next()
            .unwrap_or_default();
        let profile = parse_profile_text(text);
        assert!(profile.certifications.is_empty());
        assert_eq!(profile.skills.len(), 3);
    }

    #[test]
    fn test_section_words_in_headline_and_summary() {
        let text = "Jane Roe\nCustomer Experience Lead\nSummary\nI teach Skills workshops.\n\
Experience\nInitech · Staff Engineer · Mar 2021 - Present\nSkills\nRust\nGo";
        let profile = parse_profile_text(text);

        assert_eq!(profile.headline, "Customer Experience Lead");
        assert_eq!(profile.summary.as_deref(), Some("I teach Skills workshops."));
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Initech");
        assert_eq!(
            profile.skills.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Go", "Rust"]
        );
    }

    #[test]
    fn test_duplicate_skill_kept_once() {
        let profile = parse_profile_text("Jane Roe\nSkills\nPython\nSQL\nPython");
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.skills.iter().filter(|s| *s == "Python").count(), 1);
    }

    #[test]
    fn test_import_rejects_invalid_pdf() {
        let err = import_pdf(b"%PDF-1.4 truncated").unwrap_err();
        assert_eq!(err.to_string(), PARSE_FAILURE_MESSAGE);
        assert!(LinkedInImport::from_pdf(b"").is_err());
    }

    #[test]
    fn test_import_from_generated_pdf() {
        let bytes = pdf_text::pdf_fixture(&[
            &[
                "Jane Roe",
                "Staff Engineer",
                "Austin, Texas",
                "Experience",
                "Initech",
                "Staff Engineer",
                "Mar 2021 - Present",
            ],
            &["Skills", "Rust", "Go"],
        ]);

        let import = LinkedInImport::from_pdf(&bytes).unwrap();
        assert_eq!(import.profile.name, "Jane Roe");
        assert_eq!(import.profile.location, "Austin, Texas");
        assert_eq!(import.profile.experience.len(), 1);
        assert_eq!(import.profile.experience[0].company, "Initech");
        assert!(import.profile.experience[0].is_current());
        assert!(import.profile.skills.contains("Go"));
        assert_eq!(import.resume.metadata.source, "linkedin_pdf");
    }

    #[test]
    fn test_import_bundle_maps_resume() {
        let import = LinkedInImport::from_text(SCENARIO);
        assert_eq!(import.resume.personal_info.name, "John Doe");
        assert_eq!(import.resume.work_experience.len(), 1);
        assert!(import.resume.work_experience[0].current);
        assert_eq!(import.resume.metadata.source, "linkedin_text");
    }
}
