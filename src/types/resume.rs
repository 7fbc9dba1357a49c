// src/types/resume.rs
//! Internal resume record handed to downstream persistence

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Internal Resume Structure =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub metadata: ResumeMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String, // empty when current
    pub current: bool,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub source: String, // "linkedin_pdf" or "linkedin_text"
    pub version: String,
}

/// Output encodings for a rendered record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl FromStr for ResumeFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => anyhow::bail!("Unsupported output format: {}. Use json, yaml or toml", other),
        }
    }
}

impl fmt::Display for ResumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        };
        f.write_str(name)
    }
}

impl ResumeFormat {
    /// Render any serializable record in this format
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value).context("Failed to render JSON"),
            Self::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
            Self::Toml => toml::to_string_pretty(value).context("Failed to render TOML"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "Jane Roe".to_string(),
                title: "Data Engineer".to_string(),
                ..Default::default()
            },
            work_experience: vec![Experience {
                company: "Initech".to_string(),
                title: "Engineer".to_string(),
                start_date: "2019".to_string(),
                current: true,
                achievements: vec!["Shipped the TPS pipeline".to_string()],
                ..Default::default()
            }],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            metadata: ResumeMetadata {
                source: "linkedin_text".to_string(),
                version: "1".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!("JSON".parse::<ResumeFormat>().unwrap(), ResumeFormat::Json);
        assert_eq!("yml".parse::<ResumeFormat>().unwrap(), ResumeFormat::Yaml);
        assert_eq!("toml".parse::<ResumeFormat>().unwrap(), ResumeFormat::Toml);
        assert!("xml".parse::<ResumeFormat>().is_err());
    }

    #[test]
    fn test_render_toml_contains_tables() {
        let rendered = ResumeFormat::Toml.render(&sample()).unwrap();
        assert!(rendered.contains("[personal_info]"));
        assert!(rendered.contains("[[work_experience]]"));
        assert!(rendered.contains("Shipped the TPS pipeline"));
    }

    #[test]
    fn test_render_json_and_yaml_keep_values() {
        let json = ResumeFormat::Json.render(&sample()).unwrap();
        let back: ResumeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());

        let yaml = ResumeFormat::Yaml.render(&sample()).unwrap();
        assert!(yaml.contains("company: Initech"));
    }
}
