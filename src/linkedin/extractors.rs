// src/linkedin/extractors.rs
//! Heuristic field extractors, one per entity type.
//!
//! Every extractor is a pure function of its section text. A pattern that
//! does not match leaves the field empty; entries missing mandatory fields
//! are removed by an explicit `is_complete` filter, never reported.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::types::{
    LinkedInCertification, LinkedInEducation, LinkedInExperience, UNKNOWN_ISSUER,
};

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?";
const DURATION: &str = r"\d+\s+(?:yrs?|years?)(?:\s+\d+\s+(?:mos?|months?))?|\d+\s+(?:mos?|months?)";
const MAX_SKILL_LEN: usize = 60;
const MAX_LOCATION_LEN: usize = 60;

fn date_pattern() -> String {
    format!(r"(?:{MONTH}\s+)?(?:19|20)\d{{2}}")
}

fn range_pattern() -> String {
    let date = date_pattern();
    format!(r"(?P<start>{date})\s*[-–—]\s*(?P<end>Present|{date})")
}

static DOTTED_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<company>[^·\n]*?)\s*·\s*(?P<title>[^·\n]*?)\s*·\s*{}(?:\s*\(?(?P<duration>{DURATION})\)?)?",
        range_pattern()
    ))
    .expect("Invalid dotted experience regex")
});

static DATE_RANGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^{}(?:\s*\(?(?P<duration>{DURATION})\)?)?$",
        range_pattern()
    ))
    .expect("Invalid date range line regex")
});

static EDUCATION_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?:·\s*)?\(?{}\)?", range_pattern()))
        .expect("Invalid education range regex")
});

static SINGLE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}$", date_pattern())).expect("Invalid single date regex")
});

static LOCATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][\w .'-]*(?:,\s*[A-Z][\w .'-]*){1,2}$").expect("Invalid location regex")
});

static DEGREE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Bachelor|Master|Associate|Doctor|Ph\.?D|MBA|BSc|MSc|BEng|MEng|B\.S\.|M\.S\.|B\.A\.|M\.A\.|Diploma|Certificate)",
    )
    .expect("Invalid degree keyword regex")
});

static GRADE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bGrade:?\s*(?P<grade>[^·\n,]+)").expect("Invalid grade regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("Invalid email regex")
});

static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/(?P<slug>[A-Za-z0-9_%-]+)")
        .expect("Invalid LinkedIn URL regex")
});

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{8,}\d").expect("Invalid phone regex"));

static CONTACT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((?:LinkedIn|Mobile|Home|Work|Company|Personal|Other|Blog|Portfolio)\)")
        .expect("Invalid contact tag regex")
});

// ===== Contact & Identity =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Email and profile URL are searched in the whole text, phone in the header only
pub fn extract_contact(header: &str, full_text: &str) -> ContactInfo {
    let email = EMAIL
        .find(header)
        .or_else(|| EMAIL.find(full_text))
        .map(|m| m.as_str().to_string());

    let linkedin_url = LINKEDIN_URL
        .captures(header)
        .or_else(|| LINKEDIN_URL.captures(full_text))
        .and_then(|caps| caps.name("slug"))
        .map(|slug| format!("https://www.linkedin.com/in/{}", slug.as_str()));

    ContactInfo {
        email,
        phone: find_phone(header),
        linkedin_url,
    }
}

fn find_phone(text: &str) -> Option<String> {
    PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
            (10..=15).contains(&digits)
        })
        .map(|s| s.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub headline: String,
    pub location: String,
}

fn is_contact_line(line: &str) -> bool {
    line.eq_ignore_ascii_case("contact")
        || EMAIL.is_match(line)
        || LINKEDIN_URL.is_match(line)
        || CONTACT_TAG.is_match(line)
        || line.starts_with("www.")
        || line.starts_with("http")
        || find_phone(line).is_some()
}

/// Name, headline and location are the first three non-contact header lines
pub fn extract_identity(header: &str) -> Identity {
    let mut lines = header
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_contact_line(line))
        .map(|line| line.to_string());

    Identity {
        name: lines.next().unwrap_or_default(),
        headline: lines.next().unwrap_or_default(),
        location: lines.next().unwrap_or_default(),
    }
}

pub fn extract_summary(section: &str) -> Option<String> {
    let collapsed = collapse_whitespace(section);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

// ===== Experience =====

#[derive(Debug, Clone, Default)]
struct ExperienceCandidate {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    description: Option<String>,
    duration: Option<String>,
}

impl ExperienceCandidate {
    fn is_complete(&self) -> bool {
        has_text(&self.title) && has_text(&self.company)
    }

    fn into_entry(self) -> LinkedInExperience {
        LinkedInExperience {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            location: self.location,
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date,
            description: self.description,
            duration: self.duration,
        }
    }

    /// Pull a leading `City, Region` line out of the description
    fn split_location(&mut self) {
        let Some(description) = self.description.take() else {
            return;
        };

        let mut lines = description.lines();
        let first = lines.next().unwrap_or_default().trim();
        if first.len() <= MAX_LOCATION_LEN && LOCATION_LINE.is_match(first) {
            self.location = Some(first.to_string());
            self.description = non_empty(lines.collect::<Vec<_>>().join("\n").trim());
        } else {
            self.description = Some(description);
        }
    }
}

pub fn extract_experience(section: &str) -> Vec<LinkedInExperience> {
    let mut candidates = dotted_experience_candidates(section);
    if candidates.is_empty() {
        candidates = line_experience_candidates(section);
    }

    candidates
        .into_iter()
        .filter(ExperienceCandidate::is_complete)
        .map(ExperienceCandidate::into_entry)
        .collect()
}

/// `Company · Title · Start - End [Duration]`, description up to the next entry
fn dotted_experience_candidates(section: &str) -> Vec<ExperienceCandidate> {
    let matches: Vec<_> = DOTTED_EXPERIENCE.captures_iter(section).collect();

    // Where each entry's company really starts once glued description text is cut off
    let company_starts: Vec<usize> = matches
        .iter()
        .enumerate()
        .map(|(index, caps)| {
            let Some(company) = caps.name("company") else {
                return caps.get(0).map_or(0, |m| m.start());
            };
            if index > 0 && is_glued(section, company.start()) {
                if let Some(offset) = last_sentence_break(company.as_str()) {
                    return company.start() + offset;
                }
            }
            company.start()
        })
        .collect();

    matches
        .iter()
        .enumerate()
        .map(|(index, caps)| {
            let whole_end = caps.get(0).map_or(0, |m| m.end());
            let next_start = company_starts
                .get(index + 1)
                .copied()
                .unwrap_or(section.len());
            let company_end = caps.name("company").map_or(company_starts[index], |m| m.end());

            let mut candidate = ExperienceCandidate {
                company: non_empty(section[company_starts[index]..company_end].trim()),
                title: capture(caps, "title"),
                start_date: capture(caps, "start"),
                end_date: end_date(caps),
                duration: capture(caps, "duration"),
                description: non_empty(section[whole_end..next_start].trim()),
                ..Default::default()
            };
            candidate.split_location();
            candidate
        })
        .collect()
}

/// True when the entry shares its line with the text before it
fn is_glued(section: &str, company_start: usize) -> bool {
    let before = section[..company_start].trim_end_matches([' ', '\t']);
    !before.is_empty() && !before.ends_with('\n')
}

/// Byte offset just past the last `. `, `! ` or `? ` in an inline company run
fn last_sentence_break(text: &str) -> Option<usize> {
    [". ", "! ", "? "]
        .iter()
        .filter_map(|separator| text.rfind(separator).map(|at| at + separator.len()))
        .max()
}

/// Export layout with company, title and date range on separate lines
fn line_experience_candidates(section: &str) -> Vec<ExperienceCandidate> {
    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let range_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| DATE_RANGE_LINE.is_match(line))
        .map(|(index, _)| index)
        .collect();

    range_lines
        .iter()
        .enumerate()
        .filter_map(|(position, &index)| {
            let caps = DATE_RANGE_LINE.captures(lines[index])?;
            let body_end = range_lines
                .get(position + 1)
                .map_or(lines.len(), |&next| next.saturating_sub(2))
                .max(index + 1);

            let mut candidate = ExperienceCandidate {
                title: index.checked_sub(1).map(|i| lines[i].to_string()),
                company: index.checked_sub(2).map(|i| lines[i].to_string()),
                start_date: capture(&caps, "start"),
                end_date: end_date(&caps),
                duration: capture(&caps, "duration"),
                description: non_empty(&lines[index + 1..body_end].join("\n")),
                ..Default::default()
            };
            candidate.split_location();
            Some(candidate)
        })
        .collect()
}

fn end_date(caps: &regex::Captures<'_>) -> Option<String> {
    capture(caps, "end").filter(|end| !end.eq_ignore_ascii_case("present"))
}

// ===== Education =====

#[derive(Debug, Clone, Default)]
struct EducationCandidate {
    school: Option<String>,
    degree: Option<String>,
    field: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    grade: Option<String>,
}

impl EducationCandidate {
    fn is_complete(&self) -> bool {
        has_text(&self.school)
    }

    fn into_entry(self) -> LinkedInEducation {
        LinkedInEducation {
            school: self.school.unwrap_or_default(),
            degree: self.degree.unwrap_or_default(),
            field: self.field,
            start_date: self.start_date,
            end_date: self.end_date,
            grade: self.grade,
        }
    }

    fn from_body(body: &str) -> Self {
        let body = body.trim().trim_end_matches(['·', ',']).trim();
        let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

        let (school, degree_line) = match (lines.next(), lines.clone().next()) {
            (Some(first), Some(_)) => (first.to_string(), lines.collect::<Vec<_>>().join(" ")),
            (Some(only), None) => split_school_and_degree(only),
            (None, _) => (String::new(), String::new()),
        };

        let (degree_line, grade) = take_grade(&degree_line);
        let (degree, field) = split_degree_and_field(&degree_line);

        Self {
            school: non_empty(&school),
            degree: non_empty(&degree),
            field,
            grade,
            ..Default::default()
        }
    }
}

pub fn extract_education(section: &str) -> Vec<LinkedInEducation> {
    let mut candidates = Vec::new();
    let mut cursor = 0;

    for caps in EDUCATION_RANGE.captures_iter(section) {
        let Some(whole) = caps.get(0) else { continue };
        let mut candidate = EducationCandidate::from_body(&section[cursor..whole.start()]);
        candidate.start_date = capture(&caps, "start");
        candidate.end_date = capture(&caps, "end");
        candidates.push(candidate);
        cursor = whole.end();
    }

    let trailing = section[cursor..].trim();
    if !trailing.is_empty() {
        candidates.push(EducationCandidate::from_body(trailing));
    }

    candidates
        .into_iter()
        .filter(EducationCandidate::is_complete)
        .map(EducationCandidate::into_entry)
        .collect()
}

fn split_school_and_degree(line: &str) -> (String, String) {
    match DEGREE_KEYWORD.find(line) {
        Some(m) => (
            line[..m.start()].trim().to_string(),
            line[m.start()..].trim().to_string(),
        ),
        None => (line.to_string(), String::new()),
    }
}

fn take_grade(degree_line: &str) -> (String, Option<String>) {
    match GRADE.captures(degree_line) {
        Some(caps) => {
            let grade = capture(&caps, "grade");
            let stripped = GRADE.replace(degree_line, "");
            let cleaned = stripped.trim().trim_end_matches(['·', ',']).trim().to_string();
            (cleaned, grade)
        }
        None => (degree_line.to_string(), None),
    }
}

fn split_degree_and_field(degree_line: &str) -> (String, Option<String>) {
    let degree_line = degree_line.trim();
    if let Some((degree, field)) = degree_line.split_once(',') {
        return (degree.trim().to_string(), non_empty(field.trim()));
    }
    if let Some((degree, field)) = degree_line.split_once(" in ") {
        return (degree.trim().to_string(), non_empty(field.trim()));
    }
    (degree_line.to_string(), None)
}

// ===== Skills =====

pub fn extract_skills(section: &str) -> BTreeSet<String> {
    const DELIMITERS: [char; 5] = ['\n', '·', ',', '•', '|'];

    let tokens: Vec<&str> = if section.contains(DELIMITERS) {
        section.split(DELIMITERS).collect()
    } else {
        section.split_whitespace().collect()
    };

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|skill| !skill.is_empty() && skill.chars().count() <= MAX_SKILL_LEN)
        .map(|skill| skill.to_string())
        .collect()
}

// ===== Certifications =====

#[derive(Debug, Clone, Default)]
struct CertificationCandidate {
    name: Option<String>,
    issuer: Option<String>,
    issue_date: Option<String>,
    credential_id: Option<String>,
}

impl CertificationCandidate {
    fn is_complete(&self) -> bool {
        has_text(&self.name)
    }

    fn into_entry(self) -> LinkedInCertification {
        LinkedInCertification {
            name: self.name.unwrap_or_default(),
            issuer: self
                .issuer
                .unwrap_or_else(|| UNKNOWN_ISSUER.to_string()),
            issue_date: self.issue_date,
            credential_id: self.credential_id,
        }
    }

    /// Returns false when the part is not a recognized attribute
    fn apply_attribute(&mut self, part: &str) -> bool {
        if let Some(date) = strip_prefix_ci(part, "Issued") {
            self.issue_date = non_empty(date);
            true
        } else if let Some(id) = strip_prefix_ci(part, "Credential ID") {
            self.credential_id = non_empty(id);
            true
        } else if SINGLE_DATE.is_match(part) {
            self.issue_date = Some(part.to_string());
            true
        } else {
            false
        }
    }
}

pub fn extract_certifications(section: &str) -> Vec<LinkedInCertification> {
    let mut candidates: Vec<CertificationCandidate> = Vec::new();

    for line in section.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line
            .split('·')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let Some(first) = parts.first() else { continue };

        // Continuation lines attach to the previous certification
        if let Some(previous) = candidates.last_mut() {
            if previous.apply_attribute(first) {
                for part in &parts[1..] {
                    previous.apply_attribute(part);
                }
                continue;
            }
        }

        let mut candidate = CertificationCandidate {
            name: Some(first.to_string()),
            ..Default::default()
        };
        for part in &parts[1..] {
            if !candidate.apply_attribute(part) && candidate.issuer.is_none() {
                candidate.issuer = Some(part.to_string());
            }
        }
        candidates.push(candidate);
    }

    candidates
        .into_iter()
        .filter(CertificationCandidate::is_complete)
        .map(CertificationCandidate::into_entry)
        .collect()
}

// ===== Helpers =====

fn capture(caps: &regex::Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).and_then(|m| non_empty(m.as_str().trim()))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn strip_prefix_ci<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(value[prefix.len()..].trim_start_matches(':').trim())
    } else {
        None
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
