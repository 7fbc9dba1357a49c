// src/linkedin/sections.rs
//! Splits flattened profile text into named sections by anchor phrases

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading-line and inline patterns per section, in `SectionKind::ALL` order
static ANCHORS: Lazy<Vec<(SectionKind, Regex, Regex)>> = Lazy::new(|| {
    SectionKind::ALL
        .iter()
        .map(|kind| {
            let words = kind.anchor_words();
            let heading = Regex::new(&format!(r"(?m)^[ \t]*{words}[ \t]*$"))
                .expect("Invalid heading anchor regex");
            let inline =
                Regex::new(&format!(r"\b{words}\b")).expect("Invalid inline anchor regex");
            (*kind, heading, inline)
        })
        .collect()
});
static PAGE_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*Page \d+ of \d+[ \t]*$").expect("Invalid page footer regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        Self::Summary,
        Self::Experience,
        Self::Education,
        Self::Skills,
        Self::Certifications,
    ];

    /// Longer alternatives first so they win at the same position
    fn anchor_words(&self) -> &'static str {
        match self {
            Self::Summary => "(?:Summary)",
            Self::Experience => "(?:Experience)",
            Self::Education => "(?:Education)",
            Self::Skills => "(?:Top Skills|Skills)",
            Self::Certifications => "(?:Licenses & Certifications|Certifications)",
        }
    }
}

/// Per-section text; an absent anchor leaves its section empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    /// Everything before the first anchor
    pub header: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub certifications: String,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Summary => &self.summary,
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Skills => &self.skills,
            SectionKind::Certifications => &self.certifications,
        }
    }

    fn slot(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Summary => &mut self.summary,
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Skills => &mut self.skills,
            SectionKind::Certifications => &mut self.certifications,
        }
    }
}

/// Clean up extraction artefacts before segmentation
pub fn normalize_text(raw: &str) -> String {
    let unified = raw
        .replace("\r\n", "\n")
        .replace(['\r', '\u{c}'], "\n")
        .replace('\u{a0}', " ");

    PAGE_FOOTER.replace_all(&unified, "").into_owned()
}

struct Anchor {
    kind: SectionKind,
    start: usize,
    end: usize,
}

pub fn segment(raw: &str) -> Sections {
    let text = normalize_text(raw);

    // A heading on its own line beats an inline mention of the same word
    let mut anchors: Vec<Anchor> = ANCHORS
        .iter()
        .filter_map(|(kind, heading, inline)| {
            heading
                .find(&text)
                .or_else(|| inline.find(&text))
                .map(|m| Anchor {
                    kind: *kind,
                    start: m.start(),
                    end: m.end(),
                })
        })
        .collect();
    anchors.sort_by_key(|anchor| anchor.start);

    let mut sections = Sections::default();
    let header_end = anchors.first().map_or(text.len(), |anchor| anchor.start);
    sections.header = text[..header_end].trim().to_string();

    for (index, anchor) in anchors.iter().enumerate() {
        let section_end = anchors
            .get(index + 1)
            .map_or(text.len(), |next| next.start);
        *sections.slot(anchor.kind) = text[anchor.end..section_end].trim().to_string();
    }

    sections
}
