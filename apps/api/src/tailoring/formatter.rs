//! Suggestion Formatter: flattens a `SuggestionResult` into the stored transcript.
//!
//! The transcript is the canonical persisted form. Its five labels are the only
//! section boundaries `export::sections::parse_transcript` recognizes.

use serde::{Deserialize, Serialize};

use crate::tailoring::models::SuggestionResult;

/// Separator used when joining list fields.
pub const LIST_SEPARATOR: &str = ", ";

/// The five transcript section labels, in transcript order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionHeader {
    Summary,
    SkillsToAdd,
    ExperienceToAdd,
    ProjectsToAdd,
    GeneralSuggestions,
}

impl SectionHeader {
    pub const ALL: [SectionHeader; 5] = [
        SectionHeader::Summary,
        SectionHeader::SkillsToAdd,
        SectionHeader::ExperienceToAdd,
        SectionHeader::ProjectsToAdd,
        SectionHeader::GeneralSuggestions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionHeader::Summary => "Summary",
            SectionHeader::SkillsToAdd => "Skills to Add",
            SectionHeader::ExperienceToAdd => "Experience to Add",
            SectionHeader::ProjectsToAdd => "Projects to Add",
            SectionHeader::GeneralSuggestions => "General Suggestions",
        }
    }
}

/// Renders the five labeled sections in fixed order.
pub fn format_transcript(result: &SuggestionResult) -> String {
    SectionHeader::ALL
        .iter()
        .map(|header| format!("{}:\n{}", header.label(), section_body(result, *header)))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

fn section_body(result: &SuggestionResult, header: SectionHeader) -> String {
    match header {
        SectionHeader::Summary => result.summary.clone(),
        SectionHeader::SkillsToAdd => result.skills_to_add.join(LIST_SEPARATOR),
        SectionHeader::ExperienceToAdd => result.experience_to_add.join(LIST_SEPARATOR),
        SectionHeader::ProjectsToAdd => result.projects_to_add.join(LIST_SEPARATOR),
        SectionHeader::GeneralSuggestions => result.general_suggestions.join(LIST_SEPARATOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SuggestionResult {
        SuggestionResult {
            summary: "Strong backend profile.".to_string(),
            skills_to_add: vec!["Rust".to_string(), "Go".to_string()],
            experience_to_add: vec!["Led an on-call rotation".to_string()],
            projects_to_add: vec![],
            general_suggestions: vec!["Quantify impact".to_string(), "Trim older roles".to_string()],
        }
    }

    #[test]
    fn test_transcript_has_fixed_layout() {
        let expected = "Summary:\nStrong backend profile.\n\n\
                        Skills to Add:\nRust, Go\n\n\
                        Experience to Add:\nLed an on-call rotation\n\n\
                        Projects to Add:\n\n\n\
                        General Suggestions:\nQuantify impact, Trim older roles";
        assert_eq!(format_transcript(&sample()), expected);
    }

    #[test]
    fn test_section_order_is_fixed() {
        let transcript = format_transcript(&sample());
        let positions: Vec<usize> = SectionHeader::ALL
            .iter()
            .map(|h| transcript.find(&format!("{}:", h.label())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_formatting_is_deterministic() {
        assert_eq!(format_transcript(&sample()), format_transcript(&sample()));
    }

    #[test]
    fn test_trailing_empty_section_is_trimmed() {
        let result = SuggestionResult {
            summary: "x".to_string(),
            ..SuggestionResult::default()
        };
        let transcript = format_transcript(&result);
        assert!(transcript.ends_with("General Suggestions:"));
    }
}
