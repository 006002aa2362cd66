//! Transcript parser: rebuilds the section view from a stored transcript.
//!
//! A line that starts with one of the five section labels (any case) followed by
//! `:` opens a section. Text after the colon on that line belongs to the body.
//! Anything before the first recognized label is ignored; labels that never
//! appear are simply absent from the view.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::tailoring::formatter::SectionHeader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    pub header: SectionHeader,
    pub title: &'static str,
    pub body: String,
}

/// Section name → body, in the order the sections appear in the transcript.
///
/// Serializes as a JSON object keyed by section title, e.g.
/// `{"Summary": "Good fit.", "Skills to Add": "Rust, Go"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSuggestionView {
    sections: Vec<ParsedSection>,
}

impl ParsedSuggestionView {
    pub fn get(&self, header: SectionHeader) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.header == header)
            .map(|s| s.body.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedSection> {
        self.sections.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// A repeated label overwrites the earlier body but keeps its position.
    fn insert(&mut self, header: SectionHeader, body: String) {
        match self.sections.iter_mut().find(|s| s.header == header) {
            Some(existing) => existing.body = body,
            None => self.sections.push(ParsedSection {
                header,
                title: header.label(),
                body,
            }),
        }
    }
}

impl Serialize for ParsedSuggestionView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.title, &section.body)?;
        }
        map.end()
    }
}

pub fn parse_transcript(text: &str) -> ParsedSuggestionView {
    let mut view = ParsedSuggestionView::default();
    let mut current: Option<(SectionHeader, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((header, rest)) = match_header(line) {
            if let Some((open, body)) = current.take() {
                view.insert(open, body.join("\n").trim().to_string());
            }
            current = Some((header, vec![rest]));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((open, body)) = current {
        view.insert(open, body.join("\n").trim().to_string());
    }

    view
}

/// Returns the header and the remainder after its colon if `line` opens a section.
fn match_header(line: &str) -> Option<(SectionHeader, &str)> {
    SectionHeader::ALL.iter().find_map(|header| {
        let label = header.label();
        let prefix = line.get(..label.len())?;
        if !prefix.eq_ignore_ascii_case(label) {
            return None;
        }
        line[label.len()..]
            .strip_prefix(':')
            .map(|rest| (*header, rest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::formatter::format_transcript;
    use crate::tailoring::models::SuggestionResult;

    #[test]
    fn test_parses_two_section_transcript() {
        let view = parse_transcript("Summary:\nGood fit.\n\nSkills to Add:\nRust, Go");
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(SectionHeader::Summary), Some("Good fit."));
        assert_eq!(view.get(SectionHeader::SkillsToAdd), Some("Rust, Go"));
        assert_eq!(view.get(SectionHeader::GeneralSuggestions), None);
    }

    #[test]
    fn test_format_then_parse_round_trips() {
        let result = SuggestionResult {
            summary: "Strong fit for platform work.\nLead with infra.".to_string(),
            skills_to_add: vec!["Kubernetes".to_string(), "Terraform".to_string()],
            experience_to_add: vec![],
            projects_to_add: vec!["Open-source CLI".to_string()],
            general_suggestions: vec!["Use active verbs".to_string(), "One page".to_string()],
        };
        let view = parse_transcript(&format_transcript(&result));

        assert_eq!(view.len(), 5);
        assert_eq!(view.get(SectionHeader::Summary), Some(result.summary.as_str()));
        assert_eq!(
            view.get(SectionHeader::SkillsToAdd),
            Some(result.skills_to_add.join(", ").as_str())
        );
        assert_eq!(view.get(SectionHeader::ExperienceToAdd), Some(""));
        assert_eq!(view.get(SectionHeader::ProjectsToAdd), Some("Open-source CLI"));
        assert_eq!(
            view.get(SectionHeader::GeneralSuggestions),
            Some("Use active verbs, One page")
        );
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let view = parse_transcript("SUMMARY:\nok\ngeneral suggestions:\nmore");
        assert_eq!(view.get(SectionHeader::Summary), Some("ok"));
        assert_eq!(view.get(SectionHeader::GeneralSuggestions), Some("more"));
    }

    #[test]
    fn test_text_after_colon_joins_body() {
        let view = parse_transcript("Summary: inline start\ncontinued");
        assert_eq!(view.get(SectionHeader::Summary), Some("inline start\ncontinued"));
    }

    #[test]
    fn test_preamble_and_unknown_headers_are_ignored() {
        let view = parse_transcript("Report v1\nEducation:\nBSc\nProjects to Add:\nA CLI");
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(SectionHeader::ProjectsToAdd), Some("A CLI"));
    }

    #[test]
    fn test_label_without_colon_is_not_a_header() {
        let view = parse_transcript("Summary:\nSummary of work\nSkills to Add\nstill summary");
        assert_eq!(view.len(), 1);
        assert_eq!(
            view.get(SectionHeader::Summary),
            Some("Summary of work\nSkills to Add\nstill summary")
        );
    }

    #[test]
    fn test_sections_keep_transcript_order() {
        let view = parse_transcript("General Suggestions:\nz\nSummary:\na");
        let order: Vec<SectionHeader> = view.iter().map(|s| s.header).collect();
        assert_eq!(
            order,
            vec![SectionHeader::GeneralSuggestions, SectionHeader::Summary]
        );
    }

    #[test]
    fn test_empty_transcript_has_no_sections() {
        assert!(parse_transcript("").is_empty());
    }

    #[test]
    fn test_view_serializes_as_title_keyed_object() {
        let view = parse_transcript("Skills to Add:\nRust, Go\n\nSummary:\nGood fit.");
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(json, r#"{"Skills to Add":"Rust, Go","Summary":"Good fit."}"#);
    }
}
