//! Report export: rebuilds a saved transcript into sections and renders it as a paginated PDF.

pub mod font_metrics;
pub mod handlers;
pub mod paginator;
pub mod pdf;
pub mod sections;

pub use paginator::{default_page_geometry, PageGeometry};

use crate::models::suggestion::SuggestionRecord;
use paginator::{layout_report, report_filename, ReportContent};
use pdf::{render_pdf, PdfError};
use sections::parse_transcript;

/// A rendered report, ready to download.
#[derive(Debug)]
pub struct RenderedDocument {
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// Renders a saved suggestion as a PDF report. CPU-bound.
pub fn render_document(
    record: &SuggestionRecord,
    geometry: &PageGeometry,
) -> Result<RenderedDocument, PdfError> {
    let content = ReportContent {
        full_name: record.full_name.clone(),
        job_title: record.job_title.clone(),
        created_at: record.created_at,
        sections: parse_transcript(&record.suggestion_text),
    };
    let pages = layout_report(&content, geometry);
    let bytes = render_pdf(&pages, geometry)?;

    Ok(RenderedDocument {
        filename: report_filename(&record.full_name, &record.job_title),
        page_count: pages.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_render_document() {
        let record = SuggestionRecord {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            job_title: "Site Reliability Engineer".to_string(),
            suggestion_text: "Summary:\nGood fit.\n\nSkills to Add:\nTerraform".to_string(),
            resume_id: None,
            full_name: "Unknown".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        };
        let doc = render_document(&record, &default_page_geometry()).unwrap();
        assert_eq!(doc.filename, "Unknown-Site_Reliability_Engineer.pdf");
        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF"));
    }
}
