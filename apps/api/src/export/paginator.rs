//! Report pagination: places the report's lines onto fixed-size pages.
//!
//! Coordinates are millimetres from the top-left corner; `y_mm` is the text
//! baseline. The vertical cursor is checked before every heading and before
//! every wrapped body line, each against its own break threshold:
//! - heading: break when the cursor is at or past `heading_break_mm`
//! - body line: break when the cursor is at or past `body_break_mm`
//!
//! `heading_break_mm + heading_advance_mm < body_break_mm`, so a heading that fits
//! always has room for its first body line on the same page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::export::font_metrics::{FontMetricTable, HELVETICA};
use crate::export::sections::ParsedSuggestionView;

pub const REPORT_TITLE: &str = "Resume Suggestion Report";

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page dimensions, font sizes, and vertical rhythm of the exported report.
#[derive(Debug, Clone, Serialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub top_mm: f32,
    pub text_width_mm: f32,
    pub heading_break_mm: f32,
    pub body_break_mm: f32,
    pub title_size_pt: f32,
    pub meta_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    pub title_advance_mm: f32,
    pub meta_advance_mm: f32,
    /// Gap after the last metadata line, before the first section.
    pub meta_block_gap_mm: f32,
    pub heading_advance_mm: f32,
    pub body_advance_mm: f32,
    pub section_gap_mm: f32,
}

/// A4 portrait with a 10 mm left/top margin and a 180 mm text column.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_left_mm: 10.0,
        top_mm: 10.0,
        text_width_mm: 180.0,
        heading_break_mm: 270.0,
        body_break_mm: 280.0,
        title_size_pt: 16.0,
        meta_size_pt: 12.0,
        heading_size_pt: 13.0,
        body_size_pt: 11.0,
        title_advance_mm: 10.0,
        meta_advance_mm: 8.0,
        meta_block_gap_mm: 10.0,
        heading_advance_mm: 7.0,
        body_advance_mm: 6.0,
        section_gap_mm: 5.0,
    }
}

impl PageGeometry {
    /// Usable body line width in em units at the body font size.
    pub fn body_width_em(&self) -> f32 {
        self.text_width_mm * PT_PER_MM / self.body_size_pt
    }

    pub fn mm_to_pt(mm: f32) -> f32 {
        mm * PT_PER_MM
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Title,
    Meta,
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub style: LineStyle,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Everything the report shows, independent of where it came from.
#[derive(Debug, Clone)]
pub struct ReportContent {
    pub full_name: String,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
    pub sections: ParsedSuggestionView,
}

/// `March 4, 2025` style date used on the report.
pub fn format_report_date(created_at: DateTime<Utc>) -> String {
    created_at.format("%B %-d, %Y").to_string()
}

/// Download filename: `<name>-<job title>.pdf`, whitespace runs collapsed to `_`.
pub fn report_filename(full_name: &str, job_title: &str) -> String {
    format!(
        "{}-{}.pdf",
        collapse_whitespace(full_name),
        collapse_whitespace(job_title)
    )
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![PageLayout::default()],
            y: geometry.top_mm,
        }
    }

    fn break_if_at(&mut self, threshold: f32) {
        if self.y >= threshold {
            self.pages.push(PageLayout::default());
            self.y = self.geometry.top_mm;
        }
    }

    fn place(&mut self, text: String, style: LineStyle, size_pt: f32, advance: f32) {
        let line = PlacedLine {
            text,
            style,
            size_pt,
            x_mm: self.geometry.margin_left_mm,
            y_mm: self.y,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += advance;
    }
}

/// Lays out the full report. Always returns at least one page.
pub fn layout_report(content: &ReportContent, geometry: &PageGeometry) -> Vec<PageLayout> {
    layout_with_metrics(content, geometry, &HELVETICA)
}

fn layout_with_metrics(
    content: &ReportContent,
    geometry: &PageGeometry,
    metrics: &FontMetricTable,
) -> Vec<PageLayout> {
    let g = geometry;
    let mut cursor = Cursor::new(g);

    cursor.place(
        REPORT_TITLE.to_string(),
        LineStyle::Title,
        g.title_size_pt,
        g.title_advance_mm,
    );
    cursor.place(
        format!("Name: {}", content.full_name),
        LineStyle::Meta,
        g.meta_size_pt,
        g.meta_advance_mm,
    );
    cursor.place(
        format!("Job Title: {}", content.job_title),
        LineStyle::Meta,
        g.meta_size_pt,
        g.meta_advance_mm,
    );
    cursor.place(
        format!("Created At: {}", format_report_date(content.created_at)),
        LineStyle::Meta,
        g.meta_size_pt,
        g.meta_block_gap_mm,
    );

    let width_em = g.body_width_em();
    for section in content.sections.iter().filter(|s| !s.body.trim().is_empty()) {
        cursor.break_if_at(g.heading_break_mm);
        cursor.place(
            section.title.to_string(),
            LineStyle::Heading,
            g.heading_size_pt,
            g.heading_advance_mm,
        );

        for line in metrics.wrap_text(&section.body, width_em) {
            cursor.break_if_at(g.body_break_mm);
            cursor.place(line, LineStyle::Body, g.body_size_pt, g.body_advance_mm);
        }

        cursor.y += g.section_gap_mm;
    }

    cursor.pages
}
