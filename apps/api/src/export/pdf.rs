//! PDF writer: serializes laid-out pages with lopdf.
//!
//! Text uses the base-14 Helvetica faces with WinAnsiEncoding, so no font
//! program is embedded. Characters outside that code page are written as `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::export::paginator::{LineStyle, PageGeometry, PageLayout};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF encoding failed: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the pages into a complete PDF file.
pub fn render_pdf(pages: &[PageLayout], geometry: &PageGeometry) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let page_height_pt = PageGeometry::mm_to_pt(geometry.page_height_mm);
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = add_page(&mut doc, pages_id, page, page_height_pt)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PageGeometry::mm_to_pt(geometry.page_width_mm).into(),
                page_height_pt.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page: &PageLayout,
    page_height_pt: f32,
) -> Result<ObjectId, PdfError> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        let font = match line.style {
            LineStyle::Title | LineStyle::Heading => BOLD_FONT,
            LineStyle::Meta | LineStyle::Body => REGULAR_FONT,
        };
        // PDF origin is bottom-left; layout is top-down in millimetres.
        let x = PageGeometry::mm_to_pt(line.x_mm);
        let y = page_height_pt - PageGeometry::mm_to_pt(line.y_mm);

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![font.into(), line.size_pt.into()]));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi_bytes(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Maps text onto the WinAnsi (CP1252) code page.
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\t' => b' ',
        '\u{20AC}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2022}' => 0x95,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        _ => b'?',
    }
}
