//! Minimal PDF fixtures built with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text placed on a page.
pub struct TextLine {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
    pub x: i64,
    pub y: i64,
}

impl TextLine {
    pub fn regular(text: &'static str, size: i64, x: i64, y: i64) -> Self {
        Self {
            text,
            size,
            bold: false,
            x,
            y,
        }
    }

    pub fn bold(text: &'static str, size: i64, x: i64, y: i64) -> Self {
        Self {
            text,
            size,
            bold: true,
            x,
            y,
        }
    }
}

/// Build a US Letter PDF with one content stream per page.
pub fn build_pdf(pages: &[Vec<TextLine>]) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|lines| lines.iter().flat_map(show_line).collect())
        .collect::<Vec<_>>();
    build_pdf_from_operations(pages)
}

/// Text object operators that draw one line at its position.
pub fn show_line(line: &TextLine) -> Vec<Operation> {
    let font = if line.bold { "F2" } else { "F1" };
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), line.size.into()]),
        Operation::new("Td", vec![line.x.into(), line.y.into()]),
        Operation::new("Tj", vec![Object::string_literal(line.text)]),
        Operation::new("ET", vec![]),
    ]
}

/// `q <a b c d e f> cm`, opening a transformed graphics state.
pub fn push_transform(matrix: [f32; 6]) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new("cm", matrix.iter().map(|&n| Object::Real(n)).collect()),
    ]
}

/// Build a US Letter PDF from raw content operations, one list per page.
///
/// Pages get `F1` (Helvetica) and `F2` (Helvetica-Bold) as font resources.
pub fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => regular,
                    "F2" => bold,
                },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).expect("save pdf");
    data
}

/// A two-page quarterly report.
///
/// Page 1 holds the title, an H1, a sectioned H2, body text and a page
/// counter. Page 2 holds a chapter label and body text.
pub fn quarterly_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            TextLine::bold("Annual Report 2024", 24, 250, 720),
            TextLine::bold("Overview of Results", 16, 72, 660),
            TextLine::regular("2.1 Regional Sales", 12, 72, 620),
            TextLine::regular("the quarter closed with strong results.", 10, 72, 590),
            TextLine::regular("Page 1 of 2", 10, 280, 40),
        ],
        vec![
            TextLine::regular("Chapter 3 Outlook", 10, 72, 720),
            TextLine::regular("the outlook remains positive.", 10, 72, 690),
        ],
    ])
}
