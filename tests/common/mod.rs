//! In-memory PDF fixtures for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A line of text: (text, size, font resource).
///
/// Font resources: `F1` is Helvetica, `F2` is Helvetica-Bold.
pub type Line<'a> = (&'a str, f32, &'a str);

/// How [`build_pdf_with`] lays out content streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    /// Flate-compress each content stream.
    pub compress: bool,
    /// Show each word of a line with its own `Tj`, keeping the leading space.
    pub split_words: bool,
}

/// Build a PDF with one page per entry, each line in its own BT/ET block.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    build_pdf_with(pages, Layout::default())
}

pub fn build_pdf_with(pages: &[Vec<Line<'_>>], layout: Layout) -> Vec<u8> {
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
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760;
        for (text, size, font) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![(*font).into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            if layout.split_words {
                for (i, word) in text.split(' ').enumerate() {
                    let run = if i == 0 { word.to_string() } else { format!(" {word}") };
                    operations.push(Operation::new("Tj", vec![Object::string_literal(run)]));
                }
            } else {
                operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            }
            operations.push(Operation::new("ET", vec![]));
            y -= 30;
        }
        let content = Content { operations };
        let mut stream = Stream::new(dictionary! {}, content.encode().expect("encode content"));
        if layout.compress {
            stream.compress().expect("compress content");
        }
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// A short report: title 24pt bold, section 16pt bold, body 12pt.
///
/// Thresholds of its profile: h1 >= 24, h2 >= 18, h3 >= 12.
pub fn sample_pdf() -> Vec<u8> {
    build_pdf(&[vec![
        ("Annual Report", 24.0, "F2"),
        ("Overview", 16.0, "F2"),
        ("Revenue grew in every region.", 12.0, "F1"),
        ("Costs fell slightly.", 12.0, "F1"),
        ("- Margins improved", 12.0, "F1"),
        ("- Headcount was flat", 12.0, "F1"),
    ]])
}

/// Two pages of content to restyle, body at 10pt.
pub fn input_pdf() -> Vec<u8> {
    input_pdf_with(Layout::default())
}

pub fn input_pdf_with(layout: Layout) -> Vec<u8> {
    build_pdf_with(
        &[
            vec![
                ("Introduction", 24.0, "F2"),
                ("This document describes the plan.", 10.0, "F1"),
                ("It has two pages.", 10.0, "F1"),
                ("- first point", 10.0, "F1"),
                ("- second point", 10.0, "F1"),
            ],
            vec![
                ("Details", 20.0, "F2"),
                ("Closing remarks.", 10.0, "F1"),
            ],
        ],
        layout,
    )
}
