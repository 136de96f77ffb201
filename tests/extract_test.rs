//! Integration tests for span and text extraction on generated PDFs.

mod common;

use papermorph::{
    build_style_profile, Error, ExtractOptions, PageSelection, PdfExtractor, Role,
};

#[test]
fn test_open_from_bytes() {
    let extractor = PdfExtractor::from_bytes(&common::input_pdf()).unwrap();
    assert_eq!(extractor.version(), "1.5");
    assert_eq!(extractor.page_count(), 2);
}

#[test]
fn test_open_from_file_and_reader() {
    let data = common::sample_pdf();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, &data).unwrap();

    let from_path = PdfExtractor::open(file.path()).unwrap();
    let from_reader = PdfExtractor::from_reader(std::io::Cursor::new(data)).unwrap();
    assert_eq!(from_path.page_count(), 1);
    assert_eq!(
        from_path.extract_spans().unwrap(),
        from_reader.extract_spans().unwrap()
    );
}

#[test]
fn test_spans_carry_font_size_and_page() {
    let spans = PdfExtractor::from_bytes(&common::input_pdf())
        .unwrap()
        .extract_spans()
        .unwrap();
    assert_eq!(spans.len(), 7);

    let title = &spans[0];
    assert_eq!(title.text, "Introduction");
    assert_eq!(title.font.as_deref(), Some("Helvetica-Bold"));
    assert_eq!(title.rounded_size(), Some(24));
    assert_eq!(title.page, 1);

    let body = &spans[1];
    assert_eq!(body.text, "This document describes the plan.");
    assert_eq!(body.font.as_deref(), Some("Helvetica"));
    assert_eq!(body.rounded_size(), Some(10));

    let last = spans.last().unwrap();
    assert_eq!(last.text, "Closing remarks.");
    assert_eq!(last.page, 2);
}

#[test]
fn test_compressed_and_plain_streams() {
    let compressed = common::input_pdf_with(common::Layout {
        compress: true,
        ..Default::default()
    });
    let plain = common::input_pdf();
    let contains = |data: &[u8], needle: &[u8]| data.windows(needle.len()).any(|w| w == needle);
    assert!(contains(&compressed, b"/FlateDecode"));
    assert!(!contains(&plain, b"/FlateDecode"));

    let from_compressed = PdfExtractor::from_bytes(&compressed)
        .unwrap()
        .extract_spans()
        .unwrap();
    let from_plain = PdfExtractor::from_bytes(&plain)
        .unwrap()
        .extract_spans()
        .unwrap();
    assert_eq!(from_plain.len(), 7);
    assert_eq!(from_compressed, from_plain);
}

#[test]
fn test_word_runs_merge_into_line_spans() {
    let split = common::input_pdf_with(common::Layout {
        split_words: true,
        ..Default::default()
    });
    let spans = PdfExtractor::from_bytes(&split)
        .unwrap()
        .extract_spans()
        .unwrap();
    let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Introduction",
            "This document describes the plan.",
            "It has two pages.",
            "- first point",
            "- second point",
            "Details",
            "Closing remarks.",
        ]
    );
}

#[test]
fn test_page_selection() {
    let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![2]));
    let spans = PdfExtractor::from_bytes_with_options(&common::input_pdf(), options)
        .unwrap()
        .extract_spans()
        .unwrap();
    assert_eq!(spans.len(), 2);
    assert!(spans.iter().all(|s| s.page == 2));
}

#[test]
fn test_text_blocks_one_per_page() {
    let blocks = PdfExtractor::from_bytes(&common::input_pdf())
        .unwrap()
        .extract_text_blocks()
        .unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].page, 1);
    assert!(blocks[0].text.contains("Introduction"));
    assert!(blocks[1].text.contains("Closing remarks."));
}

#[test]
fn test_profile_from_extracted_sample() {
    let spans = PdfExtractor::from_bytes(&common::sample_pdf())
        .unwrap()
        .extract_spans()
        .unwrap();
    let profile = build_style_profile(&spans);

    assert_eq!(profile.top_font(), Some("Helvetica"));
    let thresholds: Vec<u32> = profile.heading_rules.iter().map(|r| r.min_size).collect();
    assert_eq!(thresholds, vec![24, 18, 12]);
    assert_eq!(profile.size_map.get(&16), Some(&Role::Heading(3)));

    let list_style = profile.list_style.unwrap();
    assert_eq!(list_style.bullets, vec!['-']);
    assert!(!list_style.numbered);
}

#[test]
fn test_not_a_pdf() {
    assert!(matches!(
        PdfExtractor::from_bytes(b"GIF89a"),
        Err(Error::UnknownFormat)
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        PdfExtractor::open("/nonexistent/papermorph.pdf"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_page_out_of_range() {
    let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![1, 5]));
    let extractor =
        PdfExtractor::from_bytes_with_options(&common::input_pdf(), options.clone()).unwrap();
    assert!(matches!(
        extractor.extract_spans(),
        Err(Error::PageOutOfRange(5, 2))
    ));

    let lenient = PdfExtractor::from_bytes_with_options(&common::input_pdf(), options.lenient())
        .unwrap()
        .extract_spans()
        .unwrap();
    assert!(lenient.iter().all(|s| s.page == 1));
    assert_eq!(lenient.len(), 5);
}
