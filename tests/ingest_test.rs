//! Integration tests for file ingestion and rendering.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use slidezone::ingest::{self, parse_docling_file};
use slidezone::{render, Error, JsonFormat, LayoutConfig, LayoutEngine, Strategy};

/// Docling export of a three-page lecture in bottom-left coordinates.
fn lecture_export() -> serde_json::Value {
    let page = |n: u32| json!({"size": {"width": 960.0, "height": 540.0}, "page_no": n});
    let prov = |n: u32, l: f32, t: f32, r: f32, b: f32| {
        json!([{"page_no": n, "bbox": {"l": l, "t": t, "r": r, "b": b, "coord_origin": "BOTTOMLEFT"}}])
    };

    let mut texts = Vec::new();
    for n in 1..=3 {
        texts.push(json!({"label": "section_header", "text": "Graph Algorithms", "prov": prov(n, 50.0, 460.0, 900.0, 420.0)}));
        texts.push(json!({"label": "text", "text": format!("Body text for page {}", n), "prov": prov(n, 50.0, 300.0, 430.0, 200.0)}));
        texts.push(json!({"label": "page_footer", "text": "TU Example", "prov": prov(n, 50.0, 20.0, 300.0, 5.0)}));
    }

    json!({
        "structure_analysis": {
            "pages": {"1": page(1), "2": page(2), "3": page(3)},
            "texts": texts,
            "pictures": [
                {"label": "picture", "prov": prov(2, 500.0, 400.0, 900.0, 100.0)}
            ]
        }
    })
}

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_docling_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "lecture.json", &lecture_export().to_string());

    let layout = LayoutEngine::new().analyze_file(&path).unwrap();
    assert_eq!(layout.meta.file_name.as_deref(), Some("lecture.json"));
    assert_eq!(layout.meta.detected_title, "Graph Algorithms");
    assert_eq!(layout.meta.detected_footer, "TU Example");
    assert_eq!(layout.slides.len(), 3);

    for slide in &layout.slides {
        let zones = &slide.layout.zones;
        assert_eq!(slide.layout.strategy, Strategy::Columns);
        assert_eq!(
            zones.left_column,
            vec![format!("Body text for page {}", slide.number)]
        );
        assert!(zones.top_content.is_empty());
        assert!(zones.flow_content.is_empty());
    }

    let second = layout.slide(2).unwrap();
    assert_eq!(
        second.layout.zones.right_column,
        vec!["[[IMAGE: extracted_media/image_1.png]]"]
    );
}

#[test]
fn test_parse_docling_file_sets_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "deck.json", &lecture_export().to_string());

    let deck = parse_docling_file(&path).unwrap();
    assert_eq!(deck.meta.file_name.as_deref(), Some("deck.json"));
    assert_eq!(deck.slide_count(), 3);
    // Recurring detection only runs in load_deck.
    assert!(deck.meta.detected_title.is_empty());
}

#[test]
fn test_shape_deck_file() {
    let dir = tempfile::tempdir().unwrap();
    let deck = json!({
        "slide_width": 12192000,
        "slide_height": 6858000,
        "slides": [{"shapes": [
            {"shape": "group", "children": [
                {"shape": "leaf", "content": {"kind": "text", "text": "Left text"},
                 "frame": {"left": 609600, "top": 2743200, "width": 4572000, "height": 1371600}},
                {"shape": "leaf", "content": {"kind": "image", "path": "extracted_media/image_1.png"},
                 "frame": {"left": 7315200, "top": 2743200, "width": 3657600, "height": 2743200}}
            ]}
        ]}]
    });
    let path = write_temp(&dir, "shapes.json", &deck.to_string());

    let layout = LayoutEngine::new().sequential().analyze_file(&path).unwrap();
    let zones = &layout.slides[0].layout.zones;
    assert_eq!(zones.left_column, vec!["Left text"]);
    assert_eq!(zones.right_column, vec!["[[IMAGE: extracted_media/image_1.png]]"]);
}

#[test]
fn test_empty_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = LayoutConfig::default();

    let empty = write_temp(&dir, "empty.json", "   ");
    assert!(matches!(
        ingest::load_deck(&empty, &config),
        Err(Error::InvalidInput(_))
    ));

    let broken = write_temp(&dir, "broken.json", "{\"texts\": [");
    assert!(matches!(
        ingest::load_deck(&broken, &config),
        Err(Error::Json(_))
    ));

    let not_object = write_temp(&dir, "array.json", "[1, 2]");
    assert!(matches!(
        ingest::load_deck(&not_object, &config),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_rendered_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "lecture.json", &lecture_export().to_string());
    let layout = LayoutEngine::new().analyze_file(&path).unwrap();

    let json = render::to_json(&layout, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["slides"][1]["layout"]["strategy"], "columns");
    assert_eq!(value["slides"][1]["elements"][3]["type"], "image");
    assert_eq!(value["slides"][1]["elements"][3]["forced_pos"], "right");

    let text = render::to_instructions(&layout);
    assert!(text.contains("Recurring title: Graph Algorithms"));
    assert!(text.contains("Slide 2 [columns]"));
    assert!(text.contains("-> (Place on RIGHT side)"));
}

#[test]
fn test_slide_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "lecture.json", &lecture_export().to_string());
    let layout = LayoutEngine::new().analyze_file(&path).unwrap();

    let err = layout.slide(9).unwrap_err();
    assert!(matches!(err, Error::SlideOutOfRange(9, 3)));
}
