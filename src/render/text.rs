//! Plain-text layout instructions.
//!
//! A human- and prompt-readable description of each slide's zones, followed
//! by the geometry and placement of every image.

use std::fmt::Write;

use crate::model::{DeckLayout, Element, ForcedPos, SlideAnalysis, Strategy};

const RULE_WIDE: usize = 50;
const RULE_NARROW: usize = 30;

/// Render layout instructions for a whole deck.
pub fn to_instructions(layout: &DeckLayout) -> String {
    let mut out = String::new();
    let wide = "=".repeat(RULE_WIDE);

    out.push_str(&wide);
    out.push('\n');
    out.push_str("--- LAYOUT DATA ---\n");
    out.push_str("Coordinates are fractions (0.0 to 1.0). x=0.0 (Left), y=0.0 (Top)\n");
    if let Some(name) = &layout.meta.file_name {
        let _ = writeln!(out, "Source: {}", name);
    }
    if !layout.meta.detected_title.is_empty() {
        let _ = writeln!(out, "Recurring title: {}", layout.meta.detected_title);
    }
    if !layout.meta.detected_footer.is_empty() {
        let _ = writeln!(out, "Recurring footer: {}", layout.meta.detected_footer);
    }
    out.push_str(&wide);
    out.push('\n');

    for slide in &layout.slides {
        out.push_str(&slide_instructions(slide));
        out.push_str(&"-".repeat(RULE_NARROW));
        out.push('\n');
    }

    out.push_str(&wide);
    out.push('\n');
    out
}

/// Render layout instructions for one slide.
pub fn slide_instructions(slide: &SlideAnalysis) -> String {
    let mut out = String::new();
    let strategy = match slide.layout.strategy {
        Strategy::Columns => "columns",
        Strategy::StandardFlow => "standard_flow",
    };
    let _ = writeln!(out, "Slide {} [{}]", slide.number, strategy);

    let zones = &slide.layout.zones;
    if zones.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (label, entries) in [
        ("TOP", &zones.top_content),
        ("LEFT COLUMN", &zones.left_column),
        ("RIGHT COLUMN", &zones.right_column),
        ("FLOW", &zones.flow_content),
    ] {
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}:", label);
        for entry in entries {
            write_entry(&mut out, entry);
        }
    }

    for element in &slide.elements {
        if let Element::Image {
            geometry: Some(rect),
            path,
            forced_pos,
        } = element
        {
            let _ = write!(
                out,
                "  [IMAGE] {}: Pos_X={:.3}, Pos_Y={:.3} | Width={:.3}, Height={:.3}",
                path, rect.x, rect.y, rect.w, rect.h
            );
            if let Some(pos) = forced_pos {
                let _ = write!(out, " -> ({})", placement_hint(*pos));
            }
            out.push('\n');
        }
    }
    out
}

fn write_entry(out: &mut String, entry: &str) {
    let mut lines = entry.lines();
    if let Some(first) = lines.next() {
        let _ = writeln!(out, "    - {}", first);
    }
    for line in lines {
        let _ = writeln!(out, "      {}", line);
    }
}

fn placement_hint(pos: ForcedPos) -> &'static str {
    match pos {
        ForcedPos::Left => "Place on LEFT side",
        ForcedPos::Right => "Place on RIGHT side",
        ForcedPos::Top => "Place above the body",
        ForcedPos::Bottom => "Place below the body",
        ForcedPos::Center => "Center in the body",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeckMeta, Rect, SlideLayout, Zones};

    fn analysis() -> SlideAnalysis {
        SlideAnalysis {
            number: 4,
            elements: vec![
                Element::text("Intro", Some(Rect::new(0.05, 0.3, 0.4, 0.1))),
                Element::Image {
                    geometry: Some(Rect::new(0.6, 0.3, 0.3, 0.4)),
                    path: "extracted_media/image_3.png".to_string(),
                    forced_pos: Some(ForcedPos::Right),
                },
            ],
            layout: SlideLayout {
                strategy: Strategy::Columns,
                zones: Zones {
                    top_content: vec!["Heading".to_string()],
                    left_column: vec!["Intro\nsecond line".to_string()],
                    right_column: vec!["[[IMAGE: extracted_media/image_3.png]]".to_string()],
                    flow_content: Vec::new(),
                },
            },
        }
    }

    #[test]
    fn test_slide_instructions() {
        let text = slide_instructions(&analysis());
        assert!(text.starts_with("Slide 4 [columns]\n"));
        assert!(text.contains("  TOP:\n    - Heading\n"));
        assert!(text.contains("  LEFT COLUMN:\n    - Intro\n      second line\n"));
        assert!(!text.contains("FLOW:"));
        assert!(text.contains("-> (Place on RIGHT side)"));
        assert!(text.contains("Pos_X=0.600"));
    }

    #[test]
    fn test_empty_slide_instructions() {
        let slide = SlideAnalysis {
            number: 1,
            elements: Vec::new(),
            layout: SlideLayout::default(),
        };
        assert_eq!(slide_instructions(&slide), "Slide 1 [standard_flow]\n  (empty)\n");
    }

    #[test]
    fn test_deck_instructions_header() {
        let layout = DeckLayout {
            meta: DeckMeta {
                file_name: Some("algo.json".to_string()),
                detected_title: "Algorithms".to_string(),
                detected_footer: String::new(),
            },
            slides: vec![analysis()],
        };
        let text = to_instructions(&layout);
        assert!(text.contains("--- LAYOUT DATA ---"));
        assert!(text.contains("Source: algo.json"));
        assert!(text.contains("Recurring title: Algorithms"));
        assert!(!text.contains("Recurring footer"));
        assert!(text.contains("Slide 4 [columns]"));
    }
}
