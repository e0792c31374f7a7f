//! Ingestion boundary: external JSON into the typed deck model.
//!
//! Two input shapes are accepted:
//!
//! - docling document exports ([`docling`])
//! - shape-tree decks with EMU frames ([`shapes`])
//!
//! After parsing, [`recurring`] detects deck-wide titles and footers.

pub mod docling;
pub mod recurring;
pub mod shapes;

pub use docling::{parse_docling_file, parse_docling_str, parse_docling_value};
pub use recurring::{apply_recurring, detect_recurring, RecurringText};
pub use shapes::{flatten_shapes, parse_shapes_str, ShapeDeck, ShapeFrame, ShapeNode};

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use crate::model::Deck;

/// Input format of a deck file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Docling document export
    Docling,
    /// Shape-tree deck
    Shapes,
}

/// Detect the input format of a parsed JSON document.
pub fn detect_format(value: &Value) -> InputFormat {
    let is_shapes = value
        .as_object()
        .is_some_and(|root| root.contains_key("slide_width") && root.contains_key("slides"));
    if is_shapes {
        InputFormat::Shapes
    } else {
        InputFormat::Docling
    }
}

/// Parse a deck from a JSON value of either supported format.
pub fn parse_value(value: Value) -> Result<Deck> {
    match detect_format(&value) {
        InputFormat::Docling => parse_docling_value(&value),
        InputFormat::Shapes => {
            let deck: ShapeDeck = serde_json::from_value(value)?;
            deck.into_deck()
        }
    }
}

/// Load a deck file and run recurring text detection on it.
pub fn load_deck<P: AsRef<Path>>(path: P, config: &LayoutConfig) -> Result<Deck> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Err(Error::InvalidInput(format!(
            "{} is empty",
            path.display()
        )));
    }

    let value: Value = serde_json::from_str(&data)?;
    let mut deck = parse_value(value)?;
    deck.meta.file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    apply_recurring(&mut deck, config);

    log::info!(
        "Loaded {} slides from {}",
        deck.slide_count(),
        path.display()
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(&json!({"slide_width": 1, "slide_height": 1, "slides": []})),
            InputFormat::Shapes
        );
        assert_eq!(detect_format(&json!({"texts": []})), InputFormat::Docling);
        assert_eq!(detect_format(&json!([])), InputFormat::Docling);
    }

    #[test]
    fn test_parse_value_shapes() {
        let deck = parse_value(json!({
            "slide_width": 100,
            "slide_height": 100,
            "slides": [{"shapes": []}, {"shapes": []}]
        }))
        .unwrap();
        assert_eq!(deck.slide_count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_deck("/nonexistent/deck.json", &LayoutConfig::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
