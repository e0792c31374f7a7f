//! JSON rendering for layout plans.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a layout plan (deck, slide analysis or zones) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeckLayout, DeckMeta, SlideLayout};

    #[test]
    fn test_to_json_pretty() {
        let layout = DeckLayout {
            meta: DeckMeta {
                file_name: Some("lecture.json".to_string()),
                ..Default::default()
            },
            slides: Vec::new(),
        };

        let json = to_json(&layout, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"file_name\""));
        assert!(json.contains("lecture.json"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let layout = SlideLayout::flow(vec!["Body".to_string()]);
        let json = to_json(&layout, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"strategy\":\"standard_flow\""));
        assert!(json.contains("\"flow_content\":[\"Body\"]"));
    }
}
