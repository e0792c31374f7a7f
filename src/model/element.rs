//! Grouped slide elements.

use super::{ForcedPos, ItemType, Rect};
use serde::{Deserialize, Serialize};

/// Font size hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    /// Smallest size, used for header and footer lines
    Tiny,
    /// Reduced size, used for long lists
    Scriptsize,
}

/// Vertical anchoring hint for text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Anchored at the bottom of its box
    Bottom,
}

/// One logical element of a slide: one or more items sharing geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A paragraph of text
    Text {
        /// Union geometry
        geometry: Option<Rect>,
        /// Merged text
        text: String,
        /// Vertical anchoring
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<Align>,
    },

    /// Text in the title band
    Title {
        /// Union geometry
        geometry: Option<Rect>,
        /// Merged text
        text: String,
    },

    /// Text glued to the top edge
    Header {
        /// Union geometry
        geometry: Option<Rect>,
        /// Merged text
        text: String,
        /// Font size hint
        fontsize: FontSize,
    },

    /// Text glued to the bottom edge
    Footer {
        /// Union geometry
        geometry: Option<Rect>,
        /// Merged text
        text: String,
        /// Font size hint
        fontsize: FontSize,
    },

    /// A bulleted list
    List {
        /// Union geometry
        geometry: Option<Rect>,
        /// List entries in source order
        items: Vec<String>,
        /// Font size hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fontsize: Option<FontSize>,
    },

    /// A source code listing
    Codeblock {
        /// Union geometry
        geometry: Option<Rect>,
        /// Code lines joined by newlines
        text: String,
    },

    /// A table
    Table {
        /// Geometry
        geometry: Option<Rect>,
        /// Cell text, row-major
        rows: Vec<Vec<String>>,
    },

    /// An image
    Image {
        /// Geometry
        geometry: Option<Rect>,
        /// Media path
        path: String,
        /// Placement override from gravity resolution
        #[serde(default, skip_serializing_if = "Option::is_none")]
        forced_pos: Option<ForcedPos>,
    },
}

impl Element {
    /// Create a plain text element.
    pub fn text(text: impl Into<String>, geometry: Option<Rect>) -> Self {
        Element::Text {
            geometry,
            text: text.into(),
            align: None,
        }
    }

    /// Create an image element without a placement override.
    pub fn image(path: impl Into<String>, geometry: Option<Rect>) -> Self {
        Element::Image {
            geometry,
            path: path.into(),
            forced_pos: None,
        }
    }

    /// Create a table element.
    pub fn table(rows: Vec<Vec<String>>, geometry: Option<Rect>) -> Self {
        Element::Table { geometry, rows }
    }

    /// Classified type of this element.
    pub fn item_type(&self) -> ItemType {
        match self {
            Element::Text { .. } => ItemType::Text,
            Element::Title { .. } => ItemType::Title,
            Element::Header { .. } => ItemType::Header,
            Element::Footer { .. } => ItemType::Footer,
            Element::List { .. } => ItemType::List,
            Element::Codeblock { .. } => ItemType::Codeblock,
            Element::Table { .. } => ItemType::Table,
            Element::Image { .. } => ItemType::Image,
        }
    }

    /// Geometry, if known.
    pub fn geometry(&self) -> Option<Rect> {
        match self {
            Element::Text { geometry, .. }
            | Element::Title { geometry, .. }
            | Element::Header { geometry, .. }
            | Element::Footer { geometry, .. }
            | Element::List { geometry, .. }
            | Element::Codeblock { geometry, .. }
            | Element::Table { geometry, .. }
            | Element::Image { geometry, .. } => *geometry,
        }
    }

    /// Placement override (images only).
    pub fn forced_pos(&self) -> Option<ForcedPos> {
        match self {
            Element::Image { forced_pos, .. } => *forced_pos,
            _ => None,
        }
    }

    /// Check if this element is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Element::Image { .. })
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Element::Table { .. })
    }

    /// Plain text used for title and footer matching.
    ///
    /// Empty for images and tables.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Text { text, .. }
            | Element::Title { text, .. }
            | Element::Header { text, .. }
            | Element::Footer { text, .. }
            | Element::Codeblock { text, .. } => text.clone(),
            Element::List { items, .. } => items.join("\n"),
            Element::Table { .. } | Element::Image { .. } => String::new(),
        }
    }

    /// Text contributed to a layout zone.
    pub fn zone_text(&self) -> String {
        match self {
            Element::Table { rows, .. } => {
                let mut lines = Vec::with_capacity(rows.len() + 2);
                lines.push("DETECTED_TABLE_START".to_string());
                lines.extend(rows.iter().map(|row| row.join(" | ")));
                lines.push("DETECTED_TABLE_END".to_string());
                lines.join("\n")
            }
            Element::Image { path, .. } => format!("[[IMAGE: {}]]", path),
            _ => self.plain_text(),
        }
    }
}
