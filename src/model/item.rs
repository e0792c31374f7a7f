//! Slide content items, before and after geometry normalization.

use super::{CoordOrigin, RawBBox, Rect};
use serde::{Deserialize, Serialize};

/// Where a raw item sits in its source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Page (slide) number, 1-indexed
    pub page: u32,
    /// Bounding box in source page units
    pub bbox: RawBBox,
    /// Coordinate origin of `bbox`
    #[serde(default)]
    pub origin: CoordOrigin,
}

/// Kind-specific payload of a raw item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawContent {
    /// Paragraphs, list items, titles and any other textual label
    Text {
        /// Text content
        text: String,
    },
    /// A table grid
    Table {
        /// Cell text, row-major
        rows: Vec<Vec<String>>,
    },
    /// A picture
    Image {
        /// Relative path of the extracted media file
        path: String,
    },
}

/// An item as delivered by the ingestion layer, with raw coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Content payload
    #[serde(flatten)]
    pub content: RawContent,
    /// Source position, if known
    #[serde(default)]
    pub prov: Option<Provenance>,
}

impl RawItem {
    /// Create a text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RawContent::Text { text: text.into() },
            prov: None,
        }
    }

    /// Create a table item.
    pub fn table(rows: Vec<Vec<String>>) -> Self {
        Self {
            content: RawContent::Table { rows },
            prov: None,
        }
    }

    /// Create an image item.
    pub fn image(path: impl Into<String>) -> Self {
        Self {
            content: RawContent::Image { path: path.into() },
            prov: None,
        }
    }

    /// Attach provenance.
    pub fn with_prov(mut self, page: u32, bbox: RawBBox, origin: CoordOrigin) -> Self {
        self.prov = Some(Provenance { page, bbox, origin });
        self
    }

    /// Attach a top-left-origin edge box.
    pub fn at(self, page: u32, l: f32, t: f32, r: f32, b: f32) -> Self {
        self.with_prov(page, RawBBox::Edges { l, t, r, b }, CoordOrigin::TopLeft)
    }
}

/// An item with normalized geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    /// Textual content
    Text {
        /// Text content
        text: String,
        /// Normalized geometry
        bbox: Option<Rect>,
    },
    /// A table grid
    Table {
        /// Cell text, row-major
        rows: Vec<Vec<String>>,
        /// Normalized geometry
        bbox: Option<Rect>,
    },
    /// A picture
    Image {
        /// Media path
        path: String,
        /// Normalized geometry
        bbox: Option<Rect>,
    },
}

impl Item {
    /// Create a text item.
    pub fn text(text: impl Into<String>, bbox: Option<Rect>) -> Self {
        Item::Text {
            text: text.into(),
            bbox,
        }
    }

    /// Create a table item.
    pub fn table(rows: Vec<Vec<String>>, bbox: Option<Rect>) -> Self {
        Item::Table { rows, bbox }
    }

    /// Create an image item.
    pub fn image(path: impl Into<String>, bbox: Option<Rect>) -> Self {
        Item::Image {
            path: path.into(),
            bbox,
        }
    }

    /// Normalized geometry, if known.
    pub fn bbox(&self) -> Option<Rect> {
        match self {
            Item::Text { bbox, .. } | Item::Table { bbox, .. } | Item::Image { bbox, .. } => *bbox,
        }
    }

    /// Text content (empty for images, cell text for tables).
    pub fn text_content(&self) -> String {
        match self {
            Item::Text { text, .. } => text.clone(),
            Item::Table { rows, .. } => rows
                .iter()
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
            Item::Image { .. } => String::new(),
        }
    }
}

/// Coarse item type assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Plain text
    Text,
    /// Bulleted list
    List,
    /// Table
    Table,
    /// Image
    Image,
    /// Top-edge header text
    Header,
    /// Bottom-edge footer text
    Footer,
    /// Title-band text
    Title,
    /// Source code listing
    Codeblock,
}

impl ItemType {
    /// Check if this type is rendered as text in zone output.
    pub fn is_textual(&self) -> bool {
        !matches!(self, ItemType::Table | ItemType::Image)
    }
}

/// Placement override computed for images by gravity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedPos {
    /// Left column
    Left,
    /// Right column
    Right,
    /// Top band
    Top,
    /// Below the body
    Bottom,
    /// Centered, not columned
    Center,
}
