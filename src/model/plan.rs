//! Layout plan types produced by the zone distributor.

use super::{DeckMeta, Element};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a slide body is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Two columns below an optional top band
    Columns,
    /// A single flowing body below an optional top band
    #[default]
    StandardFlow,
}

/// Zone buckets, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    /// Full-width band above the body
    pub top_content: Vec<String>,
    /// Left body column
    pub left_column: Vec<String>,
    /// Right body column
    pub right_column: Vec<String>,
    /// Flowing body content
    pub flow_content: Vec<String>,
}

impl Zones {
    /// Check if every zone is empty.
    pub fn is_empty(&self) -> bool {
        self.top_content.is_empty()
            && self.left_column.is_empty()
            && self.right_column.is_empty()
            && self.flow_content.is_empty()
    }

    /// Total number of entries across all zones.
    pub fn len(&self) -> usize {
        self.top_content.len()
            + self.left_column.len()
            + self.right_column.len()
            + self.flow_content.len()
    }
}

/// Zone assignment for one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideLayout {
    /// Arrangement strategy
    pub strategy: Strategy,
    /// Zone contents
    pub zones: Zones,
}

impl SlideLayout {
    /// Layout with every entry in the flowing body.
    pub fn flow(entries: Vec<String>) -> Self {
        Self {
            strategy: Strategy::StandardFlow,
            zones: Zones {
                flow_content: entries,
                ..Default::default()
            },
        }
    }

    /// Check if the slide uses two columns.
    pub fn has_columns(&self) -> bool {
        self.strategy == Strategy::Columns
    }
}

/// Both output shapes for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideAnalysis {
    /// Slide number (1-indexed)
    pub number: u32,
    /// Grouped elements with resolved geometry and hints
    pub elements: Vec<Element>,
    /// Zone assignment
    pub layout: SlideLayout,
}

/// Layout plan for a whole deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckLayout {
    /// Deck metadata
    pub meta: DeckMeta,
    /// Per-slide analysis, in slide order
    pub slides: Vec<SlideAnalysis>,
}

impl DeckLayout {
    /// Number of slides using the columns strategy.
    pub fn column_slide_count(&self) -> usize {
        self.slides.iter().filter(|s| s.layout.has_columns()).count()
    }

    /// Get the analysis of a slide by number (1-indexed).
    pub fn slide(&self, number: u32) -> Result<&SlideAnalysis> {
        self.slides
            .iter()
            .find(|s| s.number == number)
            .ok_or(Error::SlideOutOfRange(number, self.slides.len() as u32))
    }
}
