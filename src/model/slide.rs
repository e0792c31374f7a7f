//! Slide and deck containers.

use super::{PageSize, RawItem};
use serde::{Deserialize, Serialize};

/// A single slide with its raw items and slide-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Slide number (1-indexed)
    pub number: u32,

    /// Items in source order
    pub items: Vec<RawItem>,

    /// Recurring title text detected across the deck
    #[serde(default)]
    pub detected_title: String,

    /// Recurring footer fragments, pipe-delimited
    #[serde(default)]
    pub detected_footer: String,

    /// Page dimensions in source units, if known
    #[serde(default)]
    pub page_dimensions: Option<PageSize>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_dimensions = Some(PageSize::new(width, height));
        self
    }

    /// Set the detected title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.detected_title = title.into();
        self
    }

    /// Set the detected footer.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.detected_footer = footer.into();
        self
    }

    /// Add an item.
    pub fn add_item(&mut self, item: RawItem) {
        self.items.push(item);
    }

    /// Add an item, builder style.
    pub fn with_item(mut self, item: RawItem) -> Self {
        self.items.push(item);
        self
    }

    /// Check if the slide has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Deck-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckMeta {
    /// Source file name
    pub file_name: Option<String>,
    /// Recurring title text
    pub detected_title: String,
    /// Recurring footer fragments, pipe-delimited
    pub detected_footer: String,
}

/// An ordered collection of slides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Deck metadata
    pub meta: DeckMeta,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by number (1-indexed).
    pub fn get_slide(&self, number: u32) -> Option<&Slide> {
        self.slides.iter().find(|s| s.number == number)
    }

    /// Copy the deck-level title and footer onto every slide.
    pub fn propagate_meta(&mut self) {
        for slide in &mut self.slides {
            slide.detected_title = self.meta.detected_title.clone();
            slide.detected_footer = self.meta.detected_footer.clone();
        }
    }
}
