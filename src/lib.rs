//! # slidezone
//!
//! Deterministic layout inference for slide decks.
//!
//! This library takes the loosely structured items extracted from a
//! presentation (text runs, tables and images with page-unit bounding boxes)
//! and turns each slide into a positioned layout plan: a top band, two
//! columns or a single flow.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slidezone::{render, LayoutEngine};
//!
//! fn main() -> slidezone::Result<()> {
//!     let engine = LayoutEngine::new();
//!     let layout = engine.analyze_file("lecture.json")?;
//!
//!     let json = render::to_json(&layout, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Geometry normalization**: page units to `[0, 1]` top-left space
//! - **Classification**: header, title and footer bands; code and list detection
//! - **Grouping**: items sharing geometry merge into one element
//! - **Image gravity**: consistent left/right placement of images
//! - **Zone distribution**: top band, columns or flow
//!
//! Slides are independent and analysed in parallel with Rayon.

pub mod error;
pub mod ingest;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ingest::{load_deck, parse_docling_str};
pub use layout::{analyze_slide, compute_layout, LayoutConfig};
pub use model::{
    Deck, DeckLayout, DeckMeta, Element, ForcedPos, Item, ItemType, RawContent, RawItem, Rect,
    Slide, SlideAnalysis, SlideLayout, Strategy, Zones,
};
pub use render::{to_instructions, to_json, JsonFormat};

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use rayon::prelude::*;

/// Builder for analysing whole decks.
///
/// # Example
///
/// ```no_run
/// use slidezone::{LayoutConfig, LayoutEngine};
///
/// let config = LayoutConfig::new().with_footer_cutoff(0.92);
/// let layout = LayoutEngine::new()
///     .with_config(config)
///     .sequential()
///     .analyze_file("lecture.json")?;
/// println!("{} slides use columns", layout.column_slide_count());
/// # Ok::<(), slidezone::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    parallel: bool,
}

impl LayoutEngine {
    /// Create a new engine with default thresholds and parallel processing.
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
            parallel: true,
        }
    }

    /// Set the layout thresholds.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Layout thresholds in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Analyse a single slide.
    pub fn analyze_slide(&self, slide: &Slide) -> SlideAnalysis {
        isolate(slide, || analyze_slide(slide, &self.config))
    }

    /// Analyse every slide of a deck, in slide order.
    ///
    /// A slide whose analysis panics falls back to a flow layout; the other
    /// slides are unaffected.
    pub fn analyze_deck(&self, deck: &Deck) -> DeckLayout {
        let slides: Vec<SlideAnalysis> = if self.parallel {
            deck.slides
                .par_iter()
                .map(|slide| self.analyze_slide(slide))
                .collect()
        } else {
            deck.slides
                .iter()
                .map(|slide| self.analyze_slide(slide))
                .collect()
        };

        DeckLayout {
            meta: deck.meta.clone(),
            slides,
        }
    }

    /// Load a deck file and analyse it.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<DeckLayout> {
        let deck = load_deck(path, &self.config)?;
        Ok(self.analyze_deck(&deck))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a slide analysis, degrading to [`fallback_analysis`] on panic.
fn isolate<F>(slide: &Slide, analyze: F) -> SlideAnalysis
where
    F: FnOnce() -> SlideAnalysis,
{
    match panic::catch_unwind(AssertUnwindSafe(analyze)) {
        Ok(analysis) => analysis,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!(
                "Slide {}: layout analysis failed ({}), using flow layout",
                slide.number,
                reason
            );
            fallback_analysis(slide)
        }
    }
}

/// Flow layout holding every non-empty item of a slide in source order.
pub fn fallback_analysis(slide: &Slide) -> SlideAnalysis {
    let elements: Vec<Element> = slide
        .items
        .iter()
        .filter_map(|raw| match &raw.content {
            RawContent::Text { text } if text.trim().is_empty() => None,
            RawContent::Text { text } => Some(Element::text(text.trim(), None)),
            RawContent::Table { rows } => Some(Element::table(rows.clone(), None)),
            RawContent::Image { path } => Some(Element::image(path.clone(), None)),
        })
        .collect();
    let entries = elements.iter().map(Element::zone_text).collect();

    SlideAnalysis {
        number: slide.number,
        elements,
        layout: SlideLayout::flow(entries),
    }
}
