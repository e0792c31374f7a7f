//! Data model for slide layout inference.
//!
//! Raw items arrive from the ingestion layer with page-unit coordinates,
//! become normalized [`Item`]s, are merged into [`Element`]s and finally
//! bucketed into a [`SlideLayout`]. Every type here serializes to plain
//! nested maps and lists so plans can cross a process boundary.

mod element;
mod geometry;
mod item;
mod plan;
mod slide;

pub use element::{Align, Element, FontSize};
pub use geometry::{CoordOrigin, GeometryKey, PageSize, RawBBox, Rect};
pub use item::{ForcedPos, Item, ItemType, Provenance, RawContent, RawItem};
pub use plan::{DeckLayout, SlideAnalysis, SlideLayout, Strategy, Zones};
pub use slide::{Deck, DeckMeta, Slide};
