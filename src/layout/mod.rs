//! Layout inference pipeline.
//!
//! A slide flows through five stages:
//!
//! 1. [`normalize`]: page-unit boxes become `[0, 1]` top-left rectangles
//! 2. [`classify`]: position bands and content heuristics
//! 3. [`group`]: items sharing geometry merge into elements
//! 4. [`gravity`]: images receive a placement override
//! 5. [`zones`]: elements are bucketed into top band, columns and flow
//!
//! Every stage is a pure function of its input and a [`LayoutConfig`].

pub mod classify;
pub mod gravity;
pub mod group;
pub mod normalize;
mod options;
pub mod zones;

pub use classify::{classify_item, classify_position, normalize_text, PositionClass};
pub use gravity::{image_gravity, resolve_gravity};
pub use group::group_items;
pub use normalize::{effective_page_size, normalize_bbox, normalize_items, normalize_items_on};
pub use options::LayoutConfig;
pub use zones::{distribute, visual_barrier, FooterFilter};

use crate::model::{Slide, SlideAnalysis, SlideLayout};

/// Run the full pipeline on one slide.
pub fn analyze_slide(slide: &Slide, config: &LayoutConfig) -> SlideAnalysis {
    let items = normalize_items(slide, config);
    let mut elements = group_items(&items, config);
    resolve_gravity(&mut elements, config);
    let layout = distribute(
        &elements,
        &slide.detected_title,
        &slide.detected_footer,
        config,
    );

    log::debug!(
        "Slide {}: {} items -> {} elements, strategy {:?}",
        slide.number,
        slide.items.len(),
        elements.len(),
        layout.strategy
    );

    SlideAnalysis {
        number: slide.number,
        elements,
        layout,
    }
}

/// Compute the zone layout of one slide with default thresholds.
pub fn compute_layout(slide: &Slide) -> SlideLayout {
    analyze_slide(slide, &LayoutConfig::default()).layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawItem, Strategy};

    #[test]
    fn test_empty_slide_layout() {
        let layout = compute_layout(&Slide::new(1).with_page_size(100.0, 100.0));
        assert!(layout.zones.is_empty());
        assert_eq!(layout.strategy, Strategy::StandardFlow);
    }

    #[test]
    fn test_side_image_with_text() {
        let slide = Slide::new(2)
            .with_page_size(1000.0, 1000.0)
            .with_item(RawItem::text("Introduction to graphs").at(2, 50.0, 300.0, 450.0, 400.0))
            .with_item(RawItem::image("extracted_media/image_1.png").at(2, 600.0, 300.0, 900.0, 600.0));

        let analysis = analyze_slide(&slide, &LayoutConfig::default());
        assert_eq!(analysis.number, 2);
        assert_eq!(analysis.layout.strategy, Strategy::Columns);
        assert_eq!(
            analysis.layout.zones.left_column,
            vec!["Introduction to graphs"]
        );
        assert_eq!(
            analysis.layout.zones.right_column,
            vec!["[[IMAGE: extracted_media/image_1.png]]"]
        );
    }

    #[test]
    fn test_title_removed_from_zones() {
        let slide = Slide::new(1)
            .with_page_size(100.0, 100.0)
            .with_title("Graphs")
            .with_item(RawItem::text("Graphs").at(1, 5.0, 12.0, 95.0, 20.0))
            .with_item(RawItem::text("Body text").at(1, 5.0, 40.0, 40.0, 50.0));

        let layout = compute_layout(&slide);
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.zones.left_column, vec!["Body text"]);
    }
}
