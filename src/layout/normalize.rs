//! Geometry normalization.
//!
//! Converts raw page-unit bounding boxes into top-left-origin rectangles in
//! `[0, 1]` slide space.

use crate::model::{CoordOrigin, Item, PageSize, RawBBox, RawContent, RawItem, Rect, Slide};

use super::LayoutConfig;

/// Normalize a raw bounding box against the page size.
///
/// Top/bottom inversion is corrected: the visual top is the smaller of the
/// two vertical edges once the box is expressed in top-left space. Results
/// are clamped so that `x + w <= 1` and `y + h <= 1`, and rounded to three
/// decimals.
///
/// Returns `None` if the page size is zero or non-finite, or if the box
/// contains non-finite values.
pub fn normalize_bbox(bbox: &RawBBox, origin: CoordOrigin, page: PageSize) -> Option<Rect> {
    if !page.is_valid() {
        return None;
    }

    let (l, t, r, b) = bbox.edges();
    if ![l, t, r, b].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (t, b) = match origin {
        CoordOrigin::TopLeft => (t, b),
        CoordOrigin::BottomLeft => (page.height - t, page.height - b),
    };

    let left = l.min(r) / page.width;
    let top = t.min(b) / page.height;
    let width = (r - l).abs() / page.width;
    let height = (b - t).abs() / page.height;

    let x = round3(left.clamp(0.0, 1.0));
    let y = round3(top.clamp(0.0, 1.0));
    let w = round3(width.max(0.0)).min(1.0 - x).max(0.0);
    let h = round3(height.max(0.0)).min(1.0 - y).max(0.0);

    Some(Rect::new(x, y, w, h))
}

/// Infer page extents from the largest coordinates observed on a slide.
///
/// The observed maximum is scaled by `margin` since content rarely touches
/// the page edge. Returns `None` when no item carries a bounding box.
pub fn infer_page_size(items: &[RawItem], margin: f32) -> Option<PageSize> {
    let (max_x, max_y) = items
        .iter()
        .filter_map(|item| item.prov.as_ref())
        .fold((0.0f32, 0.0f32), |(mx, my), prov| {
            (mx.max(prov.bbox.max_x()), my.max(prov.bbox.max_y()))
        });

    let size = PageSize::new(max_x * margin, max_y * margin);
    size.is_valid().then_some(size)
}

/// Page size of a slide: declared dimensions, or extents inferred from items.
///
/// Does not log; see [`resolve_page_size`].
pub fn effective_page_size(slide: &Slide, config: &LayoutConfig) -> Option<PageSize> {
    slide
        .page_dimensions
        .filter(PageSize::is_valid)
        .or_else(|| infer_page_size(&slide.items, config.inferred_page_margin))
}

/// Resolve the page size for a slide, warning when it has to be inferred.
pub fn resolve_page_size(slide: &Slide, config: &LayoutConfig) -> Option<PageSize> {
    if let Some(size) = slide.page_dimensions.filter(PageSize::is_valid) {
        return Some(size);
    }

    let inferred = effective_page_size(slide, config);
    match inferred {
        Some(size) => log::warn!(
            "Slide {}: page dimensions missing, inferred {:.1} x {:.1} from item extents",
            slide.number,
            size.width,
            size.height
        ),
        None => log::warn!(
            "Slide {}: page dimensions missing and no item geometry to infer from",
            slide.number
        ),
    }
    inferred
}

/// Normalize every item of a slide, preserving order.
pub fn normalize_items(slide: &Slide, config: &LayoutConfig) -> Vec<Item> {
    normalize_items_on(slide, resolve_page_size(slide, config))
}

/// Normalize every item of a slide against an already resolved page size.
pub fn normalize_items_on(slide: &Slide, page: Option<PageSize>) -> Vec<Item> {
    slide
        .items
        .iter()
        .map(|raw| {
            let bbox = match (raw.prov.as_ref(), page) {
                (Some(prov), Some(page)) => normalize_bbox(&prov.bbox, prov.origin, page),
                _ => None,
            };
            match &raw.content {
                RawContent::Text { text } => Item::text(text.clone(), bbox),
                RawContent::Table { rows } => Item::table(rows.clone(), bbox),
                RawContent::Image { path } => Item::image(path.clone(), bbox),
            }
        })
        .collect()
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}
