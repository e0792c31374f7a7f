//! Deck-wide recurring text detection.
//!
//! Titles and footers repeated on most slides at the same position are
//! detected once per deck and later removed from every slide's zones.

use indexmap::{IndexMap, IndexSet};

use crate::layout::{effective_page_size, group_items, normalize_items_on, LayoutConfig};
use crate::model::{Deck, GeometryKey, Rect};

/// Recurring title and footer of a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringText {
    /// Longest recurring text outside the footer band
    pub title: String,
    /// Recurring footer-band fragments, pipe-delimited
    pub footer: String,
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    slides: usize,
    rect: Option<Rect>,
}

/// Minimum number of slides a pair must appear on.
///
/// Never less than two, so nothing recurs in a one-slide deck.
fn min_occurrences(slide_count: usize, config: &LayoutConfig) -> usize {
    ((slide_count as f32 * config.recurring_min_ratio).floor() as usize).max(2)
}

/// Find text that recurs at the same position across the deck.
///
/// Candidates are grouped elements, so text split into several runs is
/// counted the way the zone filter later sees it. Footer candidates
/// contribute one fragment per line and title candidates are joined on one
/// line.
pub fn detect_recurring(deck: &Deck, config: &LayoutConfig) -> RecurringText {
    let slide_count = deck.slide_count();
    if slide_count < 2 {
        return RecurringText::default();
    }

    let mut counts: IndexMap<(String, Option<GeometryKey>), Occurrence> = IndexMap::new();
    for slide in &deck.slides {
        let items = normalize_items_on(slide, effective_page_size(slide, config));
        let mut seen = IndexSet::new();
        for element in group_items(&items, config) {
            if element.is_image() || element.is_table() {
                continue;
            }
            let text = element.plain_text().trim().to_string();
            if text.is_empty() {
                continue;
            }
            let bbox = element.geometry();
            let key = (text, bbox.map(|rect| rect.key()));
            if seen.insert(key.clone()) {
                counts
                    .entry(key)
                    .or_insert(Occurrence {
                        slides: 0,
                        rect: bbox,
                    })
                    .slides += 1;
            }
        }
    }

    let threshold = min_occurrences(slide_count, config);
    let candidates: Vec<(&String, Option<Rect>)> = counts
        .iter()
        .filter(|(_, occ)| occ.slides >= threshold)
        .map(|((text, _), occ)| (text, occ.rect))
        .collect();

    let in_footer_band =
        |rect: &Option<Rect>| rect.is_some_and(|r| r.y > config.recurring_footer_min_y);

    let mut footer_parts: IndexSet<&str> = IndexSet::new();
    let mut title: Option<String> = None;
    for &(text, rect) in &candidates {
        if in_footer_band(&rect) {
            footer_parts.extend(text.lines().map(str::trim).filter(|l| !l.is_empty()));
            continue;
        }
        let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if title
            .as_ref()
            .map_or(true, |t| single_line.chars().count() > t.chars().count())
        {
            title = Some(single_line);
        }
    }

    let result = RecurringText {
        title: title.unwrap_or_default(),
        footer: footer_parts.into_iter().collect::<Vec<_>>().join("|"),
    };
    log::debug!(
        "Recurring text over {} slides (threshold {}): title={:?}, footer={:?}",
        slide_count,
        threshold,
        result.title,
        result.footer
    );
    result
}

/// Detect recurring text and store it on the deck and on every slide.
///
/// Existing deck-level values are kept when nothing is detected.
pub fn apply_recurring(deck: &mut Deck, config: &LayoutConfig) {
    let found = detect_recurring(deck, config);
    if !found.title.is_empty() {
        deck.meta.detected_title = found.title;
    }
    if !found.footer.is_empty() {
        deck.meta.detected_footer = found.footer;
    }
    deck.propagate_meta();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawItem, Slide};

    fn slide(number: u32, body: &str) -> Slide {
        Slide::new(number)
            .with_page_size(100.0, 100.0)
            .with_item(RawItem::text("Algorithms and Data Structures").at(number, 5.0, 2.0, 60.0, 8.0))
            .with_item(RawItem::text("Universität Hamburg").at(number, 5.0, 94.0, 40.0, 98.0))
            .with_item(RawItem::text("Informatik").at(number, 60.0, 94.0, 90.0, 98.0))
            .with_item(RawItem::text(body).at(number, 5.0, 30.0, 90.0, 60.0))
    }

    fn deck(n: u32) -> Deck {
        let mut deck = Deck::new();
        for i in 1..=n {
            deck.add_slide(slide(i, &format!("Body of slide {}", i)));
        }
        deck
    }

    #[test]
    fn test_detects_title_and_footer() {
        let found = detect_recurring(&deck(5), &LayoutConfig::default());
        assert_eq!(found.title, "Algorithms and Data Structures");
        assert_eq!(found.footer, "Universität Hamburg|Informatik");
    }

    #[test]
    fn test_single_slide_detects_nothing() {
        let found = detect_recurring(&deck(1), &LayoutConfig::default());
        assert_eq!(found, RecurringText::default());
    }

    #[test]
    fn test_moved_text_is_not_recurring() {
        let mut d = Deck::new();
        for i in 1..=4u32 {
            let offset = i as f32 * 10.0;
            d.add_slide(
                Slide::new(i)
                    .with_page_size(100.0, 100.0)
                    .with_item(RawItem::text("Wandering").at(i, offset, 40.0, offset + 20.0, 50.0)),
            );
        }
        let found = detect_recurring(&d, &LayoutConfig::default());
        assert!(found.title.is_empty());
    }

    #[test]
    fn test_below_ratio_is_ignored() {
        let mut d = deck(2);
        for i in 3..=10 {
            d.add_slide(Slide::new(i).with_page_size(100.0, 100.0));
        }
        // Two of ten slides is far below the 70% threshold.
        let found = detect_recurring(&d, &LayoutConfig::default());
        assert!(found.title.is_empty());
        assert!(found.footer.is_empty());
    }

    #[test]
    fn test_split_runs_detected_as_grouped() {
        let mut d = Deck::new();
        for i in 1..=3u32 {
            d.add_slide(
                Slide::new(i)
                    .with_page_size(100.0, 100.0)
                    .with_item(RawItem::text("Graph").at(i, 5.0, 12.0, 90.0, 20.0))
                    .with_item(RawItem::text("Algorithms").at(i, 5.0, 12.0, 90.0, 20.0))
                    .with_item(RawItem::text("Universität Hamburg").at(i, 5.0, 88.0, 60.0, 92.0))
                    .with_item(RawItem::text("Informatik").at(i, 5.0, 88.0, 60.0, 92.0))
                    .with_item(RawItem::text(format!("Body {}", i)).at(i, 5.0, 40.0, 45.0, 60.0)),
            );
        }
        let found = detect_recurring(&d, &LayoutConfig::default());
        assert_eq!(found.title, "Graph Algorithms");
        assert_eq!(found.footer, "Universität Hamburg|Informatik");
    }

    #[test]
    fn test_apply_propagates() {
        let mut d = deck(3);
        apply_recurring(&mut d, &LayoutConfig::default());
        assert_eq!(d.meta.detected_title, "Algorithms and Data Structures");
        assert!(d
            .slides
            .iter()
            .all(|s| s.detected_footer == "Universität Hamburg|Informatik"));
    }
}
