//! Zone distribution: bucket grouped elements into top band, columns and flow.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Element, ForcedPos, Rect, SlideLayout, Strategy, Zones};

use super::classify::normalize_text;
use super::LayoutConfig;

/// Topmost y at which a non-top-edge image or table begins.
///
/// Content above the barrier forms the top band. Images and tables glued to
/// the top edge (`y <= barrier_min_y`) are ignored. Falls back to
/// `default_barrier` when nothing qualifies.
pub fn visual_barrier(elements: &[Element], config: &LayoutConfig) -> f32 {
    elements
        .iter()
        .filter(|el| el.is_image() || el.is_table())
        .filter_map(|el| el.geometry())
        .map(|rect| rect.y)
        .filter(|&y| y > config.barrier_min_y)
        .fold(None, |min: Option<f32>, y| Some(min.map_or(y, |m| m.min(y))))
        .unwrap_or(config.default_barrier)
}

fn date_or_page_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:\d{1,2}\.\d{1,2}\.(?:\d{4}|\d{2})|(?:seite|page)\s*\d+(?:\s*(?:/|von|of)\s*\d+)?)$",
        )
        .expect("valid date/page regex")
    })
}

/// Recognizes recurring footer text.
#[derive(Debug, Clone, Default)]
pub struct FooterFilter {
    fragments: HashSet<String>,
}

impl FooterFilter {
    /// Build a filter from a pipe-delimited list of footer fragments.
    pub fn new(detected_footer: &str) -> Self {
        let fragments = detected_footer
            .split('|')
            .map(normalize_text)
            .filter(|f| !f.is_empty())
            .collect();
        Self { fragments }
    }

    /// Number of distinct fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the filter has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Check whether text is footer noise: a known fragment, a date or a page number.
    ///
    /// Multi-line text matches when it matches as a whole or when every
    /// non-blank line does.
    pub fn matches(&self, text: &str) -> bool {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return false;
        }
        self.is_noise(&normalized)
            || text
                .lines()
                .map(normalize_text)
                .filter(|line| !line.is_empty())
                .all(|line| self.is_noise(&line))
    }

    fn is_noise(&self, normalized: &str) -> bool {
        self.fragments.contains(normalized) || date_or_page_regex().is_match(normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Top,
    Left,
    Right,
    Flow,
}

/// Distribute one slide's elements into zones.
///
/// Elements equal to the detected title and footer noise are dropped. Zone
/// order is the input order.
pub fn distribute(
    elements: &[Element],
    detected_title: &str,
    detected_footer: &str,
    config: &LayoutConfig,
) -> SlideLayout {
    let barrier = visual_barrier(elements, config);
    let footer = FooterFilter::new(detected_footer);
    let title = normalize_text(detected_title);

    let mut zones = Zones::default();
    let mut has_columns = false;

    for element in elements {
        let plain = element.plain_text();

        if !title.is_empty() && normalize_text(&plain) == title {
            log::debug!("Dropping detected title: {:?}", plain);
            continue;
        }
        if footer.matches(&plain) {
            log::debug!("Dropping footer text: {:?}", plain);
            continue;
        }
        if element
            .geometry()
            .is_some_and(|rect| rect.y > config.footer_cutoff_y)
        {
            log::debug!("Dropping element in footer territory: {:?}", plain);
            continue;
        }

        let zone = place(element, barrier, config);
        has_columns |= matches!(zone, Zone::Left | Zone::Right);

        let bucket = match zone {
            Zone::Top => &mut zones.top_content,
            Zone::Left => &mut zones.left_column,
            Zone::Right => &mut zones.right_column,
            Zone::Flow => &mut zones.flow_content,
        };
        bucket.push(element.zone_text());
    }

    let strategy = if has_columns {
        Strategy::Columns
    } else {
        Strategy::StandardFlow
    };

    log::debug!(
        "Zones: barrier={:.3}, strategy={:?}, top={}, left={}, right={}, flow={}",
        barrier,
        strategy,
        zones.top_content.len(),
        zones.left_column.len(),
        zones.right_column.len(),
        zones.flow_content.len()
    );

    SlideLayout { strategy, zones }
}

/// Decide the zone of a single surviving element.
fn place(element: &Element, barrier: f32, config: &LayoutConfig) -> Zone {
    let Some(rect) = element.geometry() else {
        return match element.forced_pos() {
            Some(ForcedPos::Left) => Zone::Left,
            Some(ForcedPos::Right) => Zone::Right,
            Some(ForcedPos::Top) => Zone::Top,
            Some(ForcedPos::Bottom | ForcedPos::Center) | None => Zone::Flow,
        };
    };

    if let Some(pos) = element.forced_pos() {
        return match pos {
            ForcedPos::Left => Zone::Left,
            ForcedPos::Right => Zone::Right,
            ForcedPos::Top => Zone::Top,
            ForcedPos::Bottom => Zone::Flow,
            ForcedPos::Center if rect.y < barrier => Zone::Top,
            ForcedPos::Center => Zone::Flow,
        };
    }

    if element.is_table() {
        if rect.y < config.table_top_max_y {
            return Zone::Top;
        }
    } else if element.item_type().is_textual()
        && (rect.w > config.top_band_min_w || rect.y <= barrier - config.barrier_buffer + 1e-6)
    {
        return Zone::Top;
    }

    column_for(&rect, config)
}

fn column_for(rect: &Rect, config: &LayoutConfig) -> Zone {
    if rect.center_x() < config.column_split_x {
        Zone::Left
    } else {
        Zone::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str, x: f32, y: f32, w: f32) -> Element {
        Element::text(t, Some(Rect::new(x, y, w, 0.05)))
    }

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_barrier_default() {
        let elements = vec![text("a", 0.1, 0.5, 0.3)];
        assert_eq!(visual_barrier(&elements, &config()), 0.25);
    }

    #[test]
    fn test_barrier_ignores_top_edge() {
        let elements = vec![
            Element::image("logo.png", Some(Rect::new(0.9, 0.01, 0.1, 0.05))),
            Element::table(vec![], Some(Rect::new(0.1, 0.4, 0.8, 0.3))),
            Element::image("chart.png", Some(Rect::new(0.5, 0.3, 0.4, 0.3))),
        ];
        assert_eq!(visual_barrier(&elements, &config()), 0.3);
    }

    #[test]
    fn test_footer_filter() {
        let filter = FooterFilter::new("Universität Hamburg | Informatik ||");
        assert_eq!(filter.len(), 2);
        assert!(filter.matches("  universität   hamburg "));
        assert!(filter.matches("12.03.2024"));
        assert!(filter.matches("01.02.24"));
        assert!(filter.matches("Seite 4"));
        assert!(filter.matches("Page 12 of 30"));
        assert!(!filter.matches("Informatik ist toll"));
        assert!(!filter.matches(""));
        assert!(FooterFilter::new("").is_empty());
    }

    #[test]
    fn test_footer_filter_multiline() {
        let filter = FooterFilter::new("Universität Hamburg|Informatik");
        assert!(filter.matches("Universität Hamburg\nInformatik"));
        assert!(filter.matches("Informatik\n\n12.03.2024"));
        assert!(!filter.matches("Universität Hamburg\nGraph theory"));
    }

    #[test]
    fn test_merged_footer_runs_dropped() {
        let elements = vec![
            text("Universität Hamburg\nInformatik", 0.05, 0.88, 0.4),
            text("Body", 0.05, 0.4, 0.4),
        ];
        let layout = distribute(&elements, "", "Universität Hamburg|Informatik", &config());
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.zones.left_column, vec!["Body"]);
    }

    #[test]
    fn test_footer_cutoff_is_exclusive() {
        let elements = vec![
            text("On the line", 0.1, 0.94, 0.3),
            text("Just below", 0.6, 0.941, 0.3),
        ];
        let layout = distribute(&elements, "", "", &config());
        assert_eq!(layout.zones.left_column, vec!["On the line"]);
        assert!(layout.zones.right_column.is_empty());
    }

    #[test]
    fn test_date_in_footer_dropped() {
        let elements = vec![text("12.03.2024", 0.8, 0.95, 0.1)];
        let layout = distribute(&elements, "", "", &config());
        assert!(layout.zones.is_empty());
        assert_eq!(layout.strategy, Strategy::StandardFlow);
    }

    #[test]
    fn test_footer_territory_dropped() {
        let elements = vec![text("Anything at all", 0.3, 0.95, 0.3)];
        let layout = distribute(&elements, "", "", &config());
        assert!(layout.zones.is_empty());
    }

    #[test]
    fn test_split_title_dropped() {
        let elements = vec![
            Element::Title {
                geometry: Some(Rect::new(0.05, 0.12, 0.9, 0.08)),
                text: "Graph\nAlgorithms".to_string(),
            },
            text("Body", 0.1, 0.5, 0.3),
        ];
        let layout = distribute(&elements, "Graph Algorithms", "", &config());
        assert_eq!(layout.zones.len(), 1);
    }

    #[test]
    fn test_detected_title_dropped() {
        let elements = vec![
            text("Algorithms Overview", 0.1, 0.5, 0.3),
            Element::text("algorithms   overview", None),
            text("Body", 0.1, 0.5, 0.3),
        ];
        let layout = distribute(&elements, "Algorithms Overview", "", &config());
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.zones.left_column, vec!["Body"]);
    }

    #[test]
    fn test_top_band_and_columns() {
        let elements = vec![
            text("Heading", 0.1, 0.15, 0.5),
            text("Wide intro", 0.05, 0.4, 0.9),
            text("Left body", 0.05, 0.4, 0.4),
            text("Right body", 0.55, 0.4, 0.4),
        ];
        let layout = distribute(&elements, "", "", &config());
        assert_eq!(layout.strategy, Strategy::Columns);
        assert_eq!(layout.zones.top_content, vec!["Heading", "Wide intro"]);
        assert_eq!(layout.zones.left_column, vec!["Left body"]);
        assert_eq!(layout.zones.right_column, vec!["Right body"]);
    }

    #[test]
    fn test_barrier_buffer() {
        // Barrier at 0.30 from the image; text at 0.29 sits too close to it.
        let mut image = Element::image("a.png", Some(Rect::new(0.05, 0.30, 0.9, 0.4)));
        if let Element::Image { forced_pos, .. } = &mut image {
            *forced_pos = Some(ForcedPos::Center);
        }
        let elements = vec![
            text("Close", 0.1, 0.29, 0.3),
            text("Clear", 0.1, 0.27, 0.3),
            image,
        ];
        let layout = distribute(&elements, "", "", &config());
        assert_eq!(layout.zones.top_content, vec!["Clear"]);
        assert_eq!(layout.zones.left_column, vec!["Close"]);
        assert_eq!(layout.zones.flow_content, vec!["[[IMAGE: a.png]]"]);
    }

    #[test]
    fn test_table_rarely_top() {
        let elements = vec![
            Element::table(vec![vec!["A".to_string()]], Some(Rect::new(0.0, 0.02, 1.0, 0.2))),
            Element::table(vec![vec!["B".to_string()]], Some(Rect::new(0.0, 0.1, 1.0, 0.3))),
        ];
        let layout = distribute(&elements, "", "", &config());
        assert_eq!(layout.zones.top_content.len(), 1);
        assert!(layout.zones.top_content[0].contains("A"));
        assert_eq!(layout.zones.right_column.len(), 1);
        assert_eq!(layout.strategy, Strategy::Columns);
    }

    #[test]
    fn test_missing_geometry_fallbacks() {
        let mut forced = Element::image("side.png", None);
        if let Element::Image { forced_pos, .. } = &mut forced {
            *forced_pos = Some(ForcedPos::Right);
        }
        let elements = vec![Element::text("Loose text", None), forced];
        let layout = distribute(&elements, "", "", &config());
        assert_eq!(layout.zones.flow_content, vec!["Loose text"]);
        assert_eq!(layout.zones.right_column, vec!["[[IMAGE: side.png]]"]);
        assert_eq!(layout.strategy, Strategy::Columns);
    }

    #[test]
    fn test_empty_slide() {
        let layout = distribute(&[], "Title", "Footer", &config());
        assert!(layout.zones.is_empty());
        assert_eq!(layout.strategy, Strategy::StandardFlow);
    }

    #[test]
    fn test_distribution_is_idempotent() {
        let elements = vec![
            text("Heading", 0.1, 0.15, 0.5),
            text("Left", 0.05, 0.4, 0.4),
            text("Right", 0.55, 0.4, 0.4),
            Element::image("x.png", Some(Rect::new(0.5, 0.5, 0.4, 0.3))),
        ];
        let first = distribute(&elements, "T", "F", &config());
        let second = distribute(&elements, "T", "F", &config());
        assert_eq!(first, second);
    }
}
