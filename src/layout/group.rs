//! Spatial grouping of items that share geometry.
//!
//! Slide decks often split one paragraph or one bullet list into several text
//! runs placed at identical coordinates. Those runs are merged back into a
//! single [`Element`] here. Tables and images are never merged.

use indexmap::IndexMap;

use crate::model::{Element, FontSize, GeometryKey, Item, Rect};

use super::classify::{
    classify_position, content_lines, find_code_runs, is_list_group, text_align, PositionClass,
};
use super::LayoutConfig;

/// Output slot, in first-seen order.
enum Slot {
    /// Text items sharing one geometry key
    Group(GeometryKey),
    /// An item that is never merged
    Single(usize),
}

/// Group items by geometry and merge each group into elements.
///
/// Output order follows the first appearance of each group in `items`.
pub fn group_items(items: &[Item], config: &LayoutConfig) -> Vec<Element> {
    let mut slots = Vec::new();
    let mut groups: IndexMap<GeometryKey, Vec<usize>> = IndexMap::new();

    for (idx, item) in items.iter().enumerate() {
        match item {
            Item::Text {
                bbox: Some(rect), ..
            } => {
                let key = rect.key();
                let members = groups.entry(key).or_insert_with(|| {
                    slots.push(Slot::Group(key));
                    Vec::new()
                });
                members.push(idx);
            }
            _ => slots.push(Slot::Single(idx)),
        }
    }

    let mut elements = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Slot::Group(key) => {
                if let Some(members) = groups.get(&key) {
                    let members: Vec<&Item> = members.iter().map(|&i| &items[i]).collect();
                    elements.extend(merge_text_group(&members, config));
                }
            }
            Slot::Single(idx) => elements.extend(single_element(&items[idx], config)),
        }
    }

    log::debug!(
        "Grouped {} items into {} elements ({} geometry groups)",
        items.len(),
        elements.len(),
        groups.len()
    );
    elements
}

/// Convert an item that is not merged with others.
///
/// Geometry-less text goes through the same line analysis as a group.
fn single_element(item: &Item, config: &LayoutConfig) -> Vec<Element> {
    match item {
        Item::Table { rows, bbox } => vec![Element::table(rows.clone(), *bbox)],
        Item::Image { path, bbox } => vec![Element::image(path.clone(), *bbox)],
        Item::Text { .. } => merge_text_group(&[item], config),
    }
}

/// Merge text items sharing one geometry.
///
/// Every member is split into its non-blank lines before code runs and the
/// list rule are applied, so one multi-line item and several single-line
/// runs produce the same elements.
fn merge_text_group(members: &[&Item], config: &LayoutConfig) -> Vec<Element> {
    let rects: Vec<Rect> = members.iter().filter_map(|m| m.bbox()).collect();
    let geometry = Rect::union_all(&rects);

    let raw_texts: Vec<String> = members.iter().map(|m| m.text_content()).collect();
    let lines: Vec<&str> = raw_texts.iter().flat_map(|t| content_lines(t)).collect();
    if lines.is_empty() {
        return Vec::new();
    }
    let align = text_align(&raw_texts.join("\n"), config);

    let band = geometry
        .as_ref()
        .map(|rect| classify_position(rect, config))
        .unwrap_or(PositionClass::Content);

    match band {
        PositionClass::Header => {
            return vec![Element::Header {
                geometry,
                text: join_trimmed(&lines),
                fontsize: FontSize::Tiny,
            }]
        }
        PositionClass::Footer => {
            return vec![Element::Footer {
                geometry,
                text: join_trimmed(&lines),
                fontsize: FontSize::Tiny,
            }]
        }
        PositionClass::TitleZone | PositionClass::Content => {}
    }

    let mut elements = Vec::new();
    let mut used = vec![false; lines.len()];

    for run in find_code_runs(&lines, config) {
        let code: Vec<&str> = lines[run.clone()].iter().map(|l| l.trim_end()).collect();
        for flag in &mut used[run] {
            *flag = true;
        }
        elements.push(Element::Codeblock {
            geometry,
            text: code.join("\n"),
        });
    }

    let rest: Vec<&str> = lines
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(line, _)| *line)
        .collect();
    if rest.is_empty() {
        return elements;
    }

    if is_list_group(&rest, config) {
        let items: Vec<String> = rest.iter().map(|e| e.trim().to_string()).collect();
        let fontsize = (items.len() > 2).then_some(FontSize::Scriptsize);
        elements.push(Element::List {
            geometry,
            items,
            fontsize,
        });
    } else if band == PositionClass::TitleZone {
        elements.push(Element::Title {
            geometry,
            text: join_trimmed(&rest),
        });
    } else {
        elements.push(Element::Text {
            geometry,
            text: join_trimmed(&rest),
            align,
        });
    }

    elements
}

fn join_trimmed(entries: &[&str]) -> String {
    entries
        .iter()
        .map(|e| e.trim())
        .collect::<Vec<_>>()
        .join("\n")
}
