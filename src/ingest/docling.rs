//! Docling JSON export ingestion.
//!
//! Docling exports nest content nodes at varying depths (`texts`, `tables`,
//! `pictures`, `body.children`, ...). Rather than hard-coding the schema, the
//! whole tree is searched for nodes carrying provenance.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{CoordOrigin, Deck, PageSize, RawBBox, RawItem, Slide};

/// Labels rendered as images.
const IMAGE_LABELS: &[&str] = &["picture", "figure", "chart"];

/// Parse a docling export from a file.
pub fn parse_docling_file<P: AsRef<Path>>(path: P) -> Result<Deck> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let mut deck = parse_docling_str(&data)?;
    deck.meta.file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(deck)
}

/// Parse a docling export from a JSON string.
pub fn parse_docling_str(json: &str) -> Result<Deck> {
    let value: Value = serde_json::from_str(json)?;
    parse_docling_value(&value)
}

/// Build a deck from an already-parsed docling export.
///
/// One slide is produced per page, ordered by page number. Pages listed in
/// `pages` without any content become empty slides.
pub fn parse_docling_value(value: &Value) -> Result<Deck> {
    let mut root = value
        .as_object()
        .ok_or_else(|| Error::InvalidInput("docling export root must be a JSON object".into()))?;
    if let Some(inner) = root.get("structure_analysis").and_then(Value::as_object) {
        root = inner;
    }

    let sizes = page_sizes(root);
    let mut slides: BTreeMap<u32, Slide> = sizes
        .iter()
        .map(|(&page, &size)| (page, Slide::new(page).with_page_size(size.width, size.height)))
        .collect();

    let mut image_counter = 0usize;
    let nodes = find_content_nodes(root);
    log::debug!("Docling export: {} content nodes", nodes.len());

    for node in nodes {
        let Some((page, item)) = node_to_item(node, &mut image_counter) else {
            continue;
        };
        slides
            .entry(page)
            .or_insert_with(|| Slide::new(page))
            .add_item(item);
    }

    let mut deck = Deck::new();
    for slide in slides.into_values() {
        deck.add_slide(slide);
    }
    log::debug!(
        "Docling export: {} slides, {} images",
        deck.slide_count(),
        image_counter
    );
    Ok(deck)
}

/// Page sizes keyed by page number.
fn page_sizes(root: &Map<String, Value>) -> BTreeMap<u32, PageSize> {
    let mut sizes = BTreeMap::new();
    let entries: Vec<(Option<u32>, &Value)> = match root.get("pages") {
        Some(Value::Object(pages)) => pages
            .iter()
            .map(|(key, page)| (key.parse().ok(), page))
            .collect(),
        Some(Value::Array(pages)) => pages.iter().map(|page| (None, page)).collect(),
        _ => Vec::new(),
    };

    for (key, page) in entries {
        let number = key.or_else(|| page.get("page_no").and_then(as_u32));
        let size = page.get("size").and_then(|size| {
            let width = size.get("width")?.as_f64()? as f32;
            let height = size.get("height")?.as_f64()? as f32;
            Some(PageSize::new(width, height))
        });
        if let (Some(number), Some(size)) = (number, size) {
            sizes.insert(number, size);
        }
    }
    sizes
}

/// Collect every node with a non-empty `prov` list and a `text` or `label`.
///
/// Traversal is depth-first in document order. Matched nodes are not
/// descended into.
fn find_content_nodes(root: &Map<String, Value>) -> Vec<&Map<String, Value>> {
    let mut found = Vec::new();
    let mut stack: Vec<&Value> = root.values().rev().collect();

    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                if is_content_node(map) {
                    found.push(map);
                } else {
                    stack.extend(map.values().rev());
                }
            }
            Value::Array(values) => stack.extend(values.iter().rev()),
            _ => {}
        }
    }
    found
}

fn is_content_node(map: &Map<String, Value>) -> bool {
    let has_prov = map
        .get("prov")
        .and_then(Value::as_array)
        .is_some_and(|prov| !prov.is_empty());
    has_prov && (map.contains_key("text") || map.contains_key("label"))
}

/// Convert a content node into a raw item and the page it belongs to.
fn node_to_item(node: &Map<String, Value>, image_counter: &mut usize) -> Option<(u32, RawItem)> {
    let label = node
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_ascii_lowercase();
    let grid = node.get("data").and_then(|data| data.get("grid"));

    let item = if label == "table" || grid.is_some() {
        RawItem::table(grid.map(simplify_grid).unwrap_or_default())
    } else if IMAGE_LABELS.contains(&label.as_str()) {
        *image_counter += 1;
        RawItem::image(format!("extracted_media/image_{}.png", image_counter))
    } else {
        let text = node.get("text").and_then(Value::as_str).unwrap_or_default();
        if text.trim().is_empty() {
            return None;
        }
        RawItem::text(text)
    };

    let prov = node.get("prov")?.as_array()?.first()?;
    let page = prov
        .get("page_no")
        .or_else(|| prov.get("page"))
        .and_then(as_u32)
        .unwrap_or(1);

    let Some(bbox_value) = prov.get("bbox") else {
        return Some((page, item));
    };
    let origin = bbox_value
        .get("coord_origin")
        .and_then(Value::as_str)
        .and_then(CoordOrigin::from_flag)
        .unwrap_or_default();

    match serde_json::from_value::<RawBBox>(bbox_value.clone()) {
        Ok(bbox) => Some((page, item.with_prov(page, bbox, origin))),
        Err(e) => {
            log::debug!("Ignoring malformed bbox on page {}: {}", page, e);
            Some((page, item))
        }
    }
}

/// Reduce a docling table grid to trimmed cell text.
///
/// Newlines inside cells become spaces; rows whose cells are all empty are
/// dropped.
fn simplify_grid(grid: &Value) -> Vec<Vec<String>> {
    let Some(rows) = grid.as_array() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(Value::as_array)
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let text = match cell {
                        Value::String(s) => s.as_str(),
                        _ => cell.get("text").and_then(Value::as_str).unwrap_or_default(),
                    };
                    text.replace(['\r', '\n'], " ").trim().to_string()
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}
