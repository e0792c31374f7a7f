//! Item classification: position bands first, content heuristics second.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Align, Item, ItemType, Rect};

use super::LayoutConfig;

/// Vertical band an item starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionClass {
    /// Glued to the top edge
    Header,
    /// Below the header band, where slide titles usually sit
    TitleZone,
    /// Glued to the bottom edge
    Footer,
    /// Slide body
    Content,
}

/// Classify a rectangle by the band its top edge falls in.
pub fn classify_position(rect: &Rect, config: &LayoutConfig) -> PositionClass {
    if rect.y < config.header_max_y {
        PositionClass::Header
    } else if rect.y < config.title_max_y {
        PositionClass::TitleZone
    } else if rect.y > config.footer_min_y {
        PositionClass::Footer
    } else {
        PositionClass::Content
    }
}

/// Classify a single item without looking at its neighbours.
///
/// Lists need a whole geometry group to be recognized, so a lone text item
/// is never classified as one.
pub fn classify_item(item: &Item, config: &LayoutConfig) -> ItemType {
    match item {
        Item::Table { .. } => ItemType::Table,
        Item::Image { .. } => ItemType::Image,
        Item::Text { text, bbox } => {
            let band = bbox
                .as_ref()
                .map(|rect| classify_position(rect, config))
                .unwrap_or(PositionClass::Content);
            match band {
                PositionClass::Header => ItemType::Header,
                PositionClass::Footer => ItemType::Footer,
                _ => {
                    let lines = content_lines(text);
                    if !find_code_runs(&lines, config).is_empty() {
                        ItemType::Codeblock
                    } else if band == PositionClass::TitleZone {
                        ItemType::Title
                    } else {
                        ItemType::Text
                    }
                }
            }
        }
    }
}

/// Non-blank lines of a text, in order.
///
/// Code runs and the list rule count these lines, so a multi-paragraph text
/// frame is judged the same way as the same lines split across runs.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

fn code_keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9_])(?:int|public|private|while|if|for)(?:\s|\()")
            .expect("valid code keyword regex")
    })
}

/// Check whether a line looks like C-family source code.
pub fn is_code_line(line: &str) -> bool {
    line.contains(|c: char| matches!(c, ';' | '{' | '}' | '=')) || code_keyword_regex().is_match(line)
}

/// Find runs of code-like lines.
///
/// Code-like lines separated by at most `code_max_gap` other lines belong to
/// the same run. Runs with fewer than `code_min_lines` code-like lines are
/// discarded. Each returned range spans from the first to the last code-like
/// line of its run, so interleaved lines are part of the block.
pub fn find_code_runs(lines: &[&str], config: &LayoutConfig) -> Vec<RangeInclusive<usize>> {
    let mut runs = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    let mut flush = |current: &mut Vec<usize>| {
        if current.len() >= config.code_min_lines.max(1) {
            if let (Some(&first), Some(&last)) = (current.first(), current.last()) {
                runs.push(first..=last);
            }
        }
        current.clear();
    };

    for (idx, line) in lines.iter().enumerate() {
        if !is_code_line(line) {
            continue;
        }
        if let Some(&last) = current.last() {
            if idx - last - 1 > config.code_max_gap {
                flush(&mut current);
            }
        }
        current.push(idx);
    }
    flush(&mut current);

    runs
}

/// Check whether a group of text entries should be rendered as a list.
///
/// Needs at least `list_min_items` entries and either more than
/// `list_many_items` entries or every entry longer than `list_min_chars`.
pub fn is_list_group(entries: &[&str], config: &LayoutConfig) -> bool {
    if entries.len() < config.list_min_items {
        return false;
    }
    entries.len() > config.list_many_items
        || entries
            .iter()
            .all(|e| e.trim().chars().count() > config.list_min_chars)
}

/// Vertical anchoring implied by leading blank lines.
///
/// Text boxes pushed down with empty paragraphs are bottom-anchored.
pub fn text_align(text: &str, config: &LayoutConfig) -> Option<Align> {
    let leading_blank = text
        .split('\n')
        .take_while(|line| line.trim().is_empty())
        .count();
    let has_content = text.split('\n').count() > leading_blank;
    (has_content && leading_blank >= config.bottom_align_blank_lines).then_some(Align::Bottom)
}

/// Normalize text for equality checks: NFC, collapsed whitespace, lower case.
pub fn normalize_text(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    nfc.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
