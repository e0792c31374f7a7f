//! Layout thresholds and configuration.
//!
//! All boundaries are fractions of slide width or height. The defaults were
//! tuned empirically on lecture decks and are meant to be recalibrated per
//! document style, either through the builder methods or by loading a
//! (partial) JSON override.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds used by every stage of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    // Classification bands
    /// Items starting above this y are headers
    pub header_max_y: f32,
    /// Items starting above this y (and below the header band) are title candidates
    pub title_max_y: f32,
    /// Items starting below this y are footers
    pub footer_min_y: f32,

    // List and code heuristics
    /// Minimum group size for a list
    pub list_min_items: usize,
    /// Groups with more items than this are lists regardless of text length
    pub list_many_items: usize,
    /// Otherwise every entry must be longer than this many characters
    pub list_min_chars: usize,
    /// Minimum number of code-like lines in a code block
    pub code_min_lines: usize,
    /// Maximum number of non-code lines allowed between two code lines of one block
    pub code_max_gap: usize,
    /// Leading blank lines that mark a text box as bottom-anchored
    pub bottom_align_blank_lines: usize,

    // Image gravity
    /// Images wider than this are full-width and never columned
    pub full_width_min_w: f32,
    /// Images starting above this y gravitate to the top
    pub gravity_top_max_y: f32,
    /// Full-width images starting below this y gravitate to the bottom
    pub full_width_bottom_min_y: f32,
    /// Narrow images starting below this y gravitate to the bottom
    pub gravity_bottom_min_y: f32,
    /// Images centered right of this x gravitate right
    pub gravity_right_min_cx: f32,
    /// Images centered left of this x gravitate left
    pub gravity_left_max_cx: f32,
    /// Left wins a conflict only when it outnumbers right by more than this
    pub left_majority_margin: usize,
    /// Lower bound (exclusive) of the middle band for pulling centered images
    pub center_pull_min_y: f32,
    /// Upper bound (exclusive) of the middle band for pulling centered images
    pub center_pull_max_y: f32,

    // Zone distribution
    /// Images and tables starting at or above this y do not form a barrier
    pub barrier_min_y: f32,
    /// Barrier used when no image or table qualifies
    pub default_barrier: f32,
    /// Distance above the barrier required for top-band text
    pub barrier_buffer: f32,
    /// Text wider than this always joins the top band
    pub top_band_min_w: f32,
    /// Tables join the top band only above this y
    pub table_top_max_y: f32,
    /// Items starting below this y are footer territory and dropped
    pub footer_cutoff_y: f32,
    /// Horizontal center separating the left and right column
    pub column_split_x: f32,

    // Geometry and deck-level detection
    /// Scale applied to observed extents when page dimensions are unknown
    pub inferred_page_margin: f32,
    /// Fraction of slides a text must appear on to count as recurring
    pub recurring_min_ratio: f32,
    /// Recurring text starting below this y is treated as footer
    pub recurring_footer_min_y: f32,
}

impl LayoutConfig {
    /// Create a configuration with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the bands are ordered and every fraction lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("header_max_y", self.header_max_y),
            ("title_max_y", self.title_max_y),
            ("footer_min_y", self.footer_min_y),
            ("full_width_min_w", self.full_width_min_w),
            ("gravity_top_max_y", self.gravity_top_max_y),
            ("full_width_bottom_min_y", self.full_width_bottom_min_y),
            ("gravity_bottom_min_y", self.gravity_bottom_min_y),
            ("gravity_right_min_cx", self.gravity_right_min_cx),
            ("gravity_left_max_cx", self.gravity_left_max_cx),
            ("center_pull_min_y", self.center_pull_min_y),
            ("center_pull_max_y", self.center_pull_max_y),
            ("barrier_min_y", self.barrier_min_y),
            ("default_barrier", self.default_barrier),
            ("barrier_buffer", self.barrier_buffer),
            ("top_band_min_w", self.top_band_min_w),
            ("table_top_max_y", self.table_top_max_y),
            ("footer_cutoff_y", self.footer_cutoff_y),
            ("column_split_x", self.column_split_x),
            ("recurring_min_ratio", self.recurring_min_ratio),
            ("recurring_footer_min_y", self.recurring_footer_min_y),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidInput(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.header_max_y > self.title_max_y || self.title_max_y > self.footer_min_y {
            return Err(Error::InvalidInput(
                "classification bands must satisfy header_max_y <= title_max_y <= footer_min_y"
                    .to_string(),
            ));
        }
        if self.gravity_left_max_cx > self.gravity_right_min_cx {
            return Err(Error::InvalidInput(
                "gravity_left_max_cx must not exceed gravity_right_min_cx".to_string(),
            ));
        }
        if self.inferred_page_margin < 1.0 {
            return Err(Error::InvalidInput(format!(
                "inferred_page_margin must be at least 1.0, got {}",
                self.inferred_page_margin
            )));
        }
        Ok(())
    }

    /// Set the y below which everything is footer territory.
    pub fn with_footer_cutoff(mut self, y: f32) -> Self {
        self.footer_cutoff_y = y;
        self
    }

    /// Set the classification bands.
    pub fn with_bands(mut self, header_max_y: f32, title_max_y: f32, footer_min_y: f32) -> Self {
        self.header_max_y = header_max_y;
        self.title_max_y = title_max_y;
        self.footer_min_y = footer_min_y;
        self
    }

    /// Set the horizontal split between the two columns.
    pub fn with_column_split(mut self, x: f32) -> Self {
        self.column_split_x = x;
        self
    }

    /// Set the barrier used when no image or table qualifies.
    pub fn with_default_barrier(mut self, y: f32) -> Self {
        self.default_barrier = y;
        self
    }

    /// Set the list heuristics.
    pub fn with_list_rule(mut self, min_items: usize, many_items: usize, min_chars: usize) -> Self {
        self.list_min_items = min_items;
        self.list_many_items = many_items;
        self.list_min_chars = min_chars;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_max_y: 0.10,
            title_max_y: 0.25,
            footer_min_y: 0.90,

            list_min_items: 3,
            list_many_items: 4,
            list_min_chars: 20,
            code_min_lines: 2,
            code_max_gap: 4,
            bottom_align_blank_lines: 2,

            full_width_min_w: 0.80,
            gravity_top_max_y: 0.35,
            full_width_bottom_min_y: 0.70,
            gravity_bottom_min_y: 0.75,
            gravity_right_min_cx: 0.55,
            gravity_left_max_cx: 0.45,
            left_majority_margin: 1,
            center_pull_min_y: 0.20,
            center_pull_max_y: 0.80,

            barrier_min_y: 0.08,
            default_barrier: 0.25,
            barrier_buffer: 0.02,
            top_band_min_w: 0.85,
            table_top_max_y: 0.05,
            footer_cutoff_y: 0.94,
            column_split_x: 0.50,

            inferred_page_margin: 1.05,
            recurring_min_ratio: 0.70,
            recurring_footer_min_y: 0.85,
        }
    }
}
