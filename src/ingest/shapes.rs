//! Shape tree ingestion.
//!
//! Presentation files nest shapes inside groups to arbitrary depth. A shape
//! tree is flattened into the ordered item list of a [`Slide`], with each
//! leaf's absolute frame in EMU (English Metric Units) as its bounding box.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{CoordOrigin, Deck, RawBBox, RawContent, RawItem, Slide};

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Absolute shape frame in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeFrame {
    /// Distance from the left slide edge
    pub left: i64,
    /// Distance from the top slide edge
    pub top: i64,
    /// Frame width
    pub width: i64,
    /// Frame height
    pub height: i64,
}

impl ShapeFrame {
    /// Create a new frame.
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn to_bbox(self) -> RawBBox {
        RawBBox::Offset {
            x: self.left as f32,
            y: self.top as f32,
            w: self.width as f32,
            h: self.height as f32,
        }
    }
}

/// A node of a shape tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeNode {
    /// A content-bearing shape
    Leaf {
        /// Shape content
        content: RawContent,
        /// Absolute frame, if the shape has one
        #[serde(default)]
        frame: Option<ShapeFrame>,
    },
    /// A group of shapes
    Group {
        /// Child shapes in z-order
        #[serde(default)]
        children: Vec<ShapeNode>,
    },
}

impl ShapeNode {
    /// Create a leaf node.
    pub fn leaf(content: RawContent, frame: Option<ShapeFrame>) -> Self {
        ShapeNode::Leaf { content, frame }
    }

    /// Create a group node.
    pub fn group(children: Vec<ShapeNode>) -> Self {
        ShapeNode::Group { children }
    }
}

/// Flatten shape trees into leaves, pre-order with children in order.
pub fn flatten_shapes(nodes: &[ShapeNode]) -> Vec<(&RawContent, Option<ShapeFrame>)> {
    let mut leaves = Vec::new();
    let mut stack: Vec<&ShapeNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            ShapeNode::Leaf { content, frame } => leaves.push((content, *frame)),
            ShapeNode::Group { children } => stack.extend(children.iter().rev()),
        }
    }
    leaves
}

/// One slide of a shape deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeSlide {
    /// Slide number (1-indexed); defaults to the position in the deck
    #[serde(default)]
    pub number: Option<u32>,
    /// Top-level shapes
    #[serde(default)]
    pub shapes: Vec<ShapeNode>,
}

/// A deck given as shape trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDeck {
    /// Slide width in EMU
    pub slide_width: i64,
    /// Slide height in EMU
    pub slide_height: i64,
    /// Slides in presentation order
    #[serde(default)]
    pub slides: Vec<ShapeSlide>,
}

impl ShapeDeck {
    /// Convert into the raw deck model.
    pub fn into_deck(self) -> Result<Deck> {
        if self.slide_width <= 0 || self.slide_height <= 0 {
            return Err(Error::InvalidInput(format!(
                "slide size must be positive, got {} x {} EMU",
                self.slide_width, self.slide_height
            )));
        }

        let mut deck = Deck::new();
        for (idx, shape_slide) in self.slides.iter().enumerate() {
            let number = shape_slide.number.unwrap_or(idx as u32 + 1);
            deck.add_slide(slide_from_shapes(
                number,
                self.slide_width,
                self.slide_height,
                &shape_slide.shapes,
            ));
        }
        Ok(deck)
    }
}

/// Build a slide from its shape trees.
pub fn slide_from_shapes(number: u32, width: i64, height: i64, shapes: &[ShapeNode]) -> Slide {
    let mut slide = Slide::new(number).with_page_size(width as f32, height as f32);
    for (content, frame) in flatten_shapes(shapes) {
        let item = RawItem {
            content: content.clone(),
            prov: None,
        };
        let item = match frame {
            Some(frame) => item.with_prov(number, frame.to_bbox(), CoordOrigin::TopLeft),
            None => item,
        };
        slide.add_item(item);
    }
    slide
}

/// Parse a shape deck from a JSON string.
pub fn parse_shapes_str(json: &str) -> Result<Deck> {
    let deck: ShapeDeck = serde_json::from_str(json)?;
    deck.into_deck()
}
