//! Geometry types: raw page-unit boxes and normalized slide rectangles.

use serde::{Deserialize, Serialize};

/// A rectangle in normalized slide space.
///
/// Origin is the top-left corner of the slide; all values are fractions of
/// the slide width (`x`, `w`) or height (`y`, `h`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Check whether `other` lies fully inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Smallest rectangle enclosing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Smallest rectangle enclosing every rectangle in the iterator.
    ///
    /// Returns `None` for an empty iterator.
    pub fn union_all<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(u) => Some(u.union(r)),
                None => Some(*r),
            })
    }

    /// Integer key used to match rectangles with identical geometry.
    ///
    /// Values are compared at a resolution of 1/1000 of the slide.
    pub fn key(&self) -> GeometryKey {
        let q = |v: f32| (v * 1000.0).round() as i32;
        GeometryKey([q(self.x), q(self.y), q(self.w), q(self.h)])
    }
}

/// Rounded geometry used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryKey(pub [i32; 4]);

/// Coordinate origin of a raw bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordOrigin {
    /// Y grows downwards from the top edge
    #[default]
    TopLeft,
    /// Y grows upwards from the bottom edge
    BottomLeft,
}

impl CoordOrigin {
    /// Parse a docling-style origin flag (`TOPLEFT`, `BOTTOMLEFT`).
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.trim().to_ascii_uppercase().replace('_', "").as_str() {
            "TOPLEFT" => Some(CoordOrigin::TopLeft),
            "BOTTOMLEFT" => Some(CoordOrigin::BottomLeft),
            _ => None,
        }
    }
}

/// A bounding box in source page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBBox {
    /// Edge form: left, top, right, bottom
    Edges {
        /// Left edge
        l: f32,
        /// Top edge (may be numerically below `b` for bottom-left origins)
        t: f32,
        /// Right edge
        r: f32,
        /// Bottom edge
        b: f32,
    },
    /// Offset form: left, top, width, height
    Offset {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
    },
}

impl RawBBox {
    /// Convert to `(l, t, r, b)` edges.
    pub fn edges(&self) -> (f32, f32, f32, f32) {
        match *self {
            RawBBox::Edges { l, t, r, b } => (l, t, r, b),
            RawBBox::Offset { x, y, w, h } => (x, y, x + w, y + h),
        }
    }

    /// Largest horizontal coordinate.
    pub fn max_x(&self) -> f32 {
        let (l, _, r, _) = self.edges();
        l.max(r)
    }

    /// Largest vertical coordinate.
    pub fn max_y(&self) -> f32 {
        let (_, t, _, b) = self.edges();
        t.max(b)
    }
}

/// Page dimensions in source units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
}

impl PageSize {
    /// Create a new page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
