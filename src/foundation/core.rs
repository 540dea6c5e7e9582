pub use kurbo::{Point, Rect};

/// Axis-aligned bounding box in canvas pixel space.
///
/// Boxes are stored as origin + size (`x`, `y`, `w`, `h`) to mirror SVG geometry attributes.
/// Negative sizes are tolerated on input and contribute zero area.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl BoundingBox {
    /// Create a box from origin and size.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Box centered at `(cx, cy)` with half extents `(rx, ry)`.
    pub fn from_center(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)
    }

    /// Area with negative extents clamped to zero.
    pub fn area(self) -> f64 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.h
    }

    /// Center point.
    pub fn center(self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Grow the box by `pad` on every side.
    pub fn expand(self, pad: f64) -> Self {
        Self::from_rect(self.to_rect().inflate(pad, pad))
    }

    /// Overlapping region, or `None` when the boxes only touch or are disjoint.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::from_rect(Rect::new(x0, y0, x1, y1)))
    }

    /// Area of the overlapping region (0 when disjoint).
    pub fn overlap_area(self, other: Self) -> f64 {
        self.intersect(other).map_or(0.0, Self::area)
    }

    /// Convert to a kurbo rect (`x0,y0` top-left, `x1,y1` bottom-right).
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Convert from a kurbo rect.
    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Ratio of `overlap / max(1, min(area_a, area_b))`, the normalization used by every pairwise
/// overlap rule.
pub fn overlap_ratio_min(a: BoundingBox, b: BoundingBox) -> f64 {
    a.overlap_area(b) / a.area().min(b.area()).max(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
