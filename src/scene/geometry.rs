use crate::foundation::core::BoundingBox;
use crate::scene::model::{Canvas, Node, NodeKind};

/// Character advance as a fraction of font size.
pub const TEXT_ADVANCE: f64 = 0.56;
/// Line height as a fraction of font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.2;
/// Font size assumed when a text node has none.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Approximate text box; `y` is the baseline, so the box sits above it.
pub fn text_bbox(node: &Node) -> BoundingBox {
    let a = node.attrs();
    let x = a.num_or("x", 0.0);
    let y = a.num_or("y", 0.0);
    let font_size = a.num_or("font-size", DEFAULT_FONT_SIZE);
    let chars = node.text.as_deref().map_or(0, |t| t.chars().count());

    let w = (chars.max(1) as f64) * font_size * TEXT_ADVANCE;
    let h = font_size * TEXT_LINE_HEIGHT;
    let left = match a.str("text-anchor").map(str::trim) {
        Some("middle") => x - w / 2.0,
        Some("end") => x - w,
        _ => x,
    };
    BoundingBox::new(left, y - h, w, h)
}

/// Bounding box derived from geometry attributes. `None` for `path` and `group`.
pub fn node_bbox(node: &Node) -> Option<BoundingBox> {
    let a = node.attrs();
    match node.kind {
        NodeKind::Rect | NodeKind::Image | NodeKind::Use => Some(BoundingBox::new(
            a.num_or("x", 0.0),
            a.num_or("y", 0.0),
            a.num_or("width", 0.0),
            a.num_or("height", 0.0),
        )),
        NodeKind::Circle => {
            let r = a.num_or("r", 0.0);
            Some(BoundingBox::from_center(
                a.num_or("cx", 0.0),
                a.num_or("cy", 0.0),
                r,
                r,
            ))
        }
        NodeKind::Ellipse => Some(BoundingBox::from_center(
            a.num_or("cx", 0.0),
            a.num_or("cy", 0.0),
            a.num_or("rx", 0.0),
            a.num_or("ry", 0.0),
        )),
        NodeKind::Line => {
            let (x1, y1) = (a.num_or("x1", 0.0), a.num_or("y1", 0.0));
            let (x2, y2) = (a.num_or("x2", 0.0), a.num_or("y2", 0.0));
            Some(BoundingBox::new(
                x1.min(x2),
                y1.min(y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ))
        }
        NodeKind::Text => Some(text_bbox(node)),
        NodeKind::Path | NodeKind::Group => None,
    }
}

/// Box with positive area, the only kind the geometric rules consider.
pub fn solid_bbox(node: &Node) -> Option<BoundingBox> {
    node_bbox(node).filter(|b| b.area() > 0.0)
}

pub fn canvas_box(canvas: &Canvas) -> BoundingBox {
    BoundingBox::new(0.0, 0.0, canvas.width, canvas.height)
}

/// Fraction of the canvas covered by `b` (canvas area floored at 1).
pub fn coverage(b: BoundingBox, canvas: &Canvas) -> f64 {
    b.area() / canvas.area().max(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
