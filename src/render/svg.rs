use std::fmt::Write as _;

use crate::foundation::math::format_number;
use crate::scene::attrs::Attrs;
use crate::scene::model::{Node, Scene};
use crate::scene::tags::Layer;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Top-level nodes partitioned into the four layer buckets.
///
/// Each bucket keeps authoring order, so stacking inside a layer is exactly what the document says
/// and stacking across layers is fixed by [`Layer::ALL`].
#[derive(Clone, Debug)]
pub struct LayerPlan<'a> {
    pub buckets: [Vec<&'a Node>; 4],
}

impl<'a> LayerPlan<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        let mut buckets: [Vec<&'a Node>; 4] = Default::default();
        for n in &scene.nodes {
            buckets[bucket_index(n.effective_layer())].push(n);
        }
        Self { buckets }
    }

    pub fn layer(&self, layer: Layer) -> &[&'a Node] {
        &self.buckets[bucket_index(layer)]
    }
}

fn bucket_index(layer: Layer) -> usize {
    match layer {
        Layer::BgBase => 0,
        Layer::Bg => 1,
        Layer::Fg => 2,
        Layer::Text => 3,
    }
}

/// Serialize a scene to standalone SVG markup.
#[tracing::instrument(skip_all, fields(nodes = scene.nodes.len()))]
pub fn render_svg(scene: &Scene) -> String {
    let plan = LayerPlan::new(scene);
    let canvas = &scene.canvas;

    let mut lines: Vec<String> = Vec::new();
    lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
    lines.push(format!(
        r#"<svg xmlns="{SVG_NS}" viewBox="{}" width="{}" height="{}" role="img">"#,
        escape_attr(&canvas.view_box),
        format_number(canvas.width),
        format_number(canvas.height),
    ));
    if !scene.a11y.title.is_empty() {
        lines.push(format!("<title>{}</title>", escape_text(&scene.a11y.title)));
    }
    if !scene.a11y.desc.is_empty() {
        lines.push(format!("<desc>{}</desc>", escape_text(&scene.a11y.desc)));
    }
    // Opaque markup, written untouched.
    if !scene.defs.raw.is_empty() {
        lines.push(format!("<defs>{}</defs>", scene.defs.raw));
    }

    for layer in Layer::ALL {
        lines.push(format!(r#"<g id="{}">"#, layer.group_id()));
        for n in plan.layer(layer) {
            lines.push(node_markup(n));
        }
        lines.push("</g>".to_string());
    }
    lines.push("</svg>".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Markup for one node and its subtree.
pub fn node_markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    let tag = node.kind.element();
    out.push('<');
    out.push_str(tag);
    write_attrs(out, node);

    let text = node.text.as_deref().unwrap_or("");
    if node.children.is_empty() && text.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    out.push_str(&escape_text(text));
    for c in &node.children {
        write_node(out, c);
    }
    let _ = write!(out, "</{tag}>");
}

/// Authored attributes in order, then `id` and `style`. Both replace an authored attribute of
/// the same name in place.
fn write_attrs(out: &mut String, node: &Node) {
    let style = style_string(&node.style);
    let (mut wrote_id, mut wrote_style) = (false, false);
    for (k, v) in node.attrs().iter() {
        match (k, &style) {
            ("id", _) => {
                write_attr(out, "id", &node.id);
                wrote_id = true;
            }
            ("style", Some(style)) => {
                write_attr(out, "style", style);
                wrote_style = true;
            }
            _ => write_attr(out, k, &v.to_string()),
        }
    }
    if !wrote_id {
        write_attr(out, "id", &node.id);
    }
    if let (Some(style), false) = (&style, wrote_style) {
        write_attr(out, "style", style);
    }
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
}

/// `k:v` pairs joined by `;`. Empty values are dropped; `None` when nothing is left.
fn style_string(style: &Attrs) -> Option<String> {
    let parts: Vec<String> = style
        .iter()
        .filter(|(_, v)| v.as_str() != Some(""))
        .map(|(k, v)| format!("{k}:{v}"))
        .collect();
    (!parts.is_empty()).then(|| parts.join(";"))
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
