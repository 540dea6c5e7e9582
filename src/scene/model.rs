use std::collections::HashSet;

use serde::Deserialize as _;

use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::sampler::LayoutParams;
use crate::scene::attrs::{AttrValue, Attrs};
use crate::scene::tags::{Layer, NodeTags};

/// Scene document format version.
pub const SCENE_VERSION: &str = "0.1";

/// Declarative scene document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub meta: Meta,
    pub canvas: Canvas,
    pub theme: Theme,
    #[serde(default)]
    pub defs: Defs,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    #[serde(default)]
    pub a11y: A11y,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub seed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<AutoMeta>,
}

/// Provenance of an auto-filled scene: the winning candidate's layout and score.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutoMeta {
    pub domain: String,
    pub style: String,
    pub seed: u32,
    pub candidates: usize,
    pub score: f64,
    pub layout: LayoutParams,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    #[serde(default)]
    pub bg: String,
}

impl Canvas {
    /// Canvas with the canonical `"0 0 <w> <h>"` view box.
    pub fn new(width: f64, height: f64, bg: impl Into<String>) -> Self {
        Self {
            width,
            height,
            view_box: Self::view_box_for(width, height),
            bg: bg.into(),
        }
    }

    pub fn view_box_for(width: f64, height: f64) -> String {
        format!(
            "0 0 {} {}",
            crate::foundation::math::format_number(width),
            crate::foundation::math::format_number(height)
        )
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub palette: Palette,
    pub typography: Typography,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub bg: String,
    pub fg: String,
    pub primary: String,
    pub accent: String,
    pub muted: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    #[serde(default = "default_base_size")]
    pub base_size: f64,
}

fn default_base_size() -> f64 {
    16.0
}

/// Shared definitions: referenced motif ids plus opaque raw markup.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Defs {
    #[serde(default)]
    pub motifs: Vec<String>,
    #[serde(default)]
    pub raw: String,
}

/// Element type of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Group,
    Rect,
    Circle,
    Ellipse,
    Line,
    Path,
    Text,
    Image,
    Use,
}

impl NodeKind {
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Group,
        NodeKind::Rect,
        NodeKind::Circle,
        NodeKind::Ellipse,
        NodeKind::Line,
        NodeKind::Path,
        NodeKind::Text,
        NodeKind::Image,
        NodeKind::Use,
    ];

    /// Document spelling, also the SVG element name except for `group`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Path => "path",
            Self::Text => "text",
            Self::Image => "image",
            Self::Use => "use",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// SVG element name.
    pub fn element(self) -> &'static str {
        match self {
            Self::Group => "g",
            other => other.as_str(),
        }
    }
}

#[derive(serde::Deserialize)]
struct NodeRepr {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    attrs: Attrs,
    #[serde(default)]
    style: Attrs,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<Node>,
}

impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeRepr::deserialize(deserializer).map(Node::from)
    }
}

impl From<NodeRepr> for Node {
    fn from(r: NodeRepr) -> Self {
        let tags = NodeTags::resolve(r.kind, &r.attrs);
        Self {
            id: r.id,
            kind: r.kind,
            attrs: r.attrs,
            tags,
            style: r.style,
            text: r.text,
            children: r.children,
        }
    }
}

/// One element of the scene tree.
///
/// Semantic `data-*` tags are resolved into [`NodeTags`] when the node is built or deserialized
/// and every attribute write goes through [`Node::set_attr`] / [`Node::update_attrs`] so the
/// resolved tags never go stale.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    attrs: Attrs,
    #[serde(skip)]
    tags: NodeTags,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub style: Attrs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        let attrs = Attrs::new();
        Self {
            id: id.into(),
            kind,
            tags: NodeTags::resolve(kind, &attrs),
            attrs,
            style: Attrs::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style style setter.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.style.set(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn tags(&self) -> &NodeTags {
        &self.tags
    }

    pub fn effective_layer(&self) -> Layer {
        self.tags.effective_layer()
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.set(key, value);
        self.tags = NodeTags::resolve(self.kind, &self.attrs);
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<AttrValue> {
        let out = self.attrs.remove(key);
        self.tags = NodeTags::resolve(self.kind, &self.attrs);
        out
    }

    /// Mutate attributes in bulk; tags are re-resolved afterwards.
    pub fn update_attrs(&mut self, f: impl FnOnce(&mut Attrs)) {
        f(&mut self.attrs);
        self.tags = NodeTags::resolve(self.kind, &self.attrs);
    }

    /// Pre-order traversal of this node and its descendants.
    pub fn walk<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for c in &self.children {
            c.walk(out);
        }
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for c in &mut self.children {
            c.walk_mut(f);
        }
    }
}

/// Timeline animation. Carried through the pipeline untouched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub target: String,
    pub property: String,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub t: f64,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11y {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub reduced_motion: ReducedMotion,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReducedMotion {
    pub strategy: String,
}

impl Default for ReducedMotion {
    fn default() -> Self {
        Self {
            strategy: "none".to_string(),
        }
    }
}

impl Scene {
    /// Parse a scene document from JSON text.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a scene from an already-loaded JSON value.
    pub fn from_value(v: serde_json::Value) -> SceneResult<Self> {
        Ok(serde_json::from_value(v)?)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        let mut s = serde_json::to_string_pretty(self)?;
        s.push('\n');
        Ok(s)
    }

    /// Every node in the tree, pre-order.
    pub fn flatten(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for n in &self.nodes {
            n.walk(&mut out);
        }
        out
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.flatten().into_iter().find(|n| n.id == id)
    }

    /// Top-level node by id.
    pub fn top_level(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn for_each_node_mut(&mut self, mut f: impl FnMut(&mut Node)) {
        for n in &mut self.nodes {
            n.walk_mut(&mut f);
        }
    }

    /// Fails with the first duplicated id, if any.
    pub fn check_unique_ids(&self) -> SceneResult<()> {
        let mut seen = HashSet::new();
        for n in self.flatten() {
            if !seen.insert(n.id.as_str()) {
                return Err(SceneError::validation(format!("duplicate node id \"{}\"", n.id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
