use std::fmt;

use crate::scene::attrs::Attrs;
use crate::scene::model::NodeKind;

/// Attribute carrying the semantic role.
pub const ATTR_ROLE: &str = "data-role";
/// Attribute carrying an explicit render layer.
pub const ATTR_LAYER: &str = "data-layer";
/// Attribute carrying the decoration kind.
pub const ATTR_DECOR_TYPE: &str = "data-decor-type";
/// Attribute carrying the prop kind.
pub const ATTR_PROP_KIND: &str = "data-prop-kind";

/// Semantic role of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Background decoration.
    Decor,
    /// Person or other focal subject.
    Subject,
    /// Object or UI prop.
    Prop,
    /// Copy.
    Text,
    /// Untagged or unrecognized role.
    Unknown,
}

impl Role {
    fn parse(s: &str) -> Self {
        match s {
            "decor" => Self::Decor,
            "subject" => Self::Subject,
            "prop" => Self::Prop,
            "text" => Self::Text,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decor => "decor",
            Self::Subject => "subject",
            Self::Prop => "prop",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// One of the four fixed render buckets, in stacking order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Base background (textures, shadows).
    BgBase,
    /// Background (panels, props, accents).
    Bg,
    /// Foreground (subjects, foreground props).
    Fg,
    /// Copy on top of everything.
    Text,
}

impl Layer {
    /// All layers in render order.
    pub const ALL: [Layer; 4] = [Layer::BgBase, Layer::Bg, Layer::Fg, Layer::Text];

    /// Parse a `data-layer` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "bg_base" => Some(Self::BgBase),
            "bg" => Some(Self::Bg),
            "fg" => Some(Self::Fg),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Canonical attribute spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BgBase => "bg_base",
            Self::Bg => "bg",
            Self::Fg => "fg",
            Self::Text => "text",
        }
    }

    /// Id of the rendered `<g>` group for this layer.
    pub fn group_id(self) -> &'static str {
        match self {
            Self::BgBase => "layer_bg_base",
            Self::Bg => "layer_bg",
            Self::Fg => "layer_fg",
            Self::Text => "layer_text",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoration kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorType {
    /// Full-surface fill or texture.
    Texture,
    /// Soft shadow or light blob.
    Shadow,
    /// Small ornament.
    Accent,
}

impl DecorType {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "texture" => Some(Self::Texture),
            "shadow" => Some(Self::Shadow),
            "accent" => Some(Self::Accent),
            _ => None,
        }
    }
}

/// Prop kind. Only containers get special treatment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// Framing panel, exempt from prop/subject overlap rules.
    Container,
    /// Any other prop.
    #[default]
    Standard,
}

/// Semantic tags resolved once from a node's `data-*` attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeTags {
    /// Resolved role (`text` nodes default to [`Role::Text`]).
    pub role: Role,
    /// Explicit layer override, if a valid one was authored.
    pub layer_override: Option<Layer>,
    /// Explicit decoration kind, if a valid one was authored.
    pub decor_type: Option<DecorType>,
    /// Prop kind.
    pub prop_kind: PropKind,
}

impl NodeTags {
    /// Resolve tags from attributes.
    pub fn resolve(kind: NodeKind, attrs: &Attrs) -> Self {
        let role = match attrs.str(ATTR_ROLE).filter(|s| !s.is_empty()) {
            Some(raw) => Role::parse(raw),
            None if kind == NodeKind::Text => Role::Text,
            None => Role::Unknown,
        };
        let prop_kind = match attrs.str(ATTR_PROP_KIND).map(str::trim) {
            Some("container") => PropKind::Container,
            _ => PropKind::Standard,
        };
        Self {
            role,
            layer_override: attrs.str(ATTR_LAYER).and_then(Layer::parse),
            decor_type: attrs.str(ATTR_DECOR_TYPE).and_then(DecorType::parse),
            prop_kind,
        }
    }

    /// Effective render layer: the explicit override, else inferred from role and decor type.
    pub fn effective_layer(&self) -> Layer {
        if let Some(layer) = self.layer_override {
            return layer;
        }
        match self.role {
            Role::Text => Layer::Text,
            Role::Decor => match self.decor_type {
                Some(DecorType::Texture | DecorType::Shadow) => Layer::BgBase,
                _ => Layer::Bg,
            },
            Role::Subject | Role::Prop | Role::Unknown => Layer::Fg,
        }
    }

    /// Whether `layer` is allowed for this node's role.
    pub fn layer_allowed(&self, layer: Layer) -> bool {
        match self.role {
            Role::Text => layer == Layer::Text,
            Role::Decor => matches!(layer, Layer::Bg | Layer::BgBase),
            Role::Subject => layer == Layer::Fg,
            Role::Prop => matches!(layer, Layer::Bg | Layer::Fg),
            Role::Unknown => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tags.rs"]
mod tests;
