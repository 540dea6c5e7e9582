use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::brief::Brief;
use crate::scene::attrs::{AttrValue, Attrs};
use crate::scene::model::{Node, NodeKind, Scene};

static SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*slot:([A-Za-z0-9_-]+)\s*\}\}").expect("slot placeholder regex is valid")
});

/// Replace every `{{slot:key}}` in `text`. Unknown and non-string slots become empty.
pub fn fill_slots(text: &str, brief: &Brief) -> String {
    SLOT.replace_all(text, |caps: &Captures<'_>| {
        brief.slot(&caps[1]).unwrap_or_default().to_string()
    })
    .into_owned()
}

fn fill_values(attrs: &mut Attrs, brief: &Brief) {
    for v in attrs.values_mut() {
        if let AttrValue::Str(s) = v
            && SLOT.is_match(s)
        {
            *s = fill_slots(s, brief);
        }
    }
}

fn fill_node(node: &mut Node, brief: &Brief) {
    if node.kind == NodeKind::Text
        && let Some(text) = node.text.as_mut()
    {
        *text = fill_slots(text, brief);
    }
    // Slot values may carry `data-*` tags, so go through update_attrs.
    node.update_attrs(|attrs| fill_values(attrs, brief));
    fill_values(&mut node.style, brief);
}

/// Fill a scene mother with brief copy.
///
/// Besides slot substitution, the brief title fills an empty scene title, brief `lang` and `seed`
/// override the scene's, and an empty `a11y.title` takes the `headline` slot. Animations are
/// left alone.
#[tracing::instrument(skip_all, fields(slots = brief.layout.slots.len()))]
pub fn compose(scene: &Scene, brief: &Brief) -> Scene {
    let mut out = scene.clone();

    if out.meta.title.is_empty()
        && let Some(title) = brief.meta.title.as_deref().filter(|t| !t.is_empty())
    {
        out.meta.title = title.to_string();
    }
    if let Some(lang) = brief.meta.lang.as_deref().filter(|l| !l.is_empty()) {
        out.meta.lang = lang.to_string();
    }
    if let Some(seed) = brief.meta.seed {
        out.meta.seed = seed;
    }
    if out.a11y.title.is_empty()
        && let Some(headline) = brief.slot("headline").filter(|h| !h.is_empty())
    {
        out.a11y.title = headline.to_string();
    }

    out.for_each_node_mut(|n| fill_node(n, brief));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/slots.rs"]
mod tests;
