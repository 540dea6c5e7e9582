use super::*;

fn tags(kind: NodeKind, pairs: &[(&str, &str)]) -> NodeTags {
    let attrs: Attrs = pairs.iter().map(|(k, v)| (*k, *v)).collect();
    NodeTags::resolve(kind, &attrs)
}

#[test]
fn text_nodes_default_to_text_role() {
    let t = tags(NodeKind::Text, &[]);
    assert_eq!(t.role, Role::Text);
    assert_eq!(t.effective_layer(), Layer::Text);

    let r = tags(NodeKind::Rect, &[]);
    assert_eq!(r.role, Role::Unknown);
    assert_eq!(r.effective_layer(), Layer::Fg);
}

#[test]
fn decor_layer_follows_decor_type() {
    let texture = tags(NodeKind::Rect, &[(ATTR_ROLE, "decor"), (ATTR_DECOR_TYPE, "texture")]);
    assert_eq!(texture.effective_layer(), Layer::BgBase);
    let shadow = tags(NodeKind::Circle, &[(ATTR_ROLE, "decor"), (ATTR_DECOR_TYPE, "shadow")]);
    assert_eq!(shadow.effective_layer(), Layer::BgBase);
    let accent = tags(NodeKind::Circle, &[(ATTR_ROLE, "decor")]);
    assert_eq!(accent.effective_layer(), Layer::Bg);
    assert_eq!(accent.decor_type, None);
}

#[test]
fn explicit_layer_wins() {
    let t = tags(NodeKind::Use, &[(ATTR_ROLE, "prop"), (ATTR_LAYER, "bg")]);
    assert_eq!(t.effective_layer(), Layer::Bg);
    // Unknown layer strings are ignored.
    let t = tags(NodeKind::Use, &[(ATTR_ROLE, "prop"), (ATTR_LAYER, "sky")]);
    assert_eq!(t.layer_override, None);
    assert_eq!(t.effective_layer(), Layer::Fg);
}

#[test]
fn container_prop_kind() {
    let t = tags(NodeKind::Rect, &[(ATTR_ROLE, "prop"), (ATTR_PROP_KIND, "container")]);
    assert_eq!(t.prop_kind, PropKind::Container);
    let t = tags(NodeKind::Rect, &[(ATTR_ROLE, "prop")]);
    assert_eq!(t.prop_kind, PropKind::Standard);
}

#[test]
fn layer_table() {
    let subject = tags(NodeKind::Use, &[(ATTR_ROLE, "subject")]);
    assert!(subject.layer_allowed(Layer::Fg));
    assert!(!subject.layer_allowed(Layer::Bg));

    let text = tags(NodeKind::Text, &[]);
    assert!(!text.layer_allowed(Layer::Fg));

    let decor = tags(NodeKind::Rect, &[(ATTR_ROLE, "decor")]);
    assert!(decor.layer_allowed(Layer::BgBase));
    assert!(!decor.layer_allowed(Layer::Fg));

    let prop = tags(NodeKind::Rect, &[(ATTR_ROLE, "prop")]);
    assert!(prop.layer_allowed(Layer::Bg) && prop.layer_allowed(Layer::Fg));
    assert!(!prop.layer_allowed(Layer::Text));
}

#[test]
fn layer_names_and_groups() {
    for layer in Layer::ALL {
        assert_eq!(Layer::parse(layer.as_str()), Some(layer));
        assert_eq!(layer.group_id(), format!("layer_{}", layer.as_str()));
    }
    assert_eq!(Layer::BgBase.as_str(), "bg_base");
}
