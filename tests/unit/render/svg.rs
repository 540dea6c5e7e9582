use super::*;
use crate::scene::model::NodeKind;

fn mother() -> Scene {
    Scene::from_json_str(include_str!("../../data/scene.mother.json")).unwrap()
}

fn pos(hay: &str, needle: &str) -> usize {
    hay.find(needle).unwrap_or_else(|| panic!("missing {needle}"))
}

#[test]
fn layer_plan_keeps_authoring_order_per_bucket() {
    let scene = mother();
    let plan = LayerPlan::new(&scene);
    let ids = |layer| plan.layer(layer).iter().map(|n| n.id.as_str()).collect::<Vec<_>>();

    assert_eq!(ids(Layer::BgBase), vec!["bg"]);
    assert_eq!(ids(Layer::Bg), vec!["panel", "card", "spark"]);
    assert_eq!(ids(Layer::Fg), vec!["person"]);
    assert_eq!(ids(Layer::Text), vec!["headline", "subhead"]);
}

#[test]
fn document_shape() {
    let svg = render_svg(&mother());
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1200 600\" width=\"1200\" height=\"600\" role=\"img\">\n"));
    assert!(svg.ends_with("</svg>\n"));
    // Empty title is omitted.
    assert!(!svg.contains("<title>"));
    assert!(svg.contains("<desc>Payments hero</desc>"));
    assert!(svg.contains("<defs><linearGradient id=\"g_accent\">"));

    let groups = ["layer_bg_base", "layer_bg", "layer_fg", "layer_text"]
        .map(|g| pos(&svg, &format!("<g id=\"{g}\">")));
    assert!(groups.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn base_layer_is_painted_first() {
    let svg = render_svg(&mother());
    // The texture is authored after the headline but stacks below everything.
    assert!(pos(&svg, "id=\"bg\"") < pos(&svg, "id=\"panel\""));
    assert!(pos(&svg, "id=\"panel\"") < pos(&svg, "id=\"person\""));
    assert!(pos(&svg, "id=\"person\"") < pos(&svg, "id=\"headline\""));
}

#[test]
fn node_markup_attributes() {
    let n = Node::new("card", NodeKind::Rect)
        .attr("x", 10.0)
        .attr("width", 120.5)
        .attr("fill", "url(#g)");
    assert_eq!(
        node_markup(&n),
        r#"<rect x="10" width="120.5" fill="url(#g)" id="card"/>"#
    );

    let n = Node::new("real", NodeKind::Circle)
        .attr("id", "authored")
        .attr("style", "opacity:1")
        .attr("r", 4.0)
        .with_style("fill", "red")
        .with_style("stroke-width", 2.0);
    assert_eq!(
        node_markup(&n),
        r#"<circle id="real" style="fill:red;stroke-width:2" r="4"/>"#
    );
}

#[test]
fn text_and_children_are_escaped() {
    let n = Node::new("g1", NodeKind::Group).with_children(vec![
        Node::new("t", NodeKind::Text)
            .attr("data-note", "a \"quoted\" <note>")
            .with_text("Fish & chips <b>"),
    ]);
    assert_eq!(
        node_markup(&n),
        r#"<g id="g1"><text data-note="a &quot;quoted&quot; &lt;note&gt;" id="t">Fish &amp; chips &lt;b&gt;</text></g>"#
    );
}

#[test]
fn nested_nodes_follow_their_top_level_parent() {
    let mut scene = mother();
    scene.nodes = vec![
        Node::new("group", NodeKind::Group)
            .attr("data-role", "decor")
            .attr("data-decor-type", "texture")
            .with_children(vec![Node::new("inner", NodeKind::Rect).attr("data-role", "subject")]),
    ];
    let plan = LayerPlan::new(&scene);
    assert_eq!(plan.layer(Layer::BgBase).len(), 1);
    assert!(plan.layer(Layer::Fg).is_empty());
}

#[test]
fn escapes() {
    assert_eq!(escape_attr(r#"a&b"<>'"#), "a&amp;b&quot;&lt;&gt;'");
    assert_eq!(escape_text(r#"a&b"<>"#), "a&amp;b\"&lt;&gt;");
}

#[test]
fn empty_defs_are_skipped() {
    let mut scene = mother();
    scene.defs.raw = String::new();
    scene.a11y.title = "Hero".to_string();
    let svg = render_svg(&scene);
    assert!(!svg.contains("<defs>"));
    assert!(svg.contains("<title>Hero</title>"));
}

#[test]
fn defs_raw_is_written_verbatim() {
    let mut scene = mother();
    scene.defs.raw = "\n  <filter id=\"f_soft\"/>\n<symbol id=\"s\"></symbol>  ".to_string();
    let svg = render_svg(&scene);
    assert!(svg.contains("<defs>\n  <filter id=\"f_soft\"/>\n<symbol id=\"s\"></symbol>  </defs>\n"));
}

#[test]
fn empty_style_values_are_dropped() {
    let mut scene = mother();
    let card = scene.nodes.iter_mut().find(|n| n.id == "card").unwrap();
    card.style.set("fill", "");
    card.style.set("stroke", "");
    let svg = render_svg(&scene);
    let line = svg.lines().find(|l| l.contains("id=\"card\"")).unwrap();
    assert!(!line.contains("style="), "{line}");

    let n = Node::new("chip", NodeKind::Rect)
        .with_style("fill", "")
        .with_style("opacity", 0.5)
        .with_style("stroke", "#fff");
    assert_eq!(node_markup(&n), r#"<rect id="chip" style="opacity:0.5;stroke:#fff"/>"#);
}

#[test]
fn attributes_keep_authoring_order_through_schema_load() {
    let scene = crate::schema::load_scene_str(include_str!("../../data/scene.mother.json")).unwrap();
    let svg = render_svg(&scene);
    let line = svg.lines().find(|l| l.contains("id=\"card\"")).unwrap();
    assert_eq!(
        line,
        r##"<use data-role="prop" data-layer="bg" href="#motif_card_ui" x="120" y="160" width="300" height="200" opacity="0.76" id="card"/>"##
    );
}
