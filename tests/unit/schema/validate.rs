use super::*;

const MOTHER: &str = include_str!("../../data/scene.mother.json");

fn mother() -> Value {
    serde_json::from_str(MOTHER).unwrap()
}

fn messages(doc: &Value) -> Vec<String> {
    match validate_scene_value(doc) {
        Ok(()) => Vec::new(),
        Err(errs) => errs.errors.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn fixture_is_valid() {
    assert!(validate_scene_value(&mother()).is_ok());
}

#[test]
fn non_object_root() {
    let errs = validate_scene_value(&Value::from(3)).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs.to_string(), "root must be an object");
}

#[test]
fn collects_every_violation() {
    let mut doc = mother();
    doc["meta"]["version"] = Value::from("0.2");
    doc["canvas"]["viewBox"] = Value::from("0 0 100 100");
    doc["nodes"][0]["text"] = Value::from("");
    doc["nodes"][3]["id"] = Value::from("panel");
    doc["animations"][0]["tracks"][0]["target"] = Value::from("ghost");

    let msgs = messages(&doc);
    assert_eq!(msgs.len(), 5, "{msgs:#?}");
    assert!(msgs.contains(&"$.meta.version: version must be \"0.1\"".to_string()));
    assert!(msgs.contains(&"$.canvas.viewBox: viewBox must be \"0 0 1200 600\"".to_string()));
    assert!(msgs.iter().any(|m| m.starts_with("$.nodes[0].text:")));
    assert!(msgs.contains(&"$.nodes[3].id: duplicate node id \"panel\"".to_string()));
    assert!(
        msgs.contains(
            &"$.animations[0].tracks[0].target: track target \"ghost\" not found".to_string()
        )
    );
}

#[test]
fn view_box_spelling_is_numeric() {
    let mut doc = mother();
    doc["canvas"]["viewBox"] = Value::from("0,0 1200.0 600");
    assert!(validate_scene_value(&doc).is_ok());
}

#[test]
fn nested_children_are_checked() {
    let mut doc = mother();
    doc["nodes"][2]["children"] = serde_json::json!([
        {"id": "inner", "type": "blob"},
        {"id": "inner2", "type": "group", "children": {"oops": true}}
    ]);
    let msgs = messages(&doc);
    assert_eq!(
        msgs,
        [
            "$.nodes[2].children[0].type: unknown node type \"blob\"",
            "$.nodes[2].children[1].children: children must be an array",
        ]
    );
}

#[test]
fn empty_nodes_and_missing_sections() {
    let doc = serde_json::json!({
        "meta": {"version": "0.1"},
        "canvas": {"width": 10, "height": 10, "viewBox": "0 0 10 10"},
        "nodes": []
    });
    let msgs = messages(&doc);
    assert!(msgs.contains(&"$.theme.palette: theme.palette is required".to_string()));
    assert!(msgs.contains(&"$.nodes: nodes must be a non-empty array".to_string()));
    assert!(msgs.iter().any(|m| m.starts_with("$.animations:")));
    assert!(msgs.iter().any(|m| m.starts_with("$.a11y.reducedMotion:")));
}

#[test]
fn keyframe_rules() {
    let mut doc = mother();
    doc["animations"][0]["tracks"][0]["keyframes"] = serde_json::json!([
        {"t": 0.5, "value": 1},
        {"t": 0.2, "value": 0},
        {"t": 1.5, "value": 0}
    ]);
    let msgs = messages(&doc);
    assert_eq!(msgs.len(), 2, "{msgs:#?}");
    assert!(msgs[0].starts_with("$.animations[0].tracks[0].keyframes[1].t:"));
    assert!(msgs[1].starts_with("$.animations[0].tracks[0].keyframes[2].t:"));
}

#[test]
fn single_keyframe_is_rejected() {
    let mut doc = mother();
    doc["animations"][0]["tracks"][0]["keyframes"] = serde_json::json!([{"t": 0, "value": 1}]);
    let msgs = messages(&doc);
    assert_eq!(
        msgs,
        ["$.animations[0].tracks[0].keyframes: keyframes must have at least 2 entries"]
    );
}

#[test]
fn seed_must_fit_u32() {
    for bad in [Value::from(-1), Value::from(1.5), Value::from(4_294_967_296_u64), Value::from("7")] {
        let mut doc = mother();
        doc["meta"]["seed"] = bad.clone();
        assert_eq!(
            messages(&doc),
            vec!["$.meta.seed: seed must be an integer in 0..=4294967295".to_string()],
            "{bad}"
        );
    }

    let mut doc = mother();
    doc["meta"]["seed"] = Value::from(u32::MAX);
    assert!(validate_scene_value(&doc).is_ok());
    doc["meta"].as_object_mut().unwrap().remove("seed");
    assert!(validate_scene_value(&doc).is_ok());
}

#[test]
fn text_on_a_non_text_node() {
    let mut doc = mother();
    doc["nodes"][2]["text"] = Value::from("stray");
    doc["meta"]["seed"] = Value::from(-3);
    let msgs = messages(&doc);
    assert_eq!(msgs.len(), 2, "{msgs:#?}");
    assert!(msgs.contains(&"$.nodes[2].text: only text nodes carry text (\"panel\" is \"rect\")".to_string()));
}
