use super::*;
use crate::scene::model::NodeKind;

const MOTHER: &str = include_str!("../../data/scene.mother.json");

fn scene_with(nodes: Vec<Node>) -> Scene {
    let mut s = Scene::from_json_str(MOTHER).unwrap();
    s.nodes = nodes;
    s
}

fn bg_prop(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
    Node::new(id, NodeKind::Rect)
        .attr("data-role", "prop")
        .attr("data-layer", "bg")
        .attr("x", x)
        .attr("y", y)
        .attr("width", w)
        .attr("height", h)
}

fn panel(x: f64, y: f64, w: f64, h: f64) -> Node {
    bg_prop("panel", x, y, w, h).attr("data-prop-kind", "container")
}

fn person(x: f64, y: f64) -> Node {
    Node::new("person", NodeKind::Use)
        .attr("data-role", "subject")
        .attr("href", "#motif_p")
        .attr("x", x)
        .attr("y", y)
        .attr("width", 320.0)
        .attr("height", 392.0)
}

fn delta(scene: &Scene, rule: &str) -> f64 {
    score_breakdown(scene, &ScoreTable::default())
        .into_iter()
        .find(|d| d.rule == rule)
        .map(|d| d.delta)
        .unwrap()
}

#[test]
fn empty_scene_scores_the_baseline() {
    let s = scene_with(Vec::new());
    assert_eq!(score(&s, &ScoreTable::default()), 1000.0);
    assert!(score_breakdown(&s, &ScoreTable::default()).iter().all(|d| d.delta == 0.0));
}

#[test]
fn overlapping_props_cost_more() {
    let apart = scene_with(vec![
        bg_prop("a", 100.0, 300.0, 100.0, 100.0),
        bg_prop("b", 400.0, 300.0, 100.0, 100.0),
    ]);
    let touching = scene_with(vec![
        bg_prop("a", 100.0, 300.0, 100.0, 100.0),
        bg_prop("b", 180.0, 300.0, 100.0, 100.0),
    ]);
    let table = ScoreTable::default();
    assert_eq!(delta(&apart, "pairwise_overlap"), 0.0);
    assert!((delta(&touching, "pairwise_overlap") + 56.0).abs() < 1e-9);
    assert!(score(&apart, &table) > score(&touching, &table));
}

#[test]
fn overlap_below_threshold_is_free() {
    let s = scene_with(vec![
        bg_prop("a", 100.0, 300.0, 100.0, 100.0),
        bg_prop("b", 199.0, 300.0, 100.0, 100.0),
    ]);
    assert_eq!(delta(&s, "pairwise_overlap"), 0.0);
}

#[test]
fn containers_do_not_count_as_overlapping_props() {
    let s = scene_with(vec![
        panel(100.0, 180.0, 700.0, 330.0),
        bg_prop("card", 130.0, 240.0, 300.0, 200.0),
    ]);
    assert_eq!(delta(&s, "pairwise_overlap"), 0.0);
}

#[test]
fn panel_and_person_in_the_sweet_spot() {
    let s = scene_with(vec![panel(100.0, 180.0, 700.0, 330.0), person(760.0, 172.0)]);
    let table = ScoreTable::default();
    // 40 x 330 of a 320 x 392 subject is ~10.5%.
    assert_eq!(delta(&s, "panel_subject_overlap"), 40.0);
    // |920 - 450| = 470, (470 - 360) / 4
    assert_eq!(delta(&s, "center_distance"), -27.5);
    assert_eq!(delta(&s, "out_of_canvas"), 0.0);
    assert_eq!(delta(&s, "balance"), 0.0);
    assert_eq!(score(&s, &table), 1012.5);
}

#[test]
fn subject_barely_touching_the_panel_is_penalized() {
    let s = scene_with(vec![panel(100.0, 180.0, 700.0, 330.0), person(790.0, 172.0)]);
    assert_eq!(delta(&s, "panel_subject_overlap"), -160.0);

    let s = scene_with(vec![panel(100.0, 180.0, 700.0, 330.0), person(400.0, 172.0)]);
    assert_eq!(delta(&s, "panel_subject_overlap"), -140.0);
}

#[test]
fn key_objects_past_the_canvas_edge() {
    let s = scene_with(vec![panel(-20.0, 180.0, 700.0, 330.0), person(1000.0, 250.0)]);
    // Panel left, person right and bottom.
    assert_eq!(delta(&s, "out_of_canvas"), -150.0);
}

#[test]
fn title_band_and_clutter() {
    let mut nodes = vec![bg_prop("top", 500.0, 20.0, 80.0, 80.0)];
    for i in 0..10 {
        nodes.push(bg_prop(&format!("p{i}"), 10.0 + 110.0 * i as f64, 400.0, 60.0, 60.0));
    }
    let s = scene_with(nodes);
    assert_eq!(delta(&s, "title_band"), -40.0);
    assert_eq!(delta(&s, "clutter"), -90.0);
}

#[test]
fn balance_measures_props_against_the_panel_center() {
    let s = scene_with(vec![
        panel(100.0, 180.0, 700.0, 330.0),
        bg_prop("left", 100.0, 300.0, 100.0, 100.0),
    ]);
    // |150 - 450| / 3
    assert_eq!(delta(&s, "balance"), -100.0);

    let s = scene_with(vec![
        panel(100.0, 180.0, 700.0, 330.0),
        bg_prop("far", 1100.0, 300.0, 100.0, 100.0),
    ]);
    assert_eq!(delta(&s, "balance"), -120.0);
}

#[test]
fn nested_nodes_are_ignored() {
    let group = Node::new("g", NodeKind::Group).with_children(vec![
        bg_prop("a", 100.0, 300.0, 100.0, 100.0),
        bg_prop("b", 120.0, 300.0, 100.0, 100.0),
    ]);
    let s = scene_with(vec![group]);
    assert_eq!(score(&s, &ScoreTable::default()), 1000.0);
}

#[test]
fn custom_tables_apply_only_their_rules() {
    let table = ScoreTable {
        baseline: 0.0,
        rules: vec![ScoreRule::Clutter {
            max_props: 0,
            penalty_per_prop: 1.0,
        }],
        ..ScoreTable::default()
    };
    let s = scene_with(vec![
        bg_prop("a", 0.0, 300.0, 10.0, 10.0),
        bg_prop("b", 50.0, 300.0, 10.0, 10.0),
        bg_prop("zero", 90.0, 300.0, 0.0, 10.0),
    ]);
    assert_eq!(score(&s, &table), -2.0);
    assert_eq!(score_breakdown(&s, &table).len(), 1);
}
