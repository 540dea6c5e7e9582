use super::*;
use crate::foundation::error::SceneError;

const MOTHER: &str = include_str!("../../data/scene.mother.json");

fn mother() -> Scene {
    Scene::from_json_str(MOTHER).unwrap()
}

fn scene_with(nodes: Vec<Node>) -> Scene {
    let mut s = mother();
    s.nodes = nodes;
    s.animations.clear();
    s
}

fn rect(id: &str, role: &str, (x, y, w, h): (f64, f64, f64, f64)) -> Node {
    Node::new(id, NodeKind::Rect)
        .attr("data-role", role)
        .attr("x", x)
        .attr("y", y)
        .attr("width", w)
        .attr("height", h)
}

fn subject(x: f64, y: f64, w: f64, h: f64) -> Node {
    Node::new("person", NodeKind::Use)
        .attr("data-role", "subject")
        .attr("href", "#motif_person")
        .attr("x", x)
        .attr("y", y)
        .attr("width", w)
        .attr("height", h)
}

fn dot(id: &str, cx: f64, cy: f64, r: f64) -> Node {
    Node::new(id, NodeKind::Circle)
        .attr("data-role", "decor")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
}

fn first(scene: &Scene) -> GeometryViolation {
    validate(scene).unwrap_err().violations.remove(0)
}

#[test]
fn fixture_passes() {
    assert!(validate(&mother()).is_ok());
}

#[test]
fn role_must_match_layer() {
    let s = scene_with(vec![
        Node::new("t", NodeKind::Text)
            .attr("data-layer", "bg")
            .with_text("Hi"),
    ]);
    let v = first(&s);
    assert_eq!(
        v,
        GeometryViolation {
            node: "t".to_string(),
            kind: ViolationKind::RoleLayer {
                role: "text",
                layer: Layer::Bg
            },
        }
    );
    assert_eq!(v.to_string(), "text node \"t\" may not be on layer \"bg\"");

    let s = scene_with(vec![subject(100.0, 100.0, 50.0, 50.0).attr("data-layer", "bg")]);
    assert!(matches!(first(&s).kind, ViolationKind::RoleLayer { role: "subject", .. }));
}

#[test]
fn props_keep_clear_of_subjects() {
    let s = scene_with(vec![
        rect("card", "prop", (100.0, 100.0, 100.0, 100.0)),
        subject(150.0, 150.0, 100.0, 100.0),
    ]);
    assert_eq!(
        first(&s).kind,
        ViolationKind::PropOverlapsSubject {
            subject: "person".to_string()
        }
    );

    // Within the 8px pad.
    let s = scene_with(vec![
        rect("card", "prop", (100.0, 100.0, 100.0, 100.0)),
        subject(205.0, 150.0, 100.0, 100.0),
    ]);
    assert!(validate(&s).is_err());

    let s = scene_with(vec![
        rect("card", "prop", (100.0, 100.0, 100.0, 100.0)),
        subject(220.0, 150.0, 100.0, 100.0),
    ]);
    assert!(validate(&s).is_ok());
}

#[test]
fn containers_may_sit_behind_subjects() {
    let person = || subject(300.0, 250.0, 200.0, 300.0);
    let cases = [
        rect("box", "prop", (0.0, 200.0, 600.0, 300.0)).attr("data-prop-kind", "container"),
        rect("hero_panel", "prop", (0.0, 200.0, 400.0, 100.0)).attr("data-layer", "bg"),
        rect("slab", "prop", (0.0, 200.0, 600.0, 200.0))
            .attr("data-layer", "bg")
            .attr("rx", 20.0),
    ];
    for c in cases {
        let id = c.id.clone();
        assert!(validate(&scene_with(vec![c, person()])).is_ok(), "{id}");
    }

    let rejected = [
        // Not rounded enough.
        rect("slab", "prop", (0.0, 200.0, 600.0, 200.0)).attr("data-layer", "bg"),
        // Name only counts on the background layer.
        rect("panel", "prop", (0.0, 200.0, 400.0, 100.0)),
        // Too small to be a frame.
        rect("chip", "prop", (250.0, 240.0, 100.0, 40.0))
            .attr("data-layer", "bg")
            .attr("rx", 20.0),
    ];
    for c in rejected {
        let id = c.id.clone();
        let v = first(&scene_with(vec![c, person()]));
        assert_eq!(v.node, id);
        assert!(matches!(v.kind, ViolationKind::PropOverlapsSubject { .. }));
    }
}

#[test]
fn accents_respect_safe_zones() {
    let s = scene_with(vec![subject(600.0, 200.0, 200.0, 300.0), dot("spark", 580.0, 300.0, 10.0)]);
    let v = first(&s);
    assert_eq!(v.node, "spark");
    assert_eq!(
        v.kind,
        ViolationKind::AccentTooCloseToSubject {
            subject: "person".to_string()
        }
    );

    let s = scene_with(vec![subject(600.0, 200.0, 200.0, 300.0), dot("spark", 530.0, 300.0, 10.0)]);
    assert!(validate(&s).is_ok());

    let s = scene_with(vec![
        rect("cup", "prop", (100.0, 300.0, 100.0, 100.0)),
        dot("spark", 230.0, 350.0, 5.0),
    ]);
    assert_eq!(
        first(&s).kind,
        ViolationKind::AccentTooCloseToProp {
            prop: "cup".to_string()
        }
    );
}

#[test]
fn non_accent_decor_skips_safe_zones() {
    let person = || subject(600.0, 200.0, 200.0, 300.0);
    let shadow = dot("orb", 580.0, 300.0, 10.0).attr("data-decor-type", "shadow");
    assert!(validate(&scene_with(vec![person(), shadow])).is_ok());

    let base = dot("orb", 580.0, 300.0, 10.0)
        .attr("data-decor-type", "accent")
        .attr("data-layer", "bg_base");
    assert!(validate(&scene_with(vec![person(), base])).is_ok());
}

#[test]
fn decor_budget_ignores_full_canvas_layers() {
    let blurred = |i: usize| {
        dot(&format!("d{i}"), 50.0 + 100.0 * i as f64, 560.0, 5.0).attr("filter", "url(#f_soft)")
    };

    let mut nodes: Vec<Node> = (0..10).map(blurred).collect();
    nodes.push(rect("bg", "decor", (0.0, 0.0, 1200.0, 600.0)));
    assert!(validate(&scene_with(nodes.clone())).is_ok());

    nodes.push(blurred(10));
    let v = first(&scene_with(nodes));
    assert_eq!(v.node, "d10");
    assert_eq!(v.kind, ViolationKind::DecorBudget { count: 11, budget: 10 });
    assert_eq!(v.to_string(), "too many decor nodes (11 > 10)");
}

#[test]
fn subjects_may_not_be_clipped_at_the_top() {
    let v = first(&scene_with(vec![subject(100.0, -4.0, 100.0, 100.0)]));
    assert_eq!(v.kind, ViolationKind::SubjectClippedTop { y: -4.0 });
    assert_eq!(v.to_string(), "subject \"person\" is clipped at the top (y=-4)");
}

#[test]
fn decor_overlaps_are_collected_together() {
    let headline = Node::new("headline", NodeKind::Text)
        .attr("x", 120.0)
        .attr("y", 72.0)
        .attr("font-size", 40.0)
        .with_text("Hello");
    let glow = rect("glow", "decor", (100.0, 50.0, 300.0, 60.0)).attr("data-decor-type", "glow");
    let s = scene_with(vec![subject(300.0, 40.0, 200.0, 300.0), glow, headline.clone()]);

    let err = validate(&s).unwrap_err();
    let targets: Vec<_> = err
        .violations
        .iter()
        .map(|v| match &v.kind {
            ViolationKind::DecorOverlap { target, .. } => target.as_str(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(targets, vec!["subject:person", "text:headline"]);
    assert_eq!(
        err.to_string(),
        "decor \"glow\" overlaps subject:person (ratio=0.333)\n  - decor \"glow\" overlaps text:headline (ratio=0.458)"
    );

    let err = SceneError::from(err);
    assert!(err.is_structural());
}

#[test]
fn faint_decor_gets_the_lenient_threshold() {
    let headline = Node::new("headline", NodeKind::Text)
        .attr("x", 120.0)
        .attr("y", 72.0)
        .attr("font-size", 40.0)
        .with_text("Hello");
    let faint = rect("glow", "decor", (100.0, 50.0, 300.0, 60.0))
        .attr("data-decor-type", "glow")
        .attr("opacity", 0.1);
    assert!(validate(&scene_with(vec![subject(300.0, 40.0, 200.0, 300.0), faint, headline.clone()])).is_ok());

    // Soft blur caps the explicit opacity below the visibility cut-off.
    let blurred = rect("glow", "decor", (100.0, 50.0, 300.0, 60.0))
        .attr("data-decor-type", "glow")
        .attr("opacity", 0.9)
        .attr("filter", "url(#f_soft2)");
    assert!(validate(&scene_with(vec![subject(300.0, 40.0, 200.0, 300.0), blurred, headline])).is_ok());
}

#[test]
fn effective_opacity_combines_alpha_and_blur() {
    let v = GeometryValidator::default();
    let n = rect("a", "decor", (0.0, 0.0, 1.0, 1.0))
        .attr("fill", "rgba(0, 0, 0, 0.5)")
        .attr("opacity", 0.8);
    assert_eq!(v.effective_opacity(&n), 0.4);

    let n = n.attr("filter", "url(#f_soft)").attr("opacity", 0.9);
    assert_eq!(v.effective_opacity(&n), 0.09);

    assert_eq!(v.effective_opacity(&rect("b", "decor", (0.0, 0.0, 1.0, 1.0))), 1.0);
}

#[test]
fn decor_type_inference() {
    let v = GeometryValidator::default();
    let plain = dot("a", 10.0, 10.0, 5.0);
    assert_eq!(v.decor_type(&plain, 0.9), Some(DecorType::Texture));
    assert_eq!(v.decor_type(&plain, 0.1), Some(DecorType::Accent));
    let blurred = plain.clone().attr("filter", "url(#f_soft)");
    assert_eq!(v.decor_type(&blurred, 0.1), Some(DecorType::Shadow));
    let tagged = blurred.attr("data-decor-type", "accent");
    assert_eq!(v.decor_type(&tagged, 0.9), Some(DecorType::Accent));
    let custom = plain.attr("data-decor-type", "sparkle");
    assert_eq!(v.decor_type(&custom, 0.1), None);
}

#[test]
fn thresholds_are_configurable() {
    let config: LintConfig = serde_json::from_str(r#"{"decor_budget": 1}"#).unwrap();
    assert_eq!(config.decor_budget, 1);
    assert_eq!(config.accent_subject_pad, 56.0);

    let s = scene_with(vec![dot("a", 100.0, 560.0, 5.0), dot("b", 300.0, 560.0, 5.0)]);
    assert!(validate(&s).is_ok());
    let err = GeometryValidator::new(config).validate(&s).unwrap_err();
    assert_eq!(err.violations[0].node, "b");
}
