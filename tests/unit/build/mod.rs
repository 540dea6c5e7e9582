use super::*;
use crate::catalog::meta::pick_motifs;
use crate::scene::tags::{Layer, PropKind, Role};

const META: &str = include_str!("../../data/motifs.meta.json");

fn catalog() -> MotifCatalog {
    MotifCatalog::from_json_str(META).unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn context_lookups() {
    let c = catalog();
    let motifs = ids(&["lucide_lock", "opeeps_effigy_standing_02", "receipt_handdrawn"]);
    let ctx = BuildContext::new(&c, &motifs);

    assert!(ctx.has("lucide_lock"));
    assert!(!ctx.has("lucide_wallet"));
    assert_eq!(ctx.person(), Some("opeeps_effigy_standing_02"));
    assert_eq!(
        ctx.available(&["lucide_wallet", "receipt_handdrawn", "lucide_lock"]),
        vec!["receipt_handdrawn", "lucide_lock"]
    );
}

#[test]
fn person_is_skipped_without_a_person_motif() {
    let c = catalog();
    let motifs = ids(&["lucide_lock"]);
    let ctx = BuildContext::new(&c, &motifs);
    assert!(person(&ctx, 700.0, 172.0).is_none());

    let motifs = ids(&["opeeps_effigy_sitting_01"]);
    let ctx = BuildContext::new(&c, &motifs);
    let p = person(&ctx, 700.0, 172.0).unwrap();
    assert_eq!(p.attrs().str("href"), Some("#motif_opeeps_effigy_sitting_01"));
    assert_eq!(p.tags().role, Role::Subject);
    assert_eq!(p.effective_layer(), Layer::Fg);
}

#[test]
fn panel_frame_clamps_inside_padding_and_left_of_person() {
    let frame = PanelFrame::new(&LayoutParams::default_for(Template::PaymentsGlass), 26.0);
    assert_eq!(frame.safe_right(), 742.0);
    assert_eq!(frame.clamp_x(0.0, 100.0), 116.0);
    assert_eq!(frame.clamp_x(1000.0, 100.0), 642.0);
    // Boxes wider than the free span pin to the left edge.
    assert_eq!(frame.clamp_x(300.0, 900.0), 116.0);

    assert_eq!(frame.clamp_y(0.0, 50.0), 204.0);
    assert_eq!(frame.clamp_y(600.0, 50.0), 434.0);
}

#[test]
fn container_is_tagged_for_the_linter() {
    let frame = PanelFrame::new(&LayoutParams::default_for(Template::BookingGlass), 26.0);
    let panel = frame.container(26.0, "rgba(255,255,255,0.04)", "rgba(255,255,255,0.12)");
    assert_eq!(panel.id, "panel");
    assert_eq!(panel.tags().prop_kind, PropKind::Container);
    assert_eq!(panel.effective_layer(), Layer::Bg);
    assert_eq!(panel.attrs().num("width"), Some(760.0));
}

#[test]
fn title_slots_use_placeholders() {
    let slots = title_slots();
    let texts: Vec<_> = slots.iter().filter_map(|n| n.text.as_deref()).collect();
    assert_eq!(
        texts,
        vec!["{{slot:kicker}}", "{{slot:headline}}", "{{slot:subhead}}"]
    );
    assert!(slots.iter().all(|n| n.effective_layer() == Layer::Text));
}

#[test]
fn base_scene_carries_context_motifs() {
    let c = catalog();
    let motifs = ids(&["lucide_lock", "receipt_handdrawn"]);
    let ctx = BuildContext::new(&c, &motifs);
    let scene = base_scene(&ctx, "T", "D", 9);
    assert_eq!(scene.defs.motifs, motifs);
    assert_eq!(scene.meta.seed, 9);
    assert_eq!(scene.canvas.view_box, "0 0 1200 600");
    assert!(scene.defs.raw.contains("id=\"f_soft\""));
    assert_eq!(scene.a11y.title, "T");
}

#[test]
fn dispatch_follows_template_resolution() {
    let c = catalog();
    let motifs = pick_motifs(&c, Domain::Booking, Style::Glass, 1);
    let ctx = BuildContext::new(&c, &motifs);

    let booking = build(&ctx, Domain::Booking, Style::Paper, 1, None);
    assert_eq!(booking.meta.title, "Auto: Booking (Glass)");

    let payments = build(&ctx, Domain::Payments, Style::Glow, 1, None);
    assert_eq!(payments.meta.title, "Auto: Payments (Glass)");
    assert_eq!(
        payments,
        build_template(&ctx, Template::PaymentsGlass, 1, None)
    );
}

#[test]
fn icon_row_is_seeded_and_bounded() {
    let c = catalog();
    let motifs = ids(&["lucide_bell", "lucide_inbox", "lucide_lock"]);
    let ctx = BuildContext::new(&c, &motifs);
    let frame = PanelFrame::new(&LayoutParams::default_for(Template::PaymentsGlass), 26.0);
    let row = IconRow {
        pool: &["lucide_bell", "lucide_inbox", "lucide_clock"],
        count: (1, 5),
        size: 34.0,
        step: 44.0,
        x: 124.0,
        y: 222.0,
        opacity: 0.82,
    };

    let a = row.place(&ctx, &frame, &mut micro_rng(4));
    let b = row.place(&ctx, &frame, &mut micro_rng(4));
    assert_eq!(a, b);
    assert!(!a.is_empty() && a.len() <= 2);
    for (i, n) in a.iter().enumerate() {
        assert_eq!(n.id, format!("tag_{i}"));
        assert_eq!(n.attrs().num("x"), Some(124.0 + 44.0 * i as f64));
    }

    // No room left of the person: nothing is placed.
    let cramped = IconRow { x: 730.0, ..row };
    assert!(cramped.place(&ctx, &frame, &mut micro_rng(4)).is_empty());
}
