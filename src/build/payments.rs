use crate::build::{
    BuildContext, IconRow, PanelFrame, base_scene, micro_rng, motif_use, orb, panel_shadow, person,
    texture_bg, title_slots,
};
use crate::layout::sampler::{LayoutParams, Template};
use crate::scene::model::Scene;

const INNER_PAD: f64 = 26.0;

const TRUST_ICONS: [&str; 6] = [
    "lucide_shield_check",
    "lucide_lock",
    "lucide_wallet",
    "lucide_credit_card",
    "lucide_badge_check",
    "lucide_coins",
];

/// Fixed prop anchors relative to the panel origin: `(id, motif, dx, dy, w, h, opacity)`.
const PROPS: [(&str, &str, f64, f64, f64, f64, f64); 3] = [
    ("card", "credit_card_handdrawn", INNER_PAD, 64.0, 330.0, 230.0, 0.76),
    ("invoice", "invoice_handdrawn", INNER_PAD + 380.0, 72.0, 220.0, 170.0, 0.46),
    ("receipt", "receipt_handdrawn", INNER_PAD + 160.0, 214.0, 230.0, 176.0, 0.58),
];

/// Payments on a glass panel: card, invoice and receipt props plus a row of trust icons.
pub fn build(ctx: &BuildContext<'_>, seed: u32, layout: Option<&LayoutParams>) -> Scene {
    let layout = layout
        .cloned()
        .unwrap_or_else(|| LayoutParams::default_for(Template::PaymentsGlass))
        .clamped(Template::PaymentsGlass);
    let frame = PanelFrame::new(&layout, INNER_PAD);
    let mut rng = micro_rng(seed);

    let mut scene = base_scene(
        ctx,
        "Auto: Payments (Glass)",
        "Auto-generated payments scene with glass container and real-world payment props.",
        seed,
    );

    scene.nodes.extend([
        texture_bg(),
        orb("orb1", frame.x + 210.0, frame.y + 8.0, 170.0, "rgba(79,140,255,0.16)"),
        orb("orb2", 980.0, 420.0, 190.0, "rgba(139,91,255,0.14)"),
        panel_shadow(frame.x + frame.w / 2.0 + 40.0, frame.y + frame.h + 100.0),
        frame.container(26.0, "rgba(255,255,255,0.04)", "rgba(255,255,255,0.12)"),
    ]);

    for (id, motif, dx, dy, w, h, opacity) in PROPS {
        if !ctx.has(motif) {
            continue;
        }
        let x = frame.clamp_x(frame.x + dx, w);
        let y = frame.clamp_y(frame.y + dy, h);
        scene.nodes.push(motif_use(id, motif, (x, y, w, h), opacity));
    }

    let row = IconRow {
        pool: &TRUST_ICONS,
        count: (2, 3),
        size: 34.0,
        step: 44.0,
        x: frame.x + INNER_PAD + 8.0,
        y: frame.y + 44.0,
        opacity: 0.82,
    };
    scene.nodes.extend(row.place(ctx, &frame, &mut rng));

    scene.nodes.extend(person(ctx, frame.person_x, 172.0));
    scene.nodes.extend(title_slots());
    scene
}

#[cfg(test)]
#[path = "../../tests/unit/build/payments.rs"]
mod tests;
