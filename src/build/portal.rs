use crate::build::{
    BuildContext, DEFS_SOFT2, IconRow, PanelFrame, base_scene, caption, card_rect, micro_rng,
    motif_use, payments, person, texture_bg, title_slots,
};
use crate::layout::sampler::{LayoutParams, Template};
use crate::scene::model::{Node, NodeKind, Scene};

const INNER_PAD: f64 = 22.0;

/// At least one of these must be picked, otherwise the payments template is used.
const PAPER_REQUIRED: [&str; 3] = ["paper_frame", "pencil_shade_bl", "tape_strip"];

const MESSAGE_ICONS: [&str; 4] = [
    "lucide_message_circle",
    "lucide_bell",
    "lucide_inbox",
    "lucide_check_circle",
];

struct InfoCard {
    id: &'static str,
    dy: f64,
    icon: &'static str,
    title: &'static str,
    subtitle: &'static str,
}

const CARDS: [InfoCard; 2] = [
    InfoCard {
        id: "profile",
        dy: 62.0,
        icon: "lucide_user",
        title: "Customer portal",
        subtitle: "Order status • receipts • updates",
    },
    InfoCard {
        id: "order",
        dy: 186.0,
        icon: "lucide_file_text",
        title: "Order #1284",
        subtitle: "Scheduled • Crew assigned",
    },
];

/// `(id, motif, dx, dy, w, h, opacity)` relative to the panel origin.
const PROPS: [(&str, &str, f64, f64, f64, f64, f64); 3] = [
    ("phone", "phone_handdrawn", 360.0, 80.0, 220.0, 170.0, 0.72),
    ("receipt", "receipt_handdrawn", 560.0, 160.0, 190.0, 150.0, 0.62),
    ("chat", "chat_bubble_handdrawn", 420.0, 220.0, 230.0, 170.0, 0.56),
];

/// Customer portal on a paper/journal panel: two info cards, handdrawn props and message icons.
pub fn build(ctx: &BuildContext<'_>, seed: u32, layout: Option<&LayoutParams>) -> Scene {
    if !PAPER_REQUIRED.iter().any(|m| ctx.has(m)) {
        tracing::debug!("no paper motifs picked; using payments/glass");
        return payments::build(ctx, seed, None);
    }

    let layout = layout
        .cloned()
        .unwrap_or_else(|| LayoutParams::default_for(Template::PortalPaper))
        .clamped(Template::PortalPaper);
    let frame = PanelFrame::new(&layout, INNER_PAD);
    let mut rng = micro_rng(seed);

    let mut scene = base_scene(
        ctx,
        "Auto: Customer Portal (Paper)",
        "Auto-generated customer portal scene with paper/journal container and UI cards.",
        seed,
    );
    scene.defs.raw.push_str(DEFS_SOFT2);

    scene.nodes.push(texture_bg());
    scene.nodes.push(
        Node::new("glow", NodeKind::Ellipse)
            .attr("data-role", "decor")
            .attr("data-decor-type", "shadow")
            .attr("cx", 340.0)
            .attr("cy", 220.0)
            .attr("rx", 220.0)
            .attr("ry", 180.0)
            .attr("fill", "rgba(79,140,255,0.16)")
            .attr("filter", "url(#f_soft2)"),
    );
    if ctx.has("paper_frame") {
        scene.nodes.push(
            decor_use("paper", "paper_frame", (0.0, 0.0, 1200.0, 600.0), 0.82)
                .attr("data-decor-type", "texture"),
        );
    }
    if ctx.has("pencil_shade_bl") {
        scene.nodes.push(
            decor_use("shade", "pencil_shade_bl", (-30.0, 380.0, 320.0, 220.0), 0.32)
                .attr("data-decor-type", "shadow"),
        );
    }

    scene.nodes.push(frame.container(22.0, "rgba(255,255,255,0.03)", "rgba(255,255,255,0.10)"));

    let row = IconRow {
        pool: &MESSAGE_ICONS,
        count: (1, 2),
        size: 28.0,
        step: 38.0,
        x: frame.x + 360.0,
        y: frame.y + INNER_PAD,
        opacity: 0.82,
    };
    scene.nodes.extend(row.place(ctx, &frame, &mut rng));

    for card in &CARDS {
        let x = frame.clamp_x(frame.x + 40.0, 300.0);
        let y = frame.clamp_y(frame.y + card.dy, 112.0);
        scene.nodes.push(card_rect(&format!("{}_card", card.id), x, y, 300.0, 112.0, 18.0));
        if ctx.has(card.icon) {
            scene.nodes.push(motif_use(
                &format!("{}_ico", card.id),
                card.icon,
                (x + 26.0, y + 26.0, 38.0, 38.0),
                0.95,
            ));
        }
        scene.nodes.push(
            caption(
                &format!("{}_t", card.id),
                x + 80.0,
                y + 50.0,
                13.0,
                "rgba(234,242,255,0.88)",
                card.title,
            )
            .attr("font-weight", 700.0),
        );
        scene.nodes.push(caption(
            &format!("{}_s", card.id),
            x + 80.0,
            y + 74.0,
            12.0,
            "rgba(234,242,255,0.58)",
            card.subtitle,
        ));
    }

    for (id, motif, dx, dy, w, h, opacity) in PROPS {
        if !ctx.has(motif) {
            continue;
        }
        let x = frame.clamp_x(frame.x + dx, w);
        let y = frame.clamp_y(frame.y + dy, h);
        scene.nodes.push(motif_use(id, motif, (x, y, w, h), opacity));
    }

    if ctx.has("tape_strip") {
        scene.nodes.push(motif_use(
            "tape",
            "tape_strip",
            (frame.x - 14.0, frame.y - 18.0, 140.0, 70.0),
            0.22,
        ));
    }

    scene.nodes.extend(person(ctx, frame.person_x, 180.0));
    scene.nodes.extend(title_slots());
    scene
}

fn decor_use(id: &str, motif: &str, rect: (f64, f64, f64, f64), opacity: f64) -> Node {
    let mut node = motif_use(id, motif, rect, opacity);
    node.remove_attr("data-layer");
    node.set_attr("data-role", "decor");
    node
}

#[cfg(test)]
#[path = "../../tests/unit/build/portal.rs"]
mod tests;
