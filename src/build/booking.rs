use crate::build::{
    BuildContext, IconRow, PanelFrame, base_scene, caption, card_rect, micro_rng, motif_use, orb,
    panel_shadow, person, texture_bg, title_slots,
};
use crate::foundation::math::clamp_f64;
use crate::layout::sampler::{LayoutParams, Template};
use crate::scene::model::Scene;

const INNER_PAD: f64 = 26.0;
const CHIP_INSET: (f64, f64) = (40.0, 50.0);
const CHIP_H: f64 = 84.0;
const CHIP_GAP: (f64, f64) = (20.0, 18.0);
const CHIP_W: (f64, f64) = (180.0, 340.0);

const SCHEDULE_ICONS: [&str; 4] = [
    "lucide_calendar_check",
    "lucide_clock",
    "lucide_map_pin",
    "lucide_users",
];

struct Chip {
    id: &'static str,
    icon: &'static str,
    title: &'static str,
    subtitle: &'static str,
}

/// Row-major 2x2 grid.
const CHIPS: [Chip; 4] = [
    Chip {
        id: "slot",
        icon: "lucide_calendar_clock",
        title: "Time slots",
        subtitle: "Capacity-aware availability",
    },
    Chip {
        id: "dur",
        icon: "lucide_timer",
        title: "Duration",
        subtitle: "Per-service time blocks",
    },
    Chip {
        id: "area",
        icon: "lucide_map",
        title: "Service area",
        subtitle: "Zones + coverage rules",
    },
    Chip {
        id: "skill",
        icon: "lucide_badge",
        title: "Skill match",
        subtitle: "Right tech, first time",
    },
];

/// Booking on a glass panel: a 2x2 grid of feature chips sized to the space left of the person,
/// and a row of schedule icons along the panel bottom.
pub fn build(ctx: &BuildContext<'_>, seed: u32, layout: Option<&LayoutParams>) -> Scene {
    let layout = layout
        .cloned()
        .unwrap_or_else(|| LayoutParams::default_for(Template::BookingGlass))
        .clamped(Template::BookingGlass);
    let frame = PanelFrame::new(&layout, INNER_PAD);
    let mut rng = micro_rng(seed);

    let mut scene = base_scene(
        ctx,
        "Auto: Booking (Glass)",
        "Auto-generated booking scene with glass container and scheduling icons.",
        seed,
    );

    scene.nodes.extend([
        texture_bg(),
        orb("orb1", frame.x + 180.0, frame.y - 10.0, 160.0, "rgba(79,140,255,0.16)"),
        orb("orb2", 980.0, 420.0, 180.0, "rgba(139,91,255,0.14)"),
        panel_shadow(frame.x + frame.w / 2.0 + 20.0, frame.y + frame.h + 98.0),
        frame.container(26.0, "rgba(255,255,255,0.04)", "rgba(255,255,255,0.12)"),
    ]);

    let left = frame.x + CHIP_INSET.0;
    let avail = frame.safe_right() - left;
    let col_w = clamp_f64((avail - CHIP_GAP.0) / 2.0, CHIP_W.0, CHIP_W.1);

    for (i, chip) in CHIPS.iter().enumerate() {
        let (row, col) = ((i / 2) as f64, (i % 2) as f64);
        let x = frame.clamp_x(left + col * (col_w + CHIP_GAP.0), col_w);
        let y = frame.clamp_y(frame.y + CHIP_INSET.1 + row * (CHIP_H + CHIP_GAP.1), CHIP_H);

        scene.nodes.push(card_rect(&format!("chip_{}", chip.id), x, y, col_w, CHIP_H, 18.0));
        if ctx.has(chip.icon) {
            scene.nodes.push(motif_use(
                &format!("i_{}", chip.id),
                chip.icon,
                (x + 26.0, y + 22.0, 34.0, 34.0),
                0.95,
            ));
        }
        scene.nodes.push(
            caption(
                &format!("t_{}", chip.id),
                x + 76.0,
                y + 36.0,
                13.0,
                "rgba(234,242,255,0.88)",
                chip.title,
            )
            .attr("font-weight", 720.0),
        );
        scene.nodes.push(caption(
            &format!("s_{}", chip.id),
            x + 76.0,
            y + 58.0,
            12.0,
            "rgba(234,242,255,0.56)",
            chip.subtitle,
        ));
    }

    let row = IconRow {
        pool: &SCHEDULE_ICONS,
        count: (1, 3),
        size: 34.0,
        step: 44.0,
        x: left,
        y: frame.y + frame.h - INNER_PAD - 34.0,
        opacity: 0.82,
    };
    scene.nodes.extend(row.place(ctx, &frame, &mut rng));

    scene.nodes.extend(person(ctx, frame.person_x, 168.0));
    scene.nodes.extend(title_slots());
    scene
}

#[cfg(test)]
#[path = "../../tests/unit/build/booking.rs"]
mod tests;
