//! Scene-graph templates.
//!
//! Every template is a pure function of `(context, seed, layout)`. Geometry is derived from the
//! clamped layout; the only randomness is the micro stream seeded with `seed ^ 0x9E3779B9`, which
//! decides icon counts and picks.

pub(crate) mod booking;
pub(crate) mod payments;
pub(crate) mod portal;

use crate::catalog::meta::MotifCatalog;
use crate::foundation::math::clamp_f64;
use crate::foundation::rng::Mulberry32;
use crate::layout::sampler::{Domain, LayoutParams, Style, Template};
use crate::scene::model::{
    A11y, Canvas, Defs, Meta, Node, NodeKind, Palette, ReducedMotion, SCENE_VERSION, Scene, Theme,
    Typography,
};

/// Salt of the builder's micro-random stream.
pub const MICRO_SALT: u32 = 0x9e37_79b9;

pub(crate) const CANVAS_W: f64 = 1200.0;
pub(crate) const CANVAS_H: f64 = 600.0;
const BG: &str = "#0B0F14";
const FONT_FAMILY: &str =
    "ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial";

const DEFS_BASE: &str = concat!(
    "\n",
    "      <linearGradient id=\"g_accent\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n",
    "        <stop offset=\"0%\" stop-color=\"rgba(79,140,255,0.95)\"/>\n",
    "        <stop offset=\"100%\" stop-color=\"rgba(139,91,255,0.95)\"/>\n",
    "      </linearGradient>\n",
    "      <filter id=\"f_soft\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\">\n",
    "        <feGaussianBlur stdDeviation=\"14\"/>\n",
    "      </filter>\n",
);

pub(crate) const DEFS_SOFT2: &str = concat!(
    "      <filter id=\"f_soft2\" x=\"-30%\" y=\"-30%\" width=\"160%\" height=\"160%\">\n",
    "        <feGaussianBlur stdDeviation=\"24\"/>\n",
    "      </filter>\n",
);

/// Inputs shared by every template: the catalog and the picked motif ids (sorted).
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    pub catalog: &'a MotifCatalog,
    pub motifs: &'a [String],
}

impl<'a> BuildContext<'a> {
    pub fn new(catalog: &'a MotifCatalog, motifs: &'a [String]) -> Self {
        Self { catalog, motifs }
    }

    pub fn has(&self, id: &str) -> bool {
        self.motifs.iter().any(|m| m == id)
    }

    /// First picked motif that is a person.
    pub fn person(&self) -> Option<&'a str> {
        self.motifs
            .iter()
            .map(String::as_str)
            .find(|m| self.catalog.is_person(m))
    }

    /// `pool` restricted to picked motifs, pool order kept.
    pub fn available(&self, pool: &[&'static str]) -> Vec<&'static str> {
        pool.iter().copied().filter(|m| self.has(m)).collect()
    }
}

/// Build the scene for `(domain, style)`. Unknown pairs use the domain's default template.
pub fn build(
    ctx: &BuildContext<'_>,
    domain: Domain,
    style: Style,
    seed: u32,
    layout: Option<&LayoutParams>,
) -> Scene {
    build_template(ctx, Template::resolve(domain, style), seed, layout)
}

pub fn build_template(
    ctx: &BuildContext<'_>,
    template: Template,
    seed: u32,
    layout: Option<&LayoutParams>,
) -> Scene {
    match template {
        Template::PaymentsGlass => payments::build(ctx, seed, layout),
        Template::PortalPaper => portal::build(ctx, seed, layout),
        Template::BookingGlass => booking::build(ctx, seed, layout),
    }
}

pub(crate) fn micro_rng(seed: u32) -> Mulberry32 {
    Mulberry32::new(seed ^ MICRO_SALT)
}

pub(crate) fn base_scene(ctx: &BuildContext<'_>, title: &str, desc: &str, seed: u32) -> Scene {
    Scene {
        meta: Meta {
            version: SCENE_VERSION.to_string(),
            title: title.to_string(),
            lang: "en".to_string(),
            seed,
            auto: None,
        },
        canvas: Canvas::new(CANVAS_W, CANVAS_H, BG),
        theme: Theme {
            palette: Palette {
                bg: BG.to_string(),
                fg: "rgba(234,242,255,0.92)".to_string(),
                primary: "#4F8CFF".to_string(),
                accent: "#8B5BFF".to_string(),
                muted: "rgba(234,242,255,0.60)".to_string(),
            },
            typography: Typography {
                font_family: FONT_FAMILY.to_string(),
                base_size: 16.0,
            },
        },
        defs: Defs {
            motifs: ctx.motifs.to_vec(),
            raw: DEFS_BASE.to_string(),
        },
        nodes: Vec::new(),
        animations: Vec::new(),
        a11y: A11y {
            title: title.to_string(),
            desc: desc.to_string(),
            reduced_motion: ReducedMotion::default(),
        },
    }
}

/// Kicker, headline and subhead placeholders, centered above the panel.
pub(crate) fn title_slots() -> [Node; 3] {
    let slot = |id: &str, y: f64, size: f64, fill: &str| {
        Node::new(id, NodeKind::Text)
            .attr("data-role", "text")
            .attr("data-layer", "text")
            .attr("x", 600.0)
            .attr("y", y)
            .attr("text-anchor", "middle")
            .attr("fill", fill)
            .attr("font-size", size)
            .with_text(format!("{{{{slot:{id}}}}}"))
    };
    [
        slot("kicker", 64.0, 14.0, "rgba(234,242,255,0.66)").attr("letter-spacing", 1.0),
        slot("headline", 96.0, 28.0, "rgba(234,242,255,0.92)").attr("font-weight", 740.0),
        slot("subhead", 126.0, 16.0, "rgba(234,242,255,0.64)"),
    ]
}

pub(crate) fn texture_bg() -> Node {
    Node::new("bg", NodeKind::Rect)
        .attr("data-role", "decor")
        .attr("data-decor-type", "texture")
        .attr("x", 0.0)
        .attr("y", 0.0)
        .attr("width", CANVAS_W)
        .attr("height", CANVAS_H)
        .attr("fill", BG)
}

/// Blurred light blob behind the panel.
pub(crate) fn orb(id: &str, cx: f64, cy: f64, r: f64, fill: &str) -> Node {
    Node::new(id, NodeKind::Circle)
        .attr("data-role", "decor")
        .attr("data-decor-type", "shadow")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
        .attr("fill", fill)
        .attr("filter", "url(#f_soft)")
}

pub(crate) fn panel_shadow(cx: f64, cy: f64) -> Node {
    Node::new("panel_shadow", NodeKind::Ellipse)
        .attr("data-role", "decor")
        .attr("data-decor-type", "shadow")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("rx", 520.0)
        .attr("ry", 120.0)
        .attr("fill", "rgba(0,0,0,0.28)")
        .attr("filter", "url(#f_soft)")
}

/// Rounded card on the background layer.
pub(crate) fn card_rect(id: &str, x: f64, y: f64, w: f64, h: f64, rx: f64) -> Node {
    Node::new(id, NodeKind::Rect)
        .attr("data-role", "prop")
        .attr("data-layer", "bg")
        .attr("x", x)
        .attr("y", y)
        .attr("width", w)
        .attr("height", h)
        .attr("rx", rx)
        .attr("fill", "rgba(255,255,255,0.03)")
        .attr("stroke", "rgba(255,255,255,0.10)")
        .attr("stroke-width", 1.0)
}

pub(crate) fn motif_use(
    id: &str,
    motif: &str,
    (x, y, w, h): (f64, f64, f64, f64),
    opacity: f64,
) -> Node {
    Node::new(id, NodeKind::Use)
        .attr("data-role", "prop")
        .attr("data-layer", "bg")
        .attr("href", format!("#motif_{motif}"))
        .attr("x", x)
        .attr("y", y)
        .attr("width", w)
        .attr("height", h)
        .attr("opacity", opacity)
}

pub(crate) fn caption(id: &str, x: f64, y: f64, size: f64, fill: &str, text: &str) -> Node {
    Node::new(id, NodeKind::Text)
        .attr("data-role", "text")
        .attr("data-layer", "text")
        .attr("x", x)
        .attr("y", y)
        .attr("fill", fill)
        .attr("font-size", size)
        .with_text(text)
}

/// Person silhouette on the foreground layer, if a person motif was picked.
pub(crate) fn person(ctx: &BuildContext<'_>, x: f64, y: f64) -> Option<Node> {
    let motif = ctx.person()?;
    Some(
        Node::new("person", NodeKind::Use)
            .attr("data-role", "subject")
            .attr("href", format!("#motif_{motif}"))
            .attr("x", x)
            .attr("y", y)
            .attr("width", 320.0)
            .attr("height", 392.0)
            .attr("opacity", 0.96),
    )
}

/// Panel rectangle plus the person's reserved zone.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanelFrame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub person_x: f64,
    pub pad: f64,
}

/// Gap kept between props and the person.
pub(crate) const PERSON_GAP: f64 = 18.0;

impl PanelFrame {
    pub fn new(layout: &LayoutParams, pad: f64) -> Self {
        Self {
            x: layout.panel_x as f64,
            y: layout.panel_y as f64,
            w: layout.panel_w as f64,
            h: layout.panel_h as f64,
            person_x: layout.person_x as f64,
            pad,
        }
    }

    pub fn safe_right(&self) -> f64 {
        self.person_x - PERSON_GAP
    }

    /// Keep a box of width `w` inside the panel and left of the person.
    pub fn clamp_x(&self, x: f64, w: f64) -> f64 {
        let lo = self.x + self.pad;
        clamp_f64(x, lo, lo.max(self.safe_right() - w))
    }

    /// Keep a box of height `h` inside the panel's vertical padding.
    pub fn clamp_y(&self, y: f64, h: f64) -> f64 {
        let lo = self.y + self.pad;
        clamp_f64(y, lo, lo.max(self.y + self.h - self.pad - h))
    }

    pub fn container(&self, rx: f64, fill: &str, stroke: &str) -> Node {
        Node::new("panel", NodeKind::Rect)
            .attr("data-role", "prop")
            .attr("data-layer", "bg")
            .attr("data-prop-kind", "container")
            .attr("x", self.x)
            .attr("y", self.y)
            .attr("width", self.w)
            .attr("height", self.h)
            .attr("rx", rx)
            .attr("fill", fill)
            .attr("stroke", stroke)
            .attr("stroke-width", 1.0)
    }
}

/// One horizontal row of small icons starting at `x`.
pub(crate) struct IconRow<'p> {
    pub pool: &'p [&'static str],
    pub count: (i64, i64),
    pub size: f64,
    pub step: f64,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

impl IconRow<'_> {
    /// Draw the count and the icons, then lay out as many as fit left of the person.
    pub fn place(&self, ctx: &BuildContext<'_>, frame: &PanelFrame, rng: &mut Mulberry32) -> Vec<Node> {
        let pool = ctx.available(self.pool);
        let count = rng
            .range_inclusive(self.count.0, self.count.1)
            .clamp(0, pool.len() as i64);
        let icons = rng.pick_some_sorted(&pool, count);

        let row_max = ((frame.safe_right() - self.x) / self.step).floor().max(0.0) as usize;
        let y = frame.clamp_y(self.y, self.size);

        icons
            .iter()
            .take(row_max)
            .enumerate()
            .map(|(i, motif)| {
                motif_use(
                    &format!("tag_{i}"),
                    motif,
                    (self.x + i as f64 * self.step, y, self.size, self.size),
                    self.opacity,
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/mod.rs"]
mod tests;
