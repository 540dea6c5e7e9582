use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::{BoundingBox, overlap_ratio_min};
use crate::scene::geometry::{canvas_box, coverage, node_bbox, solid_bbox};
use crate::scene::model::{Node, NodeKind, Scene};
use crate::scene::tags::{ATTR_DECOR_TYPE, DecorType, Layer, PropKind, Role};

/// Thresholds and paddings for [`validate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Coverage above which a decor node counts as a full-canvas texture.
    pub full_canvas_coverage: f64,
    /// Padding around props when checking them against subjects.
    pub prop_subject_pad: f64,
    pub prop_subject_max_ratio: f64,
    /// Accent safe zone around subjects.
    pub accent_subject_pad: f64,
    /// Accent safe zone around foreground props.
    pub accent_prop_pad: f64,
    pub decor_budget: usize,
    /// `[subject, prop, text]` overlap thresholds for accent or visible decor.
    pub decor_strict: [f64; 3],
    pub decor_lenient: f64,
    pub visible_opacity: f64,
    pub visible_opacity_text: f64,
    /// Cap on the explicit opacity of soft-blurred decor.
    pub soft_blur_opacity_cap: f64,
    pub container_min_coverage: f64,
    pub container_min_rx: f64,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            full_canvas_coverage: 0.82,
            prop_subject_pad: 8.0,
            prop_subject_max_ratio: 0.01,
            accent_subject_pad: 56.0,
            accent_prop_pad: 40.0,
            decor_budget: 10,
            decor_strict: [0.03, 0.04, 0.06],
            decor_lenient: 0.6,
            visible_opacity: 0.22,
            visible_opacity_text: 0.25,
            soft_blur_opacity_cap: 0.18,
            container_min_coverage: 0.12,
            container_min_rx: 14.0,
        }
    }
}

/// What a violation is about.
#[derive(Clone, Debug, PartialEq)]
pub enum ViolationKind {
    /// A role placed on a layer it may not use.
    RoleLayer { role: &'static str, layer: Layer },
    PropOverlapsSubject { subject: String },
    AccentTooCloseToSubject { subject: String },
    AccentTooCloseToProp { prop: String },
    DecorBudget { count: usize, budget: usize },
    SubjectClippedTop { y: f64 },
    /// Decor covering a subject, foreground prop or text (`target` is `kind:id`).
    DecorOverlap { target: String, ratio: f64 },
}

/// One rejected node.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryViolation {
    pub node: String,
    pub kind: ViolationKind,
}

impl fmt::Display for GeometryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.node;
        match &self.kind {
            ViolationKind::RoleLayer { role, layer } => write!(
                f,
                "{role} node \"{id}\" may not be on layer \"{layer}\""
            ),
            ViolationKind::PropOverlapsSubject { subject } => write!(
                f,
                "prop \"{id}\" overlaps subject \"{subject}\"; move it away or mark it data-prop-kind=\"container\""
            ),
            ViolationKind::AccentTooCloseToSubject { subject } => write!(
                f,
                "accent decor \"{id}\" is inside the safe zone of subject \"{subject}\""
            ),
            ViolationKind::AccentTooCloseToProp { prop } => write!(
                f,
                "accent decor \"{id}\" is inside the safe zone of prop \"{prop}\""
            ),
            ViolationKind::DecorBudget { count, budget } => {
                write!(f, "too many decor nodes ({count} > {budget})")
            }
            ViolationKind::SubjectClippedTop { y } => {
                write!(f, "subject \"{id}\" is clipped at the top (y={y})")
            }
            ViolationKind::DecorOverlap { target, ratio } => write!(
                f,
                "decor \"{id}\" overlaps {target} (ratio={ratio:.3})"
            ),
        }
    }
}

/// Violations reported by one failing rule.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryViolations {
    pub violations: Vec<GeometryViolation>,
}

impl GeometryViolations {
    fn one(node: &str, kind: ViolationKind) -> Self {
        Self {
            violations: vec![GeometryViolation {
                node: node.to_string(),
                kind,
            }],
        }
    }
}

impl fmt::Display for GeometryViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n  - ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GeometryViolations {}

static CONTAINER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|_)(panel|frame|container)(_|$)").expect("container id regex is valid")
});

static RGBA_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba\(\s*[^,]+,\s*[^,]+,\s*[^,]+,\s*([0-9.]+)\s*\)")
        .expect("rgba regex is valid")
});

fn rgba_alpha(fill: &str) -> Option<f64> {
    RGBA_ALPHA.captures(fill)?.get(1)?.as_str().parse::<f64>().ok()
}

fn has_soft_blur(n: &Node) -> bool {
    n.attrs().str("filter").is_some_and(|f| f.contains("f_soft"))
}

struct Placed<'a> {
    node: &'a Node,
    layer: Layer,
    bbox: BoundingBox,
}

fn placed<'a>(nodes: &[&'a Node], role: Role) -> Vec<Placed<'a>> {
    nodes
        .iter()
        .copied()
        .filter(|n| n.tags().role == role)
        .filter_map(|n| {
            solid_bbox(n).map(|bbox| Placed {
                node: n,
                layer: n.effective_layer(),
                bbox,
            })
        })
        .collect()
}

struct DecorBox<'a> {
    node: &'a Node,
    layer: Layer,
    bbox: BoundingBox,
    coverage: f64,
    opacity: f64,
    decor_type: Option<DecorType>,
}

/// Geometric rule checker for finished scenes.
#[derive(Clone, Debug, Default)]
pub struct GeometryValidator {
    pub config: LintConfig,
}

impl GeometryValidator {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Decor type: explicit tag, else by coverage and blur. `None` when the node carries a
    /// `data-decor-type` outside the known kinds; such decor is judged by opacity alone.
    pub fn decor_type(&self, n: &Node, coverage: f64) -> Option<DecorType> {
        if let Some(t) = n.tags().decor_type {
            return Some(t);
        }
        if n.attrs().str(ATTR_DECOR_TYPE).is_some_and(|raw| !raw.trim().is_empty()) {
            return None;
        }
        Some(if coverage > self.config.full_canvas_coverage {
            DecorType::Texture
        } else if has_soft_blur(n) {
            DecorType::Shadow
        } else {
            DecorType::Accent
        })
    }

    /// Explicit opacity times rgba fill alpha; soft blur caps the explicit part.
    pub fn effective_opacity(&self, n: &Node) -> f64 {
        let a = n.attrs();
        let explicit = a.get("opacity").map(|v| v.as_f64().unwrap_or(1.0));
        let alpha = a.str("fill").and_then(rgba_alpha);
        if has_soft_blur(n) {
            return explicit
                .unwrap_or(1.0)
                .min(self.config.soft_blur_opacity_cap)
                * alpha.unwrap_or(1.0);
        }
        explicit.unwrap_or(1.0) * alpha.unwrap_or(1.0)
    }

    /// Tagged containers, or large rounded / panel-named rects on the bg layer.
    pub fn is_container(&self, n: &Node, layer: Layer, bbox: BoundingBox, canvas: BoundingBox) -> bool {
        if n.tags().prop_kind == PropKind::Container {
            return true;
        }
        if layer != Layer::Bg {
            return false;
        }
        if CONTAINER_ID.is_match(&n.id) {
            return true;
        }
        n.kind == NodeKind::Rect
            && bbox.area() / canvas.area().max(1.0) >= self.config.container_min_coverage
            && n.attrs().num_or("rx", 0.0) >= self.config.container_min_rx
    }

    /// Check every rule in order; the first failing rule is reported.
    #[tracing::instrument(skip_all, fields(nodes = scene.nodes.len()))]
    pub fn validate(&self, scene: &Scene) -> Result<(), GeometryViolations> {
        let cfg = &self.config;
        let nodes = scene.flatten();
        let canvas = canvas_box(&scene.canvas);

        for n in &nodes {
            let tags = n.tags();
            let layer = tags.effective_layer();
            if !tags.layer_allowed(layer) {
                return Err(GeometryViolations::one(
                    &n.id,
                    ViolationKind::RoleLayer {
                        role: tags.role.as_str(),
                        layer,
                    },
                ));
            }
        }

        let texts = placed(&nodes, Role::Text);
        let subjects = placed(&nodes, Role::Subject);
        let props = placed(&nodes, Role::Prop);

        for p in &props {
            if self.is_container(p.node, p.layer, p.bbox, canvas) {
                continue;
            }
            for s in subjects.iter().filter(|s| s.layer == Layer::Fg) {
                let padded = p.bbox.expand(cfg.prop_subject_pad);
                let overlap = padded.overlap_area(s.bbox);
                let ratio = overlap / p.bbox.area().min(s.bbox.area()).max(1.0);
                if overlap > 0.0 && ratio > cfg.prop_subject_max_ratio {
                    return Err(GeometryViolations::one(
                        &p.node.id,
                        ViolationKind::PropOverlapsSubject {
                            subject: s.node.id.clone(),
                        },
                    ));
                }
            }
        }

        let decor: Vec<DecorBox<'_>> = nodes
            .iter()
            .copied()
            .filter(|n| n.tags().role == Role::Decor)
            .filter_map(|n| {
                let bbox = solid_bbox(n)?;
                let cov = coverage(bbox, &scene.canvas);
                Some(DecorBox {
                    node: n,
                    layer: n.effective_layer(),
                    bbox,
                    coverage: cov,
                    opacity: self.effective_opacity(n),
                    decor_type: self.decor_type(n, cov),
                })
            })
            .collect();
        let fg_props: Vec<&Placed<'_>> = props.iter().filter(|p| p.layer == Layer::Fg).collect();

        for d in &decor {
            if d.decor_type != Some(DecorType::Accent)
                || d.layer != Layer::Bg
                || d.coverage > cfg.full_canvas_coverage
            {
                continue;
            }
            for s in &subjects {
                if d.bbox.intersect(s.bbox.expand(cfg.accent_subject_pad)).is_some() {
                    return Err(GeometryViolations::one(
                        &d.node.id,
                        ViolationKind::AccentTooCloseToSubject {
                            subject: s.node.id.clone(),
                        },
                    ));
                }
            }
            for p in &fg_props {
                if d.bbox.intersect(p.bbox.expand(cfg.accent_prop_pad)).is_some() {
                    return Err(GeometryViolations::one(
                        &d.node.id,
                        ViolationKind::AccentTooCloseToProp {
                            prop: p.node.id.clone(),
                        },
                    ));
                }
            }
        }

        let partial: Vec<&DecorBox<'_>> = decor
            .iter()
            .filter(|d| d.coverage <= cfg.full_canvas_coverage)
            .collect();
        if partial.len() > cfg.decor_budget {
            return Err(GeometryViolations::one(
                &partial[cfg.decor_budget].node.id,
                ViolationKind::DecorBudget {
                    count: partial.len(),
                    budget: cfg.decor_budget,
                },
            ));
        }

        for n in nodes.iter().filter(|n| n.tags().role == Role::Subject) {
            if let Some(b) = node_bbox(n)
                && b.y < 0.0
            {
                return Err(GeometryViolations::one(
                    &n.id,
                    ViolationKind::SubjectClippedTop { y: b.y },
                ));
            }
        }

        let mut found = Vec::new();
        for d in &partial {
            if d.layer == Layer::BgBase
                || matches!(d.decor_type, Some(DecorType::Shadow | DecorType::Texture))
            {
                continue;
            }
            let accent = d.decor_type == Some(DecorType::Accent);
            let threshold = |strict: f64, visible_at: f64| {
                if accent || d.opacity >= visible_at {
                    strict
                } else {
                    cfg.decor_lenient
                }
            };
            let targets = subjects
                .iter()
                .map(|s| ("subject", s, threshold(cfg.decor_strict[0], cfg.visible_opacity)))
                .chain(
                    fg_props
                        .iter()
                        .map(|p| ("prop", *p, threshold(cfg.decor_strict[1], cfg.visible_opacity))),
                )
                .chain(texts.iter().map(|t| {
                    (
                        "text",
                        t,
                        threshold(cfg.decor_strict[2], cfg.visible_opacity_text),
                    )
                }));
            for (kind, target, limit) in targets {
                let ratio = overlap_ratio_min(d.bbox, target.bbox);
                if ratio > limit {
                    found.push(GeometryViolation {
                        node: d.node.id.clone(),
                        kind: ViolationKind::DecorOverlap {
                            target: format!("{kind}:{}", target.node.id),
                            ratio,
                        },
                    });
                }
            }
        }
        if !found.is_empty() {
            return Err(GeometryViolations { violations: found });
        }

        tracing::debug!(decor = decor.len(), props = props.len(), "visual lint passed");
        Ok(())
    }
}

/// [`GeometryValidator::validate`] with default thresholds.
pub fn validate(scene: &Scene) -> Result<(), GeometryViolations> {
    GeometryValidator::default().validate(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/lint/visual.rs"]
mod tests;
