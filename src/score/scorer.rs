use crate::foundation::core::{BoundingBox, overlap_ratio_min};
use crate::scene::geometry::{canvas_box, node_bbox, solid_bbox};
use crate::scene::model::{Node, Scene};
use crate::scene::tags::{Layer, PropKind, Role};
use crate::score::rules::{ScoreRule, ScoreTable};

/// Contribution of one rule to a score.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleDelta {
    pub rule: &'static str,
    pub delta: f64,
}

/// Score `scene` with `table`. Higher is better.
pub fn score(scene: &Scene, table: &ScoreTable) -> f64 {
    table.baseline
        + score_breakdown(scene, table)
            .iter()
            .map(|d| d.delta)
            .sum::<f64>()
}

/// Per-rule contributions, in table order. Only top-level nodes participate.
pub fn score_breakdown(scene: &Scene, table: &ScoreTable) -> Vec<RuleDelta> {
    let view = ScoreView::new(scene, table);
    table
        .rules
        .iter()
        .map(|rule| RuleDelta {
            rule: rule.name(),
            delta: view.apply(rule),
        })
        .collect()
}

struct ScoreView<'a> {
    canvas: BoundingBox,
    panel: Option<(&'a Node, BoundingBox)>,
    subject: Option<BoundingBox>,
    key_boxes: Vec<BoundingBox>,
    bg_props: Vec<(&'a Node, BoundingBox)>,
}

fn is_bg_prop(n: &Node) -> bool {
    n.tags().role == Role::Prop && n.effective_layer() == Layer::Bg
}

impl<'a> ScoreView<'a> {
    fn new(scene: &'a Scene, table: &ScoreTable) -> Self {
        let first_of = |ids: &[String]| {
            ids.iter()
                .find_map(|id| scene.top_level(id))
                .and_then(|n| node_bbox(n).map(|b| (n, b)))
        };
        let key_boxes = table
            .panel_ids
            .iter()
            .chain(&table.subject_ids)
            .filter_map(|id| scene.top_level(id))
            .filter_map(node_bbox)
            .collect();
        let bg_props = scene
            .nodes
            .iter()
            .filter(|n| is_bg_prop(n))
            .filter_map(|n| node_bbox(n).map(|b| (n, b)))
            .collect();

        Self {
            canvas: canvas_box(&scene.canvas),
            panel: first_of(&table.panel_ids),
            subject: first_of(&table.subject_ids).map(|(_, b)| b),
            key_boxes,
            bg_props,
        }
    }

    fn is_panel(&self, n: &Node) -> bool {
        self.panel.is_some_and(|(p, _)| std::ptr::eq(p, n))
    }

    /// Non-container background props with positive area.
    fn solid_bg_props(&self) -> impl Iterator<Item = BoundingBox> + '_ {
        self.bg_props
            .iter()
            .filter(|(n, _)| n.tags().prop_kind != PropKind::Container)
            .filter_map(|(n, _)| solid_bbox(n))
    }

    fn apply(&self, rule: &ScoreRule) -> f64 {
        match *rule {
            ScoreRule::OutOfCanvas {
                margin,
                penalty_per_edge,
            } => {
                let c = self.canvas;
                let edges: usize = self
                    .key_boxes
                    .iter()
                    .map(|b| {
                        [
                            b.x < c.x - margin,
                            b.y < c.y - margin,
                            b.right() > c.right() + margin,
                            b.bottom() > c.bottom() + margin,
                        ]
                        .into_iter()
                        .filter(|v| *v)
                        .count()
                    })
                    .sum();
                -(edges as f64) * penalty_per_edge
            }
            ScoreRule::PanelSubjectOverlap {
                low,
                low_penalty,
                mid,
                mid_penalty,
                high,
                high_penalty,
                reward,
            } => {
                let (Some((_, panel)), Some(subject)) = (self.panel, self.subject) else {
                    return 0.0;
                };
                let r = panel.overlap_area(subject) / subject.area().max(1.0);
                if r < low {
                    -low_penalty
                } else if r < mid {
                    -mid_penalty
                } else if r > high {
                    -high_penalty
                } else {
                    reward
                }
            }
            ScoreRule::CenterDistance {
                free_dx,
                divisor,
                cap,
            } => {
                let (Some((_, panel)), Some(subject)) = (self.panel, self.subject) else {
                    return 0.0;
                };
                let dx = (subject.center().x - panel.center().x).abs();
                -((dx - free_dx) / divisor).clamp(0.0, cap)
            }
            ScoreRule::TitleBand {
                height,
                min_area,
                penalty,
            } => {
                let band = BoundingBox::new(0.0, 0.0, self.canvas.w, height);
                let hits = self
                    .bg_props
                    .iter()
                    .filter(|(_, b)| b.overlap_area(band) > min_area)
                    .count();
                -(hits as f64) * penalty
            }
            ScoreRule::PairwiseOverlap { threshold, weight } => {
                let boxes: Vec<BoundingBox> = self.solid_bg_props().collect();
                let mut delta = 0.0;
                for (i, a) in boxes.iter().enumerate() {
                    for b in &boxes[i + 1..] {
                        let r = overlap_ratio_min(*a, *b);
                        if r > threshold {
                            delta -= weight * r;
                        }
                    }
                }
                delta
            }
            ScoreRule::Clutter {
                max_props,
                penalty_per_prop,
            } => {
                let n = self.solid_bg_props().count();
                -(n.saturating_sub(max_props) as f64) * penalty_per_prop
            }
            ScoreRule::Balance { divisor, cap } => {
                let Some((_, panel)) = self.panel else {
                    return 0.0;
                };
                let (wsum, xsum) = self
                    .bg_props
                    .iter()
                    .filter(|(n, _)| !self.is_panel(n))
                    .fold((0.0, 0.0), |(w, x), (_, b)| {
                        (w + b.area(), x + b.area() * b.center().x)
                    });
                if wsum <= 0.0 {
                    return 0.0;
                }
                -((xsum / wsum - panel.center().x).abs() / divisor).min(cap)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/score/scorer.rs"]
mod tests;
