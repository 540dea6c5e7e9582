use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{SceneError, SceneResult};

/// One scoring rule with its parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoreRule {
    /// Key objects (panel, subject) poking out of the canvas by more than `margin`.
    OutOfCanvas { margin: f64, penalty_per_edge: f64 },
    /// Share of the subject covered by the panel.
    PanelSubjectOverlap {
        low: f64,
        low_penalty: f64,
        mid: f64,
        mid_penalty: f64,
        high: f64,
        high_penalty: f64,
        reward: f64,
    },
    /// Horizontal distance between panel and subject centers beyond `free_dx`.
    CenterDistance { free_dx: f64, divisor: f64, cap: f64 },
    /// Background props intruding into the title band at the top of the canvas.
    TitleBand { height: f64, min_area: f64, penalty: f64 },
    /// Overlap between two non-container background props, relative to the smaller box.
    PairwiseOverlap { threshold: f64, weight: f64 },
    /// Too many background props.
    Clutter { max_props: usize, penalty_per_prop: f64 },
    /// Area-weighted centroid of background props away from the panel center.
    Balance { divisor: f64, cap: f64 },
}

impl ScoreRule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OutOfCanvas { .. } => "out_of_canvas",
            Self::PanelSubjectOverlap { .. } => "panel_subject_overlap",
            Self::CenterDistance { .. } => "center_distance",
            Self::TitleBand { .. } => "title_band",
            Self::PairwiseOverlap { .. } => "pairwise_overlap",
            Self::Clutter { .. } => "clutter",
            Self::Balance { .. } => "balance",
        }
    }
}

/// Baseline, key-object ids and the ordered rule list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub baseline: f64,
    /// Candidate ids for the panel, in lookup order.
    pub panel_ids: Vec<String>,
    /// Candidate ids for the subject, in lookup order.
    pub subject_ids: Vec<String>,
    pub rules: Vec<ScoreRule>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            baseline: 1000.0,
            panel_ids: vec!["panel".to_string(), "portal_panel".to_string()],
            subject_ids: ["person", "finance", "customer", "owner"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            rules: vec![
                ScoreRule::OutOfCanvas {
                    margin: 8.0,
                    penalty_per_edge: 50.0,
                },
                ScoreRule::PanelSubjectOverlap {
                    low: 0.05,
                    low_penalty: 160.0,
                    mid: 0.10,
                    mid_penalty: 80.0,
                    high: 0.50,
                    high_penalty: 140.0,
                    reward: 40.0,
                },
                ScoreRule::CenterDistance {
                    free_dx: 360.0,
                    divisor: 4.0,
                    cap: 120.0,
                },
                ScoreRule::TitleBand {
                    height: 150.0,
                    min_area: 10.0,
                    penalty: 40.0,
                },
                ScoreRule::PairwiseOverlap {
                    threshold: 0.02,
                    weight: 280.0,
                },
                ScoreRule::Clutter {
                    max_props: 9,
                    penalty_per_prop: 45.0,
                },
                ScoreRule::Balance {
                    divisor: 3.0,
                    cap: 120.0,
                },
            ],
        }
    }
}

impl ScoreTable {
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let table: Self = serde_json::from_str(s)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> SceneResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read score rules '{}'", path.display()))
            .map_err(SceneError::from)?;
        Self::from_json_str(&s)
    }

    /// Reject parameters that would make scores non-finite.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.baseline.is_finite() {
            return Err(SceneError::validation("score baseline must be finite"));
        }
        for rule in &self.rules {
            let divisor = match rule {
                ScoreRule::CenterDistance { divisor, .. } | ScoreRule::Balance { divisor, .. } => {
                    Some(*divisor)
                }
                _ => None,
            };
            if divisor.is_some_and(|d| !d.is_finite() || d <= 0.0) {
                return Err(SceneError::validation(format!(
                    "{}: divisor must be finite and > 0",
                    rule.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/score/rules.rs"]
mod tests;
