use std::fmt;
use std::str::FromStr;

use crate::foundation::error::SceneError;
use crate::foundation::math::{clamp_i64, stream_salt};
use crate::foundation::rng::Mulberry32;

/// Subject-matter family of a generated scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Payments,
    Portal,
    Booking,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Payments, Domain::Portal, Domain::Booking];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payments => "payments",
            Self::Portal => "portal",
            Self::Booking => "booking",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| {
                SceneError::validation(format!(
                    "unknown domain \"{s}\" (expected payments, portal or booking)"
                ))
            })
    }
}

/// Visual style pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Glass,
    Paper,
    Glow,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Glass, Style::Paper, Style::Glow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Paper => "paper",
            Self::Glow => "glow",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| {
                SceneError::validation(format!(
                    "unknown style \"{s}\" (expected glass, paper or glow)"
                ))
            })
    }
}

/// Concrete builder template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Template {
    PaymentsGlass,
    PortalPaper,
    BookingGlass,
}

impl Template {
    /// Template for `(domain, style)`; unknown pairs use the domain's default style.
    pub fn resolve(domain: Domain, style: Style) -> Self {
        match (domain, style) {
            (Domain::Payments, Style::Glass) => Self::PaymentsGlass,
            (Domain::Portal, Style::Paper) => Self::PortalPaper,
            (Domain::Booking, Style::Glass) => Self::BookingGlass,
            (Domain::Payments, _) => Self::PaymentsGlass,
            (Domain::Portal, _) => Self::PortalPaper,
            (Domain::Booking, _) => Self::BookingGlass,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PaymentsGlass => "payments/glass",
            Self::PortalPaper => "portal/paper",
            Self::BookingGlass => "booking/glass",
        }
    }

    /// Valid range per field, applied by both the sampler and the builder.
    pub fn limits(self) -> LayoutLimits {
        match self {
            Self::PaymentsGlass => LayoutLimits {
                panel_x: (50, 160),
                panel_y: (150, 240),
                panel_w: (680, 860),
                panel_h: (300, 380),
                person_x: (620, 880),
            },
            Self::PortalPaper => LayoutLimits {
                panel_x: (40, 140),
                panel_y: (140, 210),
                panel_w: (640, 820),
                panel_h: (320, 420),
                person_x: (640, 880),
            },
            Self::BookingGlass => LayoutLimits {
                panel_x: (50, 160),
                panel_y: (150, 240),
                panel_w: (680, 860),
                panel_h: (300, 380),
                person_x: (640, 880),
            },
        }
    }

    fn draw_ranges(self) -> PanelDraw {
        match self {
            Self::PaymentsGlass => PanelDraw {
                x: (70, 120),
                y: (168, 210),
                w: (740, 820),
                h: (316, 368),
            },
            Self::PortalPaper => PanelDraw {
                x: (60, 120),
                y: (150, 200),
                w: (680, 780),
                h: (340, 410),
            },
            Self::BookingGlass => PanelDraw {
                x: (60, 120),
                y: (158, 210),
                w: (720, 820),
                h: (320, 372),
            },
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `(lo, hi)` clamp ranges for the panel and person fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutLimits {
    pub panel_x: (i64, i64),
    pub panel_y: (i64, i64),
    pub panel_w: (i64, i64),
    pub panel_h: (i64, i64),
    pub person_x: (i64, i64),
}

struct PanelDraw {
    x: (i64, i64),
    y: (i64, i64),
    w: (i64, i64),
    h: (i64, i64),
}

/// Person is drawn this far left of the panel's right edge, at most/least.
const PERSON_INSET: (i64, i64) = (130, 70);
/// Person inset used by the default layouts.
const PERSON_DEFAULT_INSET: i64 = 110;

/// Sampled placement of one candidate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    pub panel_x: i64,
    pub panel_y: i64,
    pub panel_w: i64,
    pub panel_h: i64,
    pub person_x: i64,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub props: Option<PropOffsets>,
}

/// Per-prop offsets drawn for payments layouts. Recorded for provenance; prop anchors are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropOffsets {
    pub card_x: i64,
    pub card_y: i64,
    pub receipt_x: i64,
    pub receipt_y: i64,
    pub invoice_x: i64,
    pub invoice_y: i64,
}

impl LayoutParams {
    /// Layout a template uses when no sample is supplied.
    pub fn default_for(template: Template) -> Self {
        let (panel_x, panel_y, panel_w, panel_h) = match template {
            Template::PaymentsGlass => (90, 178, 780, 332),
            Template::PortalPaper => (80, 160, 720, 380),
            Template::BookingGlass => (80, 170, 760, 340),
        };
        Self {
            panel_x,
            panel_y,
            panel_w,
            panel_h,
            person_x: panel_x + panel_w - PERSON_DEFAULT_INSET,
            props: None,
        }
        .clamped(template)
    }

    /// Clamp every field into the template's valid range.
    pub fn clamped(mut self, template: Template) -> Self {
        let l = template.limits();
        self.panel_x = clamp_i64(self.panel_x, l.panel_x.0, l.panel_x.1);
        self.panel_y = clamp_i64(self.panel_y, l.panel_y.0, l.panel_y.1);
        self.panel_w = clamp_i64(self.panel_w, l.panel_w.0, l.panel_w.1);
        self.panel_h = clamp_i64(self.panel_h, l.panel_h.0, l.panel_h.1);
        self.person_x = clamp_i64(self.person_x, l.person_x.0, l.person_x.1);
        self
    }
}

/// Deterministic stream of candidate layouts for one `(domain, style, seed)`.
///
/// The stream is seeded with `seed ^ fnv1a32("<domain>:<style>")` using the requested strings, so
/// two styles that resolve to the same template still sample different layouts. Draw order is
/// fixed per template: panel x, y, w, h, person x, then (payments only) the six prop offsets.
#[derive(Clone, Debug)]
pub struct LayoutSampler {
    template: Template,
    rng: Mulberry32,
}

impl LayoutSampler {
    pub fn new(domain: Domain, style: Style, seed: u32) -> Self {
        Self {
            template: Template::resolve(domain, style),
            rng: Mulberry32::new(seed ^ stream_salt(domain.as_str(), style.as_str())),
        }
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn next_layout(&mut self) -> LayoutParams {
        let d = self.template.draw_ranges();
        let panel_x = self.rng.range_inclusive(d.x.0, d.x.1);
        let panel_y = self.rng.range_inclusive(d.y.0, d.y.1);
        let panel_w = self.rng.range_inclusive(d.w.0, d.w.1);
        let panel_h = self.rng.range_inclusive(d.h.0, d.h.1);
        let right = panel_x + panel_w;
        let person_x = self
            .rng
            .range_inclusive(right - PERSON_INSET.0, right - PERSON_INSET.1);

        let props = match self.template {
            Template::PaymentsGlass => Some(PropOffsets {
                card_x: self.rng.range_inclusive(30, 90),
                card_y: self.rng.range_inclusive(28, 72),
                receipt_x: self.rng.range_inclusive(300, 480),
                receipt_y: self.rng.range_inclusive(96, 176),
                invoice_x: self.rng.range_inclusive(460, 600),
                invoice_y: self.rng.range_inclusive(44, 124),
            }),
            Template::PortalPaper | Template::BookingGlass => None,
        };

        LayoutParams {
            panel_x,
            panel_y,
            panel_w,
            panel_h,
            person_x,
            props,
        }
        .clamped(self.template)
    }
}

impl Iterator for LayoutSampler {
    type Item = LayoutParams;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_layout())
    }
}

/// Draw `n` layouts. Same inputs, same output, bit for bit.
pub fn sample(domain: Domain, style: Style, seed: u32, n: usize) -> Vec<LayoutParams> {
    LayoutSampler::new(domain, style, seed).take(n).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sampler.rs"]
mod tests;
