//! Creative brief documents and the heuristics that read them.
//!
//! A brief carries copy (`layout.slots`), intent and style hints. Auto-fill uses it to pick a
//! domain and style when the caller does not force them; compose uses its slots.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

use crate::foundation::error::SceneResult;
use crate::layout::sampler::{Domain, Style};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Brief {
    pub meta: BriefMeta,
    pub intent: Intent,
    pub story: Story,
    pub layout: BriefLayout,
    pub style: BriefStyle,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BriefMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Intent {
    pub primary_goal: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Story {
    pub beats: Vec<Beat>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Beat {
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BriefLayout {
    /// Slot values keyed by slot name. Non-string values are kept but substitute as empty.
    pub slots: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BriefStyle {
    pub illustration_style: Option<String>,
    pub palette_hint: Option<String>,
}

impl Brief {
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read brief {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// String value of a slot; `None` for missing or non-string slots.
    pub fn slot(&self, key: &str) -> Option<&str> {
        self.layout.slots.get(key).and_then(|v| v.as_str())
    }

    fn slot_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.layout.slots.values().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    fn beat_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.story.beats.iter().filter_map(|b| b.text.as_deref())
    }

    fn style_blob(&self) -> String {
        let fixed = [
            self.style.illustration_style.as_deref(),
            self.style.palette_hint.as_deref(),
            self.intent.tone.as_deref(),
        ];
        let parts = fixed
            .into_iter()
            .flatten()
            .map(str::to_string)
            .chain(self.intent.keywords.iter().cloned())
            .chain(self.beat_texts().map(str::to_string))
            .chain(self.slot_texts());
        lower_join(parts)
    }

    fn domain_blob(&self) -> String {
        let fixed = [
            self.intent.primary_goal.as_deref(),
            self.intent.audience.as_deref(),
        ];
        let parts = fixed
            .into_iter()
            .flatten()
            .map(str::to_string)
            .chain(self.intent.keywords.iter().cloned())
            .chain(self.beat_texts().map(str::to_string))
            .chain(self.slot_texts());
        lower_join(parts)
    }
}

fn lower_join(parts: impl Iterator<Item = String>) -> String {
    parts
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn keyword_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("keyword regex is valid")
}

static PAPER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(r"\b(paper|journal|doodle|notebook|sketch|handwritten|sticky)\b")
});
static GLOW_WORDS: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(r"\b(glow|gradient|neon|orbs|electric|ai)\b"));

static DOMAIN_HINTS: LazyLock<[(Domain, Vec<Regex>); 3]> = LazyLock::new(|| {
    [
        (
            Domain::Payments,
            vec![
                keyword_regex(
                    r"\b(stripe|payment|payments|charge|receipt|invoice|refund|payout|payroll)\b",
                ),
                keyword_regex(r"支付|收据|发票|结算|提成|工时|薪资"),
            ],
        ),
        (
            Domain::Portal,
            vec![
                keyword_regex(r"\b(portal|customer|profile|order|orders|status|support|chat)\b"),
                keyword_regex(r"客户|门户|订单|工单|状态|消息|客服"),
            ],
        ),
        (
            Domain::Booking,
            vec![
                keyword_regex(
                    r"\b(booking|availability|time slot|timeslot|schedule|duration|service area)\b",
                ),
                keyword_regex(r"预约|时间段|时长|服务区域|满单"),
            ],
        ),
    ]
});

/// Visual style for a brief. A forced style always wins; otherwise paper keywords beat glow
/// keywords and everything else is glass.
pub fn detect_style(brief: &Brief, forced: Option<Style>) -> Style {
    if let Some(style) = forced {
        return style;
    }
    let blob = brief.style_blob();
    if PAPER_WORDS.is_match(&blob) {
        Style::Paper
    } else if GLOW_WORDS.is_match(&blob) {
        Style::Glow
    } else {
        Style::Glass
    }
}

/// Product domain for a brief. Each matching keyword group adds 2 points; the best score wins,
/// ties going to payments, then portal, then booking. No hits means payments.
pub fn detect_domain(brief: &Brief, forced: Option<Domain>) -> Domain {
    if let Some(domain) = forced {
        return domain;
    }
    let blob = brief.domain_blob();
    let mut best = (Domain::Payments, 0u32);
    for (domain, patterns) in DOMAIN_HINTS.iter() {
        let score = patterns.iter().filter(|re| re.is_match(&blob)).count() as u32 * 2;
        if score > best.1 {
            best = (*domain, score);
        }
    }
    best.0
}

/// Seed precedence: explicit value, then `brief.meta.seed`, then 1.
pub fn resolve_seed(explicit: Option<u32>, brief: Option<&Brief>) -> u32 {
    explicit
        .or_else(|| brief.and_then(|b| b.meta.seed))
        .unwrap_or(1)
}

#[cfg(test)]
#[path = "../tests/unit/brief.rs"]
mod tests;
