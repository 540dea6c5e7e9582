use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::SceneResult;
use crate::foundation::math::stream_salt;
use crate::foundation::rng::Mulberry32;
use crate::layout::sampler::{Domain, Style};

/// Motif category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Person,
    PropReal,
    #[default]
    PropUi,
    Decor,
    /// Categories this crate does not know about. Never picked.
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotifEntry {
    pub id: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub domain_tags: BTreeSet<String>,
    #[serde(default)]
    pub style_tags: BTreeSet<String>,
}

#[derive(serde::Deserialize)]
struct CatalogFile {
    #[serde(default)]
    motifs: Vec<MotifEntry>,
}

/// Read-only motif index keyed by id. Later duplicates replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotifCatalog {
    by_id: BTreeMap<String, MotifEntry>,
}

/// Motif id prefix of the bundled person silhouettes.
pub const PERSON_PREFIX: &str = "opeeps_effigy_";

impl MotifCatalog {
    pub fn new(entries: impl IntoIterator<Item = MotifEntry>) -> Self {
        Self {
            by_id: entries.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Parse a `{ "motifs": [...] }` meta document.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let file: CatalogFile = serde_json::from_str(s)?;
        Ok(Self::new(file.motifs))
    }

    pub fn load(path: &Path) -> SceneResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read motif meta {}", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn lookup(&self, id: &str) -> Option<&MotifEntry> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids tagged with both `domain` and `style`, sorted.
    pub fn filter(&self, domain: &str, style: &str) -> Vec<&str> {
        self.by_id
            .values()
            .filter(|e| e.domain_tags.contains(domain) && e.style_tags.contains(style))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Whether `id` names a person motif.
    pub fn is_person(&self, id: &str) -> bool {
        match self.lookup(id) {
            Some(e) => e.category == Category::Person,
            None => id.starts_with(PERSON_PREFIX),
        }
    }
}

/// Ids every scene of a domain wants when the catalog has them.
pub fn required_motifs(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Payments => &[
            "credit_card_handdrawn",
            "receipt_handdrawn",
            "invoice_handdrawn",
            "lucide_shield_check",
            "lucide_lock",
            "lucide_wallet",
        ],
        Domain::Portal => &[
            "phone_handdrawn",
            "chat_bubble_handdrawn",
            "receipt_handdrawn",
            "lucide_user",
            "lucide_file_text",
            "lucide_message_circle",
        ],
        Domain::Booking => &[
            "calendar_handdrawn",
            "lucide_calendar_clock",
            "lucide_timer",
            "lucide_map",
            "lucide_badge",
        ],
    }
}

/// Paper scenes always carry these, catalogued or not.
pub const PAPER_MOTIFS: [&str; 4] = [
    "paper_frame",
    "pencil_shade_bl",
    "tape_strip",
    "doodle_sparkles",
];

/// Deterministic motif set for a scene, sorted and de-duplicated.
#[tracing::instrument(skip(catalog), fields(catalog_len = catalog.len()))]
pub fn pick_motifs(catalog: &MotifCatalog, domain: Domain, style: Style, seed: u32) -> Vec<String> {
    let mut person = Vec::new();
    let mut prop_real = Vec::new();
    let mut prop_ui = Vec::new();
    let mut decor = Vec::new();
    for id in catalog.filter(domain.as_str(), style.as_str()) {
        let bucket = match catalog.lookup(id).map(|e| e.category) {
            Some(Category::Person) => &mut person,
            Some(Category::PropReal) => &mut prop_real,
            Some(Category::PropUi) => &mut prop_ui,
            Some(Category::Decor) => &mut decor,
            Some(Category::Other) | None => continue,
        };
        bucket.push(id.to_string());
    }

    let mut rng = Mulberry32::new(seed ^ stream_salt(domain.as_str(), style.as_str()));
    let mut picked = BTreeSet::<String>::new();
    for id in required_motifs(domain) {
        if catalog.contains(id) {
            picked.insert((*id).to_string());
        }
    }

    if let Some(p) = rng.pick_one(&person) {
        picked.insert(p.clone());
    }

    let unpicked = |pool: &[String], picked: &BTreeSet<String>| -> Vec<String> {
        pool.iter().filter(|x| !picked.contains(*x)).cloned().collect()
    };

    let want = rng.range_inclusive(1, 3);
    let pool = unpicked(&prop_real, &picked);
    picked.extend(rng.pick_some(&pool, want));

    let want = rng.range_inclusive(2, 4);
    let pool = unpicked(&prop_ui, &picked);
    picked.extend(rng.pick_some(&pool, want));

    let want = match style {
        Style::Paper => rng.range_inclusive(2, 3),
        Style::Glass | Style::Glow => rng.range_inclusive(1, 2),
    };
    let pool = unpicked(&decor, &picked);
    picked.extend(rng.pick_some(&pool, want));

    if style == Style::Paper {
        picked.extend(PAPER_MOTIFS.iter().map(|s| (*s).to_string()));
    }

    tracing::debug!(count = picked.len(), "picked motifs");
    picked.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/meta.rs"]
mod tests;
