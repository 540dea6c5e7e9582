use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::model::Scene;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    pub path: String,
    pub symbol_id: String,
}

/// `{ version, motifs: [{ id, path, symbolId }] }`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotifManifest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub motifs: Vec<ManifestEntry>,
}

impl MotifManifest {
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> SceneResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read motif manifest '{}'", path.display()))
            .map_err(SceneError::from)?;
        Self::from_json_str(&s)
    }

    /// First entry with a usable path and symbol id.
    pub fn entry(&self, id: &str) -> Option<&ManifestEntry> {
        self.motifs
            .iter()
            .find(|m| m.id == id && !m.path.is_empty() && !m.symbol_id.is_empty())
    }
}

/// Normalize a manifest-relative path: forward slashes, no `.` segments, no `..`, not absolute.
pub fn normalize_rel_path(source: &str) -> SceneResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SceneError::validation("motif paths must be relative"));
    }
    if s.is_empty() {
        return Err(SceneError::validation("motif path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SceneError::validation("motif paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SceneError::validation("motif path must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Cut `<symbol id="…">…</symbol>` out of an SVG document.
///
/// Tries the double- and single-quoted `<symbol id=` spellings first, then falls back to the
/// nearest `<symbol` preceding any `id="…"` hit (symbols whose `id` is not the first attribute).
pub fn extract_symbol<'a>(svg: &'a str, symbol_id: &str) -> Option<&'a str> {
    if svg.is_empty() || symbol_id.is_empty() {
        return None;
    }
    let dq = format!("<symbol id=\"{symbol_id}\"");
    let sq = format!("<symbol id='{symbol_id}'");
    let start = svg.find(&dq).or_else(|| svg.find(&sq)).or_else(|| {
        let hit = svg
            .find(&format!("id=\"{symbol_id}\""))
            .or_else(|| svg.find(&format!("id='{symbol_id}'")))?;
        svg[..hit].rfind("<symbol")
    })?;

    const CLOSE: &str = "</symbol>";
    let end = svg[start..].find(CLOSE)? + start + CLOSE.len();
    Some(&svg[start..end])
}

/// Symbol source files under one root, each read at most once.
#[derive(Debug)]
pub struct SymbolStore {
    root: PathBuf,
    files: HashMap<String, String>,
}

impl SymbolStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cached text of `rel_path` (normalized before lookup).
    pub fn text(&mut self, rel_path: &str) -> SceneResult<&str> {
        let norm = normalize_rel_path(rel_path)?;
        if !self.files.contains_key(&norm) {
            let path = self.root.join(Path::new(&norm));
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read motif svg '{}'", path.display()))
                .map_err(SceneError::from)?;
            tracing::debug!(path = %norm, bytes = text.len(), "loaded motif svg");
            self.files.insert(norm.clone(), text);
        }
        Ok(self.files[&norm].as_str())
    }

    pub fn cached_files(&self) -> usize {
        self.files.len()
    }
}

/// Resolve every id in `defs.motifs` to its `<symbol>` and store them in `defs.raw`.
///
/// All unknown ids are reported in one error. The resulting raw markup is the trimmed user markup
/// followed by the extracted symbols (one per symbol id, first occurrence wins), joined by newlines.
#[tracing::instrument(skip_all, fields(motifs = scene.defs.motifs.len()))]
pub fn inject_motifs(
    mut scene: Scene,
    manifest: &MotifManifest,
    store: &mut SymbolStore,
) -> SceneResult<Scene> {
    let ids: Vec<&String> = scene
        .defs
        .motifs
        .iter()
        .filter(|id| !id.trim().is_empty())
        .collect();
    if ids.is_empty() {
        return Ok(scene);
    }

    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| manifest.entry(id).is_none())
        .map(|id| id.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(SceneError::resource(format!(
            "missing motif ids: {}",
            missing.join(", ")
        )));
    }

    let mut symbol_ids = Vec::<&str>::new();
    let mut symbols = Vec::<String>::new();
    for id in &ids {
        let Some(entry) = manifest.entry(id) else {
            continue;
        };
        let text = store.text(&entry.path)?;
        let symbol = extract_symbol(text, &entry.symbol_id).ok_or_else(|| {
            SceneError::resource(format!(
                "failed to extract symbol \"{}\" from {}",
                entry.symbol_id, entry.path
            ))
        })?;
        if !symbol_ids.contains(&entry.symbol_id.as_str()) {
            symbol_ids.push(&entry.symbol_id);
            symbols.push(symbol.trim().to_string());
        }
    }

    let user_raw = scene.defs.raw.trim().to_string();
    let motif_raw = symbols.join("\n");
    scene.defs.raw = [user_raw, motif_raw]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    tracing::info!(
        symbols = symbol_ids.len(),
        files = store.cached_files(),
        "injected motif symbols"
    );
    Ok(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/manifest.rs"]
mod tests;
