use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::scene::model::{Canvas, NodeKind, SCENE_VERSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

/// One shape violation, located by a `$.a.b[0]` style path.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    pub path: Vec<SchemaPathElem>,
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every violation found in one document, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors {
    pub errors: Vec<SchemaError>,
}

impl SchemaErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

use SchemaPathElem::{Field, Index};

/// Shape-check a scene document without deserializing it, collecting every violation.
pub fn validate_scene_value(doc: &Value) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    let Some(root) = doc.as_object() else {
        return Err(SchemaErrors {
            errors: vec![SchemaError::at(&[], "root must be an object")],
        });
    };

    validate_meta(root, &mut errors);
    validate_canvas(root, &mut errors);
    validate_theme(root, &mut errors);

    let mut ids = HashSet::<String>::new();
    match root.get("nodes").and_then(Value::as_array) {
        Some(nodes) if !nodes.is_empty() => {
            let mut path = vec![Field("nodes")];
            validate_nodes(nodes, &mut path, &mut ids, &mut errors);
        }
        _ => errors.push(SchemaError::at(
            &[Field("nodes")],
            "nodes must be a non-empty array",
        )),
    }

    validate_animations(root, &ids, &mut errors);

    let strategy = root
        .get("a11y")
        .and_then(|a| a.get("reducedMotion"))
        .map(|rm| rm.get("strategy"));
    match strategy {
        None => errors.push(SchemaError::at(
            &[Field("a11y"), Field("reducedMotion")],
            "a11y.reducedMotion is required",
        )),
        Some(s) if !s.is_some_and(Value::is_string) => errors.push(SchemaError::at(
            &[Field("a11y"), Field("reducedMotion"), Field("strategy")],
            "strategy must be a string",
        )),
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_meta(root: &Map<String, Value>, errors: &mut Vec<SchemaError>) {
    let Some(meta) = root.get("meta").filter(|m| m.is_object()) else {
        errors.push(SchemaError::at(&[Field("meta")], "meta is required"));
        return;
    };
    if meta.get("version").and_then(Value::as_str) != Some(SCENE_VERSION) {
        errors.push(SchemaError::at(
            &[Field("meta"), Field("version")],
            format!("version must be \"{SCENE_VERSION}\""),
        ));
    }
    if let Some(seed) = meta.get("seed")
        && !seed.as_u64().is_some_and(|v| u32::try_from(v).is_ok())
    {
        errors.push(SchemaError::at(
            &[Field("meta"), Field("seed")],
            "seed must be an integer in 0..=4294967295",
        ));
    }
}

fn validate_canvas(root: &Map<String, Value>, errors: &mut Vec<SchemaError>) {
    let Some(canvas) = root.get("canvas").filter(|c| c.is_object()) else {
        errors.push(SchemaError::at(&[Field("canvas")], "canvas is required"));
        return;
    };
    let width = canvas.get("width").and_then(Value::as_f64);
    let height = canvas.get("height").and_then(Value::as_f64);
    if width.is_none() || height.is_none() {
        errors.push(SchemaError::at(
            &[Field("canvas")],
            "canvas.width/height must be numbers",
        ));
    }
    match canvas.get("viewBox").and_then(Value::as_str) {
        None => errors.push(SchemaError::at(
            &[Field("canvas"), Field("viewBox")],
            "viewBox must be a string",
        )),
        Some(vb) => {
            if let (Some(w), Some(h)) = (width, height) {
                let expected = Canvas::view_box_for(w, h);
                if !view_box_matches(vb, w, h) {
                    errors.push(SchemaError::at(
                        &[Field("canvas"), Field("viewBox")],
                        format!("viewBox must be \"{expected}\""),
                    ));
                }
            }
        }
    }
}

/// Accepts any whitespace/number spelling of `0 0 w h` (`"0 0 1200.0 600"` included).
fn view_box_matches(vb: &str, w: f64, h: f64) -> bool {
    let parts: Vec<f64> = vb
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()
        .unwrap_or_default();
    parts.len() == 4 && parts[0] == 0.0 && parts[1] == 0.0 && parts[2] == w && parts[3] == h
}

fn validate_theme(root: &Map<String, Value>, errors: &mut Vec<SchemaError>) {
    let theme = root.get("theme");
    match theme.and_then(|t| t.get("palette")).filter(|p| p.is_object()) {
        None => errors.push(SchemaError::at(
            &[Field("theme"), Field("palette")],
            "theme.palette is required",
        )),
        Some(palette) => {
            for key in ["bg", "fg", "primary", "accent", "muted"] {
                if !palette.get(key).is_some_and(Value::is_string) {
                    errors.push(SchemaError::at(
                        &[Field("theme"), Field("palette"), Field(key)],
                        "must be a string",
                    ));
                }
            }
        }
    }
    match theme
        .and_then(|t| t.get("typography"))
        .filter(|t| t.is_object())
    {
        None => errors.push(SchemaError::at(
            &[Field("theme"), Field("typography")],
            "theme.typography is required",
        )),
        Some(typo) => {
            if !typo.get("fontFamily").is_some_and(Value::is_string) {
                errors.push(SchemaError::at(
                    &[Field("theme"), Field("typography"), Field("fontFamily")],
                    "fontFamily must be a string",
                ));
            }
        }
    }
}

fn validate_nodes(
    nodes: &[Value],
    path: &mut Vec<SchemaPathElem>,
    ids: &mut HashSet<String>,
    errors: &mut Vec<SchemaError>,
) {
    for (i, node) in nodes.iter().enumerate() {
        path.push(Index(i));
        validate_node(node, path, ids, errors);
        path.pop();
    }
}

fn validate_node(
    node: &Value,
    path: &mut Vec<SchemaPathElem>,
    ids: &mut HashSet<String>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(obj) = node.as_object() else {
        errors.push(SchemaError::at(path, "node must be an object"));
        return;
    };

    let id = obj.get("id").and_then(Value::as_str).filter(|s| !s.is_empty());
    match id {
        None => errors.push(SchemaError::at(
            &[path.as_slice(), &[Field("id")]].concat(),
            "node id must be a non-empty string",
        )),
        Some(id) => {
            if !ids.insert(id.to_string()) {
                errors.push(SchemaError::at(
                    &[path.as_slice(), &[Field("id")]].concat(),
                    format!("duplicate node id \"{id}\""),
                ));
            }
        }
    }
    let label = id.unwrap_or("(missing id)");

    match obj.get("type").and_then(Value::as_str) {
        None => errors.push(SchemaError::at(
            &[path.as_slice(), &[Field("type")]].concat(),
            format!("node type missing for \"{label}\""),
        )),
        Some(t) => match NodeKind::parse(t) {
            None => errors.push(SchemaError::at(
                &[path.as_slice(), &[Field("type")]].concat(),
                format!("unknown node type \"{t}\""),
            )),
            Some(NodeKind::Text) => {
                let has_text = obj
                    .get("text")
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.is_empty());
                if !has_text {
                    errors.push(SchemaError::at(
                        &[path.as_slice(), &[Field("text")]].concat(),
                        format!("text node \"{label}\" must include non-empty text"),
                    ));
                }
            }
            Some(_) if obj.contains_key("text") => errors.push(SchemaError::at(
                &[path.as_slice(), &[Field("text")]].concat(),
                format!("only text nodes carry text (\"{label}\" is \"{t}\")"),
            )),
            Some(_) => {}
        },
    }

    match obj.get("children") {
        None | Some(Value::Null) => {}
        Some(Value::Array(children)) => {
            path.push(Field("children"));
            validate_nodes(children, path, ids, errors);
            path.pop();
        }
        Some(_) => errors.push(SchemaError::at(
            &[path.as_slice(), &[Field("children")]].concat(),
            "children must be an array",
        )),
    }
}

fn validate_animations(
    root: &Map<String, Value>,
    ids: &HashSet<String>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(anims) = root.get("animations").and_then(Value::as_array) else {
        errors.push(SchemaError::at(
            &[Field("animations")],
            "animations must be an array (can be empty)",
        ));
        return;
    };

    for (ai, anim) in anims.iter().enumerate() {
        let apath = [Field("animations"), Index(ai)];
        let Some(anim) = anim.as_object() else {
            errors.push(SchemaError::at(&apath, "animation must be an object"));
            continue;
        };
        if anim.get("type").and_then(Value::as_str) != Some("timeline") {
            errors.push(SchemaError::at(
                &[apath.as_slice(), &[Field("type")]].concat(),
                "animation type must be \"timeline\"",
            ));
        }
        let tracks = anim.get("tracks").and_then(Value::as_array);
        if tracks.is_none_or(|t| t.is_empty()) {
            errors.push(SchemaError::at(
                &[apath.as_slice(), &[Field("tracks")]].concat(),
                "tracks must be a non-empty array",
            ));
        }
        for (ti, track) in tracks.into_iter().flatten().enumerate() {
            let tpath = [apath.as_slice(), &[Field("tracks"), Index(ti)]].concat();
            validate_track(track, &tpath, ids, errors);
        }
    }
}

fn validate_track(
    track: &Value,
    tpath: &[SchemaPathElem],
    ids: &HashSet<String>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(track) = track.as_object() else {
        errors.push(SchemaError::at(tpath, "track must be an object"));
        return;
    };
    match track.get("target").and_then(Value::as_str) {
        None | Some("") => errors.push(SchemaError::at(
            &[tpath, &[Field("target")]].concat(),
            "track target missing",
        )),
        Some(target) if !ids.contains(target) => errors.push(SchemaError::at(
            &[tpath, &[Field("target")]].concat(),
            format!("track target \"{target}\" not found"),
        )),
        Some(_) => {}
    }
    if !track.get("property").is_some_and(Value::is_string) {
        errors.push(SchemaError::at(
            &[tpath, &[Field("property")]].concat(),
            "track property must be a string",
        ));
    }

    let keyframes = track.get("keyframes").and_then(Value::as_array);
    if keyframes.is_none_or(|k| k.len() < 2) {
        errors.push(SchemaError::at(
            &[tpath, &[Field("keyframes")]].concat(),
            "keyframes must have at least 2 entries",
        ));
    }
    let mut prev_t = f64::NEG_INFINITY;
    for (ki, kf) in keyframes.into_iter().flatten().enumerate() {
        let kpath = [tpath, &[Field("keyframes"), Index(ki)]].concat();
        let Some(kf) = kf.as_object() else {
            errors.push(SchemaError::at(&kpath, "keyframe must be an object"));
            continue;
        };
        match kf.get("t").and_then(Value::as_f64) {
            Some(t) if (0.0..=1.0).contains(&t) => {
                if t < prev_t {
                    errors.push(SchemaError::at(
                        &[kpath.as_slice(), &[Field("t")]].concat(),
                        "keyframes must be non-decreasing by t",
                    ));
                }
                prev_t = t;
            }
            _ => errors.push(SchemaError::at(
                &[kpath.as_slice(), &[Field("t")]].concat(),
                "keyframe t must be a number in [0, 1]",
            )),
        }
        if !kf.contains_key("value") {
            errors.push(SchemaError::at(
                &[kpath.as_slice(), &[Field("value")]].concat(),
                "keyframe value missing",
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
