use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::scene::attrs::{AttrValue, Attrs};
use crate::scene::model::{Node, Scene};

const XXH3_SEED: u64 = 0x5ce4_e5f1_0b8a_2d63;

/// 128-bit structural hash of a scene. Equal scenes hash equal on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_scene(scene: &Scene) -> SceneFingerprint {
    let mut h = StableHasher::new();

    h.write_str(&scene.meta.version);
    h.write_str(&scene.meta.title);
    h.write_str(&scene.meta.lang);
    h.write_u64(u64::from(scene.meta.seed));
    match &scene.meta.auto {
        Some(auto) => {
            h.write_u8(1);
            h.write_str(&auto.domain);
            h.write_str(&auto.style);
            h.write_u64(auto.candidates as u64);
            h.write_f64(auto.score);
            for v in [
                auto.layout.panel_x,
                auto.layout.panel_y,
                auto.layout.panel_w,
                auto.layout.panel_h,
                auto.layout.person_x,
            ] {
                h.write_u64(v as u64);
            }
        }
        None => h.write_u8(0),
    }

    h.write_f64(scene.canvas.width);
    h.write_f64(scene.canvas.height);
    h.write_str(&scene.canvas.view_box);
    h.write_str(&scene.canvas.bg);

    let p = &scene.theme.palette;
    for s in [&p.bg, &p.fg, &p.primary, &p.accent, &p.muted] {
        h.write_str(s);
    }
    h.write_str(&scene.theme.typography.font_family);
    h.write_f64(scene.theme.typography.base_size);

    h.write_u64(scene.defs.motifs.len() as u64);
    for m in &scene.defs.motifs {
        h.write_str(m);
    }
    h.write_str(&scene.defs.raw);

    h.write_u64(scene.nodes.len() as u64);
    for n in &scene.nodes {
        write_node(&mut h, n);
    }

    // Animations are opaque to layout; hash their canonical JSON.
    h.write_u64(scene.animations.len() as u64);
    for a in &scene.animations {
        h.write_str(&serde_json::to_string(a).unwrap_or_default());
    }

    h.write_str(&scene.a11y.title);
    h.write_str(&scene.a11y.desc);
    h.write_str(&scene.a11y.reduced_motion.strategy);

    h.finish()
}

fn write_node(h: &mut StableHasher, n: &Node) {
    h.write_str(&n.id);
    h.write_str(n.kind.as_str());
    write_attrs(h, n.attrs());
    write_attrs(h, &n.style);
    match &n.text {
        Some(t) => {
            h.write_u8(1);
            h.write_str(t);
        }
        None => h.write_u8(0),
    }
    h.write_u64(n.children.len() as u64);
    for c in &n.children {
        write_node(h, c);
    }
}

fn write_attrs(h: &mut StableHasher, attrs: &Attrs) {
    h.write_u64(attrs.len() as u64);
    for (k, v) in attrs.iter() {
        h.write_str(k);
        match v {
            AttrValue::Num(x) => {
                h.write_u8(0);
                h.write_f64(*x);
            }
            AttrValue::Str(s) => {
                h.write_u8(1);
                h.write_str(s);
            }
            AttrValue::Bool(b) => {
                h.write_u8(2);
                h.write_u8(u8::from(*b));
            }
        }
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> SceneFingerprint {
        let v = self.inner.digest128();
        SceneFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/fingerprint.rs"]
mod tests;
