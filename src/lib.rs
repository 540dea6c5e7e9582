//! scenesmith builds illustrated hero scenes for product marketing pages.
//!
//! A scene is a declarative JSON document (canvas, theme, defs, a node tree tagged with semantic
//! roles and layers, animations, a11y). The crate covers the whole lifecycle:
//!
//! - Auto-fill: pick motifs from a catalog, sample candidate layouts, build and score each
//!   candidate, keep the best ([`auto_fill`])
//! - Compose: fill a scene mother with brief copy ([`compose`])
//! - Inject: resolve motif ids to `<symbol>` markup ([`inject_motifs`])
//! - Lint: document shape ([`validate_scene_value`]) and geometric rules ([`GeometryValidator`])
//! - Render: layered static SVG ([`render_svg`])
//!
//! Everything is deterministic for a given seed.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod brief;
pub(crate) mod build;
pub(crate) mod catalog;
pub(crate) mod compose;
pub(crate) mod fingerprint;
pub(crate) mod layout;
pub(crate) mod lint;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod schema;
pub(crate) mod score;
pub(crate) mod select;

pub use crate::foundation::core::{BoundingBox, overlap_ratio_min};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::rng::Mulberry32;

pub use crate::brief::{Brief, detect_domain, detect_style, resolve_seed};
pub use crate::build::{BuildContext, MICRO_SALT, build, build_template};
pub use crate::catalog::manifest::{
    ManifestEntry, MotifManifest, SymbolStore, extract_symbol, inject_motifs,
};
pub use crate::catalog::meta::{Category, MotifCatalog, MotifEntry, pick_motifs};
pub use crate::compose::slots::{compose, fill_slots};
pub use crate::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use crate::layout::sampler::{
    Domain, LayoutLimits, LayoutParams, LayoutSampler, PropOffsets, Style, Template, sample,
};
pub use crate::lint::visual::{
    GeometryValidator, GeometryViolation, GeometryViolations, LintConfig, ViolationKind,
};
pub use crate::pipeline::{MotifSources, PipelineOutput, lint_scene, run_pipeline};
pub use crate::render::svg::{LayerPlan, render_svg};
pub use crate::scene::attrs::{AttrValue, Attrs};
pub use crate::scene::geometry::{node_bbox, text_bbox};
pub use crate::scene::model::{
    A11y, Animation, AutoMeta, Canvas, Defs, Keyframe, Meta, Node, NodeKind, Palette,
    ReducedMotion, SCENE_VERSION, Scene, Theme, Track, Typography,
};
pub use crate::scene::tags::{DecorType, Layer, NodeTags, PropKind, Role};
pub use crate::schema::validate::{SchemaError, SchemaErrors, SchemaPathElem, validate_scene_value};
pub use crate::schema::{load_scene_str, load_scene_value};
pub use crate::score::rules::{ScoreRule, ScoreTable};
pub use crate::score::scorer::{RuleDelta, score, score_breakdown};
pub use crate::select::generate::{
    AutoFill, Candidate, DEFAULT_CANDIDATES, GenerateOpts, MAX_CANDIDATES, auto_fill,
    evaluate_candidates, generate, referenced_motifs, select_best,
};
