use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::build::{BuildContext, build_template};
use crate::catalog::meta::{MotifCatalog, pick_motifs};
use crate::fingerprint::fingerprint_scene;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::sampler::{Domain, LayoutParams, LayoutSampler, Style};
use crate::scene::model::{AutoMeta, Node, NodeKind, Scene};
use crate::score::rules::ScoreTable;
use crate::score::scorer::score;

/// Candidates evaluated when the caller does not say.
pub const DEFAULT_CANDIDATES: usize = 40;
/// Hard upper bound on candidates per run.
pub const MAX_CANDIDATES: usize = 200;

/// One sampled layout with its built scene and score.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub index: usize,
    pub layout: LayoutParams,
    pub scene: Scene,
    pub score: f64,
}

/// Options controlling candidate generation.
#[derive(Clone, Debug)]
pub struct GenerateOpts {
    /// Number of candidates; clamped to `[1, MAX_CANDIDATES]`.
    pub candidates: usize,
    /// Build and score candidates on a rayon pool. Results are identical either way.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    pub score_table: ScoreTable,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES,
            parallel: false,
            threads: None,
            score_table: ScoreTable::default(),
        }
    }
}

impl GenerateOpts {
    pub fn effective_candidates(&self) -> usize {
        self.candidates.clamp(1, MAX_CANDIDATES)
    }
}

/// Sample, build and score every candidate, in sample order.
#[tracing::instrument(skip(ctx, opts), fields(n = opts.effective_candidates()))]
pub fn evaluate_candidates(
    ctx: &BuildContext<'_>,
    domain: Domain,
    style: Style,
    seed: u32,
    opts: &GenerateOpts,
) -> SceneResult<Vec<Candidate>> {
    let sampler = LayoutSampler::new(domain, style, seed);
    let template = sampler.template();
    let layouts: Vec<LayoutParams> = sampler.take(opts.effective_candidates()).collect();

    let eval_one = |index: usize, layout: &LayoutParams| {
        let scene = build_template(ctx, template, seed, Some(layout));
        let score = score(&scene, &opts.score_table);
        Candidate {
            index,
            layout: layout.clone(),
            scene,
            score,
        }
    };

    if !opts.parallel {
        return Ok(layouts
            .iter()
            .enumerate()
            .map(|(i, l)| eval_one(i, l))
            .collect());
    }

    let pool = build_thread_pool(opts.threads)?;
    // Indexed collect keeps sample order regardless of scheduling.
    let candidates = pool.install(|| {
        layouts
            .par_iter()
            .enumerate()
            .map(|(i, l)| eval_one(i, l))
            .collect::<Vec<_>>()
    });
    Ok(candidates)
}

/// Best candidate: highest score, earliest index on ties.
pub fn select_best(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates
        .into_iter()
        .reduce(|best, c| if c.score > best.score { c } else { best })
}

/// Evaluate candidates and return the winner.
pub fn generate(
    ctx: &BuildContext<'_>,
    domain: Domain,
    style: Style,
    seed: u32,
    opts: &GenerateOpts,
) -> SceneResult<Candidate> {
    let candidates = evaluate_candidates(ctx, domain, style, seed, opts)?;
    select_best(candidates)
        .ok_or_else(|| SceneError::validation("candidate generation produced no candidates"))
}

/// Ids referenced by `use href="#motif_<id>"` anywhere in the tree, sorted.
pub fn referenced_motifs(scene: &Scene) -> Vec<String> {
    scene
        .flatten()
        .into_iter()
        .filter(|n| n.kind == NodeKind::Use)
        .filter_map(motif_ref)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn motif_ref(n: &Node) -> Option<String> {
    n.attrs()
        .str("href")
        .and_then(|h| h.strip_prefix("#motif_"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Result of [`auto_fill`].
#[derive(Clone, Debug)]
pub struct AutoFill {
    pub scene: Scene,
    pub motifs: Vec<String>,
    pub candidates: usize,
    pub score: f64,
}

/// Pick motifs, generate candidates and finalize the winner.
///
/// The winner gets `meta.auto` provenance and `defs.motifs` is rewritten to exactly the motif ids
/// referenced by `use` nodes.
#[tracing::instrument(skip(catalog, opts))]
pub fn auto_fill(
    catalog: &MotifCatalog,
    domain: Domain,
    style: Style,
    seed: u32,
    opts: &GenerateOpts,
) -> SceneResult<AutoFill> {
    let motifs = pick_motifs(catalog, domain, style, seed);
    let ctx = BuildContext::new(catalog, &motifs);
    let n = opts.effective_candidates();
    let best = generate(&ctx, domain, style, seed, opts)?;

    let mut scene = best.scene;
    scene.meta.auto = Some(AutoMeta {
        domain: domain.as_str().to_string(),
        style: style.as_str().to_string(),
        seed,
        candidates: n,
        score: best.score,
        layout: best.layout,
    });
    scene.defs.motifs = referenced_motifs(&scene);

    tracing::info!(
        %domain,
        %style,
        candidates = n,
        winner = best.index,
        score = best.score,
        fingerprint = %fingerprint_scene(&scene),
        "auto-filled scene"
    );

    Ok(AutoFill {
        scene,
        motifs,
        candidates: n,
        score: best.score,
    })
}

fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SceneError::validation(
            "'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/select/generate.rs"]
mod tests;
