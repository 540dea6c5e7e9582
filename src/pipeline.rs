use crate::brief::Brief;
use crate::catalog::manifest::{MotifManifest, SymbolStore, inject_motifs};
use crate::compose::slots::compose;
use crate::foundation::error::SceneResult;
use crate::lint::visual::GeometryValidator;
use crate::render::svg::render_svg;
use crate::scene::model::Scene;
use crate::schema::validate::validate_scene_value;

/// Motif sources used by the inject step.
pub struct MotifSources<'a> {
    pub manifest: &'a MotifManifest,
    pub store: &'a mut SymbolStore,
}

/// Output of [`run_pipeline`].
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Composed scene with motif symbols injected.
    pub scene: Scene,
    pub svg: String,
}

/// Schema-check a typed scene by round-tripping it through JSON.
pub fn lint_scene(scene: &Scene) -> SceneResult<()> {
    let doc = serde_json::to_value(scene)?;
    validate_scene_value(&doc)?;
    Ok(())
}

/// Compose, inject motifs, schema lint, visual lint, render.
///
/// Stages run in order and the first failure is returned. `on_scene` sees the injected scene
/// before linting starts, so callers can persist it even when a lint stage rejects it.
#[tracing::instrument(skip_all)]
pub fn run_pipeline(
    mother: &Scene,
    brief: &Brief,
    motifs: MotifSources<'_>,
    validator: &GeometryValidator,
    on_scene: impl FnOnce(&Scene) -> SceneResult<()>,
) -> SceneResult<PipelineOutput> {
    let composed = compose(mother, brief);
    tracing::debug!(stage = "compose", "pipeline stage done");

    let scene = inject_motifs(composed, motifs.manifest, motifs.store)?;
    tracing::debug!(stage = "inject", "pipeline stage done");
    on_scene(&scene)?;

    lint_scene(&scene)?;
    tracing::debug!(stage = "lint", "pipeline stage done");

    validator.validate(&scene)?;
    tracing::debug!(stage = "visual-lint", "pipeline stage done");

    let svg = render_svg(&scene);
    tracing::info!(bytes = svg.len(), "pipeline rendered svg");
    Ok(PipelineOutput { scene, svg })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
