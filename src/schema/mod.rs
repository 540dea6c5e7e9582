pub(crate) mod validate;

use crate::foundation::error::SceneResult;
use crate::scene::model::Scene;

/// Validate the document shape, then deserialize it.
///
/// Shape errors are reported together as [`crate::SceneError::Schema`]; only a well-shaped
/// document is deserialized.
pub fn load_scene_value(doc: serde_json::Value) -> SceneResult<Scene> {
    validate::validate_scene_value(&doc)?;
    Scene::from_value(doc)
}

/// [`load_scene_value`] over JSON text.
pub fn load_scene_str(s: &str) -> SceneResult<Scene> {
    let doc: serde_json::Value = serde_json::from_str(s)?;
    load_scene_value(doc)
}
