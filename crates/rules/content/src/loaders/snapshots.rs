//! Actor snapshot loader.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rules_core::schema::parse_type;
use rules_core::{ActorSnapshot, Effect};
use serde_json::Value;

use crate::loaders::{DataFormat, LoadResult, read_file};

/// Loader for [`ActorSnapshot`]s from JSON or RON files.
///
/// JSON documents are checked for unknown component types before they are
/// decoded, so a stale or hand-edited file fails with a
/// [`SchemaError`](rules_core::SchemaError) naming the offending component
/// instead of a generic decode error.
///
/// Loaded snapshots are normalized: every component points at its effect
/// and every item effect points at its item.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load(path: &Path) -> LoadResult<ActorSnapshot> {
        let content = read_file(path)?;
        let actor = match DataFormat::require(path)? {
            DataFormat::Json => Self::parse_json(&content),
            DataFormat::Ron => Self::parse_ron(&content),
            DataFormat::Toml => anyhow::bail!("Actor snapshots are not stored as TOML"),
        }
        .with_context(|| format!("Failed to load actor {}", path.display()))?;

        tracing::debug!(
            actor = %actor.id,
            items = actor.items.len(),
            effects = actor.effects.len(),
            "loaded actor snapshot"
        );
        Ok(actor)
    }

    pub fn parse_json(content: &str) -> LoadResult<ActorSnapshot> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor JSON: {}", e))?;
        check_component_types(&value)?;
        let actor: ActorSnapshot = serde_json::from_value(value)
            .map_err(|e| anyhow::anyhow!("Failed to decode actor: {}", e))?;
        Ok(normalize(actor))
    }

    pub fn parse_ron(content: &str) -> LoadResult<ActorSnapshot> {
        let actor: ActorSnapshot = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor RON: {}", e))?;
        Ok(normalize(actor))
    }

    /// Loads every `.json` and `.ron` file in a directory, in file name order.
    ///
    /// Other files are skipped.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<ActorSnapshot>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            match DataFormat::from_path(&path) {
                Some(DataFormat::Json | DataFormat::Ron) => paths.push(path),
                _ => tracing::debug!(path = %path.display(), "skipping non-actor file"),
            }
        }
        paths.sort();

        paths.iter().map(|path| Self::load(path)).collect()
    }
}

// ============================================================================
// Validation & normalization
// ============================================================================

fn check_component_types(actor: &Value) -> LoadResult<()> {
    let item_effects = actor
        .get("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("effects"));
    let effect_lists = actor.get("effects").into_iter().chain(item_effects);

    for effect in effect_lists.filter_map(Value::as_array).flatten() {
        let components = effect.get("components").and_then(Value::as_array);
        for component in components.into_iter().flatten() {
            let Some(type_name) = component.get("type").and_then(Value::as_str) else {
                continue;
            };
            parse_type(type_name).with_context(|| {
                format!(
                    "component {} in effect {}",
                    field_str(component, "uuid"),
                    field_str(effect, "uuid")
                )
            })?;
        }
    }
    Ok(())
}

fn field_str<'v>(value: &'v Value, key: &str) -> &'v str {
    value.get(key).and_then(Value::as_str).unwrap_or("?")
}

fn link_components(effect: &mut Effect) {
    for component in &mut effect.components {
        if component.parent_effect.is_empty() {
            component.parent_effect = effect.uuid.clone();
        }
    }
}

fn normalize(mut actor: ActorSnapshot) -> ActorSnapshot {
    for effect in &mut actor.effects {
        link_components(effect);
    }
    for item in &mut actor.items {
        for effect in &mut item.effects {
            link_components(effect);
            if effect.parent_item.is_none() {
                effect.parent_item = Some(item.id.clone());
            }
        }
    }
    actor
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rules_core::{ComponentKind, SchemaError};

    use super::*;

    const HERO: &str = r#"{
        "id": "hero",
        "name": "Hero",
        "type": "character",
        "abilities": { "str": 16, "dex": 14 },
        "items": [{
            "id": "sword",
            "name": "Longsword",
            "type": "weapon",
            "effects": [{
                "uuid": "swing",
                "components": [{ "uuid": "c1", "type": "attack" }]
            }]
        }],
        "effects": [{
            "uuid": "blessed",
            "components": [{ "uuid": "c2", "type": "bonus" }]
        }]
    }"#;

    #[test]
    fn json_snapshot_is_linked() {
        let actor = SnapshotLoader::parse_json(HERO).unwrap();
        assert_eq!(actor.name, "Hero");

        let swing = &actor.items[0].effects[0];
        assert_eq!(swing.parent_item.as_ref().map(|id| id.as_str()), Some("sword"));
        assert_eq!(swing.components[0].parent_effect.as_str(), "swing");
        assert!(matches!(swing.components[0].kind, ComponentKind::Attack(_)));

        let blessed = &actor.effects[0];
        assert_eq!(blessed.components[0].parent_effect.as_str(), "blessed");
        assert!(blessed.parent_item.is_none());
    }

    #[test]
    fn unknown_component_type_is_a_schema_error() {
        let content = HERO.replace(r#""type": "bonus""#, r#""type": "aura""#);
        let err = SnapshotLoader::parse_json(&content).unwrap_err();

        assert!(err.to_string().contains("component c2 in effect blessed"));
        let schema = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<SchemaError>());
        assert_eq!(
            schema,
            Some(&SchemaError::UnknownComponentType("aura".into()))
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SnapshotLoader::parse_json("{ not json").is_err());
    }

    #[test]
    fn loads_a_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{ "id": "b", "name": "B" }"#).unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{ "id": "a", "name": "A" }"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let actors = SnapshotLoader::load_dir(dir.path()).unwrap();
        let names: Vec<_> = actors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn load_reports_the_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[]").unwrap();

        let err = SnapshotLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load actor"));
    }
}
