//! HashMap-backed snapshot oracle.

use std::collections::HashMap;

use rules_core::{ActorId, ActorSnapshot, SnapshotOracle, SnapshotRef};

/// Snapshots the host has already loaded, keyed by reference.
///
/// Resolving never recomputes anything; the cache only returns what was
/// inserted.
#[derive(Clone, Debug, Default)]
pub struct SnapshotCache {
    snapshots: HashMap<SnapshotRef, ActorSnapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a world actor under `Actor.<id>`, replacing any earlier copy.
    pub fn insert(&mut self, actor: ActorSnapshot) -> Option<ActorSnapshot> {
        let reference = SnapshotRef::Actor(actor.id.clone());
        self.snapshots.insert(reference, actor)
    }

    /// Stores an unlinked token's synthetic actor.
    pub fn insert_token(
        &mut self,
        scene: impl Into<String>,
        token: impl Into<String>,
        actor: ActorSnapshot,
    ) -> Option<ActorSnapshot> {
        let reference = SnapshotRef::Token {
            scene: scene.into(),
            token: token.into(),
        };
        self.snapshots.insert(reference, actor)
    }

    pub fn actor(&self, id: &ActorId) -> Option<&ActorSnapshot> {
        self.snapshots.get(&SnapshotRef::Actor(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn references(&self) -> impl Iterator<Item = &SnapshotRef> {
        self.snapshots.keys()
    }
}

impl FromIterator<ActorSnapshot> for SnapshotCache {
    fn from_iter<I: IntoIterator<Item = ActorSnapshot>>(iter: I) -> Self {
        let mut cache = Self::new();
        for actor in iter {
            cache.insert(actor);
        }
        cache
    }
}

impl SnapshotOracle for SnapshotCache {
    fn resolve(&self, reference: &SnapshotRef) -> Option<&ActorSnapshot> {
        self.snapshots.get(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_actors_and_tokens() {
        let mut cache: SnapshotCache = [ActorSnapshot::new("wolf", "Wolf")].into_iter().collect();
        cache.insert_token("s1", "t1", ActorSnapshot::new("wolf", "Alpha Wolf"));

        let actor = SnapshotRef::Actor(ActorId::new("wolf"));
        assert_eq!(cache.resolve(&actor).map(|a| a.name.as_str()), Some("Wolf"));

        let token: SnapshotRef = "Scene.s1.Token.t1".parse().unwrap();
        assert_eq!(
            cache.resolve(&token).map(|a| a.name.as_str()),
            Some("Alpha Wolf")
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn unknown_reference_resolves_to_nothing() {
        let cache = SnapshotCache::new();
        assert!(cache.resolve(&SnapshotRef::Actor(ActorId::new("x"))).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces_previous_copy() {
        let mut cache = SnapshotCache::new();
        cache.insert(ActorSnapshot::new("a", "Old"));
        let previous = cache.insert(ActorSnapshot::new("a", "New"));
        assert_eq!(previous.map(|a| a.name), Some("Old".to_owned()));
        assert_eq!(cache.actor(&ActorId::new("a")).map(|a| a.name.as_str()), Some("New"));
    }
}
