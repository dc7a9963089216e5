use crate::model::{ActorSnapshot, SnapshotRef};

/// Read-only access to other actors' snapshots.
///
/// Implementations return whatever snapshot they already hold. They must
/// never trigger a recomputation, so following a reference can recurse at
/// most one level.
pub trait SnapshotOracle {
    fn resolve(&self, reference: &SnapshotRef) -> Option<&ActorSnapshot>;
}

/// Resolves nothing. Every cross-actor reference contributes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSnapshots;

impl SnapshotOracle for NoSnapshots {
    fn resolve(&self, _reference: &SnapshotRef) -> Option<&ActorSnapshot> {
        None
    }
}
