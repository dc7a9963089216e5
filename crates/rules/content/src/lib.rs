//! Data files and oracle implementations for the rules engine.
//!
//! This crate reads what a host keeps on disk and hands it to `rules-core`:
//! - Actor snapshots (JSON or RON)
//! - Ruleset configuration (TOML)
//! - Localization tables (TOML or JSON)
//!
//! [`SnapshotCache`] is the in-memory [`SnapshotOracle`](rules_core::SnapshotOracle)
//! used to follow cross-actor references during recomputation.

pub mod cache;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use cache::SnapshotCache;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LocalizationLoader, SnapshotLoader};
