//! Loading an actor together with the data directory around it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rules_content::{ContentFactory, SnapshotCache, SnapshotLoader};
use rules_core::{ActorId, ActorSnapshot, MapLocalization, PcgRoller, RulesConfig, RulesEnv};

use crate::dirs;

/// Arguments shared by every command that works on one actor.
#[derive(Args)]
pub struct ActorArgs {
    /// Actor file (.json or .ron), or the id of an actor in the data directory
    #[arg(value_name = "ACTOR")]
    pub actor: String,

    /// Data directory with rules.toml, lang/ and actors/ (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Localization table under lang/
    #[arg(long, default_value = "en")]
    pub lang: String,
}

/// Everything loaded for one command run.
pub struct Session {
    pub actor: ActorSnapshot,
    config: RulesConfig,
    strings: MapLocalization,
    cache: SnapshotCache,
}

impl Session {
    pub fn open(args: &ActorArgs) -> Result<Self> {
        let data_dir = args.data_dir.clone().unwrap_or_else(dirs::data_dir);
        let factory = ContentFactory::new(&data_dir);

        let config = factory.load_config()?;

        let strings = if data_dir.join("lang").join(format!("{}.toml", args.lang)).exists() {
            factory.load_localization(&args.lang)?
        } else {
            tracing::debug!(lang = %args.lang, "no localization table, showing raw keys");
            MapLocalization::new()
        };

        let cache = if data_dir.join("actors").is_dir() {
            factory.load_snapshots()?
        } else {
            SnapshotCache::new()
        };

        let actor = resolve_actor(&args.actor, &cache)?;

        Ok(Self {
            actor,
            config,
            strings,
            cache,
        })
    }

    pub fn env(&self) -> RulesEnv<'_> {
        RulesEnv::from_parts(&self.strings, &self.cache, &self.config)
    }
}

fn resolve_actor(actor: &str, cache: &SnapshotCache) -> Result<ActorSnapshot> {
    let path = Path::new(actor);
    if path.is_file() {
        return SnapshotLoader::load(path);
    }
    cache
        .actor(&ActorId::new(actor))
        .cloned()
        .with_context(|| format!("Actor not found: {actor} is neither a file nor a loaded actor id"))
}

/// Seeded roller; a fresh seed is drawn from the clock when none is given.
pub fn roller(seed: Option<u64>) -> PcgRoller {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    tracing::info!(seed, "rolling");
    PcgRoller::new(seed)
}
