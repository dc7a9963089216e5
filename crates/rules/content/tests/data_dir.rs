//! Loading a data directory and recomputing against it.

use std::fs;

use rules_content::ContentFactory;
use rules_core::{ActorId, LocalizationOracle, RulesEnv, SnapshotOracle, recompute_actor};

fn write_data_dir(root: &std::path::Path) {
    fs::create_dir_all(root.join("actors")).unwrap();
    fs::create_dir_all(root.join("lang")).unwrap();

    fs::write(root.join("rules.toml"), "unarmoured_ac = 11\n").unwrap();
    fs::write(
        root.join("lang/en.toml"),
        "[RULES]\nBonus = \"Bonus\"\nOverride = \"Override\"\n",
    )
    .unwrap();
    fs::write(
        root.join("actors/hero.json"),
        r#"{
            "id": "hero",
            "name": "Hero",
            "abilities": { "dex": 14 },
            "effects": [{
                "uuid": "shield-of-faith",
                "components": [
                    { "uuid": "f", "type": "filter", "filter": "score", "score": "ac" },
                    { "uuid": "b", "type": "bonus", "formula": true, "method": "formula", "constant": 2 }
                ]
            }]
        }"#,
    )
    .unwrap();
    fs::write(
        root.join("actors/wolf.ron"),
        r#"(id: "wolf", name: "Wolf", level: 2)"#,
    )
    .unwrap();
}

#[test]
fn factory_builds_a_working_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    let strings = factory.load_localization("en").unwrap();
    let cache = factory.load_snapshots().unwrap();

    assert_eq!(config.unarmoured_ac, 11);
    assert_eq!(strings.localize("RULES.Bonus"), "Bonus");
    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.actor(&ActorId::new("wolf")).map(|a| a.level),
        Some(2)
    );

    let env = RulesEnv::from_parts(&strings, &cache, &config);
    let hero = cache.actor(&ActorId::new("hero")).unwrap();
    let stats = recompute_actor(hero, &env);
    assert_eq!(stats.ac, 11 + 2 + 2);

    let reference = "Actor.hero".parse().unwrap();
    let resolved = env.snapshots().and_then(|oracle| oracle.resolve(&reference));
    assert_eq!(resolved.map(|a| a.name.as_str()), Some("Hero"));
}
