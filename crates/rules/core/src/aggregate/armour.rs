use crate::config::RulesConfig;
use crate::model::{ActorSnapshot, Armour, ArmourKind};

/// AC before effects: worn armour, shield and the sheet's flat modifier.
///
/// The best body armour is the one with the highest `ac + magic`; the best
/// shield is picked the same way and stacks on top. Without body armour the
/// actor uses the unarmoured base plus their full dex modifier.
pub fn base_ac(actor: &ActorSnapshot, dex_mod: i32, config: &RulesConfig) -> i32 {
    let worn = || actor.items.iter().filter(|item| item.is_worn_armour());
    let best = |shield: bool| {
        worn()
            .filter_map(|item| item.armour.as_ref())
            .filter(|armour| armour.is_shield() == shield)
            .max_by_key(|armour| armour.base_ac())
    };

    let body = match best(false) {
        Some(armour) => armour.base_ac() + dex_bonus(armour, dex_mod),
        None => config.unarmoured_ac + dex_mod,
    };
    let shield = best(true).map_or(0, Armour::base_ac);

    body + shield + actor.attributes.ac.modifier
}

fn dex_bonus(armour: &Armour, dex_mod: i32) -> i32 {
    if !armour.add_dex {
        return 0;
    }
    match armour.max_dex {
        Some(cap) => dex_mod.min(cap),
        None => dex_mod,
    }
}

/// Whether worn heavy armour demands more strength than the actor has.
pub fn heavy_armour_too_heavy(actor: &ActorSnapshot, strength: i32) -> bool {
    actor
        .items
        .iter()
        .filter(|item| item.is_worn_armour())
        .filter_map(|item| item.armour.as_ref())
        .any(|armour| {
            armour.kind == ArmourKind::Heavy && armour.strength.is_some_and(|req| strength < req)
        })
}
