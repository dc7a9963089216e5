use super::{DamageDefenseStat, Defenses};
use crate::effect::data::{DefenseKind, DefenseLevel};
use crate::index::ComponentIndex;

/// Folds active defense components into resistances and immunities.
pub fn defenses(index: &ComponentIndex<'_>) -> Defenses {
    let mut out = Defenses::default();
    for matched in index.defenses() {
        let data = matched.data;
        out.disease |= data.disease;
        out.sleep |= data.sleep;
        if let Some(dr) = data.dr {
            out.dr = Some(out.dr.map_or(dr, |current| current.max(dr)));
        }

        match data.defense {
            Some(DefenseKind::Damage) => {
                let entry = &data.damage;
                let list = match entry.level {
                    DefenseLevel::Res => &mut out.resistances,
                    DefenseLevel::Imm => &mut out.immunities,
                    DefenseLevel::Vuln => &mut out.vulnerabilities,
                };
                list.push(DamageDefenseStat {
                    damage: entry.dmg,
                    magic: entry.magic.clone(),
                    material: entry.material.clone(),
                });
            }
            Some(DefenseKind::Condition) if data.condition.level == DefenseLevel::Imm => {
                let condition = data.condition.condition;
                if !out.condition_immunities.contains(&condition) {
                    out.condition_immunities.push(condition);
                }
            }
            Some(DefenseKind::Condition) | None => {}
        }
    }
    out
}
