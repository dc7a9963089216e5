use super::SpellcastingStats;
use super::pipeline::Pipeline;
use crate::filter::applies_to;

/// Attack bonus and save DC for each spellcasting class.
///
/// Attack bonuses take only `spellAttacks` bonuses. DCs run the full
/// bonus/multiplier/setter pipeline over `spellDCs`.
pub fn spellcasting(pipeline: &Pipeline<'_, '_>) -> Vec<SpellcastingStats> {
    let ctx = pipeline.resolver().context();
    let config = pipeline.resolver().env().config();

    let attack_bonus = pipeline.apply_bonuses(applies_to::spell_attacks);

    ctx.actor
        .classes()
        .filter_map(|item| {
            let ability = item.class.as_ref()?.spell_ability()?;
            let modifier = ctx.ability_mod(ability);
            let attack = ctx.prof + modifier + attack_bonus;
            let save = pipeline.score(
                config.save_dc_base + ctx.prof + modifier,
                applies_to::spell_dcs,
                None,
            );
            Some(SpellcastingStats {
                class: item.id.clone(),
                ability,
                modifier,
                attack,
                save,
            })
        })
        .collect()
}
