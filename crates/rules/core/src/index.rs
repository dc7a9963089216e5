//! Flattened per-pass lookup over every effect an actor carries.
//!
//! The index borrows from the snapshot and is rebuilt on every
//! recomputation. It is a cache, never a source of truth.

use std::collections::{HashMap, HashSet};

use crate::effect::data::{
    BonusData, ConditionData, ConsumeTarget, DefenseData, MultiplierData, ResourceData,
    ResourceLink, RollModData, ScalingData, Setter,
};
use crate::effect::{Component, ComponentKind, Effect};
use crate::filter::FilterView;
use crate::model::{ActorSnapshot, ComponentId, EffectId, Item, ItemId};

/// An effect together with its owning item and activity state.
#[derive(Clone, Copy, Debug)]
pub struct IndexedEffect<'a> {
    pub effect: &'a Effect,
    pub item: Option<&'a Item>,
    pub active: bool,
}

/// A typed component returned by a filter query.
#[derive(Debug)]
pub struct Matched<'a, T> {
    pub component: &'a Component,
    pub data: &'a T,
    pub effect: &'a Effect,
    pub item: Option<&'a Item>,
}

// Manual impls: deriving would require `T: Clone`.
impl<T> Clone for Matched<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Matched<'_, T> {}

pub type BonusRef<'a> = Matched<'a, BonusData>;

/// The resource component a consumer or producer resolves to.
#[derive(Clone, Copy, Debug)]
pub struct LinkedResource<'a> {
    pub item: Option<&'a Item>,
    pub effect: &'a Effect,
    pub component: &'a Component,
    pub data: &'a ResourceData,
}

pub struct ComponentIndex<'a> {
    entries: Vec<IndexedEffect<'a>>,
    effects: HashMap<&'a EffectId, usize>,
    components: HashMap<&'a ComponentId, (usize, usize)>,
}

impl<'a> ComponentIndex<'a> {
    pub fn build(actor: &'a ActorSnapshot) -> Self {
        let owned = actor
            .items
            .iter()
            .flat_map(|item| item.effects.iter().map(move |e| (e, Some(item))))
            .chain(actor.effects.iter().map(|e| (e, None)));

        let raw: Vec<(&'a Effect, Option<&'a Item>)> = owned.collect();

        // Applied targets are delivered to someone else; they never apply here.
        let applied: HashSet<&'a EffectId> = raw
            .iter()
            .flat_map(|&(e, _)| e.components.iter())
            .filter_map(|c| match &c.kind {
                ComponentKind::Applied(data) => Some(&data.reference),
                _ => None,
            })
            .collect();

        let mut effects = HashMap::with_capacity(raw.len());
        let mut components = HashMap::new();
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, (effect, item))| {
                effects.entry(&effect.uuid).or_insert(i);
                for (j, component) in effect.components.iter().enumerate() {
                    components.entry(&component.uuid).or_insert((i, j));
                }
                let active = effect.is_toggled_on()
                    && item.is_none_or(Item::grants_effects)
                    && !applied.contains(&effect.uuid)
                    && effect.scaling().is_none();
                IndexedEffect {
                    effect,
                    item,
                    active,
                }
            })
            .collect();

        Self {
            entries,
            effects,
            components,
        }
    }

    pub fn entries(&self) -> &[IndexedEffect<'a>] {
        &self.entries
    }

    pub fn active(&self) -> impl Iterator<Item = &IndexedEffect<'a>> {
        self.entries.iter().filter(|entry| entry.active)
    }

    pub fn entry(&self, id: &EffectId) -> Option<IndexedEffect<'a>> {
        self.effects.get(id).map(|&i| self.entries[i])
    }

    pub fn effect(&self, id: &EffectId) -> Option<&'a Effect> {
        self.entry(id).map(|entry| entry.effect)
    }

    pub fn component(&self, id: &ComponentId) -> Option<&'a Component> {
        let &(i, j) = self.components.get(id)?;
        let effect: &'a Effect = self.entries[i].effect;
        effect.components.get(j)
    }

    /// Effect that owns a component, looked up by the component's parent link.
    pub fn effect_of(&self, component: &Component) -> Option<&'a Effect> {
        self.effect(&component.parent_effect)
    }

    pub fn item_of(&self, effect: &EffectId) -> Option<&'a Item> {
        self.entry(effect).and_then(|entry| entry.item)
    }

    /// First indexed item with `id`. Items without effects are not indexed.
    pub fn item(&self, id: &ItemId) -> Option<&'a Item> {
        self.entries
            .iter()
            .filter_map(|entry| entry.item)
            .find(|item| &item.id == id)
    }

    /// Resolves the resource that `link`, written on effect `owner`, spends
    /// from or refills. Spell slots and item quantities have no resource
    /// component.
    pub fn linked_resource(
        &self,
        owner: &EffectId,
        link: &ResourceLink<'_>,
    ) -> Option<LinkedResource<'a>> {
        let (item, effects): (Option<&'a Item>, &'a [Effect]) = match link.target {
            ConsumeTarget::Spell | ConsumeTarget::Qty => return None,
            ConsumeTarget::ThisEffect => {
                let entry = self.entry(owner)?;
                (entry.item, std::slice::from_ref(entry.effect))
            }
            ConsumeTarget::ThisItem => {
                let item = self.item_of(owner)?;
                (Some(item), item.effects.as_slice())
            }
            ConsumeTarget::Item => {
                let item = self.item(link.item)?;
                (Some(item), item.effects.as_slice())
            }
            ConsumeTarget::Feat => {
                let item = self.item(link.feat)?;
                (Some(item), item.effects.as_slice())
            }
        };

        effects.iter().find_map(|effect| {
            effect.components.iter().find_map(|component| match &component.kind {
                ComponentKind::Resource(data)
                    if link.reference.is_empty() || component.uuid.as_str() == link.reference =>
                {
                    Some(LinkedResource {
                        item,
                        effect,
                        component,
                        data,
                    })
                }
                _ => None,
            })
        })
    }

    // ------------------------------------------------------------------------
    // Filter queries
    // ------------------------------------------------------------------------

    fn matching<T, P, X>(&self, pred: P, extract: X) -> Vec<Matched<'a, T>>
    where
        P: Fn(&FilterView<'_>) -> bool,
        X: Fn(&'a ComponentKind) -> Option<&'a T>,
    {
        let selected = self.active().filter(|entry| {
            entry
                .effect
                .filters()
                .any(|(_, filter)| pred(&FilterView::new(filter, entry.effect)))
        });
        collect_components(selected, extract)
    }

    pub fn bonuses<P>(&self, pred: P) -> Vec<BonusRef<'a>>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.matching(pred, |kind| match kind {
            ComponentKind::Bonus(data) => Some(data),
            _ => None,
        })
    }

    pub fn multipliers<P>(&self, pred: P) -> Vec<Matched<'a, MultiplierData>>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.matching(pred, |kind| match kind {
            ComponentKind::Multiplier(data) => Some(data),
            _ => None,
        })
    }

    pub fn setters<P>(&self, pred: P) -> Vec<Matched<'a, Setter>>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.matching(pred, |kind| match kind {
            ComponentKind::Setter(data) => Some(data),
            _ => None,
        })
    }

    pub fn mods<P>(&self, pred: P) -> Vec<Matched<'a, RollModData>>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.matching(pred, |kind| match kind {
            ComponentKind::RollMod(data) => Some(data),
            _ => None,
        })
    }

    // ------------------------------------------------------------------------
    // Unfiltered active components
    // ------------------------------------------------------------------------

    fn active_of<T, X>(&self, extract: X) -> Vec<Matched<'a, T>>
    where
        X: Fn(&'a ComponentKind) -> Option<&'a T>,
    {
        collect_components(self.active(), extract)
    }

    pub fn conditions(&self) -> Vec<Matched<'a, ConditionData>> {
        self.active_of(|kind| match kind {
            ComponentKind::Condition(data) => Some(data),
            _ => None,
        })
    }

    pub fn defenses(&self) -> Vec<Matched<'a, DefenseData>> {
        self.active_of(|kind| match kind {
            ComponentKind::Defense(data) => Some(data),
            _ => None,
        })
    }

    /// Effects that declare themselves scaled variants of `effect`, in
    /// input order.
    pub fn scaling_children(&self, effect: &EffectId) -> Vec<(&'a Effect, &'a ScalingData)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.effect.scaling().map(|s| (entry.effect, s)))
            .filter(|(_, scaling)| &scaling.reference == effect)
            .collect()
    }
}

fn collect_components<'e, 'a: 'e, T, X>(
    entries: impl Iterator<Item = &'e IndexedEffect<'a>>,
    extract: X,
) -> Vec<Matched<'a, T>>
where
    X: Fn(&'a ComponentKind) -> Option<&'a T>,
{
    let mut out = Vec::new();
    for entry in entries {
        let effect: &'a Effect = entry.effect;
        for component in &effect.components {
            if let Some(data) = extract(&component.kind) {
                out.push(Matched {
                    component,
                    data,
                    effect,
                    item: entry.item,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::data::{AppliedData, ConsumeData, FilterData, FilterKind, ScoreKind};
    use crate::effect::EffectToggle;
    use crate::model::ItemKind;

    fn ac_bonus(id: &str, bonus: i32) -> Effect {
        Effect::new(id, id)
            .with_component(Component::new(
                format!("{id}-f"),
                ComponentKind::Filter(FilterData {
                    filter: FilterKind::Score,
                    score: ScoreKind::Ac,
                    ..FilterData::default()
                }),
            ))
            .with_component(Component::new(
                format!("{id}-b"),
                ComponentKind::Bonus(BonusData {
                    bonus,
                    ..BonusData::default()
                }),
            ))
    }

    fn is_ac(view: &FilterView<'_>) -> bool {
        view.filter.filter == FilterKind::Score && view.filter.score == ScoreKind::Ac
    }

    #[test]
    fn inactive_effects_are_excluded_from_queries() {
        let mut actor = ActorSnapshot::new("a", "Tester");
        let mut off = ac_bonus("off", 5);
        off.toggle = Some(EffectToggle { active: false });
        actor.effects.push(ac_bonus("on", 1));
        actor.effects.push(off);

        let mut ring = Item::new("ring", "Ring", ItemKind::Equipment).with_effect(ac_bonus("ring-e", 2));
        ring.equippable = true;
        actor.items.push(ring);

        let index = ComponentIndex::build(&actor);
        let bonuses = index.bonuses(is_ac);
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses[0].data.bonus, 1);
        assert!(index.effect(&EffectId::new("off")).is_some());
    }

    #[test]
    fn applied_targets_do_not_apply_to_the_owner() {
        let mut actor = ActorSnapshot::new("a", "Caster");
        let carrier = Effect::new("carrier", "Bless").with_component(Component::new(
            "app",
            ComponentKind::Applied(AppliedData {
                reference: EffectId::new("bless-target"),
                ..AppliedData::default()
            }),
        ));
        actor.effects.push(carrier);
        actor.effects.push(ac_bonus("bless-target", 1));

        let index = ComponentIndex::build(&actor);
        assert!(index.bonuses(is_ac).is_empty());
        let component = index.component(&ComponentId::new("bless-target-b")).unwrap();
        assert_eq!(
            index.effect_of(component).map(|e| e.uuid.as_str()),
            Some("bless-target")
        );
    }

    fn ki_points() -> Item {
        Item::new("monk", "Monk", ItemKind::Feat).with_effect(
            Effect::new("ki", "Ki").with_component(Component::new(
                "ki-pool",
                ComponentKind::Resource(ResourceData {
                    name: "Ki".into(),
                    ..ResourceData::default()
                }),
            )),
        )
    }

    #[test]
    fn consumers_resolve_their_linked_resource() {
        let mut actor = ActorSnapshot::new("a", "Monk");
        actor.items.push(ki_points());
        let consume = ConsumeData {
            target: ConsumeTarget::Feat,
            feat_id: ItemId::new("monk"),
            reference: "ki-pool".into(),
            ..ConsumeData::default()
        };
        actor.effects.push(
            Effect::new("flurry", "Flurry of Blows")
                .with_component(Component::new("spend", ComponentKind::Consume(consume.clone()))),
        );

        let index = ComponentIndex::build(&actor);
        let owner = EffectId::new("flurry");
        let linked = index.linked_resource(&owner, &consume.link()).unwrap();
        assert_eq!(linked.data.name, "Ki");
        assert_eq!(linked.effect.uuid.as_str(), "ki");
        assert_eq!(linked.item.map(|i| i.id.as_str()), Some("monk"));

        let dangling = ConsumeData {
            reference: "missing".into(),
            ..consume.clone()
        };
        assert!(index.linked_resource(&owner, &dangling.link()).is_none());

        let slot = ConsumeData {
            target: ConsumeTarget::Spell,
            ..consume
        };
        assert!(index.linked_resource(&owner, &slot.link()).is_none());
    }

    #[test]
    fn this_effect_consumers_find_their_own_resource() {
        let mut actor = ActorSnapshot::new("a", "Cleric");
        let consume = ConsumeData::default();
        actor.effects.push(
            Effect::new("channel", "Channel Divinity")
                .with_component(Component::new(
                    "uses",
                    ComponentKind::Resource(ResourceData {
                        name: "Channel Divinity".into(),
                        ..ResourceData::default()
                    }),
                ))
                .with_component(Component::new("spend", ComponentKind::Consume(consume.clone()))),
        );

        let index = ComponentIndex::build(&actor);
        let linked = index
            .linked_resource(&EffectId::new("channel"), &consume.link())
            .unwrap();
        assert_eq!(linked.component.uuid.as_str(), "uses");
        assert!(linked.item.is_none());
    }
}
