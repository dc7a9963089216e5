//! Effects and the components they own.
//!
//! An effect is the all-or-nothing grouping unit: every component inside it
//! shares the effect's toggle and activity state.
mod component;
pub mod data;

pub use component::{Component, ComponentKind};
pub use data::Setter;

use crate::model::{EffectId, ItemId};

/// User toggle on an effect. Effects without one are always on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectToggle {
    pub active: bool,
}

/// A named bundle of components.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Effect {
    pub uuid: EffectId,
    /// May be empty; display names then fall back to the item.
    pub name: String,
    pub components: Vec<Component>,
    /// Set on effects that were applied to this actor by someone else.
    pub active_effect: bool,
    pub toggle: Option<EffectToggle>,
    pub parent_item: Option<ItemId>,
}

impl Effect {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: EffectId::new(uuid),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a component, stamping it with this effect as its parent.
    pub fn with_component(mut self, mut component: Component) -> Self {
        component.parent_effect = self.uuid.clone();
        self.components.push(component);
        self
    }

    pub fn is_toggled_on(&self) -> bool {
        self.toggle.is_none_or(|toggle| toggle.active)
    }

    pub fn filters(&self) -> impl Iterator<Item = (&Component, &data::FilterData)> {
        self.components
            .iter()
            .filter_map(|c| c.as_filter().map(|f| (c, f)))
    }

    pub fn has_filter(&self) -> bool {
        self.filters().next().is_some()
    }

    /// The effect's `uses-ability` restriction, if it carries one.
    pub fn uses_ability(&self) -> Option<&data::UsesAbilityData> {
        self.components.iter().find_map(|c| match &c.kind {
            ComponentKind::UsesAbility(data) => Some(data),
            _ => None,
        })
    }

    pub fn scaling(&self) -> Option<&data::ScalingData> {
        self.components.iter().find_map(|c| match &c.kind {
            ComponentKind::Scaling(data) => Some(data),
            _ => None,
        })
    }
}
