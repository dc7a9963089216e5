//! Static component schema: default payloads and classification metadata.
//!
//! The set of component types is closed. Looking up anything else is a
//! programmer error and the only failure this module reports.

use std::str::FromStr;

use crate::effect::{Component, ComponentKind};
use crate::error::SchemaError;
use crate::model::{ComponentId, EffectId};

/// Discriminant of every component type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum ComponentType {
    Applied,
    Attack,
    Bonus,
    Check,
    Condition,
    Consume,
    Damage,
    Defense,
    Description,
    Duration,
    Expression,
    ExtraCrit,
    Filter,
    Multiplier,
    Produce,
    Resource,
    RollMod,
    RollTable,
    Save,
    Scaling,
    Setter,
    Spells,
    Summon,
    Target,
    UsesAbility,
}

/// UI grouping of component types. Addons (`extra-crit`, `uses-ability`)
/// have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Special,
    Rolls,
    Resources,
    Modifiers,
}

impl ComponentType {
    pub fn category(self) -> Option<Category> {
        use ComponentType::*;
        match self {
            Applied | Condition | Description | Duration | Scaling | Spells | Summon | Target => {
                Some(Category::Special)
            }
            Attack | Check | Damage | Expression | RollTable | Save => Some(Category::Rolls),
            Consume | Produce | Resource => Some(Category::Resources),
            Bonus | Defense | Filter | Multiplier | RollMod | Setter => Some(Category::Modifiers),
            ExtraCrit | UsesAbility => None,
        }
    }

    /// Contributes to the owner's statistics on its own, without being rolled.
    pub fn is_active(self) -> bool {
        use ComponentType::*;
        matches!(
            self,
            RollMod | Bonus | Defense | Setter | Multiplier | Condition
        )
    }

    /// References another effect instead of contributing directly.
    pub fn is_linked(self) -> bool {
        matches!(self, Self::Applied | Self::Scaling)
    }

    /// At most one per effect.
    pub fn is_single(self) -> bool {
        use ComponentType::*;
        matches!(self, Applied | Scaling | Duration | Target)
    }

    /// Produces output when its effect is rolled.
    pub fn is_rollable(self) -> bool {
        use ComponentType::*;
        matches!(
            self,
            Damage | Save | Target | Duration | Expression | Consume | Produce | Description
                | RollTable
        )
    }

    pub fn schema(self) -> ComponentSchema {
        ComponentSchema {
            component_type: self,
            default_data: ComponentKind::default_for(self),
            category: self.category(),
            is_active: self.is_active(),
            is_linked: self.is_linked(),
            is_single: self.is_single(),
            is_rollable: self.is_rollable(),
        }
    }
}

/// Everything the schema knows about one component type.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSchema {
    pub component_type: ComponentType,
    pub default_data: ComponentKind,
    pub category: Option<Category>,
    pub is_active: bool,
    pub is_linked: bool,
    pub is_single: bool,
    pub is_rollable: bool,
}

/// Looks up the schema for a persisted `type` discriminant.
pub fn schema_for(type_name: &str) -> Result<ComponentSchema, SchemaError> {
    parse_type(type_name).map(ComponentType::schema)
}

pub fn parse_type(type_name: &str) -> Result<ComponentType, SchemaError> {
    ComponentType::from_str(type_name)
        .map_err(|_| SchemaError::UnknownComponentType(type_name.to_owned()))
}

/// Instantiates a component of the given type with schema defaults and a
/// fresh id.
pub fn create_component(type_name: &str, parent: &EffectId) -> Result<Component, SchemaError> {
    let kind = parse_type(type_name)?;
    Ok(Component {
        uuid: ComponentId::generate(),
        parent_effect: parent.clone(),
        kind: ComponentKind::default_for(kind),
    })
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::effect::data::{CalcMode, DamageData};

    #[test]
    fn every_type_round_trips_through_its_default() {
        for kind in ComponentType::iter() {
            let schema = schema_for(kind.as_ref()).unwrap();
            assert_eq!(schema.default_data.component_type(), kind);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            schema_for("aura"),
            Err(SchemaError::UnknownComponentType("aura".into()))
        );
    }

    #[test]
    fn classification() {
        let bonus = schema_for("bonus").unwrap();
        assert!(bonus.is_active);
        assert_eq!(bonus.category, Some(Category::Modifiers));

        let scaling = schema_for("scaling").unwrap();
        assert!(scaling.is_linked && scaling.is_single);
        assert!(!scaling.is_active);

        assert_eq!(schema_for("extra-crit").unwrap().category, None);
        assert!(schema_for("roll-table").unwrap().is_rollable);
        assert!(!schema_for("attack").unwrap().is_rollable);
    }

    #[test]
    fn created_damage_uses_schema_defaults() {
        let parent = EffectId::new("e1");
        let component = create_component("damage", &parent).unwrap();
        assert_eq!(component.parent_effect, parent);
        assert!(!component.uuid.is_empty());
        assert_eq!(
            component.kind,
            ComponentKind::Damage(DamageData {
                calc: CalcMode::Formula,
                ndice: 1,
                die: 4,
                ..DamageData::default()
            })
        );
    }
}
