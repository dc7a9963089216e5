use super::data::*;
use crate::model::{ComponentId, EffectId};
use crate::schema::ComponentType;

/// One typed rule fragment inside an [`Effect`](super::Effect).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Component {
    pub uuid: ComponentId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_effect: EffectId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(uuid: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            uuid: ComponentId::new(uuid),
            parent_effect: EffectId::default(),
            kind,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn as_bonus(&self) -> Option<&BonusData> {
        match &self.kind {
            ComponentKind::Bonus(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterData> {
        match &self.kind {
            ComponentKind::Filter(data) => Some(data),
            _ => None,
        }
    }
}

/// Component payload, discriminated by the persisted `type` field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum ComponentKind {
    Applied(AppliedData),
    Attack(AttackData),
    Bonus(BonusData),
    Check(CheckData),
    Condition(ConditionData),
    Consume(ConsumeData),
    Damage(DamageData),
    Defense(DefenseData),
    Description(DescriptionData),
    Duration(DurationData),
    Expression(ExpressionData),
    ExtraCrit(ExtraCritData),
    Filter(FilterData),
    Multiplier(MultiplierData),
    Produce(ProduceData),
    Resource(ResourceData),
    RollMod(RollModData),
    RollTable(RollTableData),
    Save(SaveData),
    Scaling(ScalingData),
    Setter(Setter),
    Spells(SpellsData),
    Summon(SummonData),
    Target(TargetData),
    UsesAbility(UsesAbilityData),
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Applied(_) => ComponentType::Applied,
            Self::Attack(_) => ComponentType::Attack,
            Self::Bonus(_) => ComponentType::Bonus,
            Self::Check(_) => ComponentType::Check,
            Self::Condition(_) => ComponentType::Condition,
            Self::Consume(_) => ComponentType::Consume,
            Self::Damage(_) => ComponentType::Damage,
            Self::Defense(_) => ComponentType::Defense,
            Self::Description(_) => ComponentType::Description,
            Self::Duration(_) => ComponentType::Duration,
            Self::Expression(_) => ComponentType::Expression,
            Self::ExtraCrit(_) => ComponentType::ExtraCrit,
            Self::Filter(_) => ComponentType::Filter,
            Self::Multiplier(_) => ComponentType::Multiplier,
            Self::Produce(_) => ComponentType::Produce,
            Self::Resource(_) => ComponentType::Resource,
            Self::RollMod(_) => ComponentType::RollMod,
            Self::RollTable(_) => ComponentType::RollTable,
            Self::Save(_) => ComponentType::Save,
            Self::Scaling(_) => ComponentType::Scaling,
            Self::Setter(_) => ComponentType::Setter,
            Self::Spells(_) => ComponentType::Spells,
            Self::Summon(_) => ComponentType::Summon,
            Self::Target(_) => ComponentType::Target,
            Self::UsesAbility(_) => ComponentType::UsesAbility,
        }
    }

    /// Schema default payload for a component type.
    pub fn default_for(kind: ComponentType) -> Self {
        match kind {
            ComponentType::Applied => Self::Applied(AppliedData::default()),
            ComponentType::Attack => Self::Attack(AttackData::default()),
            ComponentType::Bonus => Self::Bonus(BonusData::default()),
            ComponentType::Check => Self::Check(CheckData::default()),
            ComponentType::Condition => Self::Condition(ConditionData::default()),
            ComponentType::Consume => Self::Consume(ConsumeData::default()),
            ComponentType::Damage => Self::Damage(DamageData::default()),
            ComponentType::Defense => Self::Defense(DefenseData::default()),
            ComponentType::Description => Self::Description(DescriptionData::default()),
            ComponentType::Duration => Self::Duration(DurationData::default()),
            ComponentType::Expression => Self::Expression(ExpressionData::default()),
            ComponentType::ExtraCrit => Self::ExtraCrit(ExtraCritData::default()),
            ComponentType::Filter => Self::Filter(FilterData::default()),
            ComponentType::Multiplier => Self::Multiplier(MultiplierData::default()),
            ComponentType::Produce => Self::Produce(ProduceData::default()),
            ComponentType::Resource => Self::Resource(ResourceData::default()),
            ComponentType::RollMod => Self::RollMod(RollModData::default()),
            ComponentType::RollTable => Self::RollTable(RollTableData::default()),
            ComponentType::Save => Self::Save(SaveData::default()),
            ComponentType::Scaling => Self::Scaling(ScalingData::default()),
            ComponentType::Setter => Self::Setter(Setter::default()),
            ComponentType::Spells => Self::Spells(SpellsData::default()),
            ComponentType::Summon => Self::Summon(SummonData::default()),
            ComponentType::Target => Self::Target(TargetData::default()),
            ComponentType::UsesAbility => Self::UsesAbility(UsesAbilityData::default()),
        }
    }
}
