/// Damage types understood by damage components, defenses and filters.
///
/// Persisted as the short codes used by the sheet (`"fir"`, `"slh"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    #[strum(serialize = "blg")]
    #[cfg_attr(feature = "serde", serde(rename = "blg"))]
    Bludgeoning,
    #[strum(serialize = "prc")]
    #[cfg_attr(feature = "serde", serde(rename = "prc"))]
    Piercing,
    #[strum(serialize = "slh")]
    #[cfg_attr(feature = "serde", serde(rename = "slh"))]
    Slashing,
    #[strum(serialize = "acd")]
    #[cfg_attr(feature = "serde", serde(rename = "acd"))]
    Acid,
    #[strum(serialize = "cld")]
    #[cfg_attr(feature = "serde", serde(rename = "cld"))]
    Cold,
    #[strum(serialize = "fir")]
    #[cfg_attr(feature = "serde", serde(rename = "fir"))]
    Fire,
    #[strum(serialize = "frc")]
    #[cfg_attr(feature = "serde", serde(rename = "frc"))]
    Force,
    #[strum(serialize = "lig")]
    #[cfg_attr(feature = "serde", serde(rename = "lig"))]
    Lightning,
    #[strum(serialize = "ncr")]
    #[cfg_attr(feature = "serde", serde(rename = "ncr"))]
    Necrotic,
    #[strum(serialize = "psn")]
    #[cfg_attr(feature = "serde", serde(rename = "psn"))]
    Poison,
    #[strum(serialize = "psy")]
    #[cfg_attr(feature = "serde", serde(rename = "psy"))]
    Psychic,
    #[strum(serialize = "rad")]
    #[cfg_attr(feature = "serde", serde(rename = "rad"))]
    Radiant,
    #[strum(serialize = "thn")]
    #[cfg_attr(feature = "serde", serde(rename = "thn"))]
    Thunder,
    /// Healing is modelled as a damage type so heals share the damage pipeline.
    #[strum(serialize = "hlg")]
    #[cfg_attr(feature = "serde", serde(rename = "hlg"))]
    Healing,
}

impl DamageType {
    pub fn is_healing(self) -> bool {
        matches!(self, DamageType::Healing)
    }

    pub fn name_key(self) -> String {
        format!("RULES.Damage.{}", self.as_ref())
    }
}
