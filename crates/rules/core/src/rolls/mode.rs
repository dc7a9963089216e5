/// Advantage state of a d20 roll.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RollMode {
    #[default]
    Reg,
    Adv,
    Dis,
}

impl RollMode {
    /// +1 for advantage, -1 for disadvantage, 0 otherwise.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Reg => 0,
            Self::Adv => 1,
            Self::Dis => -1,
        }
    }
}

/// Reduces any number of mode inputs to one effective mode.
///
/// Advantage and disadvantage cancel out regardless of how many sources
/// grant each.
///
/// # Examples
///
/// ```
/// use rules_core::rolls::{RollMode, determine_advantage};
///
/// assert_eq!(determine_advantage([RollMode::Adv, RollMode::Reg]), RollMode::Adv);
/// assert_eq!(determine_advantage([RollMode::Adv, RollMode::Dis, RollMode::Adv]), RollMode::Reg);
/// assert_eq!(determine_advantage([]), RollMode::Reg);
/// ```
pub fn determine_advantage<I>(modes: I) -> RollMode
where
    I: IntoIterator<Item = RollMode>,
{
    let (adv, dis) = modes
        .into_iter()
        .fold((false, false), |(adv, dis), mode| match mode {
            RollMode::Adv => (true, dis),
            RollMode::Dis => (adv, true),
            RollMode::Reg => (adv, dis),
        });

    match (adv, dis) {
        (true, false) => RollMode::Adv,
        (false, true) => RollMode::Dis,
        _ => RollMode::Reg,
    }
}
