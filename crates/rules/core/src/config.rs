/// Ruleset constants and tunable parameters.
///
/// Every field has a standard value; hosts only override what their table
/// plays differently.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Natural roll at or above which a d20 is a critical.
    pub crit: u32,
    /// Natural roll at or below which a d20 is a fumble.
    pub fumble: u32,
    /// Base of a formula-calculated save DC.
    pub save_dc_base: i32,
    /// AC of an actor wearing no armour, before the dex modifier.
    pub unarmoured_ac: i32,
    pub heavy_armour_penalty: i32,
    pub encumbered_penalty: i32,
    pub heavily_encumbered_penalty: i32,
    /// Base of a passive score.
    pub passive_base: i32,
    /// Added to a passive score per step of advantage (subtracted on disadvantage).
    pub passive_adv_shift: i32,
}

impl RulesConfig {
    // ===== dice =====
    pub const D20: u32 = 20;
    pub const MAX_EXTRA_D20: usize = 8;

    // ===== standard values =====
    pub const DEFAULT_CRIT: u32 = 20;
    pub const DEFAULT_FUMBLE: u32 = 1;
    pub const DEFAULT_SAVE_DC_BASE: i32 = 8;
    pub const DEFAULT_UNARMOURED_AC: i32 = 10;
    pub const DEFAULT_HEAVY_ARMOUR_PENALTY: i32 = 10;
    pub const DEFAULT_ENCUMBERED_PENALTY: i32 = 10;
    pub const DEFAULT_HEAVILY_ENCUMBERED_PENALTY: i32 = 20;
    pub const DEFAULT_PASSIVE_BASE: i32 = 10;
    pub const DEFAULT_PASSIVE_ADV_SHIFT: i32 = 5;

    pub const fn new() -> Self {
        Self {
            crit: Self::DEFAULT_CRIT,
            fumble: Self::DEFAULT_FUMBLE,
            save_dc_base: Self::DEFAULT_SAVE_DC_BASE,
            unarmoured_ac: Self::DEFAULT_UNARMOURED_AC,
            heavy_armour_penalty: Self::DEFAULT_HEAVY_ARMOUR_PENALTY,
            encumbered_penalty: Self::DEFAULT_ENCUMBERED_PENALTY,
            heavily_encumbered_penalty: Self::DEFAULT_HEAVILY_ENCUMBERED_PENALTY,
            passive_base: Self::DEFAULT_PASSIVE_BASE,
            passive_adv_shift: Self::DEFAULT_PASSIVE_ADV_SHIFT,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard ruleset values, for callers that do not load a config.
pub static STANDARD_CONFIG: RulesConfig = RulesConfig::new();
