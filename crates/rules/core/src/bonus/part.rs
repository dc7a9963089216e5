use crate::model::DamageType;

/// `ndice`d`die`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    pub ndice: i32,
    pub die: u32,
}

impl Dice {
    pub fn new(ndice: i32, die: u32) -> Self {
        Self { ndice, die }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.ndice, self.die)
    }
}

/// One resolved contribution to a score or roll.
///
/// Modifiers stay fractional until a call site sums and floors them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    pub modifier: f64,
    pub name: String,
    pub dice: Option<Dice>,
    /// Proficiency multiplier, present on proficiency parts only.
    pub proficiency: Option<f64>,
    pub damage: Option<DamageType>,
    /// The flat bonus of a damage component; rescaled by linear scaling.
    pub constant: bool,
}

impl Part {
    pub fn flat(modifier: impl Into<f64>, name: impl Into<String>) -> Self {
        Self {
            modifier: modifier.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn proficiency(modifier: impl Into<f64>, value: f64, name: impl Into<String>) -> Self {
        Self {
            proficiency: Some(value),
            ..Self::flat(modifier, name)
        }
    }

    pub fn is_proficiency(&self) -> bool {
        self.proficiency.is_some()
    }
}

/// Floored sum of the parts' flat modifiers.
pub fn total(parts: &[Part]) -> i32 {
    parts.iter().map(|p| p.modifier).sum::<f64>().floor() as i32
}

/// Keeps one proficiency part: the first to reach the highest modifier.
///
/// Several sources granting proficiency to the same roll do not stack.
pub fn highest_proficiency(parts: Vec<Part>) -> Vec<Part> {
    let highest = parts
        .iter()
        .filter(|p| p.is_proficiency())
        .map(|p| p.modifier)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut kept = false;
    parts
        .into_iter()
        .filter(|part| {
            if !part.is_proficiency() {
                return true;
            }
            if !kept && part.modifier >= highest {
                kept = true;
                return true;
            }
            false
        })
        .collect()
}
