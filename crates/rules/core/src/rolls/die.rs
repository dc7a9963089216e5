use super::modifier::RollMod;
use crate::env::DiceRoller;

/// Upper bound on one die's reroll chain. A reroll threshold above the
/// die's faces would otherwise never terminate.
pub const MAX_REROLLS: usize = 32;

/// Dice a single term or component rolls at most; larger counts are
/// clamped.
pub const MAX_DICE: u32 = 100;

/// One die after rerolls and minimums.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieRoll {
    /// Every natural result, rerolls included, in order.
    pub rolls: Vec<u32>,
    /// The value that counts.
    pub value: u32,
}

/// Rolls one die under a roll modifier.
///
/// A result below `reroll` is rerolled until it is not (this is a
/// threshold, not "reroll once"). The last result is then raised to `min`
/// if it is lower. `max` skips the roll and takes the highest face.
pub fn roll_die<R>(roller: &mut R, faces: u32, roll_mod: &RollMod) -> DieRoll
where
    R: DiceRoller + ?Sized,
{
    if roll_mod.max {
        return DieRoll {
            rolls: vec![faces],
            value: faces,
        };
    }

    let reroll = roll_mod.reroll.max(0) as u32;
    let mut rolls = vec![roller.roll(faces)];
    while let Some(&last) = rolls.last() {
        if last >= reroll || rolls.len() >= MAX_REROLLS {
            break;
        }
        rolls.push(roller.roll(faces));
    }

    let last = rolls.last().copied().unwrap_or(0);
    let min = (roll_mod.min.max(0) as u32).min(faces);
    DieRoll {
        value: last.max(min),
        rolls,
    }
}

/// Rolls `count` plain dice, at most [`MAX_DICE`], and returns each result.
pub fn roll_plain<R>(roller: &mut R, count: u32, faces: u32) -> Vec<u32>
where
    R: DiceRoller + ?Sized,
{
    (0..count.min(MAX_DICE)).map(|_| roller.roll(faces)).collect()
}

/// Sum of die results, saturating at `i32::MAX`.
pub(crate) fn sum_rolls(rolls: &[u32]) -> i32 {
    let sum: u64 = rolls.iter().map(|&r| u64::from(r)).sum();
    i32::try_from(sum).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRoller;

    #[test]
    fn reroll_is_a_threshold() {
        let roll_mod = RollMod {
            reroll: 3,
            ..RollMod::identity()
        };
        let mut roller = ScriptedRoller::new([1, 2, 5]);
        let die = roll_die(&mut roller, 20, &roll_mod);
        assert_eq!(die.rolls, vec![1, 2, 5]);
        assert_eq!(die.value, 5);
    }

    #[test]
    fn minimum_raises_the_final_roll() {
        let roll_mod = RollMod {
            min: 10,
            ..RollMod::identity()
        };
        let mut roller = ScriptedRoller::new([4]);
        assert_eq!(roll_die(&mut roller, 20, &roll_mod).value, 10);
    }

    #[test]
    fn unreachable_reroll_threshold_terminates() {
        let roll_mod = RollMod {
            reroll: 9,
            ..RollMod::identity()
        };
        let mut roller = ScriptedRoller::new([]).with_fallback(2);
        let die = roll_die(&mut roller, 4, &roll_mod);
        assert_eq!(die.rolls.len(), MAX_REROLLS);
    }

    #[test]
    fn max_takes_the_top_face() {
        let roll_mod = RollMod {
            max: true,
            ..RollMod::identity()
        };
        let mut roller = ScriptedRoller::new([]);
        assert_eq!(roll_die(&mut roller, 8, &roll_mod).value, 8);
    }

    #[test]
    fn plain_dice_are_clamped() {
        let mut roller = ScriptedRoller::new([]).with_fallback(1);
        assert_eq!(roll_plain(&mut roller, 2_000_000_000, 6).len(), MAX_DICE as usize);
    }

    #[test]
    fn huge_faces_saturate_the_sum() {
        assert_eq!(sum_rolls(&[u32::MAX, u32::MAX]), i32::MAX);
        assert_eq!(sum_rolls(&[3, 4]), 7);
    }
}
