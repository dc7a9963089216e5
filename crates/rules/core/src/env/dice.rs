//! Dice sources.
//!
//! Rolling is the only non-deterministic step of the engine. Everything that
//! rolls takes a `&mut R` where `R: DiceRoller + ?Sized`, so tests and
//! replays can script the results.

use std::collections::VecDeque;

pub trait DiceRoller {
    /// Rolls one die, returning a value in `1..=faces`.
    fn roll(&mut self, faces: u32) -> u32;
}

/// Seeded PCG-XSH-RR generator.
///
/// Same seed, same sequence.
#[derive(Clone, Copy, Debug)]
pub struct PcgRoller {
    state: u64,
}

impl PcgRoller {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// `state' = state × multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        let out = Self::pcg_output(self.state);
        self.state = Self::pcg_step(self.state);
        out
    }
}

impl DiceRoller for PcgRoller {
    fn roll(&mut self, faces: u32) -> u32 {
        if faces == 0 {
            return 0;
        }
        self.next_u32() % faces + 1
    }
}

/// Replays a fixed list of results, then keeps returning `fallback`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRoller {
    queue: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRoller {
    pub fn new(results: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: results.into_iter().collect(),
            fallback: 1,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll(&mut self, faces: u32) -> u32 {
        self.queue
            .pop_front()
            .unwrap_or(self.fallback)
            .min(faces.max(1))
    }
}
