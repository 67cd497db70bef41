//! Randomness and distance helpers shared by generation and targeting code.

use glam::Vec2;
use rand::{seq::SliceRandom, Rng};

use crate::SCREEN_WIDTH;

/// Draws an integer uniformly from the inclusive range spanned by `a` and `b`.
///
/// The bounds may be supplied in either order.
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, a: i32, b: i32) -> i32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(low..=high)
}

/// Draws a float uniformly from the half-open range spanned by `a` and `b`.
pub fn rand_float<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if low == high {
        return low;
    }
    rng.gen_range(low..high)
}

/// Picks an element uniformly, returning `None` for empty slices.
pub fn rand_item<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Shuffles the slice in place using Fisher-Yates.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}

/// Manhattan distance between two world positions.
#[must_use]
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    (b.x - a.x).abs() + (b.y - a.y).abs()
}

/// Stereo placement of a sound relative to the listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundMix {
    /// Horizontal pan in `-1.0..=1.0`.
    pub pan: f32,
    /// Attenuated volume in `0.0..=1.0`.
    pub volume: f32,
}

impl SoundMix {
    /// Unattenuated, centered mix.
    pub const CENTERED: Self = Self {
        pan: 0.0,
        volume: 1.0,
    };

    /// Computes pan and attenuation for a source heard from `listener`.
    #[must_use]
    pub fn spatial(source: Vec2, listener: Vec2) -> Self {
        let reach = SCREEN_WIDTH / 2.0;
        let pan = ((source.x - listener.x) / reach).clamp(-1.0, 1.0);
        let volume = 1.0 - (manhattan(source, listener) / reach).min(1.0);
        Self { pan, volume }
    }
}
