//! Ranking functions from piece vectors to dense table indices.

use super::{CORNERS, EDGES};

pub const CORNER_ORIENTATIONS: usize = 2187; // 3^7
pub const EDGE_ORIENTATIONS: usize = 2048; // 2^11
pub const CORNER_POSITIONS: usize = 40320; // 8!
pub const EDGE_SUBSET: usize = 6;
pub const EDGE_SUBSET_POSITIONS: usize = 665280; // 12! / 6!

/// Base-3 number formed by the first seven twists; the last twist follows
/// from the others.
pub fn corner_orientation(co: &[u8; CORNERS]) -> usize {
    co[..CORNERS - 1]
        .iter()
        .fold(0, |v, &twist| v * 3 + twist as usize)
}

/// Base-2 number formed by the first eleven flips.
pub fn edge_orientation(eo: &[u8; EDGES]) -> usize {
    eo[..EDGES - 1]
        .iter()
        .fold(0, |v, &flip| v * 2 + flip as usize)
}

/// Lehmer code of the corner permutation.
pub fn corner_position(cp: &[u8; CORNERS]) -> usize {
    (0..CORNERS - 1)
        .map(|i| {
            let smaller_after = cp[i + 1..].iter().filter(|&&c| c < cp[i]).count();
            smaller_after * factorial(CORNERS - 1 - i)
        })
        .sum()
}

/// Rank of six distinguishable edges placed among the twelve edge slots.
pub fn edge_subset_index(slots: &[u8; EDGE_SUBSET]) -> usize {
    partial_permutation_rank(slots, EDGES)
}

/// Ranks an ordered placement of `slots.len()` pieces into `n` slots.
///
/// Each piece contributes the number of still-free slots below the one it
/// occupies, weighted by the placements available to the pieces after it.
/// Result is in `0..falling_factorial(n, slots.len())`.
pub fn partial_permutation_rank(slots: &[u8], n: usize) -> usize {
    debug_assert!(n <= 32);
    let mut used: u32 = 0;
    slots.iter().enumerate().fold(0, |rank, (k, &slot)| {
        let below = (1u32 << slot) - 1;
        let free_below = (below & !used).count_ones() as usize;
        used |= 1 << slot;
        rank * (n - k) + free_below
    })
}

pub fn factorial(n: usize) -> usize {
    match n {
        0 | 1 => 1,
        n => n * factorial(n - 1),
    }
}

/// `n * (n - 1) * ... * (n - k + 1)`
pub fn falling_factorial(n: usize, k: usize) -> usize {
    (n - k + 1..=n).product()
}
