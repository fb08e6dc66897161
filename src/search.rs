/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Build-time search for a collision-free keyword hash.
//!
//! Both strategies enumerate candidates in a deterministic order and
//! accept the first one whose hash values are pairwise distinct over
//! the registry, so repeated builds from the same registry yield a
//! bit-identical formula.

use rustc_hash::FxHashSet;

use crate::formula::{
    BitAddress, BitFormula, ModularFormula, BIT_RANGE, FORMULA_BITS,
};
use crate::registry::Registry;

/// Default candidate pool: length bits 0-3 plus the first six bits of
/// the last, second-to-last and first characters. Lowercase ASCII only
/// ever differs in those, so wider pools buy nothing for the usual
/// keyword sets.
pub const DEFAULT_POOL_BITS: usize = 22;

/// Hard pool limit; addresses past this point index bits that are
/// constant across ASCII keywords.
pub const MAX_POOL_BITS: usize = 24;

pub const DEFAULT_MULTIPLIER: u64 = 26;
pub const DEFAULT_ADDEND: u64 = 97;
pub const DEFAULT_MAX_MODULUS: usize = 100;

/// Tunable bounds for both search strategies. The fallback multiplier
/// and addend were picked empirically for the builtin keyword set;
/// re-tune them if a changed set exhausts the modulus range.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Number of candidate bit positions for the bit-selection search.
    pub pool_bits: usize,
    /// Multiplier of the fallback rolling hash.
    pub multiplier: u64,
    /// Additive constant folded into every character.
    pub addend: u64,
    /// Largest modulus the fallback search will try.
    pub max_modulus: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            pool_bits: DEFAULT_POOL_BITS,
            multiplier: DEFAULT_MULTIPLIER,
            addend: DEFAULT_ADDEND,
            max_modulus: DEFAULT_MAX_MODULUS,
        }
    }
}

/// Lexicographic `K`-element combinations of `0..pool`.
struct Combinations<const K: usize> {
    pool: usize,
    next: Option<[usize; K]>,
}

impl<const K: usize> Combinations<K> {
    fn new(pool: usize) -> Self {
        let mut first = [0; K];
        for (i, v) in first.iter_mut().enumerate() {
            *v = i;
        }
        Self {
            pool,
            next: (K <= pool).then_some(first),
        }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<[usize; K]> {
        let current = self.next?;
        let mut succ = current;
        let mut i = K;
        loop {
            if i == 0 {
                self.next = None;
                break;
            }
            i -= 1;
            if succ[i] < self.pool - K + i {
                succ[i] += 1;
                for j in i + 1..K {
                    succ[j] = succ[j - 1] + 1;
                }
                self.next = Some(succ);
                break;
            }
        }
        Some(current)
    }
}

/// Searches for a selection of 5 bit addresses whose assembled hash is
/// unique across the registry. Returns the lexicographically first hit;
/// `None` is a legitimate negative result that triggers the fallback.
pub fn find_bit_formula<K: Copy>(
    registry: &Registry<K>,
    params: &SearchParams,
) -> Option<BitFormula> {
    // more keywords than slots can never be collision-free
    if registry.len() > BIT_RANGE {
        return None;
    }
    let pool = params.pool_bits.min(MAX_POOL_BITS);
    let mut seen = FxHashSet::default();
    for combo in Combinations::<FORMULA_BITS>::new(pool) {
        let formula = BitFormula {
            bits: combo.map(|n| BitAddress(n as u8)),
        };
        if is_collision_free(registry, &mut seen, |w| formula.eval(w)) {
            return Some(formula);
        }
    }
    None
}

/// Searches for the smallest modulus that makes the rolling hash
/// collision-free, keeping the runtime table as compact as possible.
/// `None` means the keyword set cannot be served by this scheme.
pub fn find_modular_formula<K: Copy>(
    registry: &Registry<K>,
    params: &SearchParams,
) -> Option<ModularFormula> {
    let mut seen = FxHashSet::default();
    for modulus in registry.len().max(1)..=params.max_modulus {
        let formula = ModularFormula {
            multiplier: params.multiplier,
            addend: params.addend,
            modulus,
        };
        if is_collision_free(registry, &mut seen, |w| formula.eval(w)) {
            return Some(formula);
        }
    }
    None
}

/// Checks that `hash` maps every keyword to a distinct value, bailing
/// out on the first repeat.
fn is_collision_free<K: Copy>(
    registry: &Registry<K>,
    seen: &mut FxHashSet<usize>,
    hash: impl Fn(&[u8]) -> usize,
) -> bool {
    seen.clear();
    registry.words().all(|w| seen.insert(hash(w.as_bytes())))
}
