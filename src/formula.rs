/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Hash formula representations shared by the build-time search and the
//! runtime matcher. Whatever the search proves collision-free, the
//! matcher must reproduce bit-for-bit; keeping both sides on the same
//! [`Formula`] value is what guarantees that.

use std::fmt;

/// Number of bit positions a [`BitFormula`] selects.
pub const FORMULA_BITS: usize = 5;

/// Output range of a [`BitFormula`]: 5 selected bits assemble into a
/// value in `0..32`.
pub const BIT_RANGE: usize = 1 << FORMULA_BITS;

/// A position in the composite bit space of a word.
///
/// Addresses 0-3 select bits of the word's length, 4-9 bits of its
/// last character, 10-15 bits of its second-to-last character, and 16
/// and up bits of its first character. This flattening lets the search
/// treat "pick a discriminating feature" uniformly as "pick a bit
/// index".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitAddress(pub u8);

impl BitAddress {
    /// Extracts the addressed bit from `word`. Addresses that reach
    /// past the end of a short word read as zero, so extraction is
    /// total over arbitrary input strings.
    #[inline]
    pub fn extract(self, word: &[u8]) -> u32 {
        let n = self.0 as u32;
        match n {
            0..=3 => (word.len() as u32 >> n) & 1,
            4..=9 => match word.last() {
                Some(&b) => (b as u32 >> (n - 4)) & 1,
                None => 0,
            },
            10..=15 => {
                if word.len() < 2 {
                    0
                } else {
                    (word[word.len() - 2] as u32 >> (n - 10)) & 1
                }
            }
            _ => match word.first() {
                Some(&b) => (b as u32 >> (n - 16)) & 1,
                None => 0,
            },
        }
    }
}

impl fmt::Display for BitAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        match n {
            0..=3 => write!(f, "len[{n}]"),
            4..=9 => write!(f, "last[{}]", n - 4),
            10..=15 => write!(f, "prev[{}]", n - 10),
            _ => write!(f, "first[{}]", n - 16),
        }
    }
}

/// An ordered selection of 5 distinct bit addresses. Evaluating it on a
/// word assembles hash bit `p` from the `p`-th address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFormula {
    pub bits: [BitAddress; FORMULA_BITS],
}

impl BitFormula {
    #[inline]
    pub fn eval(&self, word: &[u8]) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |h, (p, a)| h | (a.extract(word) as usize) << p)
    }
}

/// Polynomial rolling hash with a searched modulus, the fallback when
/// no bit selection separates the keyword set. Multiplier and additive
/// constant are tuning parameters of the search, not fixed magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModularFormula {
    pub multiplier: u64,
    pub addend: u64,
    pub modulus: usize,
}

impl ModularFormula {
    #[inline]
    pub fn eval(&self, word: &[u8]) -> usize {
        let mut h = 0u64;
        for &b in word {
            h = h
                .wrapping_mul(self.multiplier)
                .wrapping_add(b as u64 + self.addend);
        }
        (h % self.modulus as u64) as usize
    }
}

/// The artifact the build phase hands to the runtime matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Bits(BitFormula),
    Modular(ModularFormula),
}

impl Formula {
    /// Size of the lookup table this formula indexes into.
    pub fn range(&self) -> usize {
        match self {
            Formula::Bits(_) => BIT_RANGE,
            Formula::Modular(m) => m.modulus,
        }
    }

    #[inline]
    pub fn eval(&self, word: &[u8]) -> usize {
        match self {
            Formula::Bits(b) => b.eval(word),
            Formula::Modular(m) => m.eval(word),
        }
    }
}
