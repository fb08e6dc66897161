/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Perfect-hash keyword classification for tokenizers.
//!
//! A closed set of keywords is compiled ahead of time into a small
//! collision-free hash formula plus a fixed-size lookup table, so that
//! the tokenizer can decide "this exact keyword or not a keyword" in
//! O(1) without a chain of string comparisons.
//!
//! Two search strategies run at build time. The preferred one picks 5
//! discriminating bit positions out of each keyword's length and edge
//! characters, which costs nothing but bit extraction at run time. If
//! no such selection separates the set, a polynomial rolling hash with
//! a searched modulus takes over. Either way the result is a
//! [`Formula`] and a verified [`HashTable`], sealed into a [`Matcher`].

pub mod formula;
pub mod keywords;
pub mod matcher;
pub mod registry;
pub mod search;
pub mod table;

use thiserror::Error;

pub use formula::{BitAddress, BitFormula, Formula, ModularFormula};
pub use matcher::Matcher;
pub use registry::Registry;
pub use search::{find_bit_formula, find_modular_formula, SearchParams};
pub use table::HashTable;

/// Failures of registry construction and table building.
///
/// A search strategy coming up empty-handed is not an error by itself;
/// only exhausting both strategies surfaces as [`Self::Unresolvable`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("duplicate keyword {0:?} in registry")]
    DuplicateKeyword(String),
    #[error("registry holds {count} keywords, at most {max} are supported")]
    TooManyKeywords { count: usize, max: usize },
    #[error(
        "no collision-free formula for {count} keywords \
         (searched {pool} bit positions and moduli up to {max_modulus})"
    )]
    Unresolvable {
        count: usize,
        pool: usize,
        max_modulus: usize,
    },
    #[error("keyword {word:?} does not round-trip through slot {slot}")]
    Corrupt { word: String, slot: usize },
}

/// Searches for a collision-free formula over `registry` and builds the
/// verified lookup table.
///
/// Bit selection is tried first: its 32-entry table needs no arithmetic
/// at run time beyond bit extraction, while the modular fallback pays a
/// multiply-accumulate per character. The table is exhaustively
/// round-trip checked before the matcher is handed out.
pub fn build_matcher<K: Copy>(
    registry: Registry<K>,
    params: &SearchParams,
) -> Result<Matcher<K>, BuildError> {
    let formula = find_bit_formula(&registry, params)
        .map(Formula::Bits)
        .or_else(|| {
            find_modular_formula(&registry, params).map(Formula::Modular)
        })
        .ok_or(BuildError::Unresolvable {
            count: registry.len(),
            pool: params.pool_bits,
            max_modulus: params.max_modulus,
        })?;
    let table = HashTable::build(&formula, &registry)?;
    Ok(Matcher::new(registry, formula, table))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::formula::BIT_RANGE;

    fn fixture(words: &[&str]) -> Registry<usize> {
        Registry::from_words(words.iter().copied()).unwrap()
    }

    #[test]
    fn prefers_bit_selection_when_both_succeed() {
        // All lengths distinct, so the very first combination of length
        // bits already separates the set. The modular search would also
        // succeed (modulus 5), but must not be chosen.
        let reg = fixture(&["if", "for", "while", "struct", "enum"]);
        let params = SearchParams::default();

        let modular = find_modular_formula(&reg, &params).unwrap();
        assert_eq!(modular.modulus, 5);

        let m = build_matcher(reg, &params).unwrap();
        match m.formula() {
            Formula::Bits(b) => {
                let addrs: Vec<u8> = b.bits.iter().map(|a| a.0).collect();
                assert_eq!(addrs, [0, 1, 2, 3, 4]);
            }
            Formula::Modular(_) => panic!("expected bit-selection formula"),
        }
        assert_eq!(m.table().len(), BIT_RANGE);
    }

    #[test]
    fn classify_spec_scenario() {
        let reg = fixture(&["if", "for", "while", "struct", "enum"]);
        let m = build_matcher(reg, &SearchParams::default()).unwrap();
        assert_eq!(m.classify("if"), Some(0));
        assert_eq!(m.classify("struct"), Some(3));
        assert_eq!(m.classify("fi"), None);
        assert_eq!(m.classify("ifs"), None);
        assert_eq!(m.classify(""), None);
        assert_eq!(m.classify("identifier"), None);
    }

    #[test]
    fn falls_back_to_modular() {
        // The two words agree on length and on first, last and
        // second-to-last characters, so no bit selection can tell them
        // apart. Their rolling hashes differ by 2 * 26^2 = 1352, which
        // collides mod 2 but not mod 3.
        let reg = fixture(&["axya", "azya"]);
        let m = build_matcher(reg, &SearchParams::default()).unwrap();
        match m.formula() {
            Formula::Modular(f) => assert_eq!(f.modulus, 3),
            Formula::Bits(_) => panic!("expected modular fallback"),
        }
        assert_eq!(m.table().len(), 3);
        assert_eq!(m.classify("axya"), Some(0));
        assert_eq!(m.classify("azya"), Some(1));
        assert_eq!(m.classify("ayya"), None);
    }

    #[test]
    fn unresolvable_set_is_a_hard_error() {
        let reg = fixture(&["axya", "azya"]);
        let params = SearchParams {
            max_modulus: 2,
            ..SearchParams::default()
        };
        match build_matcher(reg, &params) {
            Err(BuildError::Unresolvable { count, .. }) => {
                assert_eq!(count, 2)
            }
            other => panic!("expected Unresolvable, got {other:?}"),
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let params = SearchParams::default();
        let a =
            build_matcher(fixture(&["if", "for", "while"]), &params).unwrap();
        let b =
            build_matcher(fixture(&["if", "for", "while"]), &params).unwrap();
        assert_eq!(a.formula(), b.formula());
        assert_eq!(a.table(), b.table());
    }
}
