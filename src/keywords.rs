/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The builtin keyword set and a process-wide matcher for it.

use std::sync::OnceLock;

use crate::search::SearchParams;
use crate::{build_matcher, Matcher, Registry};

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Cast,
    Continue,
    Defer,
    Else,
    Enum,
    For,
    If,
    Loop,
    Ret,
    Struct,
    Union,
    Using,
    While,
}

/// Keywords in registry order; an entry's position is its index.
pub const KEYWORDS: [(&str, Keyword); 15] = [
    ("break", Keyword::Break),
    ("case", Keyword::Case),
    ("cast", Keyword::Cast),
    ("continue", Keyword::Continue),
    ("defer", Keyword::Defer),
    ("else", Keyword::Else),
    ("enum", Keyword::Enum),
    ("for", Keyword::For),
    ("if", Keyword::If),
    ("loop", Keyword::Loop),
    ("ret", Keyword::Ret),
    ("struct", Keyword::Struct),
    ("union", Keyword::Union),
    ("using", Keyword::Using),
    ("while", Keyword::While),
];

pub fn registry() -> Registry<Keyword> {
    Registry::new(KEYWORDS).expect("builtin keyword set has no duplicates")
}

/// Shared matcher for the builtin set, built on first use. The search
/// over a couple hundred thousand candidates is a one-off cost.
pub fn matcher() -> &'static Matcher<Keyword> {
    static MATCHER: OnceLock<Matcher<Keyword>> = OnceLock::new();
    MATCHER.get_or_init(|| {
        build_matcher(registry(), &SearchParams::default())
            .expect("builtin keyword set admits a perfect hash")
    })
}

/// Classifies an identifier-shaped token against the builtin keywords.
#[inline]
pub fn classify(text: &str) -> Option<Keyword> {
    matcher().classify(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Formula;

    #[test]
    fn every_builtin_keyword_round_trips() {
        for (word, kind) in KEYWORDS {
            assert_eq!(classify(word), Some(kind), "{word} misclassified");
        }
    }

    #[test]
    fn near_misses_are_not_keywords() {
        for text in [
            "", "i", "fi", "ifs", "cas", "casts", "breaks", "continu",
            "continues", "whil", "whilee", "unio", "usin", "structs",
            "identifier", "IF", "If",
        ] {
            assert_eq!(classify(text), None, "{text:?} misclassified");
        }
    }

    #[test]
    fn engineered_collisions_are_rejected() {
        // Same length, first, last and second-to-last characters as a
        // real keyword, different middle: indistinguishable to any bit
        // formula, so these necessarily land on occupied slots and must
        // be thrown out by the exact comparison.
        for (text, twin) in
            [("cuse", "case"), ("uxing", "using"), ("cantinue", "continue")]
        {
            assert_eq!(twin.len(), text.len());
            assert_eq!(classify(text), None, "{text:?} matched {twin:?}");
        }
    }

    #[test]
    fn builtin_set_takes_the_bit_selection_path() {
        match matcher().formula() {
            Formula::Bits(_) => (),
            Formula::Modular(_) => {
                panic!("builtin set should admit a bit selection")
            }
        }
        assert_eq!(matcher().table().len(), 32);
    }
}
