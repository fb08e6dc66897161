/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rustc_hash::FxHashSet;

use crate::BuildError;

/// The closed, ordered set of keywords with their kind tags.
///
/// A keyword's position in the registry is its index, which doubles as
/// the payload stored in the lookup table. The set is fixed at
/// construction and never mutated; the search stages rely on it being
/// duplicate-free, so that is validated here and nowhere else.
#[derive(Debug, Clone)]
pub struct Registry<K> {
    words: Vec<String>,
    kinds: Vec<K>,
}

impl<K: Copy> Registry<K> {
    pub fn new<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, K)>,
    ) -> Result<Self, BuildError> {
        let mut words = Vec::new();
        let mut kinds = Vec::new();
        let mut seen = FxHashSet::default();
        for (word, kind) in entries {
            let word = word.into();
            if !seen.insert(word.clone()) {
                return Err(BuildError::DuplicateKeyword(word));
            }
            words.push(word);
            kinds.push(kind);
        }
        Ok(Self { words, kinds })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    #[inline]
    pub fn kind(&self, idx: usize) -> K {
        self.kinds[idx]
    }

    /// Keywords in registry order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

impl Registry<usize> {
    /// Registry whose kind tags are the keyword indices themselves.
    /// This is what the offline search tool works with, where the kind
    /// is an opaque integer chosen by the consuming tokenizer.
    pub fn from_words<S: Into<String>>(
        words: impl IntoIterator<Item = S>,
    ) -> Result<Self, BuildError> {
        Self::new(words.into_iter().enumerate().map(|(i, w)| (w, i)))
    }
}
