/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::formula::Formula;
use crate::registry::Registry;
use crate::table::HashTable;

/// Runtime keyword classifier: a sealed formula, table and registry.
///
/// Everything in here is immutable after construction, so a matcher can
/// be shared freely across tokenization threads.
#[derive(Debug, Clone)]
pub struct Matcher<K> {
    registry: Registry<K>,
    formula: Formula,
    table: HashTable,
    min_len: usize,
    max_len: usize,
}

impl<K: Copy> Matcher<K> {
    pub(crate) fn new(
        registry: Registry<K>,
        formula: Formula,
        table: HashTable,
    ) -> Self {
        let min_len =
            registry.words().map(str::len).min().unwrap_or(usize::MAX);
        let max_len = registry.words().map(str::len).max().unwrap_or(0);
        Self {
            registry,
            formula,
            table,
            min_len,
            max_len,
        }
    }

    /// Classifies `text` as one of the registry's keywords, or `None`.
    ///
    /// The hash is collision-free over registry members only, not over
    /// arbitrary input, so a slot hit is confirmed by an exact byte
    /// comparison before the keyword's kind is reported.
    #[inline]
    pub fn classify(&self, text: &str) -> Option<K> {
        let bytes = text.as_bytes();
        // no keyword shares this length, skip hashing entirely
        if bytes.len() < self.min_len || bytes.len() > self.max_len {
            return None;
        }
        let idx = self.table.slot(self.formula.eval(bytes))?;
        (self.registry.word(idx).as_bytes() == bytes)
            .then(|| self.registry.kind(idx))
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn table(&self) -> &HashTable {
        &self.table
    }

    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }
}

#[cfg(test)]
mod test {
    use crate::search::SearchParams;
    use crate::{build_matcher, Registry};

    #[test]
    fn length_precheck_short_circuits() {
        let reg = Registry::from_words(["for", "while"]).unwrap();
        let m = build_matcher(reg, &SearchParams::default()).unwrap();
        assert_eq!(m.classify(""), None);
        assert_eq!(m.classify("fo"), None);
        assert_eq!(m.classify("whiles"), None);
        assert_eq!(m.classify("for"), Some(0));
        assert_eq!(m.classify("while"), Some(1));
    }

    #[test]
    fn slot_hit_still_requires_exact_match() {
        // "whole" shares length, first, last and second-to-last bytes
        // with "while"; every bit formula hashes the two identically,
        // so only the exact comparison keeps it out.
        let reg = Registry::from_words(["for", "while"]).unwrap();
        let m = build_matcher(reg, &SearchParams::default()).unwrap();
        assert_eq!(m.classify("whole"), None);
        assert_eq!(m.classify("fur"), None);
    }

    #[test]
    fn non_ascii_input_is_rejected_without_panicking() {
        let reg = Registry::from_words(["for", "while"]).unwrap();
        let m = build_matcher(reg, &SearchParams::default()).unwrap();
        assert_eq!(m.classify("weiß?"), None);
        assert_eq!(m.classify("näh"), None);
    }
}
