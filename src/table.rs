/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::formula::Formula;
use crate::registry::Registry;
use crate::BuildError;

/// Slot value marking an unoccupied table entry. Distinct from every
/// valid keyword index, which caps the registry at 255 entries.
pub const VACANT: u8 = u8::MAX;

/// Fixed-size slot-to-keyword-index table for a proven formula.
///
/// The keyword set is closed, so the table never resizes; unused slots
/// stay [`VACANT`] for the lifetime of the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    slots: Box<[u8]>,
}

impl HashTable {
    /// Populates a table of the formula's output range and round-trip
    /// checks it before handing it out. A collision or verification
    /// miss here means the formula was never actually proven, which is
    /// a builder bug, not a caller error.
    pub fn build<K: Copy>(
        formula: &Formula,
        registry: &Registry<K>,
    ) -> Result<Self, BuildError> {
        if registry.len() > VACANT as usize {
            return Err(BuildError::TooManyKeywords {
                count: registry.len(),
                max: VACANT as usize,
            });
        }
        let mut slots = vec![VACANT; formula.range()].into_boxed_slice();
        for (idx, word) in registry.words().enumerate() {
            let slot = formula.eval(word.as_bytes());
            if slots[slot] != VACANT {
                return Err(BuildError::Corrupt {
                    word: word.to_owned(),
                    slot,
                });
            }
            slots[slot] = idx as u8;
        }
        let table = Self { slots };
        table.verify(formula, registry)?;
        Ok(table)
    }

    /// Re-derives every keyword's slot and checks it holds the
    /// keyword's index. This runs on every freshly built table; a
    /// silent construction bug would otherwise only show up as a
    /// runtime misclassification.
    pub fn verify<K: Copy>(
        &self,
        formula: &Formula,
        registry: &Registry<K>,
    ) -> Result<(), BuildError> {
        for (idx, word) in registry.words().enumerate() {
            let slot = formula.eval(word.as_bytes());
            if self.slots.get(slot).copied() != Some(idx as u8) {
                return Err(BuildError::Corrupt {
                    word: word.to_owned(),
                    slot,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Keyword index stored at `slot`, or `None` for vacant slots.
    #[inline]
    pub fn slot(&self, slot: usize) -> Option<usize> {
        match self.slots[slot] {
            VACANT => None,
            idx => Some(idx as usize),
        }
    }

    /// Raw slot values, for emitting the table as a constant.
    pub fn slots(&self) -> &[u8] {
        &self.slots
    }
}
