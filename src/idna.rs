// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! IDNA status resolution and the replacement-string table.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Range, RangeInclusive};

use crate::aggregate::Database;
use crate::apperr::{Error, Result};
use crate::names::{IdnaRawStatus, IdnaStatus};
use crate::superstring::Superstring;

/// Replacements up to this length are stored in the entry itself.
pub const INLINE_LEN: usize = 2;
const OFFSET_LIMIT: usize = 1 << 16;
const LEN_LIMIT: usize = 1 << 8;

/// Resolves the raw table statuses into the runtime statuses.
///
/// Mappings of codepoints that don't end up mapped or deviating are dropped.
pub fn resolve(db: &mut Database, valid_override: u32) -> Result<()> {
    let mut promoted = 0usize;
    let mut demoted = 0usize;

    for cp in 0..db.records.len() as u32 {
        let raw = db.idna_raw[cp as usize];
        let status = if cp == valid_override {
            IdnaStatus::Valid
        } else {
            match raw {
                IdnaRawStatus::Disallowed | IdnaRawStatus::DisallowedStd3Valid => {
                    IdnaStatus::Disallowed
                }
                IdnaRawStatus::Valid => IdnaStatus::Valid,
                IdnaRawStatus::Ignored => IdnaStatus::Ignored,
                IdnaRawStatus::Deviation => IdnaStatus::Deviation,
                IdnaRawStatus::Mapped => {
                    if !db.idna_mappings.contains_key(&cp) {
                        return Err(Error::invariant(cp, "mapped IDNA status without a mapping"));
                    }
                    IdnaStatus::Mapped
                }
                IdnaRawStatus::DisallowedStd3Mapped => {
                    let all_valid = db.idna_mappings.get(&cp).is_some_and(|mapping| {
                        mapping.iter().all(|&c| db.idna_raw[c as usize] == IdnaRawStatus::Valid)
                    });
                    if all_valid {
                        promoted += 1;
                        IdnaStatus::Mapped
                    } else {
                        demoted += 1;
                        IdnaStatus::Disallowed
                    }
                }
            }
        };
        db.records[cp as usize].idna = status;
    }

    let records = &db.records;
    db.idna_mappings.retain(|&cp, _| {
        matches!(records[cp as usize].idna, IdnaStatus::Mapped | IdnaStatus::Deviation)
    });

    tracing::info!(
        target: "ucd",
        promoted,
        demoted,
        mappings = db.idna_mappings.len(),
        "resolved IDNA statuses"
    );
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Inline(Vec<u32>),
    /// A span of [`IdnaTable::superstring`].
    Shared(Range<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdnaEntry {
    pub range: RangeInclusive<u32>,
    pub replacement: Replacement,
}

pub struct IdnaTable {
    pub superstring: Vec<u32>,
    /// Sorted by codepoint, non-overlapping.
    pub entries: Vec<IdnaEntry>,
}

impl IdnaTable {
    pub fn build(mappings: &BTreeMap<u32, Vec<u32>>) -> Result<Self> {
        let runs = coalesce(mappings);

        let long: Vec<Vec<u32>> = runs
            .iter()
            .filter(|(_, mapping)| mapping.len() > INLINE_LEN)
            .map(|(_, mapping)| mapping.to_vec())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let superstring = Superstring::build(&long);
        let spans: BTreeMap<&[u32], Range<usize>> =
            long.iter().map(Vec::as_slice).zip(superstring.spans.iter().cloned()).collect();

        let naive: usize = long.iter().map(Vec::len).sum();
        tracing::info!(
            target: "ucd",
            strings = long.len(),
            naive,
            length = superstring.buffer.len(),
            "built IDNA superstring"
        );

        let mut entries = Vec::with_capacity(runs.len());
        for (range, mapping) in runs {
            let replacement = match spans.get(mapping) {
                Some(span) => {
                    Error::check_capacity("IDNA superstring offset", span.start, OFFSET_LIMIT)?;
                    Error::check_capacity("IDNA replacement length", span.len(), LEN_LIMIT)?;
                    Replacement::Shared(span.clone())
                }
                None => Replacement::Inline(mapping.to_vec()),
            };
            entries.push(IdnaEntry { range, replacement });
        }

        Ok(Self { superstring: superstring.buffer, entries })
    }

    /// Reference lookup, mirroring the emitted `idna_mapping`.
    pub fn lookup(&self, cp: u32) -> Option<&[u32]> {
        let index = self
            .entries
            .binary_search_by(|entry| {
                if *entry.range.end() < cp {
                    std::cmp::Ordering::Less
                } else if *entry.range.start() > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()?;
        Some(match &self.entries[index].replacement {
            Replacement::Inline(codepoints) => codepoints,
            Replacement::Shared(span) => &self.superstring[span.clone()],
        })
    }
}

/// Merges consecutive codepoints with identical mappings into ranges.
fn coalesce(mappings: &BTreeMap<u32, Vec<u32>>) -> Vec<(RangeInclusive<u32>, &[u32])> {
    let mut runs: Vec<(RangeInclusive<u32>, &[u32])> = Vec::new();
    for (&cp, mapping) in mappings {
        if let Some((range, last)) = runs.last_mut() {
            if *range.end() + 1 == cp && *last == mapping.as_slice() {
                *range = *range.start()..=cp;
                continue;
            }
        }
        runs.push((cp..=cp, mapping.as_slice()));
    }
    runs
}
