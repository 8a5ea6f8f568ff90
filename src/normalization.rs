// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decomposition and composition tables.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::aggregate::Database;
use crate::apperr::{Error, Result};
use crate::interner::Interner;
use crate::names::DecompositionTag;
use crate::record::Decomposition;
use crate::trie::CODEPOINT_COUNT;

const OFFSET_LIMIT: usize = 1 << 16;
const LEN_LIMIT: usize = 1 << 8;

/// An entry of NormalizationCorrections.txt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub codepoint: u32,
    pub original: Vec<u32>,
    pub corrected: Vec<u32>,
    pub version: String,
}

/// Every decomposition laid out in one array.
///
/// An entry is a header word `tag << 8 | len` followed by `len` codepoints.
/// Offset 0 holds a sentinel so that 0 can mean "no decomposition".
pub struct DecompositionTable {
    /// The trie values.
    pub offsets: Vec<u32>,
    pub data: Vec<u32>,
    pub entries: usize,
}

impl DecompositionTable {
    pub fn build(decompositions: &BTreeMap<u32, Decomposition>) -> Result<Self> {
        let mut interner = Interner::new("decomposition entries", OFFSET_LIMIT);
        let mut indices = Vec::with_capacity(decompositions.len());
        for (&cp, decomposition) in decompositions {
            indices.push((cp, interner.intern(decomposition)?));
        }

        let mut data = vec![0];
        let mut entry_offsets = Vec::with_capacity(interner.len());
        for decomposition in interner.values() {
            Error::check_capacity("decomposition offset", data.len(), OFFSET_LIMIT)?;
            Error::check_capacity(
                "decomposition length",
                decomposition.codepoints.len(),
                LEN_LIMIT,
            )?;
            entry_offsets.push(data.len() as u32);
            data.push(decomposition.tag.index() << 8 | decomposition.codepoints.len() as u32);
            data.extend_from_slice(&decomposition.codepoints);
        }

        let mut offsets = vec![0; CODEPOINT_COUNT];
        for (cp, index) in indices {
            offsets[cp as usize] = entry_offsets[index as usize];
        }

        tracing::info!(
            target: "ucd",
            codepoints = decompositions.len(),
            entries = interner.len(),
            words = data.len(),
            "built decomposition table"
        );
        Ok(Self { offsets, data, entries: interner.len() })
    }

    pub fn get(&self, cp: u32) -> Option<(DecompositionTag, &[u32])> {
        let offset = self.offsets[cp as usize] as usize;
        if offset == 0 {
            return None;
        }
        let header = self.data[offset];
        let tag = DecompositionTag::ALL[(header >> 8) as usize];
        let len = (header & 0xFF) as usize;
        Some((tag, &self.data[offset + 1..offset + 1 + len]))
    }
}

/// Canonical pairwise compositions, grouped by the combining codepoint.
///
/// Combining marks cluster in a handful of blocks, which keeps the trie over
/// `combiners` small. Equal groups are stored once.
pub struct LigatureTable {
    /// The trie values: `group + 1`, or 0 for codepoints that combine with nothing.
    pub combiners: Vec<u32>,
    /// Each group is a span of `pairs`.
    pub groups: Vec<Range<usize>>,
    /// `(starter, composed)`, sorted by the starter within a group.
    pub pairs: Vec<(u32, u32)>,
}

impl LigatureTable {
    pub fn build(db: &Database) -> Result<Self> {
        let mut by_combiner: BTreeMap<u32, Vec<(u32, u32)>> = BTreeMap::new();
        for (&cp, decomposition) in &db.decompositions {
            let &[starter, combining] = decomposition.codepoints.as_slice() else {
                continue;
            };
            if decomposition.tag != DecompositionTag::Canonical
                || db.composition_exclusions.contains(&cp)
            {
                continue;
            }
            if db.records[starter as usize].combining_class != 0 {
                return Err(Error::invariant(
                    starter,
                    format!(
                        "starter of the composition to U+{cp:04X} has a non-zero combining class"
                    ),
                ));
            }
            by_combiner.entry(combining).or_default().push((starter, cp));
        }

        let mut interner = Interner::new("ligature groups", OFFSET_LIMIT);
        let mut combiners = vec![0; CODEPOINT_COUNT];
        for (combining, mut group) in by_combiner {
            group.sort_unstable();
            combiners[combining as usize] = interner.intern(&group)? + 1;
        }

        let mut groups = Vec::with_capacity(interner.len());
        let mut pairs = Vec::new();
        for group in interner.values() {
            Error::check_capacity("ligature offset", pairs.len(), OFFSET_LIMIT)?;
            Error::check_capacity("ligature group length", group.len(), LEN_LIMIT)?;
            groups.push(pairs.len()..pairs.len() + group.len());
            pairs.extend_from_slice(group);
        }

        tracing::info!(
            target: "ucd",
            groups = groups.len(),
            pairs = pairs.len(),
            "built ligature table"
        );
        Ok(Self { combiners, groups, pairs })
    }

    pub fn compose(&self, starter: u32, combining: u32) -> Option<u32> {
        let group = self.combiners.get(combining as usize)?.checked_sub(1)?;
        let pairs = &self.pairs[self.groups[group as usize].clone()];
        let index = pairs.binary_search_by_key(&starter, |&(s, _)| s).ok()?;
        Some(pairs[index].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::defaults::DefaultRules;
    use crate::ucd_file::UcdFile;

    const UNICODE_DATA: &str = "\
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0045;LATIN CAPITAL LETTER E;Lu;0;L;;;;;N;;;;0065;
00C0;LATIN CAPITAL LETTER A WITH GRAVE;Lu;0;L;0041 0300;;;;N;;;;00E0;
00C1;LATIN CAPITAL LETTER A WITH ACUTE;Lu;0;L;0041 0301;;;;N;;;;00E1;
00C8;LATIN CAPITAL LETTER E WITH GRAVE;Lu;0;L;0045 0300;;;;N;;;;00E8;
00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;;;;;
0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;;;;;
0301;COMBINING ACUTE ACCENT;Mn;230;NSM;;;;;N;;;;;
0308;COMBINING DIAERESIS;Mn;230;NSM;;;;;N;;;;;
0340;COMBINING GRAVE TONE MARK;Mn;230;NSM;0300;;;;N;;;;;
0344;COMBINING GREEK DIALYTIKA TONOS;Mn;230;NSM;0308 0301;;;;N;;;;;
0958;DEVANAGARI LETTER QA;Lo;0;L;0915 093C;;;;N;;;;;
2000;EN QUAD;Zs;0;WS;2002;;;;N;;;;;
2002;EN SPACE;Zs;0;WS;<compat> 0020;;;;N;;;;;
2003;EM SPACE;Zs;0;WS;<compat> 0020;;;;N;;;;;
";

    const EXCLUSIONS: &str = "\
0340..0341    ; Full_Composition_Exclusion
0344          ; Full_Composition_Exclusion
0958..095F    ; Full_Composition_Exclusion
";

    fn database(unicode_data: &str) -> Database {
        let mut agg = Aggregator::new(&DefaultRules::UNICODE_15_1);
        agg.apply_unicode_data(UcdFile::new("UnicodeData.txt", unicode_data)).unwrap();
        agg.apply_normalization_props(UcdFile::new("DerivedNormalizationProps.txt", EXCLUSIONS))
            .unwrap();
        agg.finish()
    }

    #[test]
    fn test_decompositions() {
        let db = database(UNICODE_DATA);
        let table = DecompositionTable::build(&db.decompositions).unwrap();
        assert_eq!(table.get(0xC0), Some((DecompositionTag::Canonical, &[0x41, 0x300][..])));
        assert_eq!(table.get(0xBD), Some((DecompositionTag::Fraction, &[0x31, 0x2044, 0x32][..])));
        assert_eq!(table.get(0x41), None);

        // Identical decompositions share one entry.
        assert_eq!(table.offsets[0x2002], table.offsets[0x2003]);
        assert_eq!(table.entries, db.decompositions.len() - 1);
        assert_eq!(table.data[0], 0);
    }

    #[test]
    fn test_compositions() {
        let db = database(UNICODE_DATA);
        let table = LigatureTable::build(&db).unwrap();
        assert_eq!(table.compose(0x41, 0x300), Some(0xC0));
        assert_eq!(table.compose(0x41, 0x301), Some(0xC1));
        assert_eq!(table.compose(0x45, 0x300), Some(0xC8));
        assert_eq!(table.compose(0x45, 0x301), None);
        assert_eq!(table.compose(0x300, 0x301), None);
        // Excluded, a singleton, and a compatibility decomposition.
        assert_eq!(table.compose(0x915, 0x93C), None);
        assert_eq!(table.compose(0x308, 0x301), None);
        assert_eq!(table.compose(0x2002, 0x20), None);
        // One group per combining mark, sorted by starter.
        assert_eq!(table.groups.len(), 2);
        assert_eq!(table.pairs, [(0x41, 0xC0), (0x45, 0xC8), (0x41, 0xC1)]);
        assert_eq!(table.combiners[0x300], 1);
        assert_eq!(table.combiners[0x301], 2);
        assert_eq!(table.combiners[0x41], 0);
    }

    #[test]
    fn test_starter_with_combining_class() {
        // Moved out of the exclusion list, the dialytika tonos composes from a non-starter.
        let db = database(&UNICODE_DATA.replace("0344;", "0345;"));
        match LigatureTable::build(&db) {
            Err(Error::InvariantViolation { codepoint, .. }) => assert_eq!(codepoint, 0x308),
            Err(other) => panic!("unexpected {other}"),
            Ok(_) => panic!("expected an invariant violation"),
        }
    }
}
