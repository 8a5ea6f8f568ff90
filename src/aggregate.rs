// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Merges the individual UCD files into one record per codepoint.
//!
//! Every field has a single authoritative source. A field may be written more
//! than once only with the same value; anything else is an [`Error::OverlapConflict`].
//! The two deliberate exceptions are SpecialCasing, which overlays the simple
//! case mappings with longer sequences, and joining types, which ArabicShaping
//! only fills where the general category doesn't already imply Transparent.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::apperr::{Error, Result};
use crate::defaults::DefaultRules;
use crate::interner::Interner;
use crate::names::*;
use crate::normalization::Correction;
use crate::record::{CaseMapping, Decomposition, Field, PropertyRecord};
use crate::sources::{InputFile, Sources};
use crate::trie::CODEPOINT_COUNT;
use crate::ucd_file::{Record, UcdFile, parse_codepoints};

/// Special-case indices share a `u16` with a flag bit.
pub const SPECIAL_CASE_LIMIT: usize = 1 << 15;

/// Everything the downstream stages need, fully aggregated.
pub struct Database {
    pub records: Vec<PropertyRecord>,
    pub special_cases: Interner<Vec<u32>>,
    pub decompositions: BTreeMap<u32, Decomposition>,
    pub composition_exclusions: BTreeSet<u32>,
    pub corrections: Vec<Correction>,
    pub idna_raw: Vec<IdnaRawStatus>,
    pub idna_mappings: BTreeMap<u32, Vec<u32>>,
}

pub struct Aggregator {
    db: Database,
    /// One bit per [`Field`] that has been explicitly written.
    written: Vec<u32>,
    special_cased: BTreeSet<u32>,
}

type Slot<T> = fn(&mut PropertyRecord) -> &mut T;

impl Aggregator {
    /// Seeds every codepoint with its default record.
    pub fn new(defaults: &DefaultRules) -> Self {
        let records = (0..CODEPOINT_COUNT as u32).map(|cp| defaults.resolve(cp)).collect();
        Self {
            db: Database {
                records,
                special_cases: Interner::new("special-case table", SPECIAL_CASE_LIMIT),
                decompositions: BTreeMap::new(),
                composition_exclusions: BTreeSet::new(),
                corrections: Vec::new(),
                idna_raw: vec![IdnaRawStatus::Disallowed; CODEPOINT_COUNT],
                idna_mappings: BTreeMap::new(),
            },
            written: vec![0; CODEPOINT_COUNT],
            special_cased: BTreeSet::new(),
        }
    }

    /// Applies all sources in their fixed order. Later sources rely on earlier ones.
    pub fn apply_all(mut self, sources: &Sources) -> Result<Database> {
        self.apply(sources, InputFile::UnicodeData, Self::apply_unicode_data)?;
        self.apply(sources, InputFile::DerivedCombiningClass, Self::apply_combining_classes)?;
        self.derive_transparent_joining();
        self.apply(sources, InputFile::ArabicShaping, Self::apply_arabic_shaping)?;
        self.apply(sources, InputFile::BidiMirroring, Self::apply_bidi_mirroring)?;
        self.apply(sources, InputFile::SpecialCasing, Self::apply_special_casing)?;
        self.apply(sources, InputFile::CaseFolding, Self::apply_case_folding)?;
        self.apply(sources, InputFile::DerivedAge, Self::apply_age)?;
        self.apply(sources, InputFile::EastAsianWidth, Self::apply_east_asian_width)?;
        self.apply(sources, InputFile::Scripts, Self::apply_scripts)?;
        self.apply(sources, InputFile::GraphemeBreakProperty, Self::apply_grapheme_break)?;
        self.apply(sources, InputFile::WordBreakProperty, Self::apply_word_break)?;
        self.apply(sources, InputFile::SentenceBreakProperty, Self::apply_sentence_break)?;
        self.apply(sources, InputFile::LineBreak, Self::apply_line_break)?;
        self.apply(sources, InputFile::DerivedNormalizationProps, Self::apply_normalization_props)?;
        self.apply(sources, InputFile::NormalizationCorrections, Self::apply_corrections)?;
        self.apply(sources, InputFile::IdnaMappingTable, Self::apply_idna_table)?;
        Ok(self.finish())
    }

    pub fn finish(self) -> Database {
        self.db
    }

    fn apply(
        &mut self,
        sources: &Sources,
        file: InputFile,
        apply: fn(&mut Self, UcdFile<'_>) -> Result<usize>,
    ) -> Result<()> {
        let records = apply(self, sources.get(file)?)?;
        tracing::info!(target: "ucd", file = file.path(), records, "applied source");
        Ok(())
    }

    fn assign<T>(
        &mut self,
        record: &Record,
        cp: u32,
        field: Field,
        value: T,
        slot: Slot<T>,
    ) -> Result<()>
    where
        T: Copy + PartialEq + fmt::Debug,
    {
        let written = &mut self.written[cp as usize];
        let current = slot(&mut self.db.records[cp as usize]);
        if *written & field.bit() != 0 {
            if *current != value {
                return Err(conflict(record, cp, field.name(), &*current, &value));
            }
            return Ok(());
        }
        *written |= field.bit();
        *current = value;
        Ok(())
    }

    /// Applies a `range ; value` file whose values come from a name table.
    fn apply_property<T>(
        &mut self,
        file: UcdFile,
        field: Field,
        property: &'static str,
        parse: fn(&str) -> Option<T>,
        slot: Slot<T>,
    ) -> Result<usize>
    where
        T: Copy + PartialEq + fmt::Debug,
    {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(2)?;
            let range = record.range(0)?;
            let name = record.field(1)?;
            let value = parse(name).ok_or_else(|| record.unknown(property, name))?;
            for cp in range {
                self.assign(&record, cp, field, value, slot)?;
            }
            count += 1;
        }
        Ok(count)
    }

    fn case_mapping(&mut self, cp: u32, sequence: &[u32]) -> Result<CaseMapping> {
        if let [single] = sequence {
            if let Some(mapping) = CaseMapping::delta(cp, *single) {
                return Ok(mapping);
            }
        }
        Ok(CaseMapping::Special(self.db.special_cases.intern(&sequence.to_vec())?))
    }

    fn case_target(&self, cp: u32, mapping: CaseMapping) -> Vec<u32> {
        match mapping {
            CaseMapping::Delta(delta) => vec![cp.wrapping_add_signed(delta)],
            CaseMapping::Special(index) => {
                self.db.special_cases.get(index).cloned().unwrap_or_default()
            }
        }
    }

    pub fn apply_unicode_data(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        let mut range_start = None;

        for record in file.records() {
            if record.fields.len() != 15 {
                return Err(record.malformed(format!(
                    "expected 15 fields, found {}",
                    record.fields.len()
                )));
            }
            let cp = record.codepoint(0)?;
            let name = record.field(1)?;
            let range = if name.ends_with(", First>") {
                if range_start.is_some() {
                    return Err(record.malformed("range start inside an open range"));
                }
                range_start = Some((cp, record.line));
                continue;
            } else if name.ends_with(", Last>") {
                let (start, _) =
                    range_start.take().ok_or_else(|| record.malformed("range end without start"))?;
                if start > cp {
                    return Err(record.malformed("range end before its start"));
                }
                start..=cp
            } else if range_start.is_some() {
                return Err(record.malformed("expected the end of the open range"));
            } else {
                cp..=cp
            };

            let category = record.field(2)?;
            let category = GeneralCategory::from_name(category)
                .ok_or_else(|| record.unknown(GeneralCategory::PROPERTY, category))?;
            let combining_class: u8 = record.number(3)?;
            let bidi = record.field(4)?;
            let bidi = BidiClass::from_name(bidi)
                .ok_or_else(|| record.unknown(BidiClass::PROPERTY, bidi))?;
            let decomposition = parse_decomposition(&record)?;
            let digit = match record.field(6)? {
                "" => None,
                _ => match record.number::<u8>(6)? {
                    d @ 0..=9 => Some(d),
                    d => return Err(record.malformed(format!("digit value {d} out of range"))),
                },
            };
            let upper = optional_codepoint(&record, 12)?;
            let lower = optional_codepoint(&record, 13)?;
            let title = optional_codepoint(&record, 14)?.or(upper);

            for cp in range {
                self.assign(&record, cp, Field::Category, category, |r| &mut r.category)?;
                self.assign(&record, cp, Field::CombiningClass, combining_class, |r| {
                    &mut r.combining_class
                })?;
                self.assign(&record, cp, Field::Bidi, bidi, |r| &mut r.bidi)?;
                if digit.is_some() {
                    self.assign(&record, cp, Field::Digit, digit, |r| &mut r.digit)?;
                }
                if let Some(decomposition) = &decomposition {
                    self.insert_decomposition(&record, cp, decomposition)?;
                }
                if let Some(upper) = upper {
                    let mapping = self.case_mapping(cp, &[upper])?;
                    self.assign(&record, cp, Field::Upper, mapping, |r| &mut r.upper)?;
                }
                if let Some(lower) = lower {
                    let mapping = self.case_mapping(cp, &[lower])?;
                    self.assign(&record, cp, Field::Lower, mapping, |r| &mut r.lower)?;
                }
                if let Some(title) = title {
                    let mapping = self.case_mapping(cp, &[title])?;
                    self.assign(&record, cp, Field::Title, mapping, |r| &mut r.title)?;
                }
            }
            count += 1;
        }

        if let Some((_, line)) = range_start {
            return Err(Error::MalformedRecord {
                file: file.name(),
                line,
                reason: "unterminated codepoint range".to_string(),
            });
        }
        Ok(count)
    }

    fn insert_decomposition(
        &mut self,
        record: &Record,
        cp: u32,
        decomposition: &Decomposition,
    ) -> Result<()> {
        if let Some(existing) = self.db.decompositions.get(&cp) {
            if existing != decomposition {
                return Err(conflict(record, cp, "decomposition", existing, decomposition));
            }
            return Ok(());
        }
        self.db.decompositions.insert(cp, decomposition.clone());
        Ok(())
    }

    pub fn apply_combining_classes(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(2)?;
            let range = record.range(0)?;
            let class: u8 = record.number(1)?;
            for cp in range {
                self.assign(&record, cp, Field::CombiningClass, class, |r| &mut r.combining_class)?;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Marks Mn, Me and Cf as Transparent before ArabicShaping is applied.
    pub fn derive_transparent_joining(&mut self) {
        let mut count = 0usize;
        for (record, written) in self.db.records.iter_mut().zip(&mut self.written) {
            if is_transparent_by_category(record.category) {
                record.joining = JoiningType::Transparent;
                *written |= Field::Joining.bit();
                count += 1;
            }
        }
        tracing::debug!(target: "ucd", codepoints = count, "derived transparent joining types");
    }

    pub fn apply_arabic_shaping(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(3)?;
            let range = record.range(0)?;
            let name = record.field(2)?;
            let joining = JoiningType::from_name(name)
                .ok_or_else(|| record.unknown(JoiningType::PROPERTY, name))?;
            for cp in range {
                if is_transparent_by_category(self.db.records[cp as usize].category) {
                    continue;
                }
                self.assign(&record, cp, Field::Joining, joining, |r| &mut r.joining)?;
            }
            count += 1;
        }
        Ok(count)
    }

    pub fn apply_bidi_mirroring(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(2)?;
            let cp = record.codepoint(0)?;
            let mirror = record.codepoint(1)?;
            let offset = mirror as i32 - cp as i32;
            self.assign(&record, cp, Field::Mirror, offset, |r| &mut r.mirror_offset)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn apply_special_casing(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(4)?;
            if !record.optional_field(4).is_empty() {
                // Language or context dependent; left to the runtime.
                continue;
            }
            let cp = record.codepoint(0)?;
            let lower = record.codepoints(1)?;
            let title = record.codepoints(2)?;
            let upper = record.codepoints(3)?;
            if !self.special_cased.insert(cp) {
                let incoming = [Hex(&lower), Hex(&title), Hex(&upper)];
                return Err(conflict(&record, cp, "special casing", &"an earlier entry", &incoming));
            }
            self.overlay_case(&record, cp, Field::Lower, &lower, |r| &mut r.lower)?;
            self.overlay_case(&record, cp, Field::Title, &title, |r| &mut r.title)?;
            self.overlay_case(&record, cp, Field::Upper, &upper, |r| &mut r.upper)?;
            count += 1;
        }
        Ok(count)
    }

    /// Single codepoint entries must agree with the simple mapping, longer ones replace it.
    fn overlay_case(
        &mut self,
        record: &Record,
        cp: u32,
        field: Field,
        sequence: &[u32],
        slot: Slot<CaseMapping>,
    ) -> Result<()> {
        let current = *slot(&mut self.db.records[cp as usize]);
        if let [_] = sequence {
            let existing = self.case_target(cp, current);
            if existing != sequence {
                return Err(conflict(record, cp, field.name(), &Hex(&existing), &Hex(sequence)));
            }
            return Ok(());
        }
        let mapping = self.case_mapping(cp, sequence)?;
        *slot(&mut self.db.records[cp as usize]) = mapping;
        self.written[cp as usize] |= field.bit();
        Ok(())
    }

    pub fn apply_case_folding(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(3)?;
            let cp = record.codepoint(0)?;
            match record.field(1)? {
                "C" | "F" => {}
                "S" | "T" => continue,
                status => return Err(record.unknown("Case_Folding_Status", status)),
            }
            let folded = record.codepoints(2)?;
            let mapping = self.case_mapping(cp, &folded)?;
            self.assign(&record, cp, Field::Fold, mapping, |r| &mut r.fold)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn apply_age(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(file, Field::Age, Age::PROPERTY, Age::from_name, |r| &mut r.age)
    }

    pub fn apply_east_asian_width(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(
            file,
            Field::EastAsianWidth,
            EastAsianWidth::PROPERTY,
            EastAsianWidth::from_name,
            |r| &mut r.east_asian_width,
        )
    }

    pub fn apply_scripts(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(file, Field::Script, Script::PROPERTY, Script::from_name, |r| {
            &mut r.script
        })
    }

    pub fn apply_grapheme_break(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(
            file,
            Field::Grapheme,
            GraphemeBreak::PROPERTY,
            GraphemeBreak::from_name,
            |r| &mut r.grapheme,
        )
    }

    pub fn apply_word_break(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(file, Field::Word, WordBreak::PROPERTY, WordBreak::from_name, |r| {
            &mut r.word
        })
    }

    pub fn apply_sentence_break(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(
            file,
            Field::Sentence,
            SentenceBreak::PROPERTY,
            SentenceBreak::from_name,
            |r| &mut r.sentence,
        )
    }

    pub fn apply_line_break(&mut self, file: UcdFile) -> Result<usize> {
        self.apply_property(file, Field::Line, LineBreak::PROPERTY, LineBreak::from_name, |r| {
            &mut r.line
        })
    }

    pub fn apply_normalization_props(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(2)?;
            let range = record.range(0)?;
            let (field, slot): (Field, Slot<QuickCheckValue>) = match record.field(1)? {
                "NFD_QC" => (Field::NfdQuickCheck, |r| &mut r.quick_check.nfd),
                "NFC_QC" => (Field::NfcQuickCheck, |r| &mut r.quick_check.nfc),
                "NFKD_QC" => (Field::NfkdQuickCheck, |r| &mut r.quick_check.nfkd),
                "NFKC_QC" => (Field::NfkcQuickCheck, |r| &mut r.quick_check.nfkc),
                "Full_Composition_Exclusion" => {
                    self.db.composition_exclusions.extend(range);
                    count += 1;
                    continue;
                }
                _ => continue,
            };
            let name = record.field(2)?;
            let value = QuickCheckValue::from_name(name)
                .ok_or_else(|| record.unknown(QuickCheckValue::PROPERTY, name))?;
            for cp in range {
                self.assign(&record, cp, field, value, slot)?;
            }
            count += 1;
        }
        Ok(count)
    }

    pub fn apply_corrections(&mut self, file: UcdFile) -> Result<usize> {
        for record in file.records() {
            record.expect_fields(4)?;
            self.db.corrections.push(Correction {
                codepoint: record.codepoint(0)?,
                original: record.codepoints(1)?,
                corrected: record.codepoints(2)?,
                version: record.field(3)?.to_string(),
            });
        }
        Ok(self.db.corrections.len())
    }

    pub fn apply_idna_table(&mut self, file: UcdFile) -> Result<usize> {
        let mut count = 0;
        for record in file.records() {
            record.expect_fields(2)?;
            let range = record.range(0)?;
            let name = record.field(1)?;
            let status = IdnaRawStatus::from_name(name)
                .ok_or_else(|| record.unknown(IdnaRawStatus::PROPERTY, name))?;
            let mapping = match status {
                IdnaRawStatus::Mapped | IdnaRawStatus::DisallowedStd3Mapped => {
                    let mapping = record.codepoints(2)?;
                    if mapping.is_empty() {
                        return Err(record.malformed("mapped status without a mapping"));
                    }
                    Some(mapping)
                }
                IdnaRawStatus::Deviation => Some(parse_codepoints(record.optional_field(2))
                    .ok_or_else(|| record.malformed("bad deviation mapping"))?),
                _ => None,
            };

            for cp in range {
                let written = &mut self.written[cp as usize];
                let current = self.db.idna_raw[cp as usize];
                if *written & Field::Idna.bit() != 0 {
                    if current != status {
                        return Err(conflict(&record, cp, Field::Idna.name(), &current, &status));
                    }
                    continue;
                }
                *written |= Field::Idna.bit();
                self.db.idna_raw[cp as usize] = status;
                if let Some(mapping) = &mapping {
                    self.db.idna_mappings.insert(cp, mapping.clone());
                }
            }
            count += 1;
        }
        Ok(count)
    }
}

fn conflict(
    record: &Record,
    cp: u32,
    field: &'static str,
    existing: &dyn fmt::Debug,
    incoming: &dyn fmt::Debug,
) -> Error {
    Error::OverlapConflict {
        file: record.file,
        line: record.line,
        codepoint: cp,
        field,
        existing: format!("{existing:?}"),
        incoming: format!("{incoming:?}"),
    }
}

/// Formats codepoint sequences the way the data files write them.
struct Hex<'a>(&'a [u32]);

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cp) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cp:04X}")?;
        }
        Ok(())
    }
}

fn is_transparent_by_category(category: GeneralCategory) -> bool {
    matches!(
        category,
        GeneralCategory::NonspacingMark | GeneralCategory::EnclosingMark | GeneralCategory::Format
    )
}

fn optional_codepoint(record: &Record, index: usize) -> Result<Option<u32>> {
    match record.field(index)? {
        "" => Ok(None),
        _ => record.codepoint(index).map(Some),
    }
}

fn parse_decomposition(record: &Record) -> Result<Option<Decomposition>> {
    let field = record.field(5)?;
    if field.is_empty() {
        return Ok(None);
    }
    let (tag, rest) = if field.starts_with('<') {
        let end =
            field.find('>').ok_or_else(|| record.malformed("unterminated decomposition tag"))?;
        let name = &field[..=end];
        let tag = DecompositionTag::from_name(name)
            .ok_or_else(|| record.unknown(DecompositionTag::PROPERTY, name))?;
        (tag, &field[end + 1..])
    } else {
        (DecompositionTag::Canonical, field)
    };
    let codepoints = parse_codepoints(rest)
        .filter(|cps| !cps.is_empty())
        .ok_or_else(|| record.malformed(format!("bad decomposition {field:?}")))?;
    Ok(Some(Decomposition { tag, codepoints }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNICODE_DATA: &str = "\
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
00C0;LATIN CAPITAL LETTER A WITH GRAVE;Lu;0;L;0041 0300;;;;N;;;;00E0;
0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;;;;;
00DF;LATIN SMALL LETTER SHARP S;Ll;0;L;;;;;N;;;;;
00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;;;;;
200D;ZERO WIDTH JOINER;Cf;0;BN;;;;;N;;;;;
0628;ARABIC LETTER BEH;Lo;0;AL;;;;;N;;;;;
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;
";

    fn aggregator() -> Aggregator {
        let mut agg = Aggregator::new(&DefaultRules::UNICODE_15_1);
        agg.apply_unicode_data(UcdFile::new("UnicodeData.txt", UNICODE_DATA)).unwrap();
        agg
    }

    fn record(agg: &Aggregator, cp: u32) -> PropertyRecord {
        agg.db.records[cp as usize]
    }

    #[test]
    fn test_unicode_data() {
        let agg = aggregator();
        let a = record(&agg, 0x41);
        assert_eq!(a.category, GeneralCategory::UppercaseLetter);
        assert_eq!(a.lower, CaseMapping::Delta(32));
        assert_eq!(a.upper, CaseMapping::IDENTITY);

        // Empty titlecase falls back to uppercase.
        assert_eq!(record(&agg, 0x61).title, CaseMapping::Delta(-32));
        assert_eq!(record(&agg, 0x31).digit, Some(1));
        assert_eq!(record(&agg, 0x300).combining_class, 230);
        assert_eq!(record(&agg, 0x7000).category, GeneralCategory::OtherLetter);
        assert_eq!(record(&agg, 0xA000).category, GeneralCategory::Unassigned);

        let half = &agg.db.decompositions[&0xBD];
        assert_eq!(half.tag, DecompositionTag::Fraction);
        assert_eq!(half.codepoints, [0x31, 0x2044, 0x32]);
        assert_eq!(agg.db.decompositions[&0xC0].tag, DecompositionTag::Canonical);
    }

    #[test]
    fn test_unassigned_keeps_defaults() {
        let agg = aggregator();
        assert_eq!(record(&agg, 0x05FF).bidi, BidiClass::RightToLeft);
        assert_eq!(record(&agg, 0x0628).bidi, BidiClass::ArabicLetter);
        assert_eq!(record(&agg, 0x0041).bidi, BidiClass::LeftToRight);
    }

    #[test]
    fn test_combining_class_conflict() {
        let mut agg = aggregator();
        let same = UcdFile::new("DerivedCombiningClass.txt", "0300 ; 230\n0301 ; 230\n");
        agg.apply_combining_classes(same).unwrap();

        let different = UcdFile::new("DerivedCombiningClass.txt", "0300 ; 220\n");
        match agg.apply_combining_classes(different) {
            Err(Error::OverlapConflict { codepoint, field, existing, incoming, .. }) => {
                assert_eq!(codepoint, 0x300);
                assert_eq!(field, "combining class");
                assert_eq!(existing, "230");
                assert_eq!(incoming, "220");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_malformed_unicode_data() {
        let mut agg = Aggregator::new(&DefaultRules::UNICODE_15_1);
        let short = UcdFile::new("UnicodeData.txt", "0041;LATIN CAPITAL LETTER A;Lu;0;L\n");
        assert!(matches!(agg.apply_unicode_data(short), Err(Error::MalformedRecord { .. })));

        let unknown =
            UcdFile::new("UnicodeData.txt", "0041;LATIN CAPITAL LETTER A;Xx;0;L;;;;;N;;;;;\n");
        match agg.apply_unicode_data(unknown) {
            Err(Error::UnknownEnumValue { property, value, .. }) => {
                assert_eq!(property, "General_Category");
                assert_eq!(value, "Xx");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unicode_data_ranges_must_pair_up() {
        let first = "4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;\n";
        let plain = "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;\n";
        let second = "3400;<CJK Ideograph Extension A, First>;Lo;0;L;;;;;N;;;;;\n";
        let last = "9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;\n";

        let cases = [
            (format!("{first}{second}{last}"), 2),
            (format!("{first}{plain}{last}"), 2),
            (format!("{plain}{first}"), 2),
            (last.to_string(), 1),
        ];
        for (text, expected_line) in cases {
            let mut agg = Aggregator::new(&DefaultRules::UNICODE_15_1);
            match agg.apply_unicode_data(UcdFile::new("UnicodeData.txt", &text)) {
                Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, expected_line),
                other => panic!("unexpected {other:?} for {text:?}"),
            }
        }
    }

    #[test]
    fn test_special_casing() {
        let mut agg = aggregator();
        let text = "\
00DF; 00DF; 0053 0073; 0053 0053; # LATIN SMALL LETTER SHARP S
0041; 0061; 0041; 0041; # redundant but consistent
03A3; 03C2; 03A3; 03A3; Final_Sigma; # GREEK CAPITAL LETTER SIGMA
";
        agg.apply_special_casing(UcdFile::new("SpecialCasing.txt", text)).unwrap();
        let sharp_s = record(&agg, 0xDF);
        let CaseMapping::Special(index) = sharp_s.upper else { panic!("expected special") };
        assert_eq!(agg.db.special_cases.get(index).unwrap(), &[0x53, 0x53]);
        assert!(matches!(sharp_s.title, CaseMapping::Special(_)));
        assert_eq!(sharp_s.lower, CaseMapping::IDENTITY);
        assert_eq!(record(&agg, 0x41).lower, CaseMapping::Delta(32));
    }

    #[test]
    fn test_special_casing_must_agree_with_simple_mapping() {
        let mut agg = aggregator();
        let text = "0041; 0062; 0041; 0041;\n";
        match agg.apply_special_casing(UcdFile::new("SpecialCasing.txt", text)) {
            Err(Error::OverlapConflict { field, existing, incoming, .. }) => {
                assert_eq!(field, "lowercase mapping");
                assert_eq!(existing, "0061");
                assert_eq!(incoming, "0062");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_case_folding() {
        let mut agg = aggregator();
        let text = "\
0041; C; 0061; # LATIN CAPITAL LETTER A
00DF; F; 0073 0073; # LATIN SMALL LETTER SHARP S
1E9E; S; 00DF; # LATIN CAPITAL LETTER SHARP S
";
        agg.apply_case_folding(UcdFile::new("CaseFolding.txt", text)).unwrap();
        assert_eq!(record(&agg, 0x41).fold, CaseMapping::Delta(32));
        assert!(matches!(record(&agg, 0xDF).fold, CaseMapping::Special(_)));
        assert_eq!(record(&agg, 0x1E9E).fold, CaseMapping::IDENTITY);

        let bad = UcdFile::new("CaseFolding.txt", "0042; Q; 0062;\n");
        assert!(matches!(agg.apply_case_folding(bad), Err(Error::UnknownEnumValue { .. })));
    }

    #[test]
    fn test_joining_skips_transparent_by_category() {
        let mut agg = aggregator();
        agg.derive_transparent_joining();
        let text = "\
0628; BEH; D; BEH
200D; ZERO WIDTH JOINER; C; No_Joining_Group
";
        agg.apply_arabic_shaping(UcdFile::new("ArabicShaping.txt", text)).unwrap();
        assert_eq!(record(&agg, 0x628).joining, JoiningType::DualJoining);
        assert_eq!(record(&agg, 0x200D).joining, JoiningType::Transparent);
        assert_eq!(record(&agg, 0x300).joining, JoiningType::Transparent);
        assert_eq!(record(&agg, 0x41).joining, JoiningType::NonJoining);
    }

    #[test]
    fn test_property_files() {
        let mut agg = aggregator();
        agg.apply_scripts(UcdFile::new("Scripts.txt", "0041..005A ; Latin # L&\n")).unwrap();
        agg.apply_line_break(UcdFile::new("LineBreak.txt", "4E00..9FFF;ID\n")).unwrap();
        agg.apply_age(UcdFile::new("DerivedAge.txt", "0041 ; 1.1\n")).unwrap();
        agg.apply_bidi_mirroring(UcdFile::new("BidiMirroring.txt", "0028; 0029\n0029; 0028\n"))
            .unwrap();
        assert_eq!(record(&agg, 0x5A).script, Script::Latin);
        assert_eq!(record(&agg, 0x5B).script, Script::Unknown);
        assert_eq!(record(&agg, 0x4E00).line, LineBreak::ID);
        assert_eq!(record(&agg, 0x41).age, Age::V1_1);
        assert_eq!(record(&agg, 0x28).mirror_offset, 1);
        assert_eq!(record(&agg, 0x29).mirror_offset, -1);

        let overlapping = UcdFile::new("Scripts.txt", "0050..0060 ; Greek\n");
        assert!(matches!(agg.apply_scripts(overlapping), Err(Error::OverlapConflict { .. })));
        let unknown = UcdFile::new("DerivedAge.txt", "0042 ; 0.9\n");
        assert!(matches!(agg.apply_age(unknown), Err(Error::UnknownEnumValue { .. })));
    }

    #[test]
    fn test_normalization_props() {
        let mut agg = aggregator();
        let text = "\
0300..0301    ; NFC_QC; M
0340..0341    ; NFC_QC; N
0340..0341    ; NFD_QC; N
0958..095F    ; Full_Composition_Exclusion
00A0          ; NFKC_CF; 0020
";
        let count = agg
            .apply_normalization_props(UcdFile::new("DerivedNormalizationProps.txt", text))
            .unwrap();
        assert_eq!(count, 4);
        let grave = record(&agg, 0x300).quick_check;
        assert_eq!(grave.nfc, QuickCheckValue::Maybe);
        assert_eq!(grave.nfd, QuickCheckValue::Yes);
        assert_eq!(record(&agg, 0x341).quick_check.nfd, QuickCheckValue::No);
        assert!(agg.db.composition_exclusions.contains(&0x095C));
        assert!(!agg.db.composition_exclusions.contains(&0x0960));
    }

    #[test]
    fn test_idna_table() {
        let mut agg = aggregator();
        let text = "\
0000..002C    ; disallowed_STD3_valid                  # 1.1  <control-0000>..COMMA
0041          ; mapped                 ; 0061          # 1.1  LATIN CAPITAL LETTER A
0061          ; valid                                  # 1.1  LATIN SMALL LETTER A
00A1..00A7    ; valid                  ;      ; NV8    # 1.1  INVERTED EXCLAMATION MARK..SECTION SIGN
00DF          ; deviation              ; 0073 0073     # 1.1  LATIN SMALL LETTER SHARP S
200D          ; deviation              ;               # 1.1  ZERO WIDTH JOINER
2474          ; disallowed_STD3_mapped ; 0028 0031 0029 # 1.1  PARENTHESIZED DIGIT ONE
";
        agg.apply_idna_table(UcdFile::new("IdnaMappingTable.txt", text)).unwrap();
        let db = agg.finish();
        assert_eq!(db.idna_raw[0x2C], IdnaRawStatus::DisallowedStd3Valid);
        assert_eq!(db.idna_raw[0xA5], IdnaRawStatus::Valid);
        assert_eq!(db.idna_raw[0x2474], IdnaRawStatus::DisallowedStd3Mapped);
        assert_eq!(db.idna_mappings[&0x41], [0x61]);
        assert_eq!(db.idna_mappings[&0xDF], [0x73, 0x73]);
        assert!(db.idna_mappings[&0x200D].is_empty());
        assert!(!db.idna_mappings.contains_key(&0x61));
    }
}
