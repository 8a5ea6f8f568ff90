// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bit layouts for the packed words of the emitted record struct.

use crate::apperr::{Error, Result};
use crate::record::{CaseMapping, PropertyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Also the name of the generated accessor.
    pub name: &'static str,
    /// The type the accessor decodes the field into.
    pub ty: &'static str,
    pub shift: u32,
    pub width: u32,
}

impl BitField {
    pub const fn mask(&self) -> u32 {
        (1 << self.width) - 1
    }
}

/// Fields packed into one `u32`, lowest bits first.
pub struct BitPacking {
    pub word: &'static str,
    pub fields: Vec<BitField>,
}

impl BitPacking {
    pub fn new(word: &'static str, widths: &[(&'static str, &'static str, u32)]) -> Self {
        let mut shift = 0;
        let fields = widths
            .iter()
            .map(|&(name, ty, width)| {
                let field = BitField { name, ty, shift, width };
                shift += width;
                field
            })
            .collect();
        assert!(shift <= 32, "{word} needs {shift} bits");
        Self { word, fields }
    }

    /// Packs `values`, given in field order. A value that doesn't fit its field is an error.
    pub fn pack(&self, values: &[u32]) -> Result<u32> {
        debug_assert_eq!(values.len(), self.fields.len());
        let mut word = 0;
        for (field, &value) in self.fields.iter().zip(values) {
            if value > field.mask() {
                return Err(Error::capacity(field.name, value as usize, 1 << field.width));
            }
            word |= value << field.shift;
        }
        Ok(word)
    }

    pub fn unpack(&self, word: u32, index: usize) -> u32 {
        let field = &self.fields[index];
        (word >> field.shift) & field.mask()
    }

    pub fn bits(&self) -> u32 {
        self.fields.iter().map(|f| f.width).sum()
    }
}

/// The emitted `CharProps`, field for field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedRecord {
    pub props: u32,
    pub breaks: u32,
    pub combining_class: u8,
    pub quick_check: u8,
    pub mirror: i16,
    pub lower: u16,
    pub upper: u16,
    pub title: u16,
    pub fold: u16,
}

/// Case fields with this bit set hold a special-case index in the remaining bits.
pub const SPECIAL_CASE_FLAG: u16 = 0x8000;

pub struct RecordLayout {
    pub props: BitPacking,
    pub breaks: BitPacking,
}

impl RecordLayout {
    pub fn new() -> Self {
        Self {
            props: BitPacking::new(
                "props",
                &[
                    ("general_category", "GeneralCategory", 5),
                    ("bidi_class", "BidiClass", 5),
                    ("joining_type", "JoiningType", 3),
                    ("east_asian_width", "EastAsianWidth", 3),
                    ("age", "Age", 5),
                    ("idna_status", "IdnaStatus", 3),
                    // Stored as value + 1, 0 meaning none.
                    ("digit", "Option<u8>", 4),
                ],
            ),
            breaks: BitPacking::new(
                "breaks",
                &[
                    ("grapheme_break", "GraphemeBreak", 4),
                    ("word_break", "WordBreak", 5),
                    ("sentence_break", "SentenceBreak", 4),
                    ("line_break", "LineBreak", 6),
                    ("script", "Script", 8),
                ],
            ),
        }
    }

    pub fn pack(&self, record: &PropertyRecord) -> Result<PackedRecord> {
        let props = self.props.pack(&[
            record.category.index(),
            record.bidi.index(),
            record.joining.index(),
            record.east_asian_width.index(),
            record.age.index(),
            record.idna.index(),
            record.digit.map_or(0, |d| d as u32 + 1),
        ])?;
        let breaks = self.breaks.pack(&[
            record.grapheme.index(),
            record.word.index(),
            record.sentence.index(),
            record.line.index(),
            record.script.index(),
        ])?;
        let mirror = i16::try_from(record.mirror_offset).map_err(|_| {
            Error::capacity(
                "bidi mirroring offset",
                record.mirror_offset.unsigned_abs() as usize,
                1 << 15,
            )
        })?;

        Ok(PackedRecord {
            props,
            breaks,
            combining_class: record.combining_class,
            quick_check: record.quick_check.bits() as u8,
            mirror,
            lower: encode_case(record.lower),
            upper: encode_case(record.upper),
            title: encode_case(record.title),
            fold: encode_case(record.fold),
        })
    }
}

/// Deltas become 14-bit two's complement. Special indices are bounded by the interner.
pub fn encode_case(mapping: CaseMapping) -> u16 {
    match mapping {
        CaseMapping::Delta(delta) => delta as u16 & 0x3FFF,
        CaseMapping::Special(index) => SPECIAL_CASE_FLAG | index as u16,
    }
}
