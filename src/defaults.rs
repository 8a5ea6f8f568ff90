// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Default property values for codepoints the data files leave unassigned.
//!
//! The ranges come from the `@missing` lines of the derived property files and
//! move between Unicode releases, so they're kept as data keyed by version.

use std::ops::RangeInclusive;

use crate::names::{BidiClass, LineBreak};
use crate::record::PropertyRecord;

pub struct DefaultRules {
    pub version: &'static str,
    /// Bidi class ranges. First match wins; no match means `L`.
    pub bidi: &'static [(RangeInclusive<u32>, BidiClass)],
    /// Default_Ignorable_Code_Point ranges, which default to `BN` along with noncharacters.
    pub default_ignorable: &'static [RangeInclusive<u32>],
    /// Line break ranges. First match wins; no match means `AL`.
    pub line_break: &'static [(RangeInclusive<u32>, LineBreak)],
}

impl DefaultRules {
    pub const UNICODE_15_1: Self = Self {
        version: "15.1.0",
        bidi: &[
            (0x0590..=0x05FF, BidiClass::RightToLeft),
            (0x0600..=0x07BF, BidiClass::ArabicLetter),
            (0x07C0..=0x085F, BidiClass::RightToLeft),
            (0x0860..=0x08FF, BidiClass::ArabicLetter),
            (0x20A0..=0x20CF, BidiClass::EuropeanTerminator),
            (0xFB1D..=0xFB4F, BidiClass::RightToLeft),
            (0xFB50..=0xFDCF, BidiClass::ArabicLetter),
            (0xFDF0..=0xFDFF, BidiClass::ArabicLetter),
            (0xFE70..=0xFEFF, BidiClass::ArabicLetter),
            (0x10800..=0x10CFF, BidiClass::RightToLeft),
            (0x10D00..=0x10D3F, BidiClass::ArabicLetter),
            (0x10D40..=0x10EBF, BidiClass::RightToLeft),
            (0x10EC0..=0x10EFF, BidiClass::ArabicLetter),
            (0x10F00..=0x10F2F, BidiClass::RightToLeft),
            (0x10F30..=0x10F6F, BidiClass::ArabicLetter),
            (0x10F70..=0x10FFF, BidiClass::RightToLeft),
            (0x1E800..=0x1EC6F, BidiClass::RightToLeft),
            (0x1EC70..=0x1ECBF, BidiClass::ArabicLetter),
            (0x1ECC0..=0x1ECFF, BidiClass::RightToLeft),
            (0x1ED00..=0x1ED4F, BidiClass::ArabicLetter),
            (0x1ED50..=0x1EDFF, BidiClass::RightToLeft),
            (0x1EE00..=0x1EEFF, BidiClass::ArabicLetter),
            (0x1EF00..=0x1EFFF, BidiClass::RightToLeft),
        ],
        default_ignorable: &[
            0x2060..=0x206F,
            0xFFF0..=0xFFF8,
            0x1BCA0..=0x1BCA3,
            0x1D173..=0x1D17A,
            0xE0000..=0xE0FFF,
        ],
        line_break: &[
            (0x20A0..=0x20CF, LineBreak::PR),
            (0x3400..=0x4DBF, LineBreak::ID),
            (0x4E00..=0x9FFF, LineBreak::ID),
            (0xF900..=0xFAFF, LineBreak::ID),
            (0x1F000..=0x1FAFF, LineBreak::ID),
            (0x1FC00..=0x1FFFD, LineBreak::ID),
            (0x20000..=0x2FFFD, LineBreak::ID),
            (0x30000..=0x3FFFD, LineBreak::ID),
        ],
    };

    /// Produces the fully defaulted record for `cp`. Every codepoint lands in exactly one bucket.
    pub fn resolve(&self, cp: u32) -> PropertyRecord {
        PropertyRecord {
            bidi: self.bidi_class(cp),
            line: self.line_break(cp),
            ..PropertyRecord::UNASSIGNED
        }
    }

    pub fn bidi_class(&self, cp: u32) -> BidiClass {
        if is_noncharacter(cp) || self.default_ignorable.iter().any(|r| r.contains(&cp)) {
            return BidiClass::BoundaryNeutral;
        }
        self.bidi
            .iter()
            .find(|(range, _)| range.contains(&cp))
            .map_or(BidiClass::LeftToRight, |&(_, class)| class)
    }

    pub fn line_break(&self, cp: u32) -> LineBreak {
        self.line_break
            .iter()
            .find(|(range, _)| range.contains(&cp))
            .map_or(LineBreak::AL, |&(_, class)| class)
    }
}

/// U+FDD0..U+FDEF and the last two codepoints of every plane.
pub fn is_noncharacter(cp: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}
