// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The per-codepoint property record and its value types.

use crate::names::*;

/// Case mapping deltas must satisfy `-DELTA_LIMIT <= delta < DELTA_LIMIT`.
/// Anything else goes into the special-case table.
pub const CASE_DELTA_LIMIT: i32 = 1 << 13;

/// A case mapping relative to the codepoint that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMapping {
    /// Maps to `cp + delta`.
    Delta(i32),
    /// Index of an interned special-case sequence.
    Special(u32),
}

impl CaseMapping {
    pub const IDENTITY: Self = Self::Delta(0);

    /// Returns the delta encoding of `cp -> target`, if it fits.
    pub fn delta(cp: u32, target: u32) -> Option<Self> {
        let delta = target as i32 - cp as i32;
        (-CASE_DELTA_LIMIT..CASE_DELTA_LIMIT).contains(&delta).then_some(Self::Delta(delta))
    }
}

/// Normalization quick-check values for the four normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuickCheck {
    pub nfd: QuickCheckValue,
    pub nfc: QuickCheckValue,
    pub nfkd: QuickCheckValue,
    pub nfkc: QuickCheckValue,
}

impl QuickCheck {
    pub const YES: Self = Self {
        nfd: QuickCheckValue::Yes,
        nfc: QuickCheckValue::Yes,
        nfkd: QuickCheckValue::Yes,
        nfkc: QuickCheckValue::Yes,
    };

    /// 2 bits per form, NFD in the lowest bits.
    pub fn bits(&self) -> u32 {
        self.nfd.index() | self.nfc.index() << 2 | self.nfkd.index() << 4 | self.nfkc.index() << 6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyRecord {
    pub category: GeneralCategory,
    pub bidi: BidiClass,
    pub combining_class: u8,
    pub joining: JoiningType,
    pub age: Age,
    pub east_asian_width: EastAsianWidth,
    pub digit: Option<u8>,
    /// `mirror - cp`, or 0 if the codepoint has no mirrored glyph.
    pub mirror_offset: i32,
    pub lower: CaseMapping,
    pub upper: CaseMapping,
    pub title: CaseMapping,
    pub fold: CaseMapping,
    pub grapheme: GraphemeBreak,
    pub word: WordBreak,
    pub sentence: SentenceBreak,
    pub line: LineBreak,
    pub script: Script,
    pub quick_check: QuickCheck,
    pub idna: IdnaStatus,
}

impl PropertyRecord {
    /// The record of a codepoint no source says anything about, before default rules.
    pub const UNASSIGNED: Self = Self {
        category: GeneralCategory::Unassigned,
        bidi: BidiClass::LeftToRight,
        combining_class: 0,
        joining: JoiningType::NonJoining,
        age: Age::Unassigned,
        east_asian_width: EastAsianWidth::Neutral,
        digit: None,
        mirror_offset: 0,
        lower: CaseMapping::IDENTITY,
        upper: CaseMapping::IDENTITY,
        title: CaseMapping::IDENTITY,
        fold: CaseMapping::IDENTITY,
        grapheme: GraphemeBreak::Other,
        word: WordBreak::Other,
        sentence: SentenceBreak::Other,
        line: LineBreak::AL,
        script: Script::Unknown,
        quick_check: QuickCheck::YES,
        idna: IdnaStatus::Disallowed,
    };
}

/// A decomposition mapping, keyed elsewhere by its owning codepoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decomposition {
    pub tag: DecompositionTag,
    pub codepoints: Vec<u32>,
}

/// The fields with write-once semantics during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Bidi,
    CombiningClass,
    Joining,
    Age,
    EastAsianWidth,
    Digit,
    Mirror,
    Lower,
    Upper,
    Title,
    Fold,
    Grapheme,
    Word,
    Sentence,
    Line,
    Script,
    NfdQuickCheck,
    NfcQuickCheck,
    NfkdQuickCheck,
    NfkcQuickCheck,
    Idna,
}

impl Field {
    pub fn bit(self) -> u32 {
        1 << self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Category => "general category",
            Field::Bidi => "bidi class",
            Field::CombiningClass => "combining class",
            Field::Joining => "joining type",
            Field::Age => "age",
            Field::EastAsianWidth => "east asian width",
            Field::Digit => "digit value",
            Field::Mirror => "bidi mirroring",
            Field::Lower => "lowercase mapping",
            Field::Upper => "uppercase mapping",
            Field::Title => "titlecase mapping",
            Field::Fold => "case folding",
            Field::Grapheme => "grapheme cluster break",
            Field::Word => "word break",
            Field::Sentence => "sentence break",
            Field::Line => "line break",
            Field::Script => "script",
            Field::NfdQuickCheck => "NFD quick check",
            Field::NfcQuickCheck => "NFC quick check",
            Field::NfkdQuickCheck => "NFKD quick check",
            Field::NfkcQuickCheck => "NFKC quick check",
            Field::Idna => "IDNA status",
        }
    }
}
