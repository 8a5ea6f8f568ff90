// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The fixed set of UCD files the compiler reads.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use crate::apperr::{Error, Result};
use crate::ucd_file::UcdFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputFile {
    UnicodeData,
    DerivedCombiningClass,
    ArabicShaping,
    BidiMirroring,
    SpecialCasing,
    CaseFolding,
    DerivedAge,
    EastAsianWidth,
    Scripts,
    GraphemeBreakProperty,
    WordBreakProperty,
    SentenceBreakProperty,
    LineBreak,
    DerivedNormalizationProps,
    NormalizationCorrections,
    IdnaMappingTable,
}

impl InputFile {
    pub const ALL: [Self; 16] = [
        Self::UnicodeData,
        Self::DerivedCombiningClass,
        Self::ArabicShaping,
        Self::BidiMirroring,
        Self::SpecialCasing,
        Self::CaseFolding,
        Self::DerivedAge,
        Self::EastAsianWidth,
        Self::Scripts,
        Self::GraphemeBreakProperty,
        Self::WordBreakProperty,
        Self::SentenceBreakProperty,
        Self::LineBreak,
        Self::DerivedNormalizationProps,
        Self::NormalizationCorrections,
        Self::IdnaMappingTable,
    ];

    /// Path relative to the UCD directory.
    pub fn path(self) -> &'static str {
        match self {
            Self::UnicodeData => "UnicodeData.txt",
            Self::DerivedCombiningClass => "extracted/DerivedCombiningClass.txt",
            Self::ArabicShaping => "ArabicShaping.txt",
            Self::BidiMirroring => "BidiMirroring.txt",
            Self::SpecialCasing => "SpecialCasing.txt",
            Self::CaseFolding => "CaseFolding.txt",
            Self::DerivedAge => "DerivedAge.txt",
            Self::EastAsianWidth => "EastAsianWidth.txt",
            Self::Scripts => "Scripts.txt",
            Self::GraphemeBreakProperty => "auxiliary/GraphemeBreakProperty.txt",
            Self::WordBreakProperty => "auxiliary/WordBreakProperty.txt",
            Self::SentenceBreakProperty => "auxiliary/SentenceBreakProperty.txt",
            Self::LineBreak => "LineBreak.txt",
            Self::DerivedNormalizationProps => "DerivedNormalizationProps.txt",
            Self::NormalizationCorrections => "NormalizationCorrections.txt",
            Self::IdnaMappingTable => "idna/IdnaMappingTable.txt",
        }
    }
}

/// The contents of every input file.
#[derive(Default)]
pub struct Sources {
    files: BTreeMap<InputFile, String>,
}

impl Sources {
    /// Reads every input file. Any one of them missing is fatal.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut sources = Self::default();
        for file in InputFile::ALL {
            let path = dir.join(file.path());
            let text = std::fs::read_to_string(&path).map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => Error::MissingInputFile { path: path.clone() },
                _ => Error::Io { path: path.clone(), source: err },
            })?;
            tracing::debug!(target: "ucd", file = file.path(), bytes = text.len(), "loaded");
            sources.files.insert(file, text);
        }
        Ok(sources)
    }

    pub fn insert(&mut self, file: InputFile, text: impl Into<String>) {
        self.files.insert(file, text.into());
    }

    pub fn get(&self, file: InputFile) -> Result<UcdFile<'_>> {
        match self.files.get(&file) {
            Some(text) => Ok(UcdFile::new(file.path(), text)),
            None => Err(Error::MissingInputFile { path: file.path().into() }),
        }
    }
}
