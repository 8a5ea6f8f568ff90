// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Line ingestion for the semicolon-delimited UCD text format.

use std::ops::RangeInclusive;

use crate::apperr::{Error, Result};

pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// One source file, borrowed from its loaded contents.
#[derive(Clone, Copy)]
pub struct UcdFile<'a> {
    name: &'static str,
    text: &'a str,
}

impl<'a> UcdFile<'a> {
    pub fn new(name: &'static str, text: &'a str) -> Self {
        Self { name, text }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Yields every non-empty line with its `#` comment stripped and its fields trimmed.
    pub fn records(self) -> impl Iterator<Item = Record<'a>> {
        let file = self.name;
        self.text.lines().enumerate().filter_map(move |(i, line)| {
            let data = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            if data.trim().is_empty() {
                return None;
            }
            Some(Record { file, line: i + 1, fields: data.split(';').map(str::trim).collect() })
        })
    }
}

/// A single data line, split into fields.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub file: &'static str,
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedRecord { file: self.file, line: self.line, reason: reason.into() }
    }

    pub fn unknown(&self, property: &'static str, value: &str) -> Error {
        Error::UnknownEnumValue {
            file: self.file,
            line: self.line,
            property,
            value: value.to_string(),
        }
    }

    pub fn expect_fields(&self, min: usize) -> Result<()> {
        if self.fields.len() < min {
            return Err(self.malformed(format!(
                "expected at least {min} fields, found {}",
                self.fields.len()
            )));
        }
        Ok(())
    }

    pub fn field(&self, index: usize) -> Result<&'a str> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| self.malformed(format!("missing field {index}")))
    }

    /// Like [`Record::field`], but an absent field reads as empty.
    pub fn optional_field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    pub fn codepoint(&self, index: usize) -> Result<u32> {
        let field = self.field(index)?;
        parse_codepoint(field).ok_or_else(|| self.malformed(format!("bad codepoint {field:?}")))
    }

    /// Parses `HEX` or `HEX..HEX`.
    pub fn range(&self, index: usize) -> Result<RangeInclusive<u32>> {
        let field = self.field(index)?;
        parse_range(field).ok_or_else(|| self.malformed(format!("bad codepoint range {field:?}")))
    }

    /// Parses a space-separated codepoint sequence. An empty field is an empty sequence.
    pub fn codepoints(&self, index: usize) -> Result<Vec<u32>> {
        let field = self.field(index)?;
        parse_codepoints(field)
            .ok_or_else(|| self.malformed(format!("bad codepoint sequence {field:?}")))
    }

    pub fn number<T: std::str::FromStr>(&self, index: usize) -> Result<T> {
        let field = self.field(index)?;
        field.parse().map_err(|_| self.malformed(format!("bad number {field:?}")))
    }
}

pub fn parse_codepoint(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || s.len() > 6 {
        return None;
    }
    u32::from_str_radix(s, 16).ok().filter(|&cp| cp <= MAX_CODEPOINT)
}

pub fn parse_range(s: &str) -> Option<RangeInclusive<u32>> {
    match s.split_once("..") {
        Some((first, last)) => {
            let first = parse_codepoint(first)?;
            let last = parse_codepoint(last)?;
            (first <= last).then_some(first..=last)
        }
        None => parse_codepoint(s).map(|cp| cp..=cp),
    }
}

pub fn parse_codepoints(s: &str) -> Option<Vec<u32>> {
    s.split_whitespace().map(parse_codepoint).collect()
}
