// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Everything that can go wrong while compiling the tables.
//!
//! All of these are fatal: the compiler never writes partial output.

use std::path::PathBuf;
use std::{fmt, io, result};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A declared input file does not exist.
    MissingInputFile { path: PathBuf },
    /// A line has too few fields or a field that doesn't parse.
    MalformedRecord { file: &'static str, line: usize, reason: String },
    /// A classification token has no entry in its name table.
    UnknownEnumValue { file: &'static str, line: usize, property: &'static str, value: String },
    /// Two sources (or two lines) disagree about a field that may only be written once.
    OverlapConflict {
        file: &'static str,
        line: usize,
        codepoint: u32,
        field: &'static str,
        existing: String,
        incoming: String,
    },
    /// An index space or a packed field is too small for the data.
    CapacityExceeded { what: &'static str, value: usize, limit: usize },
    /// The data contradicts a structural assumption of the runtime.
    InvariantViolation { codepoint: u32, reason: String },
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    pub fn capacity(what: &'static str, value: usize, limit: usize) -> Self {
        Self::CapacityExceeded { what, value, limit }
    }

    pub fn invariant(codepoint: u32, reason: impl Into<String>) -> Self {
        Self::InvariantViolation { codepoint, reason: reason.into() }
    }

    /// Returns an error if `value` does not fit below `limit`.
    pub fn check_capacity(what: &'static str, value: usize, limit: usize) -> Result<()> {
        if value < limit { Ok(()) } else { Err(Self::capacity(what, value, limit)) }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingInputFile { path } => {
                write!(f, "missing input file {}", path.display())
            }
            Error::MalformedRecord { file, line, reason } => {
                write!(f, "{file}:{line}: malformed record: {reason}")
            }
            Error::UnknownEnumValue { file, line, property, value } => {
                write!(f, "{file}:{line}: unknown {property} value {value:?}")
            }
            Error::OverlapConflict { file, line, codepoint, field, existing, incoming } => {
                write!(f, "{file}:{line}: conflicting {field} for U+{codepoint:04X}: ")?;
                write!(f, "already {existing}, now {incoming}")
            }
            Error::CapacityExceeded { what, value, limit } => {
                write!(f, "{what} overflows its declared width: {value} >= {limit}")
            }
            Error::InvariantViolation { codepoint, reason } => {
                write!(f, "invariant violated at U+{codepoint:04X}: {reason}")
            }
            Error::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
