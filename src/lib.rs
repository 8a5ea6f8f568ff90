// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compiles the Unicode Character Database into compact Rust lookup tables.

#![allow(clippy::new_without_default)]

pub mod aggregate;
pub mod apperr;
pub mod compiler;
pub mod config;
pub mod defaults;
pub mod emit;
pub mod idna;
pub mod interner;
pub mod logging;
pub mod names;
pub mod normalization;
pub mod packing;
pub mod record;
pub mod sources;
pub mod superstring;
pub mod trie;
pub mod ucd_file;
