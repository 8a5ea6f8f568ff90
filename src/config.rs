// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use crate::defaults::DefaultRules;
use crate::trie::{TrieConfig, Width};

/// Block sizes per table, picked for where each table's data clusters.
pub struct TrieConfigs {
    /// Nearly every assigned codepoint differs from its neighbours somewhere in the
    /// record, and the SMP is populated almost as densely as the BMP.
    pub properties: TrieConfig,
    /// Decompositions live almost entirely in the BMP, plus the CJK compatibility
    /// supplement in plane 2.
    pub decompositions: TrieConfig,
    /// Keyed by the combining codepoint. Combining marks cluster in a few
    /// blocks, so small BMP blocks pay off.
    pub ligatures: TrieConfig,
}

impl TrieConfigs {
    pub const DEFAULT: Self = Self {
        properties: TrieConfig::new(5, 8, 0x20000, Width::U16, Width::U32),
        decompositions: TrieConfig::new(5, 8, 0x10000, Width::U16, Width::U16),
        ligatures: TrieConfig::new(4, 8, 0x10000, Width::U16, Width::U16),
    };
}

pub struct Config {
    pub ucd_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Forced to IDNA "valid" regardless of its table entry, so that
    /// identifier-style hostnames like `_dmarc` survive.
    pub idna_valid_override: u32,
    pub defaults: &'static DefaultRules,
    pub tries: TrieConfigs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ucd_dir: PathBuf::from("data/ucd"),
            out_dir: PathBuf::from("generated"),
            idna_valid_override: '_' as u32,
            defaults: &DefaultRules::UNICODE_15_1,
            tries: TrieConfigs::DEFAULT,
        }
    }
}
