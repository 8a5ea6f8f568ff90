// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Two-level block tries over the whole codepoint space.
//!
//! Codepoints below `boundary` are split into small blocks, the sparse
//! remainder into large ones. Each distinct block is stored once in a shared
//! block table, and the block maps hold the offset of a codepoint's block:
//!
//! ```text
//! value(cp) = blocks[map[cp >> shift] + (cp & mask)]
//! ```

use std::collections::HashMap;

use crate::apperr::{Error, Result};

pub const CODEPOINT_COUNT: usize = 0x110000;

/// Width of an emitted integer array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
}

impl Width {
    pub const fn bits(self) -> usize {
        match self {
            Width::U8 => 8,
            Width::U16 => 16,
            Width::U32 => 32,
        }
    }

    pub const fn limit(self) -> u64 {
        1 << self.bits()
    }

    /// Fails if any value doesn't fit into this width.
    pub fn check(self, what: &'static str, values: &[u32]) -> Result<()> {
        let max = values.iter().copied().max().unwrap_or(0) as u64;
        if max < self.limit() {
            Ok(())
        } else {
            Err(Error::capacity(what, max as usize, self.limit() as usize))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieConfig {
    pub bmp_shift: u32,
    pub supp_shift: u32,
    pub boundary: u32,
    /// Width of the values stored in the block table.
    pub value_width: Width,
    /// Width of the offsets stored in the block maps.
    pub map_width: Width,
}

impl TrieConfig {
    pub const fn new(
        bmp_shift: u32,
        supp_shift: u32,
        boundary: u32,
        value_width: Width,
        map_width: Width,
    ) -> Self {
        assert!(bmp_shift > 0 && bmp_shift <= 16 && supp_shift > 0 && supp_shift <= 16);
        assert!(boundary > 0 && boundary < CODEPOINT_COUNT as u32);
        assert!(boundary % (1 << bmp_shift) == 0 && boundary % (1 << supp_shift) == 0);
        Self { bmp_shift, supp_shift, boundary, value_width, map_width }
    }

    pub const fn bmp_block_size(&self) -> usize {
        1 << self.bmp_shift
    }

    pub const fn supp_block_size(&self) -> usize {
        1 << self.supp_shift
    }
}

pub struct Trie {
    pub config: TrieConfig,
    /// Block offsets for codepoints below the boundary, indexed by `cp >> bmp_shift`.
    pub bmp_map: Vec<u32>,
    /// Block offsets for the rest, indexed by `(cp - boundary) >> supp_shift`.
    pub supp_map: Vec<u32>,
    pub blocks: Vec<u32>,
    pub unique_blocks: usize,
}

impl Trie {
    /// `values` must cover every codepoint.
    pub fn build(values: &[u32], config: TrieConfig) -> Self {
        assert_eq!(values.len(), CODEPOINT_COUNT);

        let boundary = config.boundary as usize;
        let mut blocks = Vec::new();
        let mut cache = HashMap::new();
        let bmp_map =
            compress(&values[..boundary], config.bmp_block_size(), &mut blocks, &mut cache);
        let supp_map =
            compress(&values[boundary..], config.supp_block_size(), &mut blocks, &mut cache);
        let unique_blocks = cache.len();

        Self { config, bmp_map, supp_map, blocks, unique_blocks }
    }

    pub fn lookup(&self, cp: u32) -> u32 {
        let c = &self.config;
        let (offset, within) = if cp < c.boundary {
            (self.bmp_map[(cp >> c.bmp_shift) as usize], cp & (c.bmp_block_size() as u32 - 1))
        } else {
            let rel = cp - c.boundary;
            (self.supp_map[(rel >> c.supp_shift) as usize], rel & (c.supp_block_size() as u32 - 1))
        };
        self.blocks[(offset + within) as usize]
    }

    /// Emitted size in bytes.
    pub fn size(&self) -> usize {
        let c = &self.config;
        (self.bmp_map.len() + self.supp_map.len()) * c.map_width.bits() / 8
            + self.blocks.len() * c.value_width.bits() / 8
    }

    /// Checks the declared widths against the actual contents.
    pub fn check_widths(&self, what: &'static str) -> Result<()> {
        self.config.value_width.check(what, &self.blocks)?;
        self.config.map_width.check(what, &self.bmp_map)?;
        self.config.map_width.check(what, &self.supp_map)
    }
}

fn compress<'a>(
    values: &'a [u32],
    block_size: usize,
    blocks: &mut Vec<u32>,
    cache: &mut HashMap<&'a [u32], u32>,
) -> Vec<u32> {
    values
        .chunks(block_size)
        .map(|chunk| {
            *cache.entry(chunk).or_insert_with(|| {
                let offset = blocks.len() as u32;
                blocks.extend_from_slice(chunk);
                offset
            })
        })
        .collect()
}
