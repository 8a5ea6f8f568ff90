// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Value deduplication with stable, insertion-ordered indices.

use std::collections::HashMap;
use std::hash::Hash;

use crate::apperr::{Error, Result};

/// Assigns each distinct value the index of its first insertion.
///
/// Lookups are hash-keyed, but indices only depend on insertion order,
/// so the output stays deterministic.
pub struct Interner<T> {
    what: &'static str,
    limit: usize,
    values: Vec<T>,
    indices: HashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> Interner<T> {
    /// `limit` is the size of the index space the emitted tables can address.
    pub fn new(what: &'static str, limit: usize) -> Self {
        Self { what, limit, values: Vec::new(), indices: HashMap::new() }
    }

    pub fn intern(&mut self, value: &T) -> Result<u32> {
        if let Some(&index) = self.indices.get(value) {
            return Ok(index);
        }
        Error::check_capacity(self.what, self.values.len(), self.limit)?;
        let index = self.values.len() as u32;
        self.values.push(value.clone());
        self.indices.insert(value.clone(), index);
        Ok(index)
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.values.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}
