// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Packs a set of strings into one buffer that contains each of them.
//!
//! This is the classic greedy approximation of the shortest common superstring:
//! drop strings contained in others, then repeatedly join the pair with the
//! largest suffix/prefix overlap until a single path through all strings remains.

use std::ops::Range;

pub struct Superstring<T> {
    pub buffer: Vec<T>,
    /// Location of each input string, in input order.
    pub spans: Vec<Range<usize>>,
}

impl<T: Copy + Eq + Ord> Superstring<T> {
    pub fn build(strings: &[Vec<T>]) -> Self {
        let kept = drop_contained(strings);

        let mut edges = Vec::with_capacity(kept.len() * kept.len());
        for (a, from) in kept.iter().enumerate() {
            for (b, to) in kept.iter().enumerate() {
                if a != b {
                    edges.push((overlap(from, to), a, b));
                }
            }
        }
        // Largest overlap first. Ties are broken by index to keep the result deterministic.
        edges.sort_by(|x, y| y.0.cmp(&x.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));

        let mut next: Vec<Option<usize>> = vec![None; kept.len()];
        let mut has_prev = vec![false; kept.len()];
        for &(_, start, end) in &edges {
            if next[start].is_none() && !has_prev[end] && !closes_cycle(&next, start, end) {
                next[start] = Some(end);
                has_prev[end] = true;
            }
        }

        let mut buffer = Vec::new();
        let mut current = has_prev.iter().position(|&p| !p);
        let mut prev: Option<usize> = None;
        while let Some(i) = current {
            let skip = prev.map_or(0, |p| overlap(kept[p], kept[i]));
            buffer.extend_from_slice(&kept[i][skip..]);
            prev = Some(i);
            current = next[i];
        }

        let spans = strings
            .iter()
            .map(|s| {
                let start = find(&buffer, s)
                    .unwrap_or_else(|| unreachable!("every input string is on the path"));
                start..start + s.len()
            })
            .collect();

        Self { buffer, spans }
    }
}

/// Sorts by descending length and drops duplicates and strings contained in a longer one.
fn drop_contained<T: Copy + Eq + Ord>(strings: &[Vec<T>]) -> Vec<&[T]> {
    let mut sorted: Vec<&[T]> = strings.iter().map(Vec::as_slice).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let mut kept: Vec<&[T]> = Vec::new();
    for s in sorted {
        if !kept.iter().any(|k| find(k, s).is_some()) {
            kept.push(s);
        }
    }
    kept
}

/// The largest `k < min(a.len(), b.len())` such that the last `k` items of `a`
/// equal the first `k` items of `b`.
pub fn overlap<T: Eq>(a: &[T], b: &[T]) -> usize {
    let max = a.len().min(b.len()).saturating_sub(1);
    (1..=max).rev().find(|&k| a[a.len() - k..] == b[..k]).unwrap_or(0)
}

/// Whether adding the path edge `start -> end` would close a cycle, i.e. whether
/// following the existing path from `end` leads back to `start`.
pub fn closes_cycle(next: &[Option<usize>], start: usize, end: usize) -> bool {
    let mut node = end;
    loop {
        if node == start {
            return true;
        }
        match next[node] {
            Some(n) => node = n,
            None => return false,
        }
    }
}

fn find<T: Eq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
