// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use fixedbitset::FixedBitSet as BitSet;

use crate::diag::ErrType;
use super::enums::Axis;

/// Check that `words` name every axis of `required` exactly once, and no
/// other axis.
///
/// On success, the words are returned as axes in their original order.
/// Otherwise all illegal, missing and duplicated axes are reported together.
pub fn validate(words: &[(&str, f64)], required: &[Axis]) -> Result<Vec<(Axis, f64)>, ErrType> {
    let mut seen = BitSet::with_capacity(required.len());
    let mut dups = BitSet::with_capacity(required.len());
    let mut illegal: Vec<String> = vec![];
    let mut illegal_dups: Vec<String> = vec![];
    let mut coords = Vec::with_capacity(words.len());

    for &(name, value) in words {
        let slot = Axis::from_name(name)
            .and_then(|ax| required.iter().position(|&r| r == ax).map(|i| (ax, i)));
        match slot {
            Some((ax, i)) => if seen.put(i) {
                dups.insert(i);
            } else {
                coords.push((ax, value));
            },
            None => if !illegal.iter().any(|n| n == name) {
                illegal.push(name.into());
            } else if !illegal_dups.iter().any(|n| n == name) {
                illegal_dups.push(name.into());
            }
        }
    }

    let missing: Vec<Axis> = required.iter().enumerate()
        .filter(|&(i, _)| !seen.contains(i))
        .map(|(_, &ax)| ax)
        .collect();
    // repeated required axes first, then repeated foreign names as written
    let duplicate: Vec<String> = dups.ones()
        .map(|i| required[i].to_string())
        .chain(illegal_dups)
        .collect();

    if illegal.is_empty() && missing.is_empty() && duplicate.is_empty() {
        Ok(coords)
    } else {
        Err(ErrType::InvalidParameters { illegal, missing, duplicate })
    }
}
