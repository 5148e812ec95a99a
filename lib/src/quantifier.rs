// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Occurrence quantifiers, grounded on `original_source/inc/argum/data.h`'s `Repeated`.

/// Stands in for an unbounded maximum occurrence count.
pub const UNBOUNDED: u32 = u32::MAX;

/// An allowed occurrence range `[min, max]` for a declared option or positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub min: u32,
    pub max: u32,
}

impl Quantifier {
    /// A new custom quantifier. Panics if `min > max` — a configuration mistake.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "quantifier minimum ({min}) exceeds its maximum ({max})");
        Self { min, max }
    }

    pub const ZERO_OR_ONE: Self = Self { min: 0, max: 1 };
    pub const ONCE: Self = Self { min: 1, max: 1 };
    pub const ZERO_OR_MORE: Self = Self { min: 0, max: UNBOUNDED };
    pub const ONCE_OR_MORE: Self = Self { min: 1, max: UNBOUNDED };

    pub fn is_satisfied_by(&self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }

    pub fn allows_more(&self, count: u32) -> bool {
        count < self.max
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::ZERO_OR_ONE
    }
}
