// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Numeric-fallback classification, grounded on `original_source/inc/argum/tokenizer.h`'s
//! `matchNumber` (there backed by a full-string `strtoll`/`strtold` consumption check).
//!
//! A tokenizer argument that *looks like* an option (because it starts with a registered prefix
//! character, e.g. `-2` or `-1e10`) is instead classed as a plain [`Argument`](crate::token::Token)
//! token when the whole string parses as an integer or floating-point literal — negative option
//! names being vanishingly rare, and negative numbers being common positional input.

/// Returns true if `s` parses, in its entirety, as an integer or floating-point literal.
///
/// Accepts an optional leading sign, then either a `0x`/`0X` hex integer, a `0o`/`0O` octal
/// integer, a `0b`/`0B` binary integer, or a decimal integer/float (with optional fractional part
/// and/or exponent, matching what `strtold` would consume).
pub fn looks_like_number(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(oct) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        return !oct.is_empty() && oct.chars().all(|c| ('0'..='7').contains(&c));
    }
    if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        return !bin.is_empty() && bin.chars().all(|c| c == '0' || c == '1');
    }
    s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok()
}
