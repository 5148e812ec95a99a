// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Input argument capture helpers.
//!
//! [`Args`] wraps a set of real or fake input arguments, skipping over the program name the way
//! every caller of [`Parser::parse`](crate::parser::Parser::parse) needs to anyway.
//!
//! This crate parses `&str`, not `OsStr` — a non-lossy capture via `std::env::args()` is used,
//! which panics on non-Unicode input; that tradeoff is appropriate for a parser whose whole design
//! (prefixes, delimiters, numeric fallback) is defined in terms of Unicode scalar values.

/// A captured set of input arguments, with the program name (if any) held separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    args: Vec<String>,
    prog_name: Option<String>,
}

impl Args {
    /// Capture the process's real input arguments.
    pub fn new() -> Self {
        let mut iter = std::env::args();
        let prog_name = iter.next();
        Self { args: iter.collect(), prog_name }
    }

    /// An empty argument set, with no program name.
    pub fn new_empty() -> Self {
        Self { args: Vec::new(), prog_name: None }
    }

    /// Build from an existing vector of arguments (no program name entry expected).
    pub fn from_vec(args: Vec<String>) -> Self {
        Self { args, prog_name: None }
    }

    /// Build from a slice of arguments (no program name entry expected).
    pub fn from_slice(args: &[&str]) -> Self {
        Self { args: args.iter().map(|s| s.to_string()).collect(), prog_name: None }
    }

    /// The captured program name, if this was built from real process arguments.
    pub fn get_prog_name(&self) -> Option<&str> {
        self.prog_name.as_deref()
    }

    /// The arguments to be tokenized/parsed (program name excluded).
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}
