// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Tokenizer output types, grounded on `original_source/inc/argum/tokenizer.h`'s
//! `OptionToken`/`ArgumentToken`/`OptionStopToken`/`UnknownOptionToken`/`AmbiguousOptionToken`
//! and `TokenResult`.

/// One classified unit from the raw argument stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A recognized option, by its registry index, the name the user actually typed, and an
    /// optional attached value (`--name=value` or bundled short-option value).
    Option { index: usize, used_name: String, arg_index: usize, attached: Option<&'a str> },
    /// A plain positional argument.
    Argument { value: &'a str, arg_index: usize },
    /// The option-stop marker (e.g. `--`): everything after it is a positional.
    OptionStop { arg_index: usize },
    /// An option-shaped argument that matches no declared name.
    UnknownOption { name: String, arg_index: usize, attached: Option<&'a str> },
    /// A long-option abbreviation that matches more than one declared name equally well.
    AmbiguousOption { name: String, arg_index: usize, candidates: Vec<String> },
}

/// What the tokenizer should do after a handler has examined one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenResult {
    /// Keep tokenizing normally.
    Continue,
    /// Stop after this token has been fully processed (this token counted, rest untouched).
    StopAfter,
    /// Stop before this token is processed at all (it, and everything after it, is untouched).
    StopBefore,
}
