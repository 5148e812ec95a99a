// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Parse errors. A closed enumeration (plus one open arm for application-defined handler
//! errors), grounded on `original_source/inc/argum/adaptive-parser.h`'s typed exception
//! hierarchy (`UnrecognizedOption`, `AmbiguousOption`, `MissingOptionArgument`,
//! `ExtraOptionArgument`, `ExtraPositional`, `ValidationError`), but returned through `Result`
//! rather than thrown, matching how gong models everything as plain data (`lib/src/analysis.rs`)
//! rather than via panics or an external error crate. No `thiserror`: neither gong nor the rest
//! of the corpus reaches for one for a library this close to the bottom of a dependency graph.

use std::error::Error;
use std::fmt;

/// Everything that can go wrong during [`crate::parser::Parser::parse`].
#[derive(Debug)]
pub enum ParseError {
    /// An option-shaped argument matched no declared name.
    UnrecognizedOption { name: String },
    /// A long-option abbreviation matched more than one declared name.
    AmbiguousOption { name: String, candidates: Vec<String> },
    /// A `Required`-argument option occurred with no value attached and no following argument.
    MissingOptionArgument { name: String },
    /// A `None`-argument option was given an attached value (`--flag=x`).
    ExtraOptionArgument { name: String },
    /// More positional values were supplied than any positional/partitioning could absorb.
    ExtraPositional { value: String },
    /// An option or positional occurred more (or fewer) times than its quantifier allows, or a
    /// registered [`crate::validators::Validator`] evaluated to false after parsing completed.
    /// Both conditions are reported through this single generic arm, matching
    /// `original_source`'s `ValidationError`, which carries the same message for either case.
    ValidationFailed { description: String },
    /// An error raised by a user-supplied option or positional handler.
    UserError(Box<dyn Error>),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnrecognizedOption { name } => write!(f, "unrecognized option `{name}`"),
            ParseError::AmbiguousOption { name, candidates } => write!(
                f,
                "ambiguous option `{name}` (candidates: {})",
                candidates.join(", ")
            ),
            ParseError::MissingOptionArgument { name } => {
                write!(f, "option `{name}` requires an argument")
            }
            ParseError::ExtraOptionArgument { name } => {
                write!(f, "option `{name}` does not take an argument")
            }
            ParseError::ExtraPositional { value } => {
                write!(f, "unexpected extra positional argument `{value}`")
            }
            ParseError::ValidationFailed { description } => {
                write!(f, "validation failed: {description}")
            }
            ParseError::UserError(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::UserError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
