// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Declared option types, grounded on `original_source/inc/argum/data.h`'s `BasicOptionNames`/
//! `OptionArgument` and `original_source/inc/argum/adaptive-parser.h`'s `Option` builder, in the
//! shape of gong's `lib/src/options.rs` (`LongOption`/`ShortOption`/`OptionType`) generalized to
//! an arbitrary prefix registry and a handler-dispatch driver instead of item collection.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use crate::quantifier::Quantifier;

/// Whether an option takes a value, and if so, whether it is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A bare flag: `--verbose`.
    None,
    /// Takes a value if one is attached (`--level=2`); otherwise fires with none.
    Optional,
    /// Always consumes a value, either attached or as the following argument.
    Required,
}

/// The set of names an option answers to. Non-empty; the first entry is its canonical name, used
/// in error messages and in [`crate::validators`] atoms.
#[derive(Debug, Clone)]
pub struct OptionNames {
    names: Vec<String>,
}

impl OptionNames {
    /// Build from a non-empty list of names. Panics if empty — a configuration mistake.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert!(!names.is_empty(), "an option must have at least one name");
        Self { names }
    }

    /// A single name.
    pub fn single(name: impl Into<String>) -> Self {
        Self { names: vec![name.into()] }
    }

    pub fn main(&self) -> &str {
        &self.names[0]
    }

    pub fn all(&self) -> &[String] {
        &self.names
    }
}

type Handler = Rc<RefCell<dyn FnMut(Option<&str>) -> Result<(), Box<dyn Error>>>>;

/// A fully configured option: its names, how many times it may occur, whether it takes a value,
/// and the handler invoked on each occurrence.
///
/// The handler always receives `Option<&str>`: `None` for [`ArgKind::None`] and unset
/// [`ArgKind::Optional`] occurrences, `Some` otherwise. This single signature (rather than one
/// generic per `ArgKind`, as `original_source`'s `OptionHandlerDeducer` picks via template
/// dispatch) keeps the builder object-safe to store in a homogeneous `Vec` inside
/// [`crate::parser::Parser`].
pub struct DeclaredOption {
    pub(crate) names: OptionNames,
    pub(crate) kind: ArgKind,
    pub(crate) quantifier: Quantifier,
    pub(crate) arg_name: Option<String>,
    pub(crate) require_attached: bool,
    pub(crate) handler: Handler,
}

impl DeclaredOption {
    pub fn new(
        names: OptionNames,
        kind: ArgKind,
        handler: impl FnMut(Option<&str>) -> Result<(), Box<dyn Error>> + 'static,
    ) -> Self {
        Self {
            names,
            kind,
            quantifier: Quantifier::ZERO_OR_MORE,
            arg_name: None,
            require_attached: false,
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn occurs(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    pub fn arg_name(mut self, name: impl Into<String>) -> Self {
        self.arg_name = Some(name.into());
        self
    }

    /// When set, the argument must be attached (`name=value` or `-nvalue`) and may never be
    /// taken from the following argv entry, per spec section 3's "require-attached-argument flag".
    pub fn require_attached(mut self, require: bool) -> Self {
        self.require_attached = require;
        self
    }

    pub fn main_name(&self) -> &str {
        self.names.main()
    }
}

impl std::fmt::Debug for DeclaredOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredOption")
            .field("names", &self.names)
            .field("kind", &self.kind)
            .field("quantifier", &self.quantifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least one name")]
    fn empty_names_panics() {
        OptionNames::new(Vec::<String>::new());
    }

    #[test]
    fn main_name_is_first() {
        let names = OptionNames::new(["verbose", "v"]);
        assert_eq!(names.main(), "verbose");
        assert_eq!(names.all(), &["verbose".to_string(), "v".to_string()]);
    }
}
