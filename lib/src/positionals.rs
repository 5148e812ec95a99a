// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Declared positional types, grounded on `original_source/inc/argum/adaptive-parser.h`'s
//! `Positional` builder, generalized from gong's fixed `Policy::{Unlimited, Max}`
//! (`lib/src/positionals.rs`) to a full [`Quantifier`] range so adaptive partitioning (section
//! 4.3/4.4.b) has a minimum as well as a maximum to work with.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use crate::quantifier::Quantifier;

type Handler = Rc<RefCell<dyn FnMut(&str) -> Result<(), Box<dyn Error>>>>;

/// A declared positional slot: a name (used in validator atoms and error messages), an allowed
/// occurrence range, and the handler invoked once per value the partitioner assigns to it.
pub struct DeclaredPositional {
    pub(crate) name: String,
    pub(crate) quantifier: Quantifier,
    pub(crate) handler: Handler,
}

impl DeclaredPositional {
    pub fn new(
        name: impl Into<String>,
        handler: impl FnMut(&str) -> Result<(), Box<dyn Error>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            quantifier: Quantifier::ONCE,
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn occurs(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for DeclaredPositional {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredPositional")
            .field("name", &self.name)
            .field("quantifier", &self.quantifier)
            .finish()
    }
}
