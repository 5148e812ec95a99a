// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Shared test plumbing.
//!
//! Since [`Parser`](adaptar::parser::Parser) dispatches to handler closures rather than
//! collecting a result set, most tests record what happened into a shared [`Log`] and assert on
//! its contents afterwards.

use std::cell::RefCell;
use std::rc::Rc;

/// A shared, growable record of what handlers observed during a parse.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// Build a `Vec<&str>` from string literals, for cleaner test argument lists.
#[macro_export]
macro_rules! args {
    ( $($e:expr),* $(,)? ) => { [ $($e),* ] };
}
