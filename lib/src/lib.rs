// Copyright 2017 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A lightweight, flexible command-line argument parsing library built around a two-stage
//! tokenizer/parser-driver pipeline and an adaptive positional partitioner.
//!
//! Licensed under the MIT license or the Apache license, Version 2.0, at your option.
//!
//! # Documentation
//!
//! Most of this crate's documentation lives in its submodules: [`tokenizer`] and [`registry`]
//! cover raw-argument classification, [`parser`] covers handler dispatch and positional
//! partitioning, and [`validators`] covers the post-parse occurrence-constraint algebra.

#![deny(bare_trait_objects)]

pub mod arguments;
pub mod error;
pub mod numeric;
pub mod options;
pub mod parser;
pub mod partitioner;
pub mod positionals;
pub mod quantifier;
pub mod registry;
pub mod token;
pub mod tokenizer;
pub mod validators;
