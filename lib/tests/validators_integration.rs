// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A registered validator evaluated once a parse finishes.

mod common;

use adaptar::error::ParseError;
use adaptar::options::{ArgKind, DeclaredOption, OptionNames};
use adaptar::parser::{Parser, Settings};
use adaptar::validators::{one_or_none_of, option_present, or};

fn build() -> Parser {
    let parser = Parser::new(Settings::common_unix());
    for name in ["-a1", "-a2", "-a3", "-b1", "-b2", "-b3"] {
        parser.add_option(DeclaredOption::new(OptionNames::single(name), ArgKind::None, |_| Ok(())));
    }
    let a_group = or(vec![option_present("-a1"), option_present("-a2"), option_present("-a3")]);
    let b_group = or(vec![option_present("-b1"), option_present("-b2"), option_present("-b3")]);
    parser.add_validator(one_or_none_of(vec![a_group, b_group]));
    parser
}

#[test]
fn mixing_both_groups_fails_the_one_or_none_of_validator() {
    let parser = build();
    let err = parser.parse(&args!["-a1", "-b2"]).unwrap_err();
    assert!(matches!(err, ParseError::ValidationFailed { .. }));
}

#[test]
fn staying_within_a_single_group_passes() {
    let parser = build();
    parser.parse(&args!["-a1", "-a2", "-a3"]).unwrap();
}

#[test]
fn using_neither_group_also_passes() {
    let parser = build();
    let empty: [&str; 0] = [];
    parser.parse(&empty).unwrap();
}
