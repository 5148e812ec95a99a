// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Adaptive positional partitioning, end to end.

mod common;

use adaptar::error::ParseError;
use adaptar::parser::{Parser, Settings};
use adaptar::positionals::DeclaredPositional;
use adaptar::quantifier::Quantifier;

use common::Log;

fn build(log: &Log) -> Parser {
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("foo", move |v| {
            l.push(format!("foo({v})"));
            Ok(())
        })
        .occurs(Quantifier::ONCE),
    );
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("bar", move |v| {
            l.push(format!("bar({v})"));
            Ok(())
        })
        .occurs(Quantifier::ZERO_OR_MORE),
    );
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("baz", move |v| {
            l.push(format!("baz({v})"));
            Ok(())
        })
        .occurs(Quantifier::ONCE),
    );
    parser
}

#[test]
fn greedy_partition_gives_the_middle_slot_everything_it_can_spare() {
    let log = Log::new();
    let parser = build(&log);
    parser.parse(&args!["a", "b", "c", "d"]).unwrap();
    assert_eq!(log.entries(), vec!["foo(a)", "bar(b)", "bar(c)", "baz(d)"]);
}

#[test]
fn too_few_values_to_satisfy_a_later_minimum_is_a_validation_error() {
    // `baz` here requires exactly two values, so `minimum_sequence_size` (1 + 0 + 2 = 3) exceeds
    // the two values on the command line, and the partitioner falls back to handing every slot
    // its bare minimum (`foo`=1, `bar`=0, `baz`=2) — `baz` is left one short.
    let log = Log::new();
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("foo", move |v| {
            l.push(format!("foo({v})"));
            Ok(())
        })
        .occurs(Quantifier::ONCE),
    );
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("bar", move |v| {
            l.push(format!("bar({v})"));
            Ok(())
        })
        .occurs(Quantifier::ZERO_OR_MORE),
    );
    let l = log.clone();
    parser.add_positional(
        DeclaredPositional::new("baz", move |v| {
            l.push(format!("baz({v})"));
            Ok(())
        })
        .occurs(Quantifier::new(2, 2)),
    );

    let err = parser.parse(&args!["a", "b"]).unwrap_err();
    match err {
        ParseError::ValidationFailed { description } => assert!(description.contains("baz")),
        other => panic!("expected a validation error naming `baz`, got {other:?}"),
    }
}

#[test]
fn exact_minimum_leaves_nothing_for_the_unlimited_middle_slot() {
    let log = Log::new();
    let parser = build(&log);
    parser.parse(&args!["a", "d"]).unwrap();
    assert_eq!(log.entries(), vec!["foo(a)", "baz(d)"]);
}

#[test]
fn a_value_beyond_every_slot_is_an_extra_positional() {
    let parser = Parser::new(Settings::common_unix());
    let log = Log::new();
    let l = log.clone();
    parser.add_positional(DeclaredPositional::new("only", move |v| {
        l.push(v.to_string());
        Ok(())
    }));
    let err = parser.parse(&args!["a", "b"]).unwrap_err();
    assert!(matches!(err, ParseError::ExtraPositional { value } if value == "b"));
}

#[test]
fn parse_until_unknown_treats_an_extra_positional_as_a_stop_not_an_error() {
    let parser = Parser::new(Settings::common_unix());
    let log = Log::new();
    let l = log.clone();
    parser.add_positional(DeclaredPositional::new("only", move |v| {
        l.push(v.to_string());
        Ok(())
    }));
    let tail = parser.parse_until_unknown(&args!["a", "b", "c"]).unwrap();
    assert_eq!(log.entries(), vec!["a"]);
    assert_eq!(tail, vec!["b".to_string(), "c".to_string()]);
}
