// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Option dispatch: flags, required arguments, abbreviation, and ambiguity.

mod common;

use adaptar::error::ParseError;
use adaptar::options::{ArgKind, DeclaredOption, OptionNames};
use adaptar::parser::{Parser, Settings};
use adaptar::quantifier::Quantifier;

use common::Log;

#[test]
fn flag_and_required_argument_dispatch_in_order() {
    let log = Log::new();
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_option(
        DeclaredOption::new(OptionNames::single("-f"), ArgKind::None, move |_| {
            l.push("-f");
            Ok(())
        })
        .occurs(Quantifier::ZERO_OR_MORE),
    );
    let l = log.clone();
    parser.add_option(DeclaredOption::new(OptionNames::single("-x"), ArgKind::Required, move |v| {
        l.push(format!("-x({})", v.unwrap()));
        Ok(())
    }));

    parser.parse(&args!["-ffx", "val"]).unwrap();
    assert_eq!(log.entries(), vec!["-f", "-f", "-x(val)"]);
}

#[test]
fn required_argument_option_at_end_of_argv_is_missing_its_argument() {
    let parser = Parser::new(Settings::common_unix());
    parser.add_option(DeclaredOption::new(OptionNames::single("-f"), ArgKind::None, |_| Ok(())));
    parser.add_option(DeclaredOption::new(OptionNames::single("-x"), ArgKind::Required, |_| Ok(())));

    let err = parser.parse(&args!["-f", "-x"]).unwrap_err();
    assert!(matches!(err, ParseError::MissingOptionArgument { name } if name == "-x"));
}

#[test]
fn unambiguous_long_abbreviation_resolves_and_true_ambiguity_is_reported() {
    let log = Log::new();
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_option(DeclaredOption::new(
        OptionNames::single("--foobar"),
        ArgKind::Required,
        move |v| {
            l.push(format!("--foobar({})", v.unwrap()));
            Ok(())
        },
    ));
    parser.add_option(DeclaredOption::new(OptionNames::single("--foorab"), ArgKind::Required, |_| Ok(())));

    let err = parser.parse(&args!["--foo"]).unwrap_err();
    match err {
        ParseError::AmbiguousOption { name, mut candidates } => {
            assert_eq!(name, "--foo");
            candidates.sort();
            assert_eq!(candidates, vec!["--foobar".to_string(), "--foorab".to_string()]);
        }
        other => panic!("expected AmbiguousOption, got {other:?}"),
    }

    parser.parse(&args!["--foob", "a"]).unwrap();
    assert_eq!(log.entries(), vec!["--foobar(a)"]);
}

#[test]
fn require_attached_rejects_the_following_argument_as_a_value() {
    let parser = Parser::new(Settings::common_unix());
    parser.add_option(
        DeclaredOption::new(OptionNames::single("--level"), ArgKind::Required, |_| Ok(()))
            .require_attached(true),
    );

    let err = parser.parse(&args!["--level", "2"]).unwrap_err();
    assert!(matches!(err, ParseError::MissingOptionArgument { name } if name == "--level"));

    let log = Log::new();
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_option(
        DeclaredOption::new(OptionNames::single("--level"), ArgKind::Required, move |v| {
            l.push(format!("--level({})", v.unwrap()));
            Ok(())
        })
        .require_attached(true),
    );
    parser.parse(&args!["--level=2"]).unwrap();
    assert_eq!(log.entries(), vec!["--level(2)"]);
}

#[test]
fn optional_argument_option_completes_silently_with_none_when_nothing_is_attached() {
    let log = Log::new();
    let parser = Parser::new(Settings::common_unix());
    let l = log.clone();
    parser.add_option(DeclaredOption::new(OptionNames::single("--verbose"), ArgKind::Optional, move |v| {
        l.push(format!("--verbose({v:?})"));
        Ok(())
    }));
    parser.parse(&args!["--verbose"]).unwrap();
    assert_eq!(log.entries(), vec!["--verbose(None)"]);
}

#[test]
fn exceeding_the_declared_maximum_occurrence_is_a_validation_error() {
    let parser = Parser::new(Settings::common_unix());
    parser.add_option(
        DeclaredOption::new(OptionNames::single("-v"), ArgKind::None, |_| Ok(()))
            .occurs(Quantifier::ZERO_OR_ONE),
    );
    let err = parser.parse(&args!["-v", "-v"]).unwrap_err();
    assert!(matches!(err, ParseError::ValidationFailed { .. }));
}

#[test]
fn an_option_required_once_that_never_occurs_is_a_validation_error() {
    let parser = Parser::new(Settings::common_unix());
    parser.add_option(
        DeclaredOption::new(OptionNames::single("--name"), ArgKind::Required, |_| Ok(()))
            .occurs(Quantifier::ONCE),
    );
    let empty: [&str; 0] = [];
    let err = parser.parse(&empty).unwrap_err();
    match err {
        ParseError::ValidationFailed { description } => assert!(description.contains("--name")),
        other => panic!("expected a validation error naming `--name`, got {other:?}"),
    }

    let parser = Parser::new(Settings::common_unix());
    parser.add_option(
        DeclaredOption::new(OptionNames::single("--name"), ArgKind::Required, |_| Ok(()))
            .occurs(Quantifier::ONCE),
    );
    parser.parse(&args!["--name=alice"]).unwrap();
}
