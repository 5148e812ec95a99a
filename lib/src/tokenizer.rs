// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Raw-argument classification, a generalization of gong's `lib/src/engine.rs`
//! (`get_basic_arg_type_standard`, `split_long_components`, `find_name_match`) from a hardcoded
//! `-`/`--` split to an arbitrary [`crate::registry::Registry`], following
//! `original_source/inc/argum/tokenizer.h`'s `tokenize`/`handleLongPrefix`/`handleShortPrefix`/
//! `handleShortOption`/`handleMultiShortOption` algorithms, including multi-character short names
//! and the "must match exact" ambiguity rule between a single-character short and an abbreviated
//! multi-character short sharing the same leading letter (spec section 9's Open Question).

use std::borrow::Cow;

use crate::numeric::looks_like_number;
use crate::registry::{NameMatch, PrefixKind, Registry};
use crate::token::{Token, TokenResult};

/// Tokenize `args` against `registry`, invoking `handler` for each classified token in order.
///
/// `handler` returns a [`TokenResult`] controlling whether tokenization continues. Returns
/// whatever arguments were left unprocessed because the handler asked to stop early (empty if
/// the handler never asked to stop). A stop requested partway through a bundle of short options
/// (e.g. `-vqf` stopped after `-v`) yields a synthesized first tail entry (`-qf`) that is not a
/// literal slice of any input argument, hence `Cow` rather than a plain borrow.
pub fn tokenize<'a>(
    registry: &Registry,
    args: &'a [impl AsRef<str>],
    mut handler: impl FnMut(Token<'a>) -> TokenResult,
) -> Vec<Cow<'a, str>> {
    let mut past_option_stop = false;
    let mut i = 0;
    while i < args.len() {
        let arg: &'a str = args[i].as_ref();

        if past_option_stop {
            match handler(Token::Argument { value: arg, arg_index: i }) {
                TokenResult::Continue => {}
                TokenResult::StopAfter => return tail_from(args, i + 1),
                TokenResult::StopBefore => return tail_from(args, i),
            }
            i += 1;
            continue;
        }

        if registry.settings.option_stops.iter().any(|m| m == arg) {
            let result = handler(Token::OptionStop { arg_index: i });
            past_option_stop = true;
            match result {
                TokenResult::Continue => {}
                TokenResult::StopAfter => return tail_from(args, i + 1),
                TokenResult::StopBefore => return tail_from(args, i),
            }
            i += 1;
            continue;
        }

        let outcome = match registry.find_prefix(arg) {
            Some((prefix, _, kind)) if prefix.len() == arg.len() => {
                // The entire argument is just a registered prefix (and, since the exact-stop
                // check above already failed, it isn't acting as a stop marker here): treated as
                // a plain positional, matching `tokenizer.h`'s fallthrough when `findResult->size
                // == arg.size()` and the role isn't `OptionStop`.
                let _ = kind;
                dispatch_single(handler(Token::Argument { value: arg, arg_index: i }))
            }
            Some((prefix, prefix_id, kind)) if kind.contains(PrefixKind::LONG) => {
                dispatch_single(handler(classify_long(registry, arg, prefix, prefix_id, i)))
            }
            Some((prefix, prefix_id, kind)) if kind.contains(PrefixKind::SHORT) => {
                handle_short(registry, arg, prefix, prefix_id, i, &mut handler)
            }
            _ => dispatch_single(handler(Token::Argument { value: arg, arg_index: i })),
        };

        match outcome {
            Outcome::Continue => {}
            Outcome::StopFull => return tail_from(args, i + 1),
            Outcome::StopNone => return tail_from(args, i),
            Outcome::StopPartial(synthesized) => {
                let mut out = vec![Cow::Owned(synthesized)];
                out.extend(tail_from(args, i + 1));
                return out;
            }
        }
        i += 1;
    }
    Vec::new()
}

fn tail_from<'a>(args: &'a [impl AsRef<str>], from: usize) -> Vec<Cow<'a, str>> {
    args[from.min(args.len())..].iter().map(|a| Cow::Borrowed(a.as_ref())).collect()
}

/// What the outer loop should do after one raw argument has been fully classified (possibly into
/// several tokens, for a bundle).
enum Outcome {
    Continue,
    /// The whole raw argument was consumed; resume at the next one.
    StopFull,
    /// None of the raw argument was consumed; it (and everything after) goes back in the tail.
    StopNone,
    /// Part of a short-option bundle was consumed; the rest is re-prefixed and goes back in the
    /// tail ahead of the remaining raw arguments.
    StopPartial(String),
}

fn dispatch_single(result: TokenResult) -> Outcome {
    match result {
        TokenResult::Continue => Outcome::Continue,
        TokenResult::StopAfter => Outcome::StopFull,
        TokenResult::StopBefore => Outcome::StopNone,
    }
}

fn classify_long<'a>(registry: &Registry, arg: &'a str, prefix: &str, prefix_id: usize, arg_index: usize) -> Token<'a> {
    let rest = &arg[prefix.len()..];
    let (name, attached) = match registry.value_delimiter(rest) {
        Some((pos, _)) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    if name.is_empty() {
        return Token::Argument { value: arg, arg_index };
    }
    match registry.find_long(prefix_id, name) {
        NameMatch::Exact(index) | NameMatch::Abbreviated(index, _) => {
            Token::Option { index, used_name: format!("{prefix}{name}"), arg_index, attached }
        }
        NameMatch::Ambiguous(candidates) => Token::AmbiguousOption {
            name: format!("{prefix}{name}"),
            arg_index,
            candidates: candidates.into_iter().map(|c| format!("{prefix}{c}")).collect(),
        },
        NameMatch::None => {
            if looks_like_number(arg) {
                Token::Argument { value: arg, arg_index }
            } else {
                Token::UnknownOption { name: format!("{prefix}{name}"), arg_index, attached }
            }
        }
    }
}

/// Classify one short-prefixed raw argument, following `handleShortPrefix`/`handleShortOption`:
/// try a leading single-character short, try an (abbreviated) multi-character short, and if
/// exactly one single-char candidate exists alongside an abbreviated multi-char one, report the
/// ambiguity between bundling and abbreviation rather than silently picking one.
fn handle_short<'a>(
    registry: &Registry,
    arg: &'a str,
    prefix: &str,
    prefix_id: usize,
    arg_index: usize,
    handler: &mut impl FnMut(Token<'a>) -> TokenResult,
) -> Outcome {
    let rest = &arg[prefix.len()..];
    let mut chars = rest.chars();
    let first_char = chars.next().expect("short-prefixed argument has a non-empty tail");
    let has_more = chars.next().is_some();
    let single_match = registry.find_single_short(prefix_id, first_char);

    if has_more || single_match.is_none() {
        if let Some(outcome) = try_multi_short(registry, arg, prefix, rest, prefix_id, arg_index, single_match.is_some(), handler) {
            return outcome;
        }
    }

    if single_match.is_some() {
        return bundle(registry, arg, prefix, prefix_id, arg_index, handler);
    }

    if looks_like_number(arg) {
        dispatch_single(handler(Token::Argument { value: arg, arg_index }))
    } else {
        dispatch_single(handler(Token::UnknownOption { name: format!("{prefix}{rest}"), arg_index, attached: None }))
    }
}

/// Attempt to match `rest` (after splitting off any attached value) against the multi-character
/// short-name table for `prefix_id`. Returns `None` if no multi-short table entry matches at all
/// (the caller then falls back to bundling a single-character short, if one matched).
fn try_multi_short<'a>(
    registry: &Registry,
    arg: &'a str,
    prefix: &str,
    rest: &'a str,
    prefix_id: usize,
    arg_index: usize,
    must_match_exact: bool,
    handler: &mut impl FnMut(Token<'a>) -> TokenResult,
) -> Option<Outcome> {
    let (name, attached) = match registry.value_delimiter(rest) {
        Some((pos, _)) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    if name.is_empty() {
        return Some(dispatch_single(handler(Token::Argument { value: arg, arg_index })));
    }

    match registry.find_multi_short(prefix_id, name) {
        NameMatch::Exact(index) => {
            Some(dispatch_single(handler(Token::Option { index, used_name: format!("{prefix}{name}"), arg_index, attached })))
        }
        NameMatch::Abbreviated(index, matched_key) => {
            if !must_match_exact {
                Some(dispatch_single(handler(Token::Option {
                    index,
                    used_name: format!("{prefix}{name}"),
                    arg_index,
                    attached,
                })))
            } else {
                // Exactly one multi-short abbreviation matches, but a single-character short also
                // exists for the first letter: bundling vs. abbreviation is ambiguous (spec
                // section 9's Open Question).
                let candidates = vec![
                    format!("{prefix}{}", rest.chars().next().unwrap()),
                    format!("{prefix}{matched_key}"),
                ];
                Some(dispatch_single(handler(Token::AmbiguousOption {
                    name: format!("{prefix}{name}"),
                    arg_index,
                    candidates,
                })))
            }
        }
        NameMatch::Ambiguous(mut candidates) => {
            candidates.sort_unstable();
            let mut full: Vec<String> = Vec::with_capacity(candidates.len() + 1);
            if must_match_exact {
                full.push(format!("{prefix}{}", rest.chars().next().unwrap()));
            }
            full.extend(candidates.into_iter().map(|c| format!("{prefix}{c}")));
            Some(dispatch_single(handler(Token::AmbiguousOption {
                name: format!("{prefix}{name}"),
                arg_index,
                candidates: full,
            })))
        }
        NameMatch::None => None,
    }
}

/// Peel single-character short options left to right: each one that bundles with a further
/// declared single-char short emits with no attached value; the first one that doesn't (because
/// the following character isn't a declared single-char short, or there is none) takes the rest
/// of the string as its attached value and ends the bundle.
fn bundle<'a>(
    registry: &Registry,
    arg: &'a str,
    prefix: &str,
    prefix_id: usize,
    arg_index: usize,
    handler: &mut impl FnMut(Token<'a>) -> TokenResult,
) -> Outcome {
    let rest = &arg[prefix.len()..];
    let mut iter = rest.char_indices().peekable();

    loop {
        let (pos, c) = iter.next().expect("bundle() called with a non-empty tail");
        let index = registry
            .find_single_short(prefix_id, c)
            .expect("bundle() only re-enters on characters already known to be declared shorts");
        let used_name = format!("{prefix}{c}");

        let next_is_short = iter
            .peek()
            .map(|&(_, nc)| registry.find_single_short(prefix_id, nc).is_some())
            .unwrap_or(false);

        let (attached, end_byte, bundle_ends) = match iter.peek() {
            Some(&(next_pos, _)) if next_is_short => (None, next_pos, false),
            Some(&(next_pos, _)) => (Some(&rest[next_pos..]), rest.len(), true),
            None => (None, rest.len(), true),
        };

        let result = handler(Token::Option { index, used_name, arg_index, attached });
        match result {
            TokenResult::Continue => {
                if bundle_ends {
                    return Outcome::Continue;
                }
            }
            TokenResult::StopAfter => return finalize_partial(arg, prefix, prefix.len() + end_byte),
            TokenResult::StopBefore => return finalize_partial(arg, prefix, prefix.len() + pos),
        }
    }
}

fn finalize_partial(arg: &str, prefix: &str, consumed: usize) -> Outcome {
    if consumed >= arg.len() {
        Outcome::StopFull
    } else {
        Outcome::StopPartial(format!("{prefix}{}", &arg[consumed..]))
    }
}
