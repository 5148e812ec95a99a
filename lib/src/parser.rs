// Copyright 2018 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The parser driver: dispatches tokens to declared option/positional handlers, performs
//! adaptive positional partitioning, and runs validators after a parse completes.
//!
//! Grounded on `original_source/inc/argum/adaptive-parser.h`'s `BasicAdaptiveParser`/
//! `ParsingState` (`resetOption`, `completeOption`, `completeOptionUsingArgument`,
//! `handlePositional`, `calculateRemainingPositionals`/`countRemainingPositionals`), in the shape
//! of gong's `lib/src/parser.rs` (a `Settings`-holding front door with `parse`/`parse_iter`
//! methods), but replacing gong's `Analysis`-collection model with direct handler dispatch, since
//! that's what the owning specification's external interface requires.

use std::cell::{Cell, RefCell};

use crate::error::ParseError;
use crate::options::{ArgKind, DeclaredOption};
use crate::partitioner::Partitioner;
use crate::positionals::DeclaredPositional;
use crate::registry::Registry;
pub use crate::registry::Settings;
use crate::token::{Token, TokenResult};
use crate::tokenizer;
use crate::validators::{self, ValidationData, Validator};

struct Inner {
    registry: Registry,
    options: Vec<DeclaredOption>,
    positionals: Vec<DeclaredPositional>,
    validators: Vec<Validator>,
}

/// Dispatches raw argument strings to declared option and positional handlers.
///
/// Interior mutability (`RefCell`) is used throughout so that a handler invoked mid-[`parse`]
/// can itself call [`add_option`](Self::add_option)/[`add_positional`](Self::add_positional) —
/// `parse` only ever borrows `&self`, the same "`add` during a const `parse`" shape
/// `original_source` achieves in C++ by having callers capture a separate mutable reference to
/// the parser from within their handler closures. `update_count` invalidates the positional
/// partition cache whenever the declared set changes mid-parse.
pub struct Parser {
    inner: RefCell<Inner>,
    update_count: Cell<u64>,
}

impl Parser {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RefCell::new(Inner {
                registry: Registry::new(settings),
                options: Vec::new(),
                positionals: Vec::new(),
                validators: Vec::new(),
            }),
            update_count: Cell::new(0),
        }
    }

    /// Declare an option. Panics on a duplicate name — a configuration mistake, not a runtime
    /// one.
    ///
    /// When `option`'s quantifier has a nonzero minimum, an `option_occurs_at_least` validator is
    /// registered alongside it, matching `original_source`'s `add(Option)` (`adaptive-parser.h`)
    /// auto-adding `OptionOccursAtLeast(main, min)` whenever `min > 0` — occurrence maximums are
    /// checked eagerly in [`RunState::complete_option`], but minimums, like positional minimums,
    /// can only be known once parsing has finished.
    pub fn add_option(&self, option: DeclaredOption) {
        let mut inner = self.inner.borrow_mut();
        let index = inner.options.len();
        for name in option.names.all().to_vec() {
            inner.registry.add_name(&name, index, option.kind);
        }
        let min = option.quantifier.min;
        let main_name = option.main_name().to_string();
        inner.options.push(option);
        if min > 0 {
            inner.validators.push(validators::option_occurs_at_least(&main_name, min));
        }
        self.update_count.set(self.update_count.get() + 1);
    }

    /// Declare a positional slot, in declaration order (the order partitioning assigns into).
    pub fn add_positional(&self, positional: DeclaredPositional) {
        let mut inner = self.inner.borrow_mut();
        inner.positionals.push(positional);
        self.update_count.set(self.update_count.get() + 1);
    }

    /// Register an occurrence-constraint validator, checked once parsing completes.
    pub fn add_validator(&self, validator: Validator) {
        self.inner.borrow_mut().validators.push(validator);
    }

    /// Parse `args` to completion, dispatching to declared handlers and then running validators.
    pub fn parse(&self, args: &[impl AsRef<str>]) -> Result<(), ParseError> {
        self.run(args, false).map(|_| ())
    }

    /// Parse `args`, stopping at the first unrecognized or ambiguous option instead of erroring,
    /// and returning the unprocessed tail (that token and everything after it) as owned strings.
    /// Validators are not run. Useful for delegating the remainder to a subcommand.
    pub fn parse_until_unknown(&self, args: &[impl AsRef<str>]) -> Result<Vec<String>, ParseError> {
        self.run(args, true).map(|tail| tail.unwrap_or_default())
    }

    fn run(&self, args: &[impl AsRef<str>], stop_on_unknown: bool) -> Result<Option<Vec<String>>, ParseError> {
        let args_str: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let mut state = RunState::new(self);
        let mut error: Option<ParseError> = None;
        let mut stopped_tail: Option<Vec<String>> = None;

        let remaining = tokenizer::tokenize(&self.inner.borrow().registry, &args_str, |token| {
            if error.is_some() {
                return TokenResult::StopBefore;
            }
            match state.handle(self, &args_str, token, stop_on_unknown) {
                Ok(Some(())) => TokenResult::Continue,
                Ok(None) => TokenResult::StopBefore, // stop_on_unknown tripped
                Err(e) => {
                    error = Some(e);
                    TokenResult::StopBefore
                }
            }
        });

        if stop_on_unknown && error.is_none() && state.stopped {
            stopped_tail = Some(remaining.into_iter().map(|s| s.into_owned()).collect());
        }

        if let Some(e) = error {
            return Err(e);
        }

        if let Some(tail) = stopped_tail {
            return Ok(Some(tail));
        }

        if let Some((_, name)) = state.pending_option.take() {
            return Err(ParseError::MissingOptionArgument { name });
        }

        self.check_quantifiers(&state.data)?;

        if !stop_on_unknown {
            let inner = self.inner.borrow();
            for validator in &inner.validators {
                if !validator.evaluate(&state.data) {
                    return Err(ParseError::ValidationFailed { description: validator.describe() });
                }
            }
        }

        Ok(None)
    }

    /// Only positional minimums are checked here. Option maximums are validated eagerly on each
    /// occurrence in [`RunState::complete_option`], matching `original_source`'s
    /// `validateOptionMax` being called from within `completeOption` itself rather than deferred
    /// to end-of-parse; option minimums are enforced by the `option_occurs_at_least` validator
    /// [`add_option`](Self::add_option) registers automatically, run alongside the rest of
    /// `inner.validators` in [`run`](Self::run).
    fn check_quantifiers(&self, data: &ValidationData) -> Result<(), ParseError> {
        let inner = self.inner.borrow();
        for positional in &inner.positionals {
            let count = data.positional_count(positional.name());
            if count < positional.quantifier.min {
                return Err(ParseError::ValidationFailed {
                    description: format!(
                        "positional `{}` requires at least {} value(s), got {}",
                        positional.name(),
                        positional.quantifier.min,
                        count
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for Parser {
    /// A parser configured with [`Settings::common_unix`].
    fn default() -> Self {
        Self::new(Settings::common_unix())
    }
}

/// Transient, per-[`Parser::parse`] state: occurrence counts, the pending deferred-value option
/// (if any), and the adaptive positional cursor/cache.
struct RunState {
    data: ValidationData,
    pending_option: Option<(usize, String)>,
    /// Index of the positional slot currently accepting values.
    cursor: usize,
    /// Cumulative target occurrence count per positional slot, computed once per contiguous run
    /// of positionals (re-derived only when `cached_at_update` goes stale) — not a per-dispatch
    /// decrementing countdown. Compared directly against `consumed[i]`, matching
    /// `original_source`'s `m_positionalSizes`.
    sizes: Vec<u32>,
    cached_at_update: u64,
    consumed: Vec<u32>,
    stopped: bool,
}

impl RunState {
    fn new(parser: &Parser) -> Self {
        let n = parser.inner.borrow().positionals.len();
        Self {
            data: ValidationData::new(),
            pending_option: None,
            cursor: 0,
            sizes: vec![0; n],
            cached_at_update: u64::MAX, // force recompute on first positional
            consumed: vec![0; n],
            stopped: false,
        }
    }

    /// `Ok(Some(()))` to continue, `Ok(None)` to stop without error (unknown-option short
    /// circuit), `Err` for a genuine parse error.
    fn handle(
        &mut self,
        parser: &Parser,
        args_str: &[&str],
        token: Token<'_>,
        stop_on_unknown: bool,
    ) -> Result<Option<()>, ParseError> {
        // A pending required-argument option takes the very next token if (and only if) it is a
        // plain argument; anything else means it never got its value.
        if let Token::Argument { value, .. } = &token {
            if let Some((index, _name)) = self.pending_option.take() {
                self.complete_option(parser, index, Some(value))?;
                return Ok(Some(()));
            }
        } else if let Some((_, name)) = self.pending_option.take() {
            return Err(ParseError::MissingOptionArgument { name });
        }

        match token {
            Token::Argument { value, arg_index } => {
                self.dispatch_positional(parser, args_str, value, arg_index, stop_on_unknown)
            }
            Token::OptionStop { .. } => Ok(Some(())),
            Token::Option { index, used_name, attached, .. } => {
                self.begin_option(parser, index, used_name, attached)?;
                Ok(Some(()))
            }
            Token::UnknownOption { name, .. } => {
                if stop_on_unknown {
                    self.stopped = true;
                    Ok(None)
                } else {
                    Err(ParseError::UnrecognizedOption { name })
                }
            }
            Token::AmbiguousOption { name, candidates, .. } => {
                if stop_on_unknown {
                    self.stopped = true;
                    Ok(None)
                } else {
                    Err(ParseError::AmbiguousOption { name, candidates })
                }
            }
        }
    }

    fn begin_option(
        &mut self,
        parser: &Parser,
        index: usize,
        used_name: String,
        attached: Option<&str>,
    ) -> Result<(), ParseError> {
        let (kind, require_attached) = {
            let inner = parser.inner.borrow();
            (inner.options[index].kind, inner.options[index].require_attached)
        };
        match (kind, attached) {
            (ArgKind::None, Some(_)) => Err(ParseError::ExtraOptionArgument { name: used_name }),
            (ArgKind::None, None) => self.complete_option(parser, index, None),
            (ArgKind::Optional, attached) => self.complete_option(parser, index, attached),
            (ArgKind::Required, Some(value)) => self.complete_option(parser, index, Some(value)),
            (ArgKind::Required, None) => {
                if require_attached {
                    Err(ParseError::MissingOptionArgument { name: used_name })
                } else {
                    self.pending_option = Some((index, used_name));
                    Ok(())
                }
            }
        }
    }

    /// Invoke the handler and, on success, bump its occurrence count. The count is checked
    /// against the declared maximum *before* the handler runs (an over-quota occurrence never
    /// reaches the handler), matching `original_source`'s `validateOptionMax` preceding the
    /// handler dispatch inside `completeOption`/`completeOptionUsingArgument`.
    fn complete_option(&mut self, parser: &Parser, index: usize, value: Option<&str>) -> Result<(), ParseError> {
        let (name, quantifier, handler) = {
            let inner = parser.inner.borrow();
            let option = &inner.options[index];
            (option.main_name().to_string(), option.quantifier, option.handler.clone())
        };
        let count = self.data.option_count(&name);
        if count + 1 > quantifier.max {
            return Err(ParseError::ValidationFailed {
                description: format!("`{name}` may occur at most {} time(s)", quantifier.max),
            });
        }
        (handler.borrow_mut())(value).map_err(ParseError::UserError)?;
        self.data.bump_option(&name);
        Ok(())
    }

    /// Dispatches an `Argument` token to the positional that adaptive partitioning currently
    /// assigns it to. When no positional accepts it: in `stop_on_unknown` mode this signals a
    /// stop (`Ok(None)`), matching spec section 6.3's `parseUntilUnknown` treating `ExtraPositional`
    /// as a non-error alongside unrecognized options; otherwise it is a hard `ExtraPositional`
    /// error, per section 4.4's "Argument" dispatch rule.
    fn dispatch_positional(
        &mut self,
        parser: &Parser,
        args_str: &[&str],
        value: &str,
        arg_index: usize,
        stop_on_unknown: bool,
    ) -> Result<Option<()>, ParseError> {
        let n_positionals = parser.inner.borrow().positionals.len();
        if n_positionals == 0 {
            return self.extra_positional(value, stop_on_unknown);
        }

        if self.cached_at_update != parser.update_count.get() {
            self.recompute_sizes(parser, &args_str[arg_index..]);
        }

        let target = if self.cursor < n_positionals && self.sizes[self.cursor] > self.consumed[self.cursor] {
            Some(self.cursor)
        } else {
            let mut i = self.cursor + 1;
            while i < n_positionals && self.sizes[i] == 0 {
                i += 1;
            }
            if i < n_positionals {
                self.cursor = i;
                Some(i)
            } else {
                None
            }
        };

        let idx = match target {
            Some(i) => i,
            None => return self.extra_positional(value, stop_on_unknown),
        };

        let (name, handler) = {
            let inner = parser.inner.borrow();
            let p = &inner.positionals[idx];
            (p.name().to_string(), p.handler.clone())
        };
        (handler.borrow_mut())(value).map_err(ParseError::UserError)?;
        self.data.bump_positional(&name);
        self.consumed[idx] += 1;
        Ok(Some(()))
    }

    fn extra_positional(&mut self, value: &str, stop_on_unknown: bool) -> Result<Option<()>, ParseError> {
        if stop_on_unknown {
            self.stopped = true;
            Ok(None)
        } else {
            Err(ParseError::ExtraPositional { value: value.to_string() })
        }
    }

    /// Recompute the per-slot target occurrence counts for the rest of the positional run:
    /// greedily partition the total remaining positional-like values (the still-open current
    /// slot's already-seen count, plus a forward lookahead over the rest of the argument stream)
    /// across the current slot's full range (if still open) and every later slot's full range.
    /// Cached until the declared set changes, exactly `calculateRemainingPositionals` in
    /// `original_source` — recomputed once per contiguous positional run, not per value.
    fn recompute_sizes(&mut self, parser: &Parser, args_from_current: &[&str]) {
        let inner = parser.inner.borrow();
        let n = inner.positionals.len();
        let mut partitioner = Partitioner::new();
        let mut slots: Vec<usize> = Vec::new();

        let current_open =
            self.cursor < n && self.consumed[self.cursor] < inner.positionals[self.cursor].quantifier.max;
        if current_open {
            let q = inner.positionals[self.cursor].quantifier;
            partitioner.add_range(q.min, q.max);
            slots.push(self.cursor);
        }
        for i in (self.cursor + 1)..n {
            let q = inner.positionals[i].quantifier;
            partitioner.add_range(q.min, q.max);
            slots.push(i);
        }

        let lookahead = count_remaining_positionals(&inner.registry, &inner.options, args_from_current);
        let already_seen = if current_open { self.consumed[self.cursor] } else { 0 };
        let total = already_seen + lookahead;

        let sizes = partitioner
            .partition(total)
            .unwrap_or_else(|| slots.iter().map(|&i| inner.positionals[i].quantifier.min).collect());

        self.sizes = vec![0; n];
        for (&slot, &size) in slots.iter().zip(sizes.iter()) {
            self.sizes[slot] = size;
        }
        self.cached_at_update = parser.update_count.get();
    }
}

/// Count how many plain positional values remain from `args` onward (which starts at, and
/// includes, the argument currently being dispatched), treating the value consumed by a
/// following `Required`-kind option as not itself a positional. Grounded on
/// `adaptive-parser.h`'s `countRemainingPositionals`.
fn count_remaining_positionals(registry: &Registry, options: &[DeclaredOption], args: &[&str]) -> u32 {
    let mut count = 0u32;
    let mut expects_argument = false;
    tokenizer::tokenize(registry, args, |token| {
        match token {
            Token::Argument { .. } => {
                if expects_argument {
                    expects_argument = false;
                } else {
                    count += 1;
                }
            }
            Token::OptionStop { .. } => {
                expects_argument = false;
            }
            Token::Option { index, attached, .. } => {
                expects_argument = attached.is_none() && options[index].kind == ArgKind::Required;
            }
            Token::UnknownOption { .. } | Token::AmbiguousOption { .. } => {
                expects_argument = false;
            }
        }
        TokenResult::Continue
    });
    count
}
