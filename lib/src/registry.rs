// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Prefix configuration and the declared-name registry, grounded on
//! `original_source/inc/argum/tokenizer.h`'s `Settings`/`PrefixType`/`BasicTokenizer::add` and on
//! the name-lookup machinery gong's `lib/src/engine.rs` (`find_name_match`) and
//! `lib/src/options.rs` build on top of a hardcoded `-`/`--` split. Here the split is itself
//! configurable, and — per `tokenizer.h` — every declared option name carries its own prefix
//! (`"--verbose"`, `"-v"`, `"-vv"`), so names are partitioned into a long/short-single/short-multi
//! table *per prefix id*, not globally.

use std::collections::HashMap;

use crate::options::ArgKind;

/// What role(s) a registered prefix string plays. A small hand-rolled bitset rather than a
/// dependency on the `bitflags` crate for three bits — gong itself hand-rolls its small
/// enums/sets the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixKind(u8);

impl PrefixKind {
    pub const NONE: Self = Self(0);
    pub const LONG: Self = Self(0b001);
    pub const SHORT: Self = Self(0b010);
    pub const STOP: Self = Self(0b100);

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// User-facing builder describing how the tokenizer recognizes option prefixes, the option-stop
/// marker, and attached-value delimiters, and whether abbreviated long/multi-short options are
/// allowed.
///
/// Grounded on `tokenizer.h`'s `Settings` (`addLongPrefix`/`addShortPrefix`/
/// `addOptionTerminator`/`addValueDelimiter`/`allowAbbreviation`) and its four presets.
#[derive(Debug, Clone)]
pub struct Settings {
    pub(crate) long_prefixes: Vec<String>,
    pub(crate) short_prefixes: Vec<String>,
    pub(crate) option_stops: Vec<String>,
    pub(crate) delimiters: Vec<char>,
    pub(crate) allow_abbreviation: bool,
}

impl Settings {
    /// An empty settings object; use the `add_*` builder methods, or start from one of the
    /// presets below and adjust it.
    pub fn new() -> Self {
        Self {
            long_prefixes: Vec::new(),
            short_prefixes: Vec::new(),
            option_stops: Vec::new(),
            delimiters: Vec::new(),
            allow_abbreviation: true,
        }
    }

    pub fn add_long_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.long_prefixes.push(prefix.into());
        self
    }

    pub fn add_short_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.short_prefixes.push(prefix.into());
        self
    }

    pub fn add_option_stop(mut self, marker: impl Into<String>) -> Self {
        self.option_stops.push(marker.into());
        self
    }

    pub fn add_value_delimiter(mut self, delimiter: char) -> Self {
        self.delimiters.push(delimiter);
        self
    }

    pub fn allow_abbreviation(mut self, allow: bool) -> Self {
        self.allow_abbreviation = allow;
        self
    }

    /// `--long`, `-s`, `--` stop, `=` delimiter, abbreviations allowed.
    pub fn common_unix() -> Self {
        Self::new()
            .add_long_prefix("--")
            .add_short_prefix("-")
            .add_option_stop("--")
            .add_value_delimiter('=')
    }

    /// `--long` only (no short options), `--` stop, `=` delimiter.
    pub fn unix_long_only() -> Self {
        Self::new().add_long_prefix("--").add_option_stop("--").add_value_delimiter('=')
    }

    /// `/s` short options only, `:` delimiter, no abbreviation (Windows convention).
    pub fn windows_short() -> Self {
        Self::new().add_short_prefix("/").add_value_delimiter(':').allow_abbreviation(false)
    }

    /// `/long` long options, `:` delimiter, abbreviations allowed.
    pub fn windows_long() -> Self {
        Self::new().add_long_prefix("/").add_value_delimiter(':')
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::common_unix()
    }
}

/// A single registered prefix string, with the stable id used to key its per-prefix name tables
/// and the role bitset it plays (a prefix may be e.g. both `LongPrefix` and `OptionStop`, but
/// never both `LongPrefix` and `ShortPrefix` — checked in [`Registry::new`]).
#[derive(Debug, Clone)]
struct PrefixEntry {
    text: String,
    id: usize,
    kind: PrefixKind,
}

/// Per-parser registry mapping declared option names to their owning index, and exposing
/// longest-prefix-wins matching over the configured prefix strings.
///
/// Grounded on `tokenizer.h`'s `findLongestPrefix`/`BasicTokenizer::add` and the
/// abbreviation-matching helper `findMatchOrMatchingPrefixRange`, generalized from gong's
/// hardcoded `-`/`--` split to the configurable prefix set in [`Settings`]. Each distinct prefix
/// string gets its own id; long names, single-character short names, and multi-character short
/// names are held in separate tables *per prefix id*, exactly as `tokenizer.h`'s `m_longs`/
/// `m_singleShorts`/`m_multiShorts` (each a `FlatMap<PrefixId, FlatMap<...>>`) do.
#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) settings: Settings,
    /// Sorted longest-text-first, for longest-prefix-wins lookup.
    prefixes: Vec<PrefixEntry>,
    long_names: HashMap<usize, HashMap<String, usize>>,
    single_shorts: HashMap<usize, HashMap<char, usize>>,
    single_short_kinds: HashMap<usize, HashMap<char, ArgKind>>,
    multi_shorts: HashMap<usize, HashMap<String, usize>>,
}

/// Result of a name match attempt against either the long-name or multi-short-name table,
/// mirroring `tokenizer.h`'s treatment of abbreviations: either no match, exactly one (possibly
/// abbreviated) match, or more than one equally-valid abbreviation candidate.
pub enum NameMatch<'a> {
    None,
    Exact(usize),
    /// A unique abbreviation match: the matched option index, and the full declared name
    /// (without prefix) it resolved to, needed by multi-short handling to report the
    /// bundling-vs-abbreviation ambiguity (spec section 9's Open Question).
    Abbreviated(usize, &'a str),
    Ambiguous(Vec<&'a str>),
}

impl Registry {
    pub fn new(settings: Settings) -> Self {
        let mut prefixes: Vec<PrefixEntry> = Vec::new();
        let mut next_id = 0usize;
        let mut add = |s: &str, kind: PrefixKind| {
            if let Some(entry) = prefixes.iter_mut().find(|e| e.text == s) {
                assert!(
                    !(entry.kind.contains(PrefixKind::LONG) && kind.contains(PrefixKind::SHORT))
                        && !(entry.kind.contains(PrefixKind::SHORT) && kind.contains(PrefixKind::LONG)),
                    "prefix `{s}` cannot be both a long prefix and a short prefix"
                );
                entry.kind.insert(kind);
            } else {
                prefixes.push(PrefixEntry { text: s.to_string(), id: next_id, kind });
                next_id += 1;
            }
        };
        for p in &settings.long_prefixes {
            add(p, PrefixKind::LONG);
        }
        for p in &settings.short_prefixes {
            add(p, PrefixKind::SHORT);
        }
        for p in &settings.option_stops {
            add(p, PrefixKind::STOP);
        }
        // Longest-prefix-wins requires checking longer candidates first.
        prefixes.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
        Self {
            settings,
            prefixes,
            long_names: HashMap::new(),
            single_shorts: HashMap::new(),
            single_short_kinds: HashMap::new(),
            multi_shorts: HashMap::new(),
        }
    }

    /// Find the longest registered prefix that `arg` starts with, its id, and its role bitset.
    pub(crate) fn find_prefix(&self, arg: &str) -> Option<(&str, usize, PrefixKind)> {
        self.prefixes
            .iter()
            .find(|e| arg.starts_with(e.text.as_str()))
            .map(|e| (e.text.as_str(), e.id, e.kind))
    }

    pub(crate) fn value_delimiter(&self, arg: &str) -> Option<(usize, char)> {
        self.settings
            .delimiters
            .iter()
            .filter_map(|&d| arg.find(d).map(|i| (i, d)))
            .min_by_key(|(i, _)| *i)
    }

    /// Register a declared option name (its prefix included, e.g. `"--verbose"` or `"-v"`) for
    /// option `index`, classifying it by its longest registered prefix.
    ///
    /// Panics (a configuration error, per spec section 7) if no prefix matches, if the tail after
    /// the prefix is empty, or if the name duplicates one already registered under the same
    /// prefix id and table.
    pub(crate) fn add_name(&mut self, name: &str, index: usize, kind: ArgKind) {
        let (prefix_len, prefix_id, prefix_kind) = match self.find_prefix(name) {
            Some((prefix, id, k)) => (prefix.len(), id, k),
            None => panic!("option name `{name}` does not begin with a registered prefix"),
        };
        let tail = &name[prefix_len..];
        assert!(!tail.is_empty(), "option name `{name}` is only a bare prefix");

        if prefix_kind.contains(PrefixKind::LONG) {
            let map = self.long_names.entry(prefix_id).or_default();
            let prior = map.insert(tail.to_string(), index);
            assert!(prior.is_none(), "duplicate option name `{name}`");
        } else if prefix_kind.contains(PrefixKind::SHORT) {
            if tail.chars().count() == 1 {
                let ch = tail.chars().next().unwrap();
                let prior = self.single_shorts.entry(prefix_id).or_default().insert(ch, index);
                assert!(prior.is_none(), "duplicate option name `{name}`");
                self.single_short_kinds.entry(prefix_id).or_default().insert(ch, kind);
            } else {
                let map = self.multi_shorts.entry(prefix_id).or_default();
                let prior = map.insert(tail.to_string(), index);
                assert!(prior.is_none(), "duplicate option name `{name}`");
            }
        } else {
            panic!("option name `{name}` matches a prefix that is neither long nor short");
        }
    }

    pub(crate) fn find_single_short(&self, prefix_id: usize, ch: char) -> Option<usize> {
        self.single_shorts.get(&prefix_id).and_then(|m| m.get(&ch)).copied()
    }

    pub(crate) fn single_short_kind(&self, prefix_id: usize, ch: char) -> Option<ArgKind> {
        self.single_short_kinds.get(&prefix_id).and_then(|m| m.get(&ch)).copied()
    }

    /// Exact-or-abbreviated match of `name` against the long-name table of `prefix_id`.
    pub(crate) fn find_long<'a>(&'a self, prefix_id: usize, name: &str) -> NameMatch<'a> {
        match self.long_names.get(&prefix_id) {
            Some(map) => Self::find_in(map, name, self.settings.allow_abbreviation),
            None => NameMatch::None,
        }
    }

    /// Exact-or-abbreviated match of `name` against the multi-character short-name table of
    /// `prefix_id`.
    pub(crate) fn find_multi_short<'a>(&'a self, prefix_id: usize, name: &str) -> NameMatch<'a> {
        match self.multi_shorts.get(&prefix_id) {
            Some(map) => Self::find_in(map, name, self.settings.allow_abbreviation),
            None => NameMatch::None,
        }
    }

    fn find_in<'a>(map: &'a HashMap<String, usize>, name: &str, allow_abbreviation: bool) -> NameMatch<'a> {
        if let Some(&idx) = map.get(name) {
            return NameMatch::Exact(idx);
        }
        if !allow_abbreviation {
            return NameMatch::None;
        }
        let mut candidates: Vec<&'a str> =
            map.keys().filter(|k| k.starts_with(name)).map(|k| k.as_str()).collect();
        candidates.sort_unstable();
        match candidates.len() {
            0 => NameMatch::None,
            1 => NameMatch::Abbreviated(map[candidates[0]], candidates[0]),
            _ => NameMatch::Ambiguous(candidates),
        }
    }
}
