// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Occurrence-constraint validators, a direct port of
//! `original_source/inc/argum/validators.h`'s `ItemOccurs`/`CombinedValidator`/`NotValidator`,
//! expressed as a small recursive enum instead of C++ template instantiation — gong has no
//! equivalent of its own, so this module leans entirely on the original.
//!
//! `only_one_of`/`one_or_none_of`/`all_or_none_of` are defined by the exact truth tables in the
//! owning specification's validator-algebra table, not by generalizing a two-operand XOR to N
//! operands (which disagrees with "exactly one" for N > 2) — see DESIGN.md.

use std::collections::HashMap;
use std::rc::Rc;

/// Occurrence counts collected during a parse: one map for options, one for positionals, each
/// keyed by the declared item's main name.
#[derive(Debug, Default, Clone)]
pub struct ValidationData {
    pub option_counts: HashMap<String, u32>,
    pub positional_counts: HashMap<String, u32>,
}

impl ValidationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn option_count(&self, name: &str) -> u32 {
        self.option_counts.get(name).copied().unwrap_or(0)
    }

    pub fn positional_count(&self, name: &str) -> u32 {
        self.positional_counts.get(name).copied().unwrap_or(0)
    }

    pub(crate) fn bump_option(&mut self, name: &str) {
        *self.option_counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn bump_positional(&mut self, name: &str) {
        *self.positional_counts.entry(name.to_string()).or_insert(0) += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Option,
    Positional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cmp {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
    Ne,
}

impl Cmp {
    /// The inverted comparator, mirroring `ItemOccurs::operator!`'s table.
    fn negate(self) -> Self {
        match self {
            Cmp::Ge => Cmp::Lt,
            Cmp::Lt => Cmp::Ge,
            Cmp::Le => Cmp::Gt,
            Cmp::Gt => Cmp::Le,
            Cmp::Eq => Cmp::Ne,
            Cmp::Ne => Cmp::Eq,
        }
    }

    fn holds(self, count: u32, threshold: u32) -> bool {
        match self {
            Cmp::Ge => count >= threshold,
            Cmp::Le => count <= threshold,
            Cmp::Gt => count > threshold,
            Cmp::Lt => count < threshold,
            Cmp::Eq => count == threshold,
            Cmp::Ne => count != threshold,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Cmp::Ge => "at least",
            Cmp::Le => "at most",
            Cmp::Gt => "more than",
            Cmp::Lt => "less than",
            Cmp::Eq => "exactly",
            Cmp::Ne => "not exactly",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    And,
    Or,
    OnlyOneOf,
    OneOrNoneOf,
    AllOrNoneOf,
}

#[derive(Clone)]
enum Node {
    Atom { target: Target, name: Rc<str>, cmp: Cmp, threshold: u32 },
    Not(Box<Node>),
    Combined(Kind, Vec<Node>),
}

/// A validator over [`ValidationData`]: evaluates to true/false, and can describe itself.
#[derive(Clone)]
pub struct Validator {
    node: Node,
}

impl Validator {
    fn atom(target: Target, name: &str, cmp: Cmp, threshold: u32) -> Self {
        Self { node: Node::Atom { target, name: Rc::from(name), cmp, threshold } }
    }

    pub fn evaluate(&self, data: &ValidationData) -> bool {
        Self::eval_node(&self.node, data)
    }

    fn eval_node(node: &Node, data: &ValidationData) -> bool {
        match node {
            Node::Atom { target, name, cmp, threshold } => {
                let count = match target {
                    Target::Option => data.option_count(name),
                    Target::Positional => data.positional_count(name),
                };
                cmp.holds(count, *threshold)
            }
            Node::Not(inner) => !Self::eval_node(inner, data),
            Node::Combined(kind, items) => {
                let true_count = items.iter().filter(|n| Self::eval_node(n, data)).count();
                match kind {
                    Kind::And => true_count == items.len(),
                    Kind::Or => true_count > 0,
                    Kind::OnlyOneOf => true_count == 1,
                    Kind::OneOrNoneOf => true_count <= 1,
                    Kind::AllOrNoneOf => true_count == 0 || true_count == items.len(),
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        Self::describe_node(&self.node)
    }

    fn describe_node(node: &Node) -> String {
        match node {
            Node::Atom { target, name, cmp, threshold } => {
                let what = match target {
                    Target::Option => "option",
                    Target::Positional => "positional",
                };
                format!("{what} `{name}` occurs {} {threshold} time(s)", cmp.describe())
            }
            Node::Not(inner) => format!("not ({})", Self::describe_node(inner)),
            Node::Combined(kind, items) => {
                let joiner = match kind {
                    Kind::And => "all of",
                    Kind::Or => "one or more of",
                    Kind::OnlyOneOf => "exactly one of",
                    Kind::OneOrNoneOf => "at most one of",
                    Kind::AllOrNoneOf => "all or none of",
                };
                let parts: Vec<String> = items.iter().map(Self::describe_node).collect();
                format!("{joiner}: [{}]", parts.join(", "))
            }
        }
    }

    /// The logical negation of this validator, applying De Morgan's laws to combinators and the
    /// comparator-inversion table to atoms, exactly as `NotValidator`/`ItemOccurs::operator!` do.
    pub fn negate(self) -> Self {
        let node = match self.node {
            Node::Atom { target, name, cmp, threshold } => {
                Node::Atom { target, name, cmp: cmp.negate(), threshold }
            }
            Node::Not(inner) => *inner,
            Node::Combined(Kind::And, items) => {
                Node::Combined(Kind::Or, items.into_iter().map(negate_node).collect())
            }
            Node::Combined(Kind::Or, items) => {
                Node::Combined(Kind::And, items.into_iter().map(negate_node).collect())
            }
            other @ Node::Combined(..) => Node::Not(Box::new(other)),
        };
        Self { node }
    }
}

fn negate_node(node: Node) -> Node {
    Validator { node }.negate().node
}

/// Flatten nested combinators of the same kind, mirroring `combine()`'s `tuple_cat`-based
/// associativity flattening (e.g. `and(and(a, b), c)` becomes a single 3-way `and`).
fn flatten(kind: Kind, items: Vec<Validator>) -> Node {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match item.node {
            Node::Combined(k, inner) if k == kind && matches!(kind, Kind::And | Kind::Or) => {
                flat.extend(inner);
            }
            other => flat.push(other),
        }
    }
    Node::Combined(kind, flat)
}

pub fn and(items: Vec<Validator>) -> Validator {
    Validator { node: flatten(Kind::And, items) }
}

pub fn or(items: Vec<Validator>) -> Validator {
    Validator { node: flatten(Kind::Or, items) }
}

pub fn only_one_of(items: Vec<Validator>) -> Validator {
    Validator { node: flatten(Kind::OnlyOneOf, items) }
}

pub fn one_or_none_of(items: Vec<Validator>) -> Validator {
    Validator { node: flatten(Kind::OneOrNoneOf, items) }
}

pub fn all_or_none_of(items: Vec<Validator>) -> Validator {
    Validator { node: flatten(Kind::AllOrNoneOf, items) }
}

pub fn not(validator: Validator) -> Validator {
    validator.negate()
}

macro_rules! atoms {
    ($target:expr, $present:ident, $absent:ident, $at_least:ident, $at_most:ident,
     $more_than:ident, $less_than:ident, $exactly:ident, $not_exactly:ident) => {
        pub fn $present(name: &str) -> Validator {
            Validator::atom($target, name, Cmp::Ge, 1)
        }
        pub fn $absent(name: &str) -> Validator {
            Validator::atom($target, name, Cmp::Eq, 0)
        }
        pub fn $at_least(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Ge, n)
        }
        pub fn $at_most(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Le, n)
        }
        pub fn $more_than(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Gt, n)
        }
        pub fn $less_than(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Lt, n)
        }
        pub fn $exactly(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Eq, n)
        }
        pub fn $not_exactly(name: &str, n: u32) -> Validator {
            Validator::atom($target, name, Cmp::Ne, n)
        }
    };
}

atoms!(
    Target::Option,
    option_present,
    option_absent,
    option_occurs_at_least,
    option_occurs_at_most,
    option_occurs_more_than,
    option_occurs_less_than,
    option_occurs_exactly,
    option_doesnt_occur_exactly
);

atoms!(
    Target::Positional,
    positional_present,
    positional_absent,
    positional_occurs_at_least,
    positional_occurs_at_most,
    positional_occurs_more_than,
    positional_occurs_less_than,
    positional_occurs_exactly,
    positional_doesnt_occur_exactly
);

#[cfg(test)]
mod tests {
    use super::*;

    fn data(opts: &[(&str, u32)]) -> ValidationData {
        let mut d = ValidationData::new();
        for (name, count) in opts {
            for _ in 0..*count {
                d.bump_option(name);
            }
        }
        d
    }

    #[test]
    fn present_and_absent() {
        let d = data(&[("a", 1)]);
        assert!(option_present("a").evaluate(&d));
        assert!(!option_present("b").evaluate(&d));
        assert!(option_absent("b").evaluate(&d));
    }

    #[test]
    fn and_or_basic() {
        let d = data(&[("a", 1), ("b", 1)]);
        assert!(and(vec![option_present("a"), option_present("b")]).evaluate(&d));
        assert!(!and(vec![option_present("a"), option_present("c")]).evaluate(&d));
        assert!(or(vec![option_present("a"), option_present("c")]).evaluate(&d));
    }

    #[test]
    fn only_one_of_requires_exactly_one() {
        let none = data(&[]);
        let one = data(&[("a", 1)]);
        let both = data(&[("a", 1), ("b", 1)]);
        let v = only_one_of(vec![option_present("a"), option_present("b")]);
        assert!(!v.evaluate(&none));
        assert!(v.evaluate(&one));
        assert!(!v.evaluate(&both));
    }

    #[test]
    fn all_or_none_of_both_extremes() {
        let none = data(&[]);
        let both = data(&[("a", 1), ("b", 1)]);
        let one = data(&[("a", 1)]);
        let v = all_or_none_of(vec![option_present("a"), option_present("b")]);
        assert!(v.evaluate(&none));
        assert!(v.evaluate(&both));
        assert!(!v.evaluate(&one));
    }

    #[test]
    fn negation_inverts_atoms() {
        let d = data(&[("a", 2)]);
        let v = not(option_occurs_at_least("a", 3));
        assert!(v.evaluate(&d)); // a occurred < 3 times
    }

    #[test]
    fn negation_applies_de_morgan_to_and() {
        let d = data(&[("a", 1)]);
        let v = not(and(vec![option_present("a"), option_present("b")]));
        // !(a && b) == !a || !b; a present, b absent -> true
        assert!(v.evaluate(&d));
    }

    #[test]
    fn double_negation_is_identity_for_a_combinator() {
        let d = data(&[("a", 1)]);
        let v = only_one_of(vec![option_present("a"), option_present("b")]);
        let twice_negated = not(not(v.clone()));
        assert_eq!(v.evaluate(&d), twice_negated.evaluate(&d));
        let both = data(&[("a", 1), ("b", 1)]);
        assert_eq!(v.evaluate(&both), twice_negated.evaluate(&both));
    }

    #[test]
    fn flattening_merges_nested_and() {
        let inner = and(vec![option_present("a"), option_present("b")]);
        let outer = and(vec![inner, option_present("c")]);
        match outer.node {
            Node::Combined(Kind::And, items) => assert_eq!(items.len(), 3),
            _ => panic!("expected a flattened 3-way And"),
        }
    }
}
