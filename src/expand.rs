//! The two generation traversals over a parsed sentence tree.
//!
//! Both are read-only: [`expansions`] walks the tree afresh on every call and
//! yields surface strings lazily, [`sample`] draws exactly one surface string
//! using the caller's randomness source. Every fragment a literal contributes
//! ends in a single separator space; the caller trims the assembled sentence.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::ast::AstNode;

/// Lazily enumerates every surface string the subtree can expand to.
///
/// - `Literal` yields its word plus one trailing space.
/// - `Sentence` and `Choice` yield the component-wise Cartesian product of
///   their children, in child order.
/// - `Choices` yields each branch's expansions in declared order.
/// - `Optional` yields the Cartesian product of its children followed by one
///   empty string; an empty `(` `)` yields the empty string exactly once.
///
/// Duplicates are not removed. The sequence is finite but combinatorial in
/// the template's nesting and branching, so callers must cap consumption
/// themselves rather than collecting it whole.
pub fn expansions<'a>(node: &'a AstNode) -> Box<dyn Iterator<Item = String> + 'a> {
    match node {
        AstNode::Literal { word } => Box::new(std::iter::once(format!("{word} "))),
        AstNode::Sentence { items } | AstNode::Choice { items } => product(items),
        AstNode::Choices { choices } => Box::new(choices.iter().flat_map(expansions)),
        AstNode::Optional { items } => {
            if items.is_empty() {
                Box::new(std::iter::once(String::new()))
            } else {
                Box::new(product(items).chain(std::iter::once(String::new())))
            }
        }
    }
}

/// Cartesian product of the items' expansions, concatenated component-wise.
/// Re-derives the tail product for every head prefix, which keeps the whole
/// chain lazy and restartable at the cost of re-walking the tree.
fn product<'a>(items: &'a [AstNode]) -> Box<dyn Iterator<Item = String> + 'a> {
    match items.split_first() {
        None => Box::new(std::iter::once(String::new())),
        Some((head, tail)) => Box::new(expansions(head).flat_map(move |prefix| {
            product(tail).map(move |suffix| {
                let mut joined = String::with_capacity(prefix.len() + suffix.len());
                joined.push_str(&prefix);
                joined.push_str(&suffix);
                joined
            })
        })),
    }
}

/// Draws one surface string from the subtree.
///
/// - `Choices` picks one branch uniformly over the branch count, not
///   weighted by each branch's expansion size.
/// - `Optional` flips a fair coin between the empty string and one draw
///   from every child in order, mirroring the sequential composition used
///   by [`expansions`].
/// - A `Choices` that parsed to zero branches yields the empty string.
pub fn sample<R: Rng + ?Sized>(node: &AstNode, rng: &mut R) -> String {
    match node {
        AstNode::Literal { word } => format!("{word} "),
        AstNode::Sentence { items } | AstNode::Choice { items } => sample_each(items, rng),
        AstNode::Choices { choices } => choices
            .choose(rng)
            .map_or_else(String::new, |branch| sample(branch, rng)),
        AstNode::Optional { items } => {
            if items.is_empty() || rng.random_bool(0.5) {
                String::new()
            } else {
                sample_each(items, rng)
            }
        }
    }
}

fn sample_each<R: Rng + ?Sized>(items: &[AstNode], rng: &mut R) -> String {
    items.iter().map(|item| sample(item, rng)).collect()
}
