//! Template expansion and vocabulary building for intent-classification
//! corpora.
//!
//! A compact template such as `turn (the) [light|fan] on` parses into an
//! owned tree ([`AstNode`]) which can be expanded exhaustively
//! ([`expansions`]) or sampled randomly ([`sample`]). A [`Corpus`] groups
//! parsed templates under intent labels, and a [`Tokenizer`] builds an
//! integer vocabulary over the templates' words so any text can be encoded
//! as id sequences.

pub mod alphabet;
mod ast;
mod corpus;
mod error;
mod expand;
mod parser;
mod tokenizer;

// Public exports.
pub use ast::AstNode;
pub use corpus::{Concepts, Corpus, substitute_concepts};
pub use error::{ParseError, ParseErrorKind, PhrasegenError, PhrasegenResult};
pub use expand::{expansions, sample};
pub use parser::parse_sentence;
pub use tokenizer::{Tokenizer, UNKNOWN_ID};
