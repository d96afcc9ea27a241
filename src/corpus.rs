use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::ast::AstNode;
use crate::error::{PhrasegenError, PhrasegenResult};
use crate::expand;
use crate::parser::parse_sentence;

/// A name → replacement-text mapping for `{name}` concept placeholders.
///
/// Substitution is purely textual and happens *before* grammar parsing, so a
/// concept's replacement text may itself contain grammar (`[a|b]`, `(...)`).
/// The mapping is an explicit value handed to each call; nothing about
/// concepts is accumulated inside the corpus.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Concepts {
    data: BTreeMap<String, String>,
}

impl Concepts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N: AsRef<str>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        self.data.insert(name.as_ref().to_string(), value.into());
        self
    }

    pub fn get<N: AsRef<str>>(&self, name: N) -> Option<&str> {
        self.data.get(name.as_ref()).map(String::as_str)
    }

    pub fn contains<N: AsRef<str>>(&self, name: N) -> bool {
        self.data.contains_key(name.as_ref())
    }
}

/// Replaces every `{name}` placeholder in `text` with its definition.
///
/// # Errors
///
/// * [`PhrasegenError::UnknownConcept`] if a placeholder names a concept
///   missing from the mapping.
/// * [`PhrasegenError::UnbalancedConcept`] if a `{` is never closed, a `}`
///   appears without an opener, or a placeholder nests another `{`.
pub fn substitute_concepts(text: &str, concepts: &Concepts) -> PhrasegenResult<String> {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(PhrasegenError::UnbalancedConcept {
                                text: text.to_string(),
                            });
                        }
                        Some(inner) => name.push(inner),
                    }
                }
                let value =
                    concepts
                        .get(&name)
                        .ok_or_else(|| PhrasegenError::UnknownConcept {
                            concept_name: name.clone(),
                        })?;
                output.push_str(value);
            }
            '}' => {
                return Err(PhrasegenError::UnbalancedConcept {
                    text: text.to_string(),
                });
            }
            other => output.push(other),
        }
    }
    Ok(output)
}

/// An intent-keyed collection of parsed sentence templates.
///
/// Each template line is parsed once into an owned [`AstNode`] tree and held
/// under its intent label for the collection's lifetime. Generation walks the
/// trees read-only; surface strings handed out by the corpus are
/// whitespace-trimmed.
///
/// # Examples
///
/// ```
/// use phrasegen::Corpus;
///
/// let mut corpus = Corpus::new();
/// corpus.add_sentence("[hello|hi] (there)", "greeting").unwrap();
///
/// let all: Vec<(String, &str)> = corpus.iter().collect();
/// assert_eq!(all, vec![
///     ("hello there".to_string(), "greeting"),
///     ("hello".to_string(), "greeting"),
///     ("hi there".to_string(), "greeting"),
///     ("hi".to_string(), "greeting"),
/// ]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: IndexMap<String, Vec<AstNode>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one template line and stores the tree under `intent`.
    ///
    /// # Errors
    ///
    /// Returns the parse failure for the line; nothing is stored on failure.
    pub fn add_sentence<T: AsRef<str>, N: AsRef<str>>(
        &mut self,
        template: T,
        intent: N,
    ) -> PhrasegenResult<()> {
        let tree = parse_sentence(template.as_ref())?;
        self.sentences
            .entry(intent.as_ref().to_string())
            .or_default()
            .push(tree);
        Ok(())
    }

    /// Substitutes `{name}` concepts into the template line, then parses and
    /// stores it under `intent`.
    pub fn add_sentence_with_concepts<T: AsRef<str>, N: AsRef<str>>(
        &mut self,
        template: T,
        intent: N,
        concepts: &Concepts,
    ) -> PhrasegenResult<()> {
        let substituted = substitute_concepts(template.as_ref(), concepts)?;
        self.add_sentence(&substituted, intent)
    }

    /// Parses a batch of template lines under one intent. Stops at the first
    /// failing line; earlier lines stay stored.
    pub fn add_sentences<T: AsRef<str>, N: AsRef<str>, I: IntoIterator<Item = T>>(
        &mut self,
        templates: I,
        intent: N,
    ) -> PhrasegenResult<()> {
        let intent = intent.as_ref();
        for template in templates {
            self.add_sentence(template, intent)?;
        }
        Ok(())
    }

    /// Intent labels in insertion order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.sentences.keys().map(String::as_str)
    }

    /// The parsed sentence trees registered under `intent`, if any. This is
    /// the collection a [`crate::Tokenizer`] fit call consumes.
    pub fn sentences<N: AsRef<str>>(&self, intent: N) -> Option<&[AstNode]> {
        self.sentences.get(intent.as_ref()).map(Vec::as_slice)
    }

    /// Exhaustively enumerates every `(surface string, intent)` pair, intent
    /// by intent, sentence by sentence, lazily. The sequence length is
    /// combinatorial in the stored templates; cap consumption externally.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> {
        self.sentences.iter().flat_map(|(intent, trees)| {
            trees.iter().flat_map(move |tree| {
                expand::expansions(tree)
                    .map(move |surface| (surface.trim().to_string(), intent.as_str()))
            })
        })
    }

    /// Draws one surface string from a uniformly random intent, then a
    /// uniformly random sentence of that intent. `None` iff the corpus is
    /// empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(String, &str)> {
        if self.sentences.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.sentences.len());
        let (intent, trees) = self.sentences.get_index(index)?;
        let tree = trees.choose(rng)?;
        Some((
            expand::sample(tree, rng).trim().to_string(),
            intent.as_str(),
        ))
    }

    /// Draws one surface string from a uniformly random sentence of the
    /// given intent.
    ///
    /// # Errors
    ///
    /// Returns [`PhrasegenError::UnknownIntent`] if no sentence was ever
    /// registered under `intent`.
    pub fn sample_intent<N: AsRef<str>, R: Rng + ?Sized>(
        &self,
        intent: N,
        rng: &mut R,
    ) -> PhrasegenResult<String> {
        let intent = intent.as_ref();
        let trees = self
            .sentences
            .get(intent)
            .ok_or_else(|| PhrasegenError::UnknownIntent {
                intent: intent.to_string(),
            })?;
        let surface = trees
            .choose(rng)
            .map_or_else(String::new, |tree| expand::sample(tree, rng));
        Ok(surface.trim().to_string())
    }
}
