use indexmap::IndexMap;
use regex::Regex;

use crate::ast::AstNode;
use crate::error::{PhrasegenError, PhrasegenResult};

/// Id every out-of-vocabulary token encodes to. Pre-registered for the
/// unknown-sentinel label before any fitting, so real tokens start at 2.
pub const UNKNOWN_ID: u32 = 1;

/// One canonicalization rule: tokens whose start matches `pattern` are
/// registered and looked up as `label` instead of verbatim.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
struct CanonRule {
    label: String,
    pattern: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    regex: Regex,
}

impl CanonRule {
    fn compile(label: &str, pattern: &str) -> PhrasegenResult<Self> {
        // Anchored at the start of the token, like a Python `re.match`.
        let regex =
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                PhrasegenError::InvalidPattern {
                    label: label.to_string(),
                    source,
                }
            })?;
        Ok(Self {
            label: label.to_string(),
            pattern: pattern.to_string(),
            regex,
        })
    }
}

/// Builds an integer vocabulary over the literal words of parsed sentence
/// trees and encodes space-delimited text into id sequences.
///
/// Canonicalization rules are evaluated in declared order against the start
/// of each raw token; the first match substitutes its placeholder label for
/// registration and lookup. Order is load-bearing: a date shape must be
/// declared before a bare integer shape or dates get misclassified as
/// numbers.
///
/// # Examples
///
/// ```
/// use phrasegen::{Tokenizer, parse_sentence, UNKNOWN_ID};
///
/// let mut tokenizer = Tokenizer::new(
///     "__unk__",
///     [("__number__", r"-?\d+")],
/// ).unwrap();
///
/// let sentence = parse_sentence("what is 12 plus 7").unwrap();
/// tokenizer.fit([&sentence]);
///
/// // "12" and "7" collapse to one __number__ token.
/// assert_eq!(tokenizer.encode("what is 99"), vec![2, 3, 4]);
/// assert_eq!(tokenizer.encode("something unseen"), vec![UNKNOWN_ID; 2]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_index: IndexMap<String, u32>,
    next_id: u32,
    unknown: String,
    rules: Vec<CanonRule>,
}

impl Tokenizer {
    /// Creates a tokenizer with the given unknown-sentinel label and ordered
    /// placeholder-label → pattern rules.
    ///
    /// # Errors
    ///
    /// Returns [`PhrasegenError::InvalidPattern`] if a rule's pattern is not
    /// a valid regular expression.
    pub fn new<L, P, I>(unknown: impl Into<String>, rules: I) -> PhrasegenResult<Self>
    where
        L: AsRef<str>,
        P: AsRef<str>,
        I: IntoIterator<Item = (L, P)>,
    {
        let unknown = unknown.into();
        let rules = rules
            .into_iter()
            .map(|(label, pattern)| CanonRule::compile(label.as_ref(), pattern.as_ref()))
            .collect::<PhrasegenResult<Vec<_>>>()?;

        let mut word_index = IndexMap::new();
        word_index.insert(unknown.clone(), UNKNOWN_ID);

        Ok(Self {
            word_index,
            next_id: UNKNOWN_ID + 1,
            unknown,
            rules,
        })
    }

    /// Registers every literal word reachable in the given sentence trees.
    /// Already-seen tokens are left untouched, so fitting twice on the same
    /// collection is a no-op.
    pub fn fit<'a, I: IntoIterator<Item = &'a AstNode>>(&mut self, sentences: I) {
        for sentence in sentences {
            self.fit_sentence(sentence);
        }
    }

    /// Registers every literal word reachable in one sentence tree.
    pub fn fit_sentence(&mut self, sentence: &AstNode) {
        sentence.visit_literals(&mut |word| {
            let canonical = self.canonicalize(word).to_string();
            if !self.word_index.contains_key(&canonical) {
                self.word_index.insert(canonical, self.next_id);
                self.next_id += 1;
            }
        });
    }

    /// Encodes whitespace-delimited text into vocabulary ids. Tokens absent
    /// from the vocabulary map to [`UNKNOWN_ID`]; encoding never fails and
    /// never changes the vocabulary.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        text.split_whitespace()
            .map(|word| {
                let canonical = self.canonicalize(word);
                self.word_index
                    .get(canonical)
                    .copied()
                    .unwrap_or(UNKNOWN_ID)
            })
            .collect()
    }

    /// First-match canonicalization: the label of the first rule whose
    /// pattern matches the start of `word`, else `word` itself.
    fn canonicalize<'a>(&'a self, word: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| rule.regex.is_match(word))
            .map_or(word, |rule| rule.label.as_str())
    }

    /// The canonical-token → id mapping, in insertion (id) order.
    pub fn vocabulary(&self) -> &IndexMap<String, u32> {
        &self.word_index
    }

    /// The unknown-sentinel label supplied at construction.
    pub fn unknown_label(&self) -> &str {
        &self.unknown
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tokenizer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Patterns are stored as text; recompile them on the way in.
        #[derive(serde::Deserialize)]
        struct RuleHelper {
            label: String,
            pattern: String,
        }

        #[derive(serde::Deserialize)]
        struct TokenizerHelper {
            word_index: IndexMap<String, u32>,
            next_id: u32,
            unknown: String,
            rules: Vec<RuleHelper>,
        }

        let helper = TokenizerHelper::deserialize(deserializer)?;
        let rules = helper
            .rules
            .iter()
            .map(|rule| {
                CanonRule::compile(&rule.label, &rule.pattern)
                    .map_err(|e| serde::de::Error::custom(format!("Failed to rebuild rule: {e}")))
            })
            .collect::<Result<Vec<_>, D::Error>>()?;

        Ok(Self {
            word_index: helper.word_index,
            next_id: helper.next_id,
            unknown: helper.unknown,
            rules,
        })
    }
}
