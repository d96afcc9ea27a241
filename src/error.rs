pub type PhrasegenResult<T> = std::result::Result<T, PhrasegenError>;

/// Longest remaining-input snippet attached to a parse error before it is
/// cut off with a trailing `...`.
pub(crate) const SNIPPET_CAP: usize = 47;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A character outside the template alphabet.
    IllegalCharacter { found: char },
    /// One of the reserved brace characters, rejected in every context.
    ReservedCharacter { found: char },
    /// A closing bracket or separator with no enclosing construct,
    /// e.g. `)` at the top level of a sentence.
    UnexpectedCharacter { found: char },
    /// Input ended while an `Optional` or `Choices` was still open.
    UnexpectedEof { expected: char },
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalCharacter { found } => {
                write!(f, "symbol '{found}' not allowed")
            }
            Self::ReservedCharacter { found } => {
                write!(f, "reserved symbol '{found}' not allowed")
            }
            Self::UnexpectedCharacter { found } => {
                write!(f, "unexpected '{found}'")
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "expected '{expected}'")
            }
        }
    }
}

impl std::error::Error for ParseErrorKind {}

/// A structured parse failure for one sentence template.
///
/// Carries the failure cause plus the unconsumed remainder of the input at
/// the failure point, truncated to [`SNIPPET_CAP`] characters with a trailing
/// ellipsis when longer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub remaining: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, remaining: impl Iterator<Item = char>) -> Self {
        let mut chars = remaining;
        let mut snippet: String = chars.by_ref().take(SNIPPET_CAP).collect();
        if chars.next().is_some() {
            snippet.push_str("...");
        }
        Self {
            kind,
            remaining: snippet,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. Remaining input: '{}'", self.kind, self.remaining)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[derive(Debug)]
pub enum PhrasegenError {
    /// A sentence template failed to parse.
    Parse(ParseError),
    /// Concept substitution hit a `{name}` with no definition.
    UnknownConcept { concept_name: String },
    /// A concept placeholder was opened but never closed, or closed without
    /// being opened.
    UnbalancedConcept { text: String },
    /// A corpus lookup referenced an intent no sentence was registered under.
    UnknownIntent { intent: String },
    /// A tokenizer canonicalization pattern failed to compile.
    InvalidPattern { label: String, source: regex::Error },
}

impl std::fmt::Display for PhrasegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(parse_error) => {
                write!(f, "{parse_error}")
            }
            Self::UnknownConcept { concept_name } => {
                write!(f, "Concept not defined: {concept_name}")
            }
            Self::UnbalancedConcept { text } => {
                write!(f, "Unbalanced concept braces in: {text}")
            }
            Self::UnknownIntent { intent } => {
                write!(f, "Intent not found: {intent}")
            }
            Self::InvalidPattern { label, source } => {
                write!(f, "Invalid pattern for placeholder '{label}': {source}")
            }
        }
    }
}

impl std::error::Error for PhrasegenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(parse_error) => Some(parse_error),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::UnknownConcept { .. }
            | Self::UnbalancedConcept { .. }
            | Self::UnknownIntent { .. } => None,
        }
    }
}

impl From<ParseError> for PhrasegenError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}
