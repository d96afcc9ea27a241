/// One node of a parsed sentence template.
///
/// The tree is owned top-down: every variant holds its children by value,
/// there are no parent pointers and no sharing between parents. A tree is
/// built once by the parser and never mutated afterwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// Top-level (or nested) sequential composition of items.
    Sentence { items: Vec<AstNode> },
    /// A single word. Never empty, never contains whitespace or a
    /// structural character.
    Literal { word: String },
    /// A sub-sequence that may be elided entirely: `(...)`.
    Optional { items: Vec<AstNode> },
    /// Mutually exclusive alternatives: `[a|b|c]`. Children are
    /// exclusively `Choice` nodes.
    Choices { choices: Vec<AstNode> },
    /// One alternative inside a `Choices`.
    Choice { items: Vec<AstNode> },
}

impl AstNode {
    /// The node's ordered children. Empty for literals.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Sentence { items } | Self::Optional { items } | Self::Choice { items } => items,
            Self::Choices { choices } => choices,
            Self::Literal { .. } => &[],
        }
    }

    /// Calls `visit` with every literal word reachable in this subtree, in
    /// depth-first order. This is the tokenizer's fit traversal.
    pub fn visit_literals<F: FnMut(&str)>(&self, visit: &mut F) {
        match self {
            Self::Literal { word } => visit(word),
            Self::Sentence { .. } | Self::Optional { .. } | Self::Choices { .. } | Self::Choice { .. } => {
                for child in self.children() {
                    child.visit_literals(visit);
                }
            }
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Sentence { .. } => "Sentence",
            Self::Literal { .. } => "Literal",
            Self::Optional { .. } => "Optional",
            Self::Choices { .. } => "Choices",
            Self::Choice { .. } => "Choice",
        }
    }

    fn fmt_subtree(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        for _ in 0..depth {
            write!(f, "   |")?;
        }
        match self {
            Self::Literal { word } => write!(f, "-> {}({})", self.label(), word)?,
            Self::Sentence { .. } | Self::Optional { .. } | Self::Choices { .. } | Self::Choice { .. } => {
                write!(f, "-> {}()", self.label())?;
            }
        }
        for child in self.children() {
            writeln!(f)?;
            child.fmt_subtree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Multi-line tree dump, one node per line, children indented under their
/// parent. Debugging aid only; the shape is not a stable interface.
impl std::fmt::Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_subtree(f, 0)
    }
}
