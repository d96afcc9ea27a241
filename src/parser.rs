use std::iter::Peekable;
use std::str::Chars;

use crate::alphabet;
use crate::ast::AstNode;
use crate::error::{ParseError, ParseErrorKind};

type ParseResult<T> = Result<T, ParseError>;

/// Single-pass character cursor with one character of lookahead.
///
/// Constructs that must leave a terminator for their caller (a literal
/// stopping at `|`, a choice stopping at `]`) simply `peek` without
/// consuming, so no pushback or backtracking is ever needed.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Builds an error carrying the unconsumed remainder of the input.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.chars.clone())
    }

    /// Rejects characters outside the template alphabet. The offending
    /// character has already been consumed, so the error snippet starts
    /// right after it.
    fn check_allowed(&self, c: char) -> ParseResult<()> {
        if alphabet::is_reserved(c) {
            Err(self.error(ParseErrorKind::ReservedCharacter { found: c }))
        } else if !alphabet::is_allowed(c) {
            Err(self.error(ParseErrorKind::IllegalCharacter { found: c }))
        } else {
            Ok(())
        }
    }
}

/// Parses one already-concept-substituted template line into a
/// [`AstNode::Sentence`] tree.
///
/// # Errors
///
/// Fails on a character outside the template alphabet, an unmatched or
/// unexpected closing structural character, or end of input while an
/// `Optional` or `Choices` is still open. The error carries the remaining
/// unconsumed input at the failure point.
pub fn parse_sentence(input: &str) -> Result<AstNode, ParseError> {
    let mut cursor = Cursor::new(input);
    let items = parse_items_toplevel(&mut cursor)?;
    Ok(AstNode::Sentence { items })
}

/// Sentence body: runs to end of input. Closers and `|` have no enclosing
/// construct here, so they fail.
fn parse_items_toplevel(cursor: &mut Cursor<'_>) -> ParseResult<Vec<AstNode>> {
    let mut items = Vec::new();
    while let Some(c) = cursor.bump() {
        cursor.check_allowed(c)?;
        match c {
            ' ' => {}
            '(' => items.push(AstNode::Optional {
                items: parse_optional(cursor)?,
            }),
            '[' => items.push(AstNode::Choices {
                choices: parse_choices(cursor)?,
            }),
            ')' | ']' | '|' => {
                return Err(cursor.error(ParseErrorKind::UnexpectedCharacter { found: c }));
            }
            other => items.push(parse_literal(cursor, other)?),
        }
    }
    Ok(items)
}

/// Optional body: like the sentence body, but terminates on `)` (consumed)
/// and fails if the input ends first.
fn parse_optional(cursor: &mut Cursor<'_>) -> ParseResult<Vec<AstNode>> {
    let mut items = Vec::new();
    while let Some(c) = cursor.bump() {
        cursor.check_allowed(c)?;
        match c {
            ' ' => {}
            ')' => return Ok(items),
            '(' => items.push(AstNode::Optional {
                items: parse_optional(cursor)?,
            }),
            '[' => items.push(AstNode::Choices {
                choices: parse_choices(cursor)?,
            }),
            ']' | '|' => {
                return Err(cursor.error(ParseErrorKind::UnexpectedCharacter { found: c }));
            }
            other => items.push(parse_literal(cursor, other)?),
        }
    }
    Err(cursor.error(ParseErrorKind::UnexpectedEof { expected: ')' }))
}

/// Alternative list: choices separated by `|`, terminated by `]` (consumed).
/// Blank alternatives (`[a||b]`, `[|]`) are skipped rather than kept as
/// empty branches.
fn parse_choices(cursor: &mut Cursor<'_>) -> ParseResult<Vec<AstNode>> {
    let mut choices = Vec::new();
    loop {
        match cursor.peek() {
            None => return Err(cursor.error(ParseErrorKind::UnexpectedEof { expected: ']' })),
            Some(']') => {
                cursor.bump();
                return Ok(choices);
            }
            Some('|') => {
                cursor.bump();
            }
            Some(_) => {
                let items = parse_choice(cursor)?;
                if !items.is_empty() {
                    choices.push(AstNode::Choice { items });
                }
            }
        }
    }
}

/// One alternative: like the sentence body, but stops *without consuming*
/// on `|` or `]`, handing the terminator back to the enclosing `Choices`.
/// End of input also stops the choice; the enclosing `Choices` reports the
/// missing `]`.
fn parse_choice(cursor: &mut Cursor<'_>) -> ParseResult<Vec<AstNode>> {
    let mut items = Vec::new();
    while let Some(c) = cursor.peek() {
        match c {
            ']' | '|' => return Ok(items),
            ' ' => {
                cursor.bump();
            }
            '(' => {
                cursor.bump();
                items.push(AstNode::Optional {
                    items: parse_optional(cursor)?,
                });
            }
            '[' => {
                cursor.bump();
                items.push(AstNode::Choices {
                    choices: parse_choices(cursor)?,
                });
            }
            ')' => {
                cursor.bump();
                return Err(cursor.error(ParseErrorKind::UnexpectedCharacter { found: c }));
            }
            other => {
                cursor.bump();
                cursor.check_allowed(other)?;
                items.push(parse_literal(cursor, other)?);
            }
        }
    }
    Ok(items)
}

/// Accumulates content characters into one word. The structural character
/// that ends the literal is left unconsumed for the caller.
fn parse_literal(cursor: &mut Cursor<'_>, first: char) -> ParseResult<AstNode> {
    let mut word = String::new();
    word.push(first);
    while let Some(c) = cursor.peek() {
        if alphabet::is_structural(c) {
            break;
        }
        cursor.bump();
        cursor.check_allowed(c)?;
        word.push(c);
    }
    Ok(AstNode::Literal {
        word: word.trim().to_string(),
    })
}
