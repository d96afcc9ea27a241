//! Character classes of the template grammar.
//!
//! Every character in a template is either *content* (legal inside a literal
//! word), *structural* (drives the grammar), or illegal. The two brace
//! characters are reserved for concept placeholders, which are substituted
//! away before the grammar parser runs, so they must never survive into a
//! template.

/// Characters that drive the grammar and terminate a literal.
pub const STRUCTURAL: [char; 6] = [' ', '(', ')', '[', ']', '|'];

/// Reserved for concept placeholders; illegal in every parsing context.
pub const RESERVED: [char; 2] = ['{', '}'];

/// Punctuation permitted inside a literal word, on top of alphanumerics.
/// Covers dates (`01.02.2023`), clock times (`9:41`), signed numbers and the
/// arithmetic operators the stock canonicalization rules match on.
const WORD_PUNCTUATION: &str = ".,:;?!'\"-_+*/%&@#";

pub const fn is_structural(c: char) -> bool {
    matches!(c, ' ' | '(' | ')' | '[' | ']' | '|')
}

pub const fn is_reserved(c: char) -> bool {
    matches!(c, '{' | '}')
}

pub fn is_content(c: char) -> bool {
    c.is_alphanumeric() || WORD_PUNCTUATION.contains(c)
}

/// Whether `c` may appear anywhere in a template at all.
pub fn is_allowed(c: char) -> bool {
    is_content(c) || is_structural(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_disjoint() {
        for c in STRUCTURAL {
            assert!(!is_content(c), "structural '{c}' must not be content");
        }
        for c in RESERVED {
            assert!(!is_content(c), "reserved '{c}' must not be content");
            assert!(!is_structural(c), "reserved '{c}' must not be structural");
            assert!(!is_allowed(c), "reserved '{c}' must not be allowed");
        }
    }

    #[test]
    fn test_word_characters() {
        for c in "hello".chars() {
            assert!(is_content(c), "'{c}' should be content");
        }
        for c in "01.02.2023".chars() {
            assert!(is_content(c), "'{c}' should be content");
        }
        for c in "9:41".chars() {
            assert!(is_content(c), "'{c}' should be content");
        }
        assert!(is_content('ö'), "non-ascii letters are content");
        assert!(!is_allowed('\t'), "tabs are not part of the alphabet");
        assert!(!is_allowed('\n'), "newlines are not part of the alphabet");
    }
}
