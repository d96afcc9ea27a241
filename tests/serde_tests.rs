#[cfg(feature = "serde")]
mod serde_tests {
    use phrasegen::{AstNode, Corpus, ParseErrorKind, Tokenizer, parse_sentence};

    #[test]
    fn test_ast_roundtrip() {
        let tree = parse_sentence("turn (the) [light|fan] on").unwrap();
        let serialized = serde_json::to_string(&tree).unwrap();
        let deserialized: AstNode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, tree);
    }

    #[test]
    fn test_parse_error_roundtrip() {
        let error = parse_sentence("oops)").unwrap_err();
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: phrasegen::ParseError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, error);
        assert_eq!(
            deserialized.kind,
            ParseErrorKind::UnexpectedCharacter { found: ')' }
        );
    }

    #[test]
    fn test_corpus_roundtrip() {
        let mut corpus = Corpus::new();
        corpus.add_sentence("[hello|hi] (there)", "greeting").unwrap();
        corpus.add_sentence("bye", "farewell").unwrap();

        let serialized = serde_json::to_string(&corpus).unwrap();
        let deserialized: Corpus = serde_json::from_str(&serialized).unwrap();

        let original: Vec<(String, String)> = corpus
            .iter()
            .map(|(s, i)| (s, i.to_string()))
            .collect();
        let restored: Vec<(String, String)> = deserialized
            .iter()
            .map(|(s, i)| (s, i.to_string()))
            .collect();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_tokenizer_roundtrip_recompiles_rules() {
        let mut tokenizer = Tokenizer::new(
            "__unk__",
            [("__time__", r"\d{1,2}:\d{2}"), ("__number__", r"-?\d+")],
        )
        .unwrap();
        tokenizer.fit_sentence(&parse_sentence("meet at 9:41 or 12").unwrap());

        let serialized = serde_json::to_string(&tokenizer).unwrap();
        let deserialized: Tokenizer = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.vocabulary(), tokenizer.vocabulary());
        assert_eq!(deserialized.unknown_label(), "__unk__");
        // The recompiled patterns still canonicalize.
        assert_eq!(
            deserialized.encode("meet at 10:30 or 99"),
            tokenizer.encode("meet at 10:30 or 99")
        );
    }
}
