use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<&str> {
    tokenize(source).into_iter().map(|t| t.text).collect()
}

fn single_op(source: &str) -> Option<BinaryOp> {
    match tokenize(source).as_slice() {
        [token] => token.op(),
        _ => None,
    }
}

#[test]
fn test_symbols_and_literals() {
    assert_eq!(
        kinds("(1 + 2.5) * 'a' / \"b\""),
        vec![
            TokenKind::LParen,
            TokenKind::Number,
            TokenKind::Op(BinaryOp::Add),
            TokenKind::Number,
            TokenKind::RParen,
            TokenKind::Op(BinaryOp::Mul),
            TokenKind::Str,
            TokenKind::Op(BinaryOp::Div),
            TokenKind::Str,
        ]
    );
    assert_eq!(texts("[1, 'two']"), vec!["[", "1", ",", "'two'", "]"]);
}

#[test]
fn test_paths() {
    assert_eq!(texts("context.MyProperty"), vec!["context.MyProperty"]);
    assert_eq!(kinds("a.b.c"), vec![TokenKind::Path]);
    assert_eq!(kinds("island"), vec![TokenKind::Path]);
    assert_eq!(kinds("index"), vec![TokenKind::Path]);
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("a if (b) else c"),
        vec![
            TokenKind::Path,
            TokenKind::If,
            TokenKind::LParen,
            TokenKind::Path,
            TokenKind::RParen,
            TokenKind::Else,
            TokenKind::Path,
        ]
    );
    assert_eq!(kinds("iffy elsewhere"), vec![TokenKind::Path, TokenKind::Path]);
}

#[test]
fn test_symbolic_comparisons() {
    assert_eq!(single_op("=="), Some(BinaryOp::Eq));
    assert_eq!(single_op("!="), Some(BinaryOp::NotEq));
    assert_eq!(single_op(">="), Some(BinaryOp::GtEq));
    assert_eq!(single_op("<="), Some(BinaryOp::LtEq));
    assert_eq!(single_op(">"), Some(BinaryOp::Gt));
    assert_eq!(single_op("<"), Some(BinaryOp::Lt));
}

#[test]
fn test_natural_phrases() {
    let cases = [
        ("equals", BinaryOp::Eq),
        ("equal to", BinaryOp::Eq),
        ("is equal to", BinaryOp::Eq),
        ("not equal to", BinaryOp::NotEq),
        ("is not equal to", BinaryOp::NotEq),
        ("is not", BinaryOp::NotEq),
        ("greater than", BinaryOp::Gt),
        ("is greater than", BinaryOp::Gt),
        ("less than", BinaryOp::Lt),
        ("is less than", BinaryOp::Lt),
        ("greater than or equal to", BinaryOp::GtEq),
        ("greater or equal to", BinaryOp::GtEq),
        ("is greater than or equal to", BinaryOp::GtEq),
        ("is greater or equal to", BinaryOp::GtEq),
        ("less than or equal to", BinaryOp::LtEq),
        ("less or equal to", BinaryOp::LtEq),
        ("is less than or equal to", BinaryOp::LtEq),
        ("is less or equal to", BinaryOp::LtEq),
        ("not in", BinaryOp::NotIn),
        ("and", BinaryOp::And),
        ("or", BinaryOp::Or),
        ("in", BinaryOp::In),
    ];
    for (source, expected) in cases {
        assert_eq!(single_op(source), Some(expected), "phrase `{source}`");
    }
}

#[test]
fn test_phrase_text_spans_words() {
    assert_eq!(
        texts("x is  greater than 5"),
        vec!["x", "is  greater than", "5"]
    );
}

#[test]
fn test_phrase_does_not_split_words() {
    assert_eq!(
        kinds("value equals nothing"),
        vec![
            TokenKind::Path,
            TokenKind::Op(BinaryOp::Eq),
            TokenKind::Path,
        ]
    );
    assert_eq!(
        kinds("a or b"),
        vec![TokenKind::Path, TokenKind::Op(BinaryOp::Or), TokenKind::Path]
    );
}

#[test]
fn test_incomplete_comparison_words_are_paths() {
    assert_eq!(single_op("is"), None);
    assert_eq!(single_op("greater"), None);
    assert_eq!(single_op("less"), None);
    assert_eq!(
        kinds("x is greater 5"),
        vec![
            TokenKind::Path,
            TokenKind::Path,
            TokenKind::Path,
            TokenKind::Number,
        ]
    );
    assert_eq!(single_op("is not"), Some(BinaryOp::NotEq));
    assert_eq!(single_op("is in"), Some(BinaryOp::In));
    assert_eq!(
        kinds("less > greater"),
        vec![TokenKind::Path, TokenKind::Op(BinaryOp::Gt), TokenKind::Path]
    );
}

#[test]
fn test_permissive_drops_unknown_input() {
    assert_eq!(texts("1 # 2 $"), vec!["1", "2"]);
}

#[test]
fn test_strict_rejects_unknown_input() {
    let err = tokenize_strict("1 + 2 # 3").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::new(
            SyntaxErrorKind::UnrecognizedInput { found: "#".into() },
            3
        )
    );
    assert_eq!(tokenize_strict("1 equals 2").unwrap().len(), 3);
}

#[test]
fn test_sanitize_quotes() {
    assert_eq!(sanitize("‘a’ + “b”"), "'a' + \"b\"");
    assert!(matches!(sanitize("plain"), Cow::Borrowed("plain")));
}
