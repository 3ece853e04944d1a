use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn numbers_with_fractions_and_exponents() {
    assert_eq!(
        kinds("1 2.5 .5 1e3 2E-2"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Number(2.5),
            TokenKind::Number(0.5),
            TokenKind::Number(1000.0),
            TokenKind::Number(0.02),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn member_dot_after_integer_is_not_a_fraction() {
    assert_eq!(
        kinds("1.x"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Dot,
            TokenKind::Ident("x".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn exponent_without_digits_is_an_error() {
    let err = lex("1e+").unwrap_err();
    assert!(matches!(err, ExprErrorKind::Parse { offset: 1, .. }), "{err:?}");
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("true false null this new $a _b"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::This,
            TokenKind::New,
            TokenKind::Ident("$a".to_owned()),
            TokenKind::Ident("_b".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strings_decode_escapes() {
    assert_eq!(
        kinds(r#"'it\'s' "a\nb" 'A'"#),
        vec![
            TokenKind::Str("it's".to_owned()),
            TokenKind::Str("a\nb".to_owned()),
            TokenKind::Str("A".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_string_reports_its_start() {
    let err = lex("a + 'abc").unwrap_err();
    assert_eq!(err, ExprErrorKind::parse(4, "unterminated string literal"));
}

#[test]
fn operators_take_the_longest_match() {
    assert_eq!(
        kinds("a===b>>>=c ?? d ... **"),
        vec![
            TokenKind::Ident("a".to_owned()),
            TokenKind::Op("==="),
            TokenKind::Ident("b".to_owned()),
            TokenKind::Op(">>>="),
            TokenKind::Ident("c".to_owned()),
            TokenKind::Op("??"),
            TokenKind::Ident("d".to_owned()),
            TokenKind::Ellipsis,
            TokenKind::Op("**"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_cover_source_bytes() {
    let tokens = lex("ab + 'c'").unwrap();
    let spans: Vec<_> = tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
    assert_eq!(spans, vec![(0, 2), (3, 4), (5, 8), (8, 8)]);
}

#[test]
fn unknown_character_is_rejected() {
    let err = lex("a # b").unwrap_err();
    assert_eq!(err, ExprErrorKind::parse(2, "unexpected character '#'"));
}
