use serde_json::json;

use super::*;
use crate::template::dsl;
use crate::template::error::CompileErrorKind;

fn text(src: &str) -> Attribute<Value> {
    classify(&AttrValue::Text(src.to_owned())).unwrap()
}

fn lit(v: impl Into<Value>) -> Attribute<Value> {
    Attribute::Literal(v.into())
}

#[test]
fn booleans_and_decimals_are_literals() {
    assert_eq!(text("true"), lit(true));
    assert_eq!(text("false"), lit(false));
    assert_eq!(text("42"), lit(42.0));
    assert_eq!(text("-1.5"), lit(-1.5));
    assert_eq!(text("007"), lit(7.0));
}

#[test]
fn near_numbers_stay_expressions() {
    for src in ["1.", ".5", "1e3", "+1", "- 1", "0x10", "1_000"] {
        assert_eq!(text(src), Attribute::dynamic(src), "{src}");
    }
}

#[test]
fn quoted_strings() {
    assert_eq!(text("'hello'"), lit("hello"));
    assert_eq!(text(r"'it\'s'"), lit("it's"));
    assert_eq!(text("''"), lit(""));
    assert_eq!(text(r#""a\nb""#), lit("a\nb"));
    assert_eq!(text(r#""""#), lit(""));
}

#[test]
fn everything_else_is_deferred() {
    assert_eq!(text("user.name"), Attribute::dynamic("user.name"));
    assert_eq!(text("'a' + b"), Attribute::dynamic("'a' + b"));
    assert_eq!(text("'"), Attribute::dynamic("'"));
    assert_eq!(text("{opacity: 0}"), Attribute::dynamic("{opacity: 0}"));
}

#[test]
fn bad_double_quoted_strings_are_rejected() {
    let err = classify(&AttrValue::Text(r#""\x""#.to_owned())).unwrap_err();
    assert!(err.starts_with("invalid double-quoted string"), "{err}");
}

#[test]
fn raw_values_pass_through() {
    assert_eq!(classify(&AttrValue::Raw(json!(true))).unwrap(), lit(true));
    assert_eq!(
        classify(&AttrValue::Raw(json!({"opacity": 1}))).unwrap(),
        lit(Value::from(json!({"opacity": 1})))
    );
}

fn tag_of(node: crate::template::ast::Node) -> Tag {
    match node {
        crate::template::ast::Node::Tag(tag) => tag,
        other => panic!("expected tag, got {other:?}"),
    }
}

#[test]
fn extract_filters_and_keeps_the_last_duplicate() {
    let tag = tag_of(
        dsl::tag("text")
            .attr("text", "'a'")
            .attr("onclick", "go()")
            .attr("text", "'b'")
            .build(),
    );
    let attrs = extract(&tag, |name| name == "text").unwrap();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs["text"], lit("b"));
}

#[test]
fn filtered_attributes_are_never_classified() {
    let tag = tag_of(dsl::tag("text").attr("junk", r#""\x""#).build());
    assert!(extract(&tag, |_| false).unwrap().is_empty());
}

#[test]
fn extract_errors_point_at_the_attribute_line() {
    let tag = tag_of(
        dsl::tag("text")
            .line(12)
            .attr("text", r#""\q""#)
            .build(),
    );
    let err = extract(&tag, |_| true).unwrap_err();
    assert_eq!(err.line, 12);
    assert!(matches!(
        err.kind,
        CompileErrorKind::InvalidAttributeType { ref tag, ref name, .. }
            if tag == "text" && name == "text"
    ));
}
