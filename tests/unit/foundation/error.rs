use super::*;
use crate::expression::error::ExprErrorKind;
use crate::template::error::CompileErrorKind;

#[test]
fn display_prefixes_are_stable() {
    let compile = SceneError::from(CompileError::new(
        CompileErrorKind::UnknownMixin("card".to_owned()),
        7,
    ));
    assert_eq!(compile.to_string(), "compile error: line 7: unknown mixin `card`");

    let expr = SceneError::from(
        ExpressionError::new(ExprErrorKind::UnknownFunction("f".to_owned()), "f(1)")
            .or_line(Some(3)),
    );
    assert_eq!(
        expr.to_string(),
        "expression error: function not found: f in `f(1)` (line 3)"
    );

    assert_eq!(
        SceneError::serde("bad").to_string(),
        "serialization error: bad"
    );
    assert_eq!(
        SceneError::config("threads").to_string(),
        "invalid configuration: threads"
    );
}

#[test]
fn line_is_reported_when_known() {
    let compile = SceneError::from(CompileError::new(
        CompileErrorKind::UnknownComponentKind("div".to_owned()),
        12,
    ));
    assert_eq!(compile.line(), Some(12));

    let expr = SceneError::from(ExpressionError::new(
        ExprErrorKind::ComputedMemberNotAllowed,
        "a[b]",
    ));
    assert_eq!(expr.line(), None);

    assert_eq!(SceneError::from(anyhow::anyhow!("io")).line(), None);
}

#[test]
fn or_line_keeps_the_innermost_line() {
    let e = ExpressionError::new(ExprErrorKind::ComputedMemberNotAllowed, "a[b]")
        .or_line(Some(4))
        .or_line(Some(1));
    assert_eq!(e.line, Some(4));
}
