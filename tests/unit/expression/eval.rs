use super::*;
use crate::expression::parser::parse_expression;
use crate::foundation::value::DataEnv;

fn eval_with(src: &str, data: &DataEnv, opts: &EvalOpts) -> Result<Value, ExprErrorKind> {
    let expr = parse_expression(src, opts.max_depth)?;
    evaluate(&expr, &Scope::new(data), opts)
}

fn eval_in(src: &str, data: &DataEnv) -> Value {
    eval_with(src, data, &EvalOpts::default()).unwrap()
}

fn eval(src: &str) -> Value {
    eval_in(src, &DataEnv::new())
}

fn n(v: f64) -> Value {
    Value::Number(v)
}

fn s(v: &str) -> Value {
    Value::from(v)
}

#[test]
fn arithmetic() {
    assert_eq!(eval("1 + 2 * 3"), n(7.0));
    assert_eq!(eval("(1 + 2) * 3"), n(9.0));
    assert_eq!(eval("7 % 3"), n(1.0));
    assert_eq!(eval("2 ** 10"), n(1024.0));
    assert_eq!(eval("-2 ** 2"), n(4.0));
    assert_eq!(eval("1 / 0"), n(f64::INFINITY));
    assert_eq!(eval("+'3' - 1"), n(2.0));
}

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    assert_eq!(eval("'a' + 1"), s("a1"));
    assert_eq!(eval("1 + '2'"), s("12"));
    assert_eq!(eval("'n=' + null"), s("n=null"));
    assert_eq!(eval("'x' + 0.5"), s("x0.5"));
    assert_eq!(eval("1 + true"), n(2.0));
    assert_eq!(eval("'3' * '4'"), n(12.0));
    assert!(matches!(eval("'x' - 1"), Value::Number(v) if v.is_nan()));
}

#[test]
fn relational_operators() {
    assert_eq!(eval("'b' > 'a'"), Value::Bool(true));
    assert_eq!(eval("'10' < '9'"), Value::Bool(true));
    assert_eq!(eval("10 < '9'"), Value::Bool(false));
    assert_eq!(eval("2 <= 2"), Value::Bool(true));
    // `undefined` coerces to NaN, which is unordered.
    assert_eq!(eval("u < 1"), Value::Bool(false));
    assert_eq!(eval("u >= 1"), Value::Bool(false));
}

#[test]
fn equality_operators() {
    assert_eq!(eval("1 == '1'"), Value::Bool(true));
    assert_eq!(eval("1 === '1'"), Value::Bool(false));
    assert_eq!(eval("null == undefined"), Value::Bool(true));
    assert_eq!(eval("null === undefined"), Value::Bool(false));
    assert_eq!(eval("'a' != 'b'"), Value::Bool(true));
    assert_eq!(eval("1 !== 1"), Value::Bool(false));
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval("0 || 'x'"), s("x"));
    assert_eq!(eval("'y' || nope()"), s("y"));
    assert_eq!(eval("'' && nope()"), s(""));
    assert_eq!(eval("null ?? 5"), n(5.0));
    assert_eq!(eval("0 ?? 5"), n(0.0));
    assert_eq!(eval("!''"), Value::Bool(true));
}

#[test]
fn conditional_picks_one_branch() {
    let data = DataEnv::new().with("a", true);
    assert_eq!(eval_in("a ? 'y' : nope()", &data), s("y"));
    assert_eq!(eval_in("!a ? nope() : 'n'", &data), s("n"));
}

#[test]
fn member_access_reads_request_data() {
    let data = DataEnv::from_json(serde_json::json!({
        "user": {"name": "Ann", "tags": ["a", "b"]}
    }))
    .unwrap();
    assert_eq!(eval_in("user.name", &data), s("Ann"));
    assert_eq!(eval_in("user.tags.length", &data), n(2.0));
    assert_eq!(eval_in("user.name.length", &data), n(3.0));
    assert_eq!(eval_in("user.age", &data), Value::Undefined);
}

#[test]
fn member_of_nullish_depends_on_null_safety() {
    assert_eq!(eval("missing.x"), Value::Undefined);
    assert_eq!(eval("missing.x.y"), Value::Undefined);

    let strict = EvalOpts {
        null_safe_member: false,
        ..EvalOpts::default()
    };
    assert_eq!(
        eval_with("missing.x", &DataEnv::new(), &strict).unwrap_err(),
        ExprErrorKind::NullDereference {
            property: "x".to_owned(),
            object: "undefined",
        }
    );
    let data = DataEnv::new().with("v", Value::Null);
    assert_eq!(
        eval_with("v.x", &data, &strict).unwrap_err(),
        ExprErrorKind::NullDereference {
            property: "x".to_owned(),
            object: "null",
        }
    );
}

#[test]
fn array_and_object_literals() {
    assert_eq!(
        eval("[1,,'2']"),
        Value::Array(vec![n(1.0), Value::Null, s("2")])
    );

    let data = DataEnv::new().with("k", "c").with("b", 2);
    let Value::Object(obj) = eval_in("{a: 1, 'b-x': b, 3: 4, [k]: 5, b}", &data) else {
        panic!("expected object");
    };
    let keys: Vec<_> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["3", "a", "b", "b-x", "c"]);
    assert_eq!(obj["c"], n(5.0));
    assert_eq!(obj["b"], n(2.0));
}

#[test]
fn calls_pass_evaluated_arguments_in_order() {
    let data = DataEnv::new().with_fn("join", |args| {
        let parts = args
            .iter()
            .map(Value::to_display_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::from(parts.join("-")))
    });
    assert_eq!(eval_in("join(1, 'a', 1 + 1)", &data), s("1-a-2"));
    assert_eq!(eval("max(1, 5, 3) + round(2.5)"), n(8.0));
}

#[test]
fn function_failures_become_type_errors() {
    let data = DataEnv::new().with_fn("boom", |_| Err("nope".to_owned()));
    assert_eq!(
        eval_with("boom()", &data, &EvalOpts::default()).unwrap_err(),
        ExprErrorKind::RuntimeTypeError("boom: nope".to_owned())
    );
}

#[test]
fn compound_values_do_not_coerce() {
    let data = DataEnv::from_json(serde_json::json!({"o": {}, "xs": [1]})).unwrap();
    assert_eq!(
        eval_with("xs * 2", &data, &EvalOpts::default()).unwrap_err(),
        ExprErrorKind::RuntimeTypeError("cannot convert array to number".to_owned())
    );
    assert_eq!(
        eval_with("'x' + o", &data, &EvalOpts::default()).unwrap_err(),
        ExprErrorKind::RuntimeTypeError("cannot convert object to string".to_owned())
    );
}

#[test]
fn unvalidated_trees_are_still_refused() {
    let data = DataEnv::new().with("a", 1);
    let opts = EvalOpts::default();
    assert_eq!(
        eval_with("a.constructor", &data, &opts).unwrap_err(),
        ExprErrorKind::ForbiddenProperty("constructor".to_owned())
    );
    assert_eq!(
        eval_with("a[0]", &data, &opts).unwrap_err(),
        ExprErrorKind::ComputedMemberNotAllowed
    );
    assert_eq!(
        eval_with("this", &data, &opts).unwrap_err(),
        ExprErrorKind::DisallowedSyntax("ThisExpression".to_owned())
    );
    assert_eq!(
        eval_with("a & 1", &data, &opts).unwrap_err(),
        ExprErrorKind::DisallowedOperator("&".to_owned())
    );
    assert_eq!(
        eval_with("~a", &data, &opts).unwrap_err(),
        ExprErrorKind::DisallowedOperator("~".to_owned())
    );
}

#[test]
fn object_literal_keys_are_plain_data() {
    let data = DataEnv::new().with("a", 1);
    let out = eval_with("{constructor: a, '__proto__': 2}", &data, &EvalOpts::default())
        .unwrap();
    assert_eq!(
        out,
        Value::Object(Object::from([
            ("__proto__".to_owned(), Value::Number(2.0)),
            ("constructor".to_owned(), Value::Number(1.0)),
        ]))
    );
}
