use super::*;

#[test]
fn eval_expression_against_data() {
    let data = DataEnv::new().with("a", 1);
    assert_eq!(
        eval_expression("a + 1", &data, &EvalOpts::default()).unwrap(),
        Value::Number(2.0)
    );
}

#[test]
fn length_is_checked_before_parsing() {
    let opts = EvalOpts {
        max_len: 10,
        ..EvalOpts::default()
    };
    let src = "a + b + c +";
    let err = parse(src, &opts).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::TooLong { max: 10 });
    assert_eq!(err.expression, src);
}

#[test]
fn errors_carry_the_expression_text() {
    let err = eval_expression("a.constructor", &DataEnv::new(), &EvalOpts::default())
        .unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::ForbiddenProperty("constructor".to_owned()));
    assert_eq!(err.expression, "a.constructor");
    assert_eq!(err.line, None);
    assert_eq!(
        err.to_string(),
        "forbidden property: constructor in `a.constructor`"
    );
}

#[test]
fn sandbox_checks_each_text_once() {
    let data = DataEnv::new().with("a", 1);
    let mut sandbox = Sandbox::new(&data, EvalOpts::default());

    assert_eq!(sandbox.eval_str("a + 1").unwrap(), Value::Number(2.0));
    assert_eq!(sandbox.eval_str("a + 1").unwrap(), Value::Number(2.0));
    assert_eq!(sandbox.checked_len(), 1);

    sandbox.eval_str("a+1").unwrap();
    assert_eq!(sandbox.checked_len(), 2);
}

#[test]
fn rejected_texts_are_not_cached() {
    let data = DataEnv::new();
    let mut sandbox = Sandbox::new(&data, EvalOpts::default());
    assert!(sandbox.check("nope()").is_err());
    assert!(sandbox.check("nope()").is_err());
    assert_eq!(sandbox.checked_len(), 0);
    sandbox.check("x.y").unwrap();
    assert_eq!(sandbox.checked_len(), 1);
}

#[test]
fn request_functions_are_scoped_to_their_sandbox() {
    let with_fn = DataEnv::new().with_fn("twice", |args| {
        let n = args.first().map_or(Ok(f64::NAN), Value::to_number)?;
        Ok(Value::Number(2.0 * n))
    });
    let without = DataEnv::new();

    let mut a = Sandbox::new(&with_fn, EvalOpts::default());
    assert_eq!(a.eval_str("twice(4)").unwrap(), Value::Number(8.0));

    let mut b = Sandbox::new(&without, EvalOpts::default());
    assert_eq!(
        b.eval_str("twice(4)").unwrap_err().kind,
        ExprErrorKind::UnknownFunction("twice".to_owned())
    );
}

#[test]
fn data_shadows_globals() {
    let data = DataEnv::new().with("PI", 3);
    let scope = Scope::new(&data);
    assert_eq!(scope.lookup("PI"), Some(&Value::Number(3.0)));
    assert!(matches!(scope.lookup("sqrt"), Some(Value::Function(_))));
    assert_eq!(scope.lookup("nothing"), None);
}

#[test]
fn nullish_data_does_not_hide_global_functions() {
    let data = DataEnv::from_json(serde_json::json!({"round": null, "max": 4})).unwrap();
    assert_eq!(
        eval_expression("round(1.5)", &data, &EvalOpts::default()).unwrap(),
        Value::Number(2.0)
    );
    assert_eq!(
        eval_expression("round", &data, &EvalOpts::default()).unwrap(),
        Value::Null
    );

    let err = eval_expression("max(1, 2)", &data, &EvalOpts::default()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::UnknownFunction("max".to_owned()));
}

#[test]
fn parentheses_do_not_count_as_tree_depth() {
    let opts = EvalOpts {
        max_depth: 3,
        ..EvalOpts::default()
    };
    assert_eq!(
        eval_expression("((((1))))", &DataEnv::new(), &opts).unwrap(),
        Value::Number(1.0)
    );
    let err = eval_expression("-(-(-(-1)))", &DataEnv::new(), &opts).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::TooDeep { max: 3 });
}

#[test]
fn strict_members_fail_on_undefined() {
    let opts = EvalOpts {
        null_safe_member: false,
        ..EvalOpts::default()
    };
    let err = eval_expression("user.name", &DataEnv::new(), &opts).unwrap_err();
    assert!(matches!(err.kind, ExprErrorKind::NullDereference { .. }));
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: EvalOpts = serde_json::from_str(r#"{"max_depth": 5}"#).unwrap();
    assert_eq!(
        opts,
        EvalOpts {
            max_depth: 5,
            ..EvalOpts::default()
        }
    );
    assert_eq!(EvalOpts::default().max_len, 10_000);
    assert_eq!(EvalOpts::default().max_nodes, 5_000);
}
