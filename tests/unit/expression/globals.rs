use super::*;

fn call(name: &str, args: &[Value]) -> Result<Value, String> {
    let Some(Value::Function(f)) = global_env().get(name) else {
        panic!("`{name}` is not a global function");
    };
    f.call(args)
}

fn num(name: &str, args: &[f64]) -> f64 {
    let args: Vec<_> = args.iter().copied().map(Value::Number).collect();
    match call(name, &args).unwrap() {
        Value::Number(n) => n,
        other => panic!("`{name}` returned {other:?}"),
    }
}

#[test]
fn environment_has_no_random_source() {
    let names: Vec<_> = global_env().names().collect();
    assert!(!names.contains(&"random"));
    assert_eq!(names.len(), 42);
    for name in ["PI", "E", "SQRT2", "abs", "atan2", "hypot", "imul", "trunc"] {
        assert!(names.contains(&name), "{name} missing");
    }
}

#[test]
fn constants_are_numbers() {
    assert_eq!(
        global_env().get("PI"),
        Some(&Value::Number(std::f64::consts::PI))
    );
    assert_eq!(
        global_env().get("SQRT1_2"),
        Some(&Value::Number(std::f64::consts::FRAC_1_SQRT_2))
    );
}

#[test]
fn round_halves_toward_positive_infinity() {
    assert_eq!(js_round(2.5), 3.0);
    assert_eq!(js_round(-2.5), -2.0);
    assert_eq!(js_round(-2.6), -3.0);
    assert_eq!(js_round(0.49), 0.0);
    let neg_zero = js_round(-0.4);
    assert_eq!(neg_zero, 0.0);
    assert!(neg_zero.is_sign_negative());
}

#[test]
fn pow_matches_js_edge_cases() {
    assert!(js_pow(1.0, f64::INFINITY).is_nan());
    assert!(js_pow(-1.0, f64::NEG_INFINITY).is_nan());
    assert!(js_pow(2.0, f64::NAN).is_nan());
    assert_eq!(js_pow(f64::NAN, 0.0), 1.0);
    assert_eq!(num("pow", &[2.0, 3.0]), 8.0);
}

#[test]
fn missing_arguments_read_as_nan() {
    assert!(num("sqrt", &[]).is_nan());
    assert!(num("atan2", &[1.0]).is_nan());
}

#[test]
fn variadic_extremes() {
    assert_eq!(num("max", &[1.0, 5.0, 3.0]), 5.0);
    assert_eq!(num("min", &[1.0, -5.0, 3.0]), -5.0);
    assert_eq!(num("max", &[]), f64::NEG_INFINITY);
    assert_eq!(num("min", &[]), f64::INFINITY);
    assert!(num("max", &[1.0, f64::NAN]).is_nan());
    assert_eq!(
        call("max", &[Value::Number(1.0), Value::from("3")]).unwrap(),
        Value::Number(3.0)
    );
}

#[test]
fn hypot_prefers_infinity_over_nan() {
    assert_eq!(num("hypot", &[3.0, 4.0]), 5.0);
    assert_eq!(num("hypot", &[f64::NAN, f64::INFINITY]), f64::INFINITY);
    assert_eq!(num("hypot", &[]), 0.0);
}

#[test]
fn integer_helpers_use_32_bit_semantics() {
    assert_eq!(num("imul", &[4_294_967_295.0, 5.0]), -5.0);
    assert_eq!(num("clz32", &[1.0]), 31.0);
    assert_eq!(num("clz32", &[0.0]), 32.0);
    assert_eq!(num("sign", &[-3.0]), -1.0);
    assert_eq!(num("trunc", &[-4.7]), -4.0);
    assert_eq!(num("fround", &[5.5]), 5.5);
    assert_ne!(num("fround", &[5.05]), 5.05);
}

#[test]
fn compound_arguments_are_errors() {
    let err = call("abs", &[Value::Array(vec![])]).unwrap_err();
    assert_eq!(err, "cannot convert array to number");
}
