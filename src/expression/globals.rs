//! Process-wide, read-only environment of deterministic math constants and functions.
//!
//! Built on first use and never mutated afterwards; every resolve on every thread shares the same
//! table without locking. There is no random-number source: the same template and data always
//! produce the same scene.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::foundation::value::{Callable, Value};

/// Read-only table of global names visible to every expression.
#[derive(Debug)]
pub struct GlobalEnv {
    vars: BTreeMap<&'static str, Value>,
}

impl GlobalEnv {
    /// Look up a global name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// All global names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vars.keys().copied()
    }

    fn build() -> Self {
        let mut vars = BTreeMap::new();

        let constants: [(&'static str, f64); 8] = [
            ("E", std::f64::consts::E),
            ("LN10", std::f64::consts::LN_10),
            ("LN2", std::f64::consts::LN_2),
            ("LOG10E", std::f64::consts::LOG10_E),
            ("LOG2E", std::f64::consts::LOG2_E),
            ("PI", std::f64::consts::PI),
            ("SQRT1_2", std::f64::consts::FRAC_1_SQRT_2),
            ("SQRT2", std::f64::consts::SQRT_2),
        ];
        for (name, v) in constants {
            vars.insert(name, Value::Number(v));
        }

        let unary: [(&'static str, fn(f64) -> f64); 28] = [
            ("abs", f64::abs),
            ("acos", f64::acos),
            ("acosh", f64::acosh),
            ("asin", f64::asin),
            ("asinh", f64::asinh),
            ("atan", f64::atan),
            ("atanh", f64::atanh),
            ("cbrt", f64::cbrt),
            ("ceil", f64::ceil),
            ("clz32", clz32),
            ("cos", f64::cos),
            ("cosh", f64::cosh),
            ("exp", f64::exp),
            ("expm1", f64::exp_m1),
            ("floor", f64::floor),
            ("fround", fround),
            ("log", f64::ln),
            ("log10", f64::log10),
            ("log1p", f64::ln_1p),
            ("log2", f64::log2),
            ("round", js_round),
            ("sign", js_sign),
            ("sin", f64::sin),
            ("sinh", f64::sinh),
            ("sqrt", f64::sqrt),
            ("tan", f64::tan),
            ("tanh", f64::tanh),
            ("trunc", f64::trunc),
        ];
        for (name, f) in unary {
            vars.insert(
                name,
                Value::Function(Callable::new(name, move |args| {
                    Ok(Value::Number(f(arg(args, 0)?)))
                })),
            );
        }

        vars.insert(
            "atan2",
            number_fn("atan2", |args| Ok(arg(args, 0)?.atan2(arg(args, 1)?))),
        );
        vars.insert(
            "pow",
            number_fn("pow", |args| Ok(js_pow(arg(args, 0)?, arg(args, 1)?))),
        );
        vars.insert(
            "imul",
            number_fn("imul", |args| {
                let a = to_int32(arg(args, 0)?);
                let b = to_int32(arg(args, 1)?);
                Ok(f64::from(a.wrapping_mul(b)))
            }),
        );
        vars.insert("max", number_fn("max", |args| fold_extreme(args, true)));
        vars.insert("min", number_fn("min", |args| fold_extreme(args, false)));
        vars.insert("hypot", number_fn("hypot", hypot));

        Self { vars }
    }
}

static GLOBALS: LazyLock<GlobalEnv> = LazyLock::new(GlobalEnv::build);

/// The shared global environment.
pub fn global_env() -> &'static GlobalEnv {
    &GLOBALS
}

fn number_fn(
    name: &'static str,
    f: impl Fn(&[Value]) -> Result<f64, String> + Send + Sync + 'static,
) -> Value {
    Value::Function(Callable::new(name, move |args| f(args).map(Value::Number)))
}

/// Numeric argument `i`; missing arguments read as `undefined`, i.e. NaN.
fn arg(args: &[Value], i: usize) -> Result<f64, String> {
    args.get(i).unwrap_or(&Value::Undefined).to_number()
}

fn fold_extreme(args: &[Value], max: bool) -> Result<f64, String> {
    let mut acc = if max {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for v in args {
        let n = v.to_number()?;
        if n.is_nan() {
            return Ok(f64::NAN);
        }
        acc = if max { acc.max(n) } else { acc.min(n) };
    }
    Ok(acc)
}

fn hypot(args: &[Value]) -> Result<f64, String> {
    let nums = args
        .iter()
        .map(Value::to_number)
        .collect::<Result<Vec<_>, _>>()?;
    if nums.iter().any(|n| n.is_infinite()) {
        return Ok(f64::INFINITY);
    }
    Ok(nums.into_iter().fold(0.0, f64::hypot))
}

/// `Math.round`: halves round toward +Infinity, and negative inputs keep a negative zero.
pub(crate) fn js_round(x: f64) -> f64 {
    if !x.is_finite() || x.fract() == 0.0 {
        return x;
    }
    let floor = x.floor();
    let r = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    if r == 0.0 && x < 0.0 { -0.0 } else { r }
}

fn js_sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

/// `**` / `Math.pow`, which differ from `powf` on NaN exponents and `(+-1) ** +-Infinity`.
pub(crate) fn js_pow(base: f64, exp: f64) -> f64 {
    if exp.is_nan() || (base.abs() == 1.0 && exp.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exp)
}

fn to_uint32(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(4_294_967_296.0) as u32
}

fn to_int32(x: f64) -> i32 {
    to_uint32(x) as i32
}

fn clz32(x: f64) -> f64 {
    f64::from(to_uint32(x).leading_zeros())
}

fn fround(x: f64) -> f64 {
    f64::from(x as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/globals.rs"]
mod tests;
