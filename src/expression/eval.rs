use std::cmp::Ordering;

use crate::expression::ast::{BinaryOp, Expr, Literal, ObjectMember, UnaryOp};
use crate::expression::error::ExprErrorKind;
use crate::expression::globals::js_pow;
use crate::expression::validate::{
    is_allowed_binary, is_allowed_unary, is_forbidden_property, syntax_name,
};
use crate::expression::{EvalOpts, Scope};
use crate::foundation::value::{Object, Value, format_number};

/// Interpret an already validated expression tree.
///
/// The interpreter does not trust the validator: forbidden properties, disallowed syntax and the
/// depth bound are all checked again as the tree is walked.
pub fn evaluate(expr: &Expr, scope: &Scope<'_>, opts: &EvalOpts) -> Result<Value, ExprErrorKind> {
    Interpreter { scope, opts }.eval(expr, 0)
}

struct Interpreter<'s, 'a> {
    scope: &'s Scope<'a>,
    opts: &'s EvalOpts,
}

impl Interpreter<'_, '_> {
    fn eval(&self, expr: &Expr, depth: usize) -> Result<Value, ExprErrorKind> {
        if depth > self.opts.max_depth {
            return Err(ExprErrorKind::TooDeep {
                max: self.opts.max_depth,
            });
        }
        let next = depth + 1;

        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),
            Expr::Identifier(name) => Ok(self.scope.lookup(name).cloned().unwrap_or_default()),
            Expr::Unary { op, argument } => {
                if !is_allowed_unary(*op) {
                    return Err(ExprErrorKind::DisallowedOperator(op.as_str().to_owned()));
                }
                let v = self.eval(argument, next)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!v.is_truthy())),
                    UnaryOp::Plus => Ok(Value::Number(num(&v)?)),
                    UnaryOp::Minus => Ok(Value::Number(-num(&v)?)),
                    UnaryOp::BitNot => Err(ExprErrorKind::DisallowedOperator("~".to_owned())),
                }
            }
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right, next),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test, next)?.is_truthy() {
                    self.eval(consequent, next)
                } else {
                    self.eval(alternate, next)
                }
            }
            Expr::Member {
                object,
                property,
                computed,
            } => {
                let name = match (property.as_ref(), *computed) {
                    (Expr::Identifier(name), false) => name,
                    (Expr::Literal(Literal::String(name)), true)
                        if is_forbidden_property(name) =>
                    {
                        return Err(ExprErrorKind::ForbiddenProperty(name.clone()));
                    }
                    _ => return Err(ExprErrorKind::ComputedMemberNotAllowed),
                };
                if is_forbidden_property(name) {
                    return Err(ExprErrorKind::ForbiddenProperty(name.clone()));
                }
                let target = self.eval(object, next)?;
                if target.is_nullish() {
                    if self.opts.null_safe_member {
                        return Ok(Value::Undefined);
                    }
                    return Err(ExprErrorKind::NullDereference {
                        property: name.clone(),
                        object: target.type_name(),
                    });
                }
                Ok(target.member(name))
            }
            Expr::Call { callee, arguments } => {
                let Expr::Identifier(name) = callee.as_ref() else {
                    return Err(ExprErrorKind::DisallowedSyntax(
                        "call of a non-identifier callee".to_owned(),
                    ));
                };
                let Some(Value::Function(func)) = self.scope.lookup_callee(name) else {
                    return Err(ExprErrorKind::UnknownFunction(name.clone()));
                };
                let args = arguments
                    .iter()
                    .map(|arg| self.eval(arg, next))
                    .collect::<Result<Vec<_>, _>>()?;
                func.call(&args)
                    .map_err(|msg| ExprErrorKind::type_error(format!("{name}: {msg}")))
            }
            Expr::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(match item {
                        Some(item) => self.eval(item, next)?,
                        None => Value::Null,
                    });
                }
                Ok(Value::Array(out))
            }
            Expr::Object(members) => {
                let mut out = Object::new();
                for member in members {
                    let ObjectMember::Property(prop) = member else {
                        return Err(ExprErrorKind::DisallowedSyntax("SpreadElement".to_owned()));
                    };
                    let key = if prop.computed {
                        let key = self.eval(&prop.key, next)?;
                        key.to_display_string().map_err(ExprErrorKind::type_error)?
                    } else {
                        static_key_text(&prop.key)?
                    };
                    let value = self.eval(&prop.value, next)?;
                    out.insert(key, value);
                }
                Ok(Value::Object(out))
            }
            Expr::This
            | Expr::New { .. }
            | Expr::Assignment { .. }
            | Expr::Update { .. }
            | Expr::Sequence(_)
            | Expr::Spread(_) => Err(ExprErrorKind::DisallowedSyntax(
                syntax_name(expr).to_owned(),
            )),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        depth: usize,
    ) -> Result<Value, ExprErrorKind> {
        if !is_allowed_binary(op) {
            return Err(ExprErrorKind::DisallowedOperator(op.as_str().to_owned()));
        }

        let l = self.eval(left, depth)?;
        match op {
            BinaryOp::And => {
                return if l.is_truthy() {
                    self.eval(right, depth)
                } else {
                    Ok(l)
                };
            }
            BinaryOp::Or => {
                return if l.is_truthy() {
                    Ok(l)
                } else {
                    self.eval(right, depth)
                };
            }
            BinaryOp::Nullish => {
                return if l.is_nullish() {
                    self.eval(right, depth)
                } else {
                    Ok(l)
                };
            }
            _ => {}
        }

        let r = self.eval(right, depth)?;
        let out = match op {
            BinaryOp::Add => return add(&l, &r),
            BinaryOp::Sub => Value::Number(num(&l)? - num(&r)?),
            BinaryOp::Mul => Value::Number(num(&l)? * num(&r)?),
            BinaryOp::Div => Value::Number(num(&l)? / num(&r)?),
            BinaryOp::Rem => Value::Number(num(&l)? % num(&r)?),
            BinaryOp::Pow => Value::Number(js_pow(num(&l)?, num(&r)?)),
            BinaryOp::Eq => Value::Bool(l.loose_eq(&r)),
            BinaryOp::Ne => Value::Bool(!l.loose_eq(&r)),
            BinaryOp::StrictEq => Value::Bool(l.strict_eq(&r)),
            BinaryOp::StrictNe => Value::Bool(!l.strict_eq(&r)),
            BinaryOp::Lt => Value::Bool(compare(&l, &r)? == Some(Ordering::Less)),
            BinaryOp::Gt => Value::Bool(compare(&l, &r)? == Some(Ordering::Greater)),
            BinaryOp::Le => Value::Bool(matches!(
                compare(&l, &r)?,
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinaryOp::Ge => Value::Bool(matches!(
                compare(&l, &r)?,
                Some(Ordering::Greater | Ordering::Equal)
            )),
            _ => return Err(ExprErrorKind::DisallowedOperator(op.as_str().to_owned())),
        };
        Ok(out)
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn static_key_text(key: &Expr) -> Result<String, ExprErrorKind> {
    match key {
        Expr::Identifier(name) => Ok(name.clone()),
        Expr::Literal(Literal::Number(n)) => Ok(format_number(*n)),
        Expr::Literal(lit) => literal_value(lit)
            .to_display_string()
            .map_err(ExprErrorKind::type_error),
        other => Err(ExprErrorKind::DisallowedSyntax(format!(
            "{} as object key",
            syntax_name(other)
        ))),
    }
}

fn num(v: &Value) -> Result<f64, ExprErrorKind> {
    v.to_number().map_err(ExprErrorKind::type_error)
}

/// `+`: string concatenation when either side is a string, numeric addition otherwise.
fn add(l: &Value, r: &Value) -> Result<Value, ExprErrorKind> {
    match (l, r) {
        (Value::String(a), b) => {
            let b = b.to_display_string().map_err(ExprErrorKind::type_error)?;
            Ok(Value::String(format!("{a}{b}")))
        }
        (a, Value::String(b)) => {
            let a = a.to_display_string().map_err(ExprErrorKind::type_error)?;
            Ok(Value::String(format!("{a}{b}")))
        }
        _ => Ok(Value::Number(num(l)? + num(r)?)),
    }
}

/// Relational ordering: strings compare by UTF-16 code units, everything else numerically.
/// `None` means unordered (a NaN was involved).
fn compare(l: &Value, r: &Value) -> Result<Option<Ordering>, ExprErrorKind> {
    if let (Value::String(a), Value::String(b)) = (l, r) {
        return Ok(Some(a.encode_utf16().cmp(b.encode_utf16())));
    }
    Ok(num(l)?.partial_cmp(&num(r)?))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
