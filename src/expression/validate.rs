use crate::expression::ast::{BinaryOp, Expr, Literal, ObjectMember, UnaryOp};
use crate::expression::error::ExprErrorKind;
use crate::expression::{EvalOpts, Scope};
use crate::foundation::value::Value;

/// Property names no expression may read.
pub(crate) const FORBIDDEN_PROPERTIES: &[&str] = &["__proto__", "prototype", "constructor"];

pub(crate) fn is_forbidden_property(name: &str) -> bool {
    FORBIDDEN_PROPERTIES.contains(&name)
}

pub(crate) fn is_allowed_unary(op: UnaryOp) -> bool {
    matches!(op, UnaryOp::Plus | UnaryOp::Minus | UnaryOp::Not)
}

pub(crate) fn is_allowed_binary(op: BinaryOp) -> bool {
    !matches!(
        op,
        BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::UShr
    )
}

/// Check `expr` against the sandbox whitelist and resource limits.
///
/// Fails on the first violation. Call targets are resolved against `scope`, so the same tree
/// may pass for one data environment and fail for another.
pub fn validate(expr: &Expr, scope: &Scope<'_>, opts: &EvalOpts) -> Result<(), ExprErrorKind> {
    Validator {
        scope,
        opts,
        nodes: 0,
    }
    .visit(expr, 0)
}

struct Validator<'s, 'a> {
    scope: &'s Scope<'a>,
    opts: &'s EvalOpts,
    nodes: usize,
}

impl Validator<'_, '_> {
    fn visit(&mut self, expr: &Expr, depth: usize) -> Result<(), ExprErrorKind> {
        if depth > self.opts.max_depth {
            return Err(ExprErrorKind::TooDeep {
                max: self.opts.max_depth,
            });
        }
        self.nodes += 1;
        if self.nodes > self.opts.max_nodes {
            return Err(ExprErrorKind::TooComplex {
                max: self.opts.max_nodes,
            });
        }

        let next = depth + 1;
        match expr {
            Expr::Literal(_) | Expr::Identifier(_) => Ok(()),
            Expr::Unary { op, argument } => {
                if !is_allowed_unary(*op) {
                    return Err(ExprErrorKind::DisallowedOperator(op.as_str().to_owned()));
                }
                self.visit(argument, next)
            }
            Expr::Binary { op, left, right } => {
                if !is_allowed_binary(*op) {
                    return Err(ExprErrorKind::DisallowedOperator(op.as_str().to_owned()));
                }
                self.visit(left, next)?;
                self.visit(right, next)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.visit(test, next)?;
                self.visit(consequent, next)?;
                self.visit(alternate, next)
            }
            Expr::Member {
                object,
                property,
                computed,
            } => {
                match (property.as_ref(), *computed) {
                    (Expr::Identifier(name), false) if is_forbidden_property(name) => {
                        return Err(ExprErrorKind::ForbiddenProperty(name.clone()));
                    }
                    (Expr::Literal(Literal::String(name)), true)
                        if is_forbidden_property(name) =>
                    {
                        return Err(ExprErrorKind::ForbiddenProperty(name.clone()));
                    }
                    (_, true) => return Err(ExprErrorKind::ComputedMemberNotAllowed),
                    _ => {}
                }
                self.visit(object, next)
            }
            Expr::Call { callee, arguments } => {
                let Expr::Identifier(name) = callee.as_ref() else {
                    return Err(ExprErrorKind::DisallowedSyntax(
                        "call of a non-identifier callee".to_owned(),
                    ));
                };
                if !matches!(self.scope.lookup_callee(name), Some(Value::Function(_))) {
                    return Err(ExprErrorKind::UnknownFunction(name.clone()));
                }
                for arg in arguments {
                    self.visit(arg, next)?;
                }
                Ok(())
            }
            Expr::Array(items) => {
                for item in items.iter().flatten() {
                    self.visit(item, next)?;
                }
                Ok(())
            }
            Expr::Object(members) => {
                for member in members {
                    let ObjectMember::Property(prop) = member else {
                        return Err(disallowed("SpreadElement"));
                    };
                    if prop.computed {
                        self.visit(&prop.key, next)?;
                    }
                    self.visit(&prop.value, next)?;
                }
                Ok(())
            }
            Expr::This
            | Expr::New { .. }
            | Expr::Assignment { .. }
            | Expr::Update { .. }
            | Expr::Sequence(_)
            | Expr::Spread(_) => Err(disallowed(syntax_name(expr))),
        }
    }
}

fn disallowed(name: &str) -> ExprErrorKind {
    ExprErrorKind::DisallowedSyntax(name.to_owned())
}

/// Conventional node-type name, used in diagnostics.
pub(crate) fn syntax_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Literal(_) => "Literal",
        Expr::Identifier(_) => "Identifier",
        Expr::This => "ThisExpression",
        Expr::Unary { .. } => "UnaryExpression",
        Expr::Binary { op, .. } => match op {
            BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish => "LogicalExpression",
            _ => "BinaryExpression",
        },
        Expr::Conditional { .. } => "ConditionalExpression",
        Expr::Member { .. } => "MemberExpression",
        Expr::Call { .. } => "CallExpression",
        Expr::New { .. } => "NewExpression",
        Expr::Array(_) => "ArrayExpression",
        Expr::Object(_) => "ObjectExpression",
        Expr::Assignment { .. } => "AssignmentExpression",
        Expr::Update { .. } => "UpdateExpression",
        Expr::Sequence(_) => "SequenceExpression",
        Expr::Spread(_) => "SpreadElement",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/validate.rs"]
mod tests;
