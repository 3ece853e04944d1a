//! Expression sandbox.
//!
//! Data-binding expressions go through three steps: [`parse`] turns source text into an
//! [`Expr`], [`validate`] checks the tree against a fixed whitelist and resource limits, and
//! [`evaluate`] interprets it against a [`Scope`]. [`Sandbox`] ties the steps together for one
//! data environment and remembers which texts it has already checked.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod globals;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod validate;

use std::collections::HashMap;
use std::rc::Rc;

pub use ast::{BinaryOp, Expr, Literal, ObjectMember, Property, UnaryOp};
pub use error::{ExprErrorKind, ExpressionError};
pub use eval::evaluate;
pub use globals::{GlobalEnv, global_env};
pub use validate::validate;

use crate::foundation::value::{DataEnv, Value};

/// Sandbox limits and member-access behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalOpts {
    /// Maximum source length in bytes.
    pub max_len: usize,
    /// Maximum nesting depth of the parsed tree.
    pub max_depth: usize,
    /// Maximum number of nodes in the parsed tree.
    pub max_nodes: usize,
    /// When `true`, `a.b` on an undefined/null `a` yields undefined instead of failing.
    pub null_safe_member: bool,
}

impl Default for EvalOpts {
    fn default() -> Self {
        Self {
            max_len: 10_000,
            max_depth: 200,
            max_nodes: 5_000,
            null_safe_member: true,
        }
    }
}

/// Name resolution for one expression: request data first, then the global environment.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    data: &'a DataEnv,
    global: &'a GlobalEnv,
}

impl<'a> Scope<'a> {
    /// Scope over `data` backed by the shared global environment.
    pub fn new(data: &'a DataEnv) -> Self {
        Self::with_global(data, global_env())
    }

    /// Scope over `data` backed by an explicit global environment.
    pub fn with_global(data: &'a DataEnv, global: &'a GlobalEnv) -> Self {
        Self { data, global }
    }

    /// Resolve a name; data shadows globals.
    pub fn lookup(&self, name: &str) -> Option<&'a Value> {
        self.data.get(name).or_else(|| self.global.get(name))
    }

    /// Resolve a call target; a nullish data value falls through to the globals.
    pub fn lookup_callee(&self, name: &str) -> Option<&'a Value> {
        self.data
            .get(name)
            .filter(|v| !v.is_nullish())
            .or_else(|| self.global.get(name))
    }
}

/// Parse `src` after checking its length against `opts.max_len`.
pub fn parse(src: &str, opts: &EvalOpts) -> Result<Expr, ExpressionError> {
    if src.len() > opts.max_len {
        return Err(ExpressionError::new(
            ExprErrorKind::TooLong { max: opts.max_len },
            src,
        ));
    }
    parser::parse_expression(src, opts.max_depth).map_err(|kind| ExpressionError::new(kind, src))
}

/// Parse, validate and evaluate one expression against `data`.
pub fn eval_expression(
    src: &str,
    data: &DataEnv,
    opts: &EvalOpts,
) -> Result<Value, ExpressionError> {
    Sandbox::new(data, *opts).eval_str(src)
}

/// Expression evaluator bound to one data environment.
///
/// Each distinct source text is parsed and validated once; later evaluations of the same text
/// reuse the checked tree. A sandbox belongs to a single resolve call and is not shared.
#[derive(Debug)]
pub struct Sandbox<'a> {
    scope: Scope<'a>,
    opts: EvalOpts,
    checked: HashMap<String, Rc<Expr>>,
}

impl<'a> Sandbox<'a> {
    /// Sandbox over `data` and the shared global environment.
    pub fn new(data: &'a DataEnv, opts: EvalOpts) -> Self {
        Self {
            scope: Scope::new(data),
            opts,
            checked: HashMap::new(),
        }
    }

    /// Active limits.
    pub fn opts(&self) -> &EvalOpts {
        &self.opts
    }

    /// Number of distinct expression texts checked so far.
    pub fn checked_len(&self) -> usize {
        self.checked.len()
    }

    /// Parse and validate `src` without evaluating it.
    pub fn check(&mut self, src: &str) -> Result<(), ExpressionError> {
        self.checked_expr(src).map(|_| ())
    }

    /// Evaluate `src`, parsing and validating it first if this sandbox has not seen it yet.
    pub fn eval_str(&mut self, src: &str) -> Result<Value, ExpressionError> {
        let expr = self.checked_expr(src)?;
        evaluate(&expr, &self.scope, &self.opts).map_err(|kind| ExpressionError::new(kind, src))
    }

    fn checked_expr(&mut self, src: &str) -> Result<Rc<Expr>, ExpressionError> {
        if let Some(expr) = self.checked.get(src) {
            return Ok(Rc::clone(expr));
        }
        let expr = parse(src, &self.opts)?;
        validate(&expr, &self.scope, &self.opts).map_err(|kind| ExpressionError::new(kind, src))?;
        tracing::trace!(expression = src, "expression validated");
        let expr = Rc::new(expr);
        self.checked.insert(src.to_owned(), Rc::clone(&expr));
        Ok(expr)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/sandbox.rs"]
mod tests;
