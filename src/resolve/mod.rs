//! Render-time resolution of compiled trees.
//!
//! Resolving substitutes every [`Attribute::Dynamic`] with its evaluated value and prunes nodes
//! whose `cond` is falsy. A pruned element of a sequence is omitted; a pruned optional node
//! becomes `None`. Both mean "not present".

mod batch;
mod scene;

use std::collections::BTreeMap;

pub use batch::BatchOpts;
pub(crate) use batch::build_thread_pool;

use crate::expression::{EvalOpts, ExprErrorKind, ExpressionError, Sandbox};
use crate::foundation::value::{DataEnv, Value};
use crate::scene::attribute::{Attribute, FromValue};

/// A tree node that can be resolved against request data.
pub trait Resolve: Sized {
    /// Inclusion condition; the node is pruned when it evaluates falsy.
    fn condition(&self) -> Option<&str> {
        None
    }

    /// Source line attached to expression errors raised inside this node.
    fn source_line(&self) -> Option<u32> {
        None
    }

    /// Resolve every field, ignoring this node's own condition.
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError>;

    /// Resolve an included node; `None` when it resolves to nothing.
    fn resolve_present(&self, r: &mut Resolver<'_>) -> Result<Option<Self>, ExpressionError> {
        self.resolve_fields(r).map(Some)
    }
}

/// Resolution context for one data environment.
pub struct Resolver<'a> {
    sandbox: Sandbox<'a>,
    observer: Option<Box<dyn FnMut(&str, &Value) + 'a>>,
    line: Option<u32>,
}

impl<'a> Resolver<'a> {
    /// Resolver over `data` with default sandbox limits.
    pub fn new(data: &'a DataEnv) -> Self {
        Self::with_opts(data, EvalOpts::default())
    }

    /// Resolver over `data` with explicit sandbox limits.
    pub fn with_opts(data: &'a DataEnv, opts: EvalOpts) -> Self {
        Self {
            sandbox: Sandbox::new(data, opts),
            observer: None,
            line: None,
        }
    }

    /// Call `observer` with the source and result of every dynamic attribute substitution.
    pub fn on_expression(mut self, observer: impl FnMut(&str, &Value) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Resolve `node`, or `None` when its condition is falsy.
    pub fn resolve<T: Resolve>(&mut self, node: &T) -> Result<Option<T>, ExpressionError> {
        let outer = self.line;
        if let Some(line) = node.source_line() {
            self.line = Some(line);
        }
        let out = match self.include(node) {
            Ok(true) => node.resolve_present(self),
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        };
        self.line = outer;
        out
    }

    fn include<T: Resolve>(&mut self, node: &T) -> Result<bool, ExpressionError> {
        match node.condition() {
            None => Ok(true),
            Some(src) => Ok(self.evaluate(src)?.is_truthy()),
        }
    }

    /// Evaluate `src` in this resolver's sandbox, tagging errors with the current source line.
    pub fn evaluate(&mut self, src: &str) -> Result<Value, ExpressionError> {
        self.sandbox.eval_str(src).map_err(|e| e.or_line(self.line))
    }

    /// Evaluate the source of a dynamic attribute and report it to the observer.
    pub fn substitute(&mut self, src: &str) -> Result<Value, ExpressionError> {
        let value = self.evaluate(src)?;
        if let Some(observer) = self.observer.as_mut() {
            observer(src, &value);
        }
        Ok(value)
    }

    /// Error for a value that does not fit its target field.
    pub(crate) fn type_error(&self, src: &str, msg: impl Into<String>) -> ExpressionError {
        ExpressionError::new(ExprErrorKind::type_error(msg), src).or_line(self.line)
    }
}

/// A dynamic attribute whose expression yields `undefined` or `null` is absent from the resolved
/// tree when held optionally (`Option`, map values). Resolved directly, it must fit `T`.
impl<T: FromValue + Clone> Resolve for Attribute<T> {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        match self {
            Self::Literal(v) => Ok(Self::Literal(v.clone())),
            Self::Dynamic(src) => {
                let value = r.substitute(src)?;
                literal(r, src, value)
            }
        }
    }

    fn resolve_present(&self, r: &mut Resolver<'_>) -> Result<Option<Self>, ExpressionError> {
        match self {
            Self::Literal(v) => Ok(Some(Self::Literal(v.clone()))),
            Self::Dynamic(src) => match r.substitute(src)? {
                value if value.is_nullish() => Ok(None),
                value => literal(r, src, value).map(Some),
            },
        }
    }
}

fn literal<T: FromValue>(
    r: &Resolver<'_>,
    src: &str,
    value: Value,
) -> Result<Attribute<T>, ExpressionError> {
    T::from_value(value)
        .map(Attribute::Literal)
        .map_err(|msg| r.type_error(src, msg))
}

impl<T: Resolve> Resolve for Option<T> {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        match self {
            Some(node) => r.resolve(node),
            None => Ok(None),
        }
    }
}

impl<T: Resolve> Resolve for Vec<T> {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        let mut out = Vec::with_capacity(self.len());
        for item in self {
            if let Some(item) = r.resolve(item)? {
                out.push(item);
            }
        }
        Ok(out)
    }
}

impl<K: Ord + Clone, V: Resolve> Resolve for BTreeMap<K, V> {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        let mut out = BTreeMap::new();
        for (key, value) in self {
            if let Some(value) = r.resolve(value)? {
                out.insert(key.clone(), value);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
