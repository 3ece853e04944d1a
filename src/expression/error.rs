/// Reason an expression was rejected or failed to evaluate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExprErrorKind {
    /// Source text exceeds `max_len`.
    #[error("expression too long (>{max} bytes)")]
    TooLong {
        /// Configured limit.
        max: usize,
    },
    /// Nesting exceeds `max_depth`.
    #[error("expression too deep (>{max} levels)")]
    TooDeep {
        /// Configured limit.
        max: usize,
    },
    /// Node count exceeds `max_nodes`.
    #[error("expression too complex (>{max} nodes)")]
    TooComplex {
        /// Configured limit.
        max: usize,
    },
    /// Unary or binary operator outside the whitelist.
    #[error("operator not allowed: {0}")]
    DisallowedOperator(String),
    /// Syntax that is never allowed (`this`, `new`, assignment, ...).
    #[error("syntax not allowed: {0}")]
    DisallowedSyntax(String),
    /// Member access to `__proto__`, `prototype` or `constructor`.
    #[error("forbidden property: {0}")]
    ForbiddenProperty(String),
    /// `a[b]` style access.
    #[error("computed member access not allowed")]
    ComputedMemberNotAllowed,
    /// Call target does not resolve to a function.
    #[error("function not found: {0}")]
    UnknownFunction(String),
    /// Member access on `undefined`/`null` with null-safe access disabled.
    #[error("cannot read property '{property}' of {object}")]
    NullDereference {
        /// Accessed property name.
        property: String,
        /// Type name of the nullish object.
        object: &'static str,
    },
    /// A value had the wrong type for an operation or a target field.
    #[error("type error: {0}")]
    RuntimeTypeError(String),
    /// The text is not a well-formed expression.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the source text.
        offset: usize,
        /// Parser message.
        message: String,
    },
}

impl ExprErrorKind {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::RuntimeTypeError(message.into())
    }
}

/// An [`ExprErrorKind`] together with the expression text that produced it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{kind} in `{expression}`{}", line_suffix(.line))]
pub struct ExpressionError {
    /// What went wrong.
    pub kind: ExprErrorKind,
    /// The offending expression source text.
    pub expression: String,
    /// Source line of the template node referencing the expression, when known.
    pub line: Option<u32>,
}

impl ExpressionError {
    /// Attach `kind` to the expression text it came from.
    pub fn new(kind: ExprErrorKind, expression: impl Into<String>) -> Self {
        Self {
            kind,
            expression: expression.into(),
            line: None,
        }
    }

    /// Record the referencing node's line unless a more specific one is already set.
    pub fn or_line(mut self, line: Option<u32>) -> Self {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }
}

fn line_suffix(line: &Option<u32>) -> String {
    match line {
        Some(line) => format!(" (line {line})"),
        None => String::new(),
    }
}
