/// Reason structural compilation failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// AST node type the compiler does not handle.
    #[error("unknown node kind `{0}`")]
    UnknownNodeKind(String),
    /// Tag name that is neither a component kind nor a control tag.
    #[error("unknown component kind `{0}`")]
    UnknownComponentKind(String),
    /// Call of a mixin that was never declared.
    #[error("unknown mixin `{0}`")]
    UnknownMixin(String),
    /// Mixin that invokes itself, directly or through other mixins.
    #[error("mixin `{0}` invokes itself")]
    RecursiveMixin(String),
    /// Malformed `phase` block.
    #[error("invalid phase body: {0}")]
    InvalidPhaseBody(String),
    /// Required attribute absent.
    #[error("{tag}() requires a `{name}` attribute")]
    MissingRequiredAttribute {
        /// Tag name.
        tag: String,
        /// Attribute name.
        name: String,
    },
    /// Attribute literal of the wrong type or out of range.
    #[error("{tag}(): `{name}` must be {expected}")]
    InvalidAttributeType {
        /// Tag name.
        tag: String,
        /// Attribute name.
        name: String,
        /// Description of the accepted values.
        expected: String,
    },
    /// `effect(name=...)` naming no built-in effect.
    #[error("unknown effect `{0}`")]
    UnknownEffect(String),
}

/// A [`CompileErrorKind`] at a source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct CompileError {
    /// What went wrong.
    pub kind: CompileErrorKind,
    /// Source line of the offending node.
    pub line: u32,
}

impl CompileError {
    /// Error of `kind` at `line`.
    pub fn new(kind: CompileErrorKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub(crate) fn missing(tag: &str, name: &str, line: u32) -> Self {
        Self::new(
            CompileErrorKind::MissingRequiredAttribute {
                tag: tag.to_owned(),
                name: name.to_owned(),
            },
            line,
        )
    }

    pub(crate) fn invalid(tag: &str, name: &str, expected: impl Into<String>, line: u32) -> Self {
        Self::new(
            CompileErrorKind::InvalidAttributeType {
                tag: tag.to_owned(),
                name: name.to_owned(),
                expected: expected.into(),
            },
            line,
        )
    }
}
