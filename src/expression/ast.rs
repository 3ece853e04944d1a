//! Parsed expression syntax tree.
//!
//! The tree covers everything the parser accepts, including constructs the validator always
//! rejects (`this`, `new`, assignment, update, sequence, spread). Keeping them representable lets
//! validation report exactly which construct was refused.

/// One expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Number, string, boolean or null literal.
    Literal(Literal),
    /// Bare name.
    Identifier(String),
    /// `this`.
    This,
    /// Prefix operator.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        argument: Box<Expr>,
    },
    /// Infix operator, including the logical ones.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `test ? consequent : alternate`.
    Conditional {
        /// Condition.
        test: Box<Expr>,
        /// Value when truthy.
        consequent: Box<Expr>,
        /// Value when falsy.
        alternate: Box<Expr>,
    },
    /// `object.property` (or `object[property]` when `computed`).
    Member {
        /// Accessed value.
        object: Box<Expr>,
        /// Property: an [`Expr::Identifier`] unless `computed`.
        property: Box<Expr>,
        /// `true` for bracket access.
        computed: bool,
    },
    /// `callee(arguments...)`.
    Call {
        /// Call target.
        callee: Box<Expr>,
        /// Arguments in source order.
        arguments: Vec<Expr>,
    },
    /// `new callee(arguments...)`.
    New {
        /// Constructor expression.
        callee: Box<Expr>,
        /// Arguments in source order.
        arguments: Vec<Expr>,
    },
    /// `[a, , b]`; holes are `None`.
    Array(Vec<Option<Expr>>),
    /// `{ key: value, ... }`.
    Object(Vec<ObjectMember>),
    /// `target = value` and compound assignments.
    Assignment {
        /// Operator text (`=`, `+=`, ...).
        op: &'static str,
        /// Assigned place.
        target: Box<Expr>,
        /// Assigned value.
        value: Box<Expr>,
    },
    /// `++x`, `x--`, ...
    Update {
        /// `++` or `--`.
        op: &'static str,
        /// Prefix or postfix form.
        prefix: bool,
        /// Updated place.
        argument: Box<Expr>,
    },
    /// `a, b, c`.
    Sequence(Vec<Expr>),
    /// `...value` inside an array, object or argument list.
    Spread(Box<Expr>),
}

/// Literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal.
    Number(f64),
    /// String literal (escapes already decoded).
    String(String),
    /// `true` / `false`.
    Bool(bool),
    /// `null`.
    Null,
}

/// Entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// `key: value`, `[key]: value` or shorthand `key`.
    Property(Property),
    /// `...value`.
    Spread(Expr),
}

/// Keyed entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Identifier, literal, or (when `computed`) arbitrary key expression.
    pub key: Expr,
    /// Value expression; for shorthand entries a copy of the identifier key.
    pub value: Expr,
    /// `true` for `[key]: value`.
    pub computed: bool,
    /// `true` for `{ key }`.
    pub shorthand: bool,
}

/// Prefix operators the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Not,
    /// `~`
    BitNot,
}

impl UnaryOp {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }

    pub(crate) fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "+" => Self::Plus,
            "-" => Self::Minus,
            "!" => Self::Not,
            "~" => Self::BitNot,
            _ => return None,
        })
    }
}

/// Infix operators the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `**`
    Pow,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNe,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Nullish,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
}

impl BinaryOp {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Nullish => "??",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
        }
    }

    pub(crate) fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "**" => Self::Pow,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNe,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "&&" => Self::And,
            "||" => Self::Or,
            "??" => Self::Nullish,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            _ => return None,
        })
    }

    /// Binding power; higher binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::Or | Self::Nullish => 1,
            Self::And => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::Ne | Self::StrictEq | Self::StrictNe => 6,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 7,
            Self::Shl | Self::Shr | Self::UShr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Rem => 10,
            Self::Pow => 11,
        }
    }

    pub(crate) fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow | Self::Nullish)
    }
}

impl Expr {
    /// Name of a non-computed member property.
    pub fn static_property(&self) -> Option<&str> {
        match self {
            Self::Member {
                property,
                computed: false,
                ..
            } => match property.as_ref() {
                Self::Identifier(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}
