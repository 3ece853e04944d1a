//! Tagged-tree AST produced by the upstream markup parser.
//!
//! Nodes deserialize from the parser's JSON output, where every node is an object carrying
//! `"type"` and `"line"`. Node types the compiler does not handle are kept as
//! [`Node::Unsupported`] so compilation can reject them with a line number.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Ordered list of nodes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Block {
    /// Children in source order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

impl Block {
    /// Block over `nodes`.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes, line: 0 }
    }
}

/// One AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Nested block.
    Block(Block),
    /// Component or control tag.
    Tag(Tag),
    /// Mixin declaration or call.
    Mixin(Mixin),
    /// `if` / `else` branch.
    Conditional(Conditional),
    /// Plain text.
    Text(Text),
    /// Source comment.
    Comment(Comment),
    /// Any other node type.
    Unsupported {
        /// The upstream `type` name.
        kind: String,
        /// Source line.
        line: u32,
    },
}

impl Node {
    /// Source line of the node.
    pub fn line(&self) -> u32 {
        match self {
            Self::Block(b) => b.line,
            Self::Tag(t) => t.line,
            Self::Mixin(m) => m.line,
            Self::Conditional(c) => c.line,
            Self::Text(t) => t.line,
            Self::Comment(c) => c.line,
            Self::Unsupported { line, .. } => *line,
        }
    }

    /// Upstream node type name.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Block(_) => "Block",
            Self::Tag(_) => "Tag",
            Self::Mixin(_) => "Mixin",
            Self::Conditional(_) => "Conditional",
            Self::Text(_) => "Text",
            Self::Comment(_) => "Comment",
            Self::Unsupported { kind, .. } => kind,
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let kind = raw
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_owned();
        let line = raw
            .get("line")
            .and_then(serde_json::Value::as_u64)
            .and_then(|l| u32::try_from(l).ok())
            .unwrap_or(0);

        let node = match kind.as_str() {
            "Block" => serde_json::from_value(raw).map(Self::Block),
            "Tag" => serde_json::from_value(raw).map(Self::Tag),
            "Mixin" => serde_json::from_value(raw).map(Self::Mixin),
            "Conditional" => serde_json::from_value(raw).map(Self::Conditional),
            "Text" => serde_json::from_value(raw).map(Self::Text),
            "Comment" | "BlockComment" => return Ok(Self::Comment(Comment { line })),
            _ => return Ok(Self::Unsupported { kind, line }),
        };
        node.map_err(D::Error::custom)
    }
}

/// Tag node: `name(attrs...)` with an optional nested block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Attributes in source order.
    #[serde(default)]
    pub attrs: Vec<Attr>,
    /// Nested block.
    #[serde(default)]
    pub block: Block,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

/// One `name=value` tag attribute.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Attr {
    /// Attribute name.
    pub name: String,
    /// Raw value.
    pub val: AttrValue,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

/// Raw attribute value as emitted by the markup parser.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Source text, still to be classified.
    Text(String),
    /// Already-typed value (e.g. a bare boolean attribute).
    Raw(serde_json::Value),
}

/// Mixin declaration (`call == false`) or invocation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Mixin {
    /// Mixin name.
    pub name: String,
    /// Argument text; never bound to anything.
    #[serde(default)]
    pub args: Option<String>,
    /// Declared body (declarations) or passed block (calls).
    #[serde(default)]
    pub block: Option<Block>,
    /// `true` for `+name(...)` invocations.
    #[serde(default)]
    pub call: bool,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

/// `if test` with an optional `else` / `else if`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Conditional {
    /// Test expression source.
    pub test: String,
    /// Branch taken when `test` is truthy.
    pub consequent: Block,
    /// `else` block or chained `else if` conditional.
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

/// Plain text node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Text {
    /// Text content.
    #[serde(default)]
    pub val: String,
    /// Source line.
    #[serde(default)]
    pub line: u32,
}

/// Comment node; content is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Source line.
    pub line: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/template/ast.rs"]
mod tests;
