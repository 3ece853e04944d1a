//! Builders for template ASTs, for hosts that assemble templates in code rather than loading
//! parser output.
//!
//! ```
//! use sceneplate::dsl::{block, tag};
//!
//! let structure = block([tag("vstack")
//!     .attr("gap", "8")
//!     .child(tag("text").attr("id", "'title'").attr("text", "title"))
//!     .build()]);
//! assert_eq!(structure.nodes.len(), 1);
//! ```

use crate::template::ast::{Attr, AttrValue, Block, Comment, Conditional, Mixin, Node, Tag, Text};

/// Block over `nodes`.
pub fn block(nodes: impl IntoIterator<Item = Node>) -> Block {
    Block::new(nodes.into_iter().collect())
}

/// Start a tag named `name`.
pub fn tag(name: impl Into<String>) -> TagBuilder {
    TagBuilder {
        tag: Tag {
            name: name.into(),
            attrs: Vec::new(),
            block: Block::default(),
            line: 0,
        },
    }
}

/// Tag under construction.
#[derive(Clone, Debug)]
pub struct TagBuilder {
    tag: Tag,
}

impl TagBuilder {
    /// Add an attribute with unclassified source text (`'lit'`, `42`, `expr`, ...).
    pub fn attr(mut self, name: impl Into<String>, src: impl Into<String>) -> Self {
        self.tag.attrs.push(Attr {
            name: name.into(),
            val: AttrValue::Text(src.into()),
            line: self.tag.line,
        });
        self
    }

    /// Add an already-typed attribute value.
    pub fn raw_attr(mut self, name: impl Into<String>, val: serde_json::Value) -> Self {
        self.tag.attrs.push(Attr {
            name: name.into(),
            val: AttrValue::Raw(val),
            line: self.tag.line,
        });
        self
    }

    /// Append a node to the tag's block.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.tag.block.nodes.push(node.into());
        self
    }

    /// Set the source line.
    pub fn line(mut self, line: u32) -> Self {
        self.tag.line = line;
        self.tag.block.line = line;
        self
    }

    /// Finish the tag.
    pub fn build(self) -> Node {
        Node::Tag(self.tag)
    }
}

impl From<TagBuilder> for Node {
    fn from(b: TagBuilder) -> Self {
        b.build()
    }
}

impl From<Block> for Node {
    fn from(b: Block) -> Self {
        Node::Block(b)
    }
}

/// Mixin declaration `mixin name` with `body`.
pub fn mixin(name: impl Into<String>, body: Block) -> Node {
    Node::Mixin(Mixin {
        name: name.into(),
        args: None,
        block: Some(body),
        call: false,
        line: 0,
    })
}

/// Mixin call `+name`.
pub fn call(name: impl Into<String>) -> Node {
    Node::Mixin(Mixin {
        name: name.into(),
        args: None,
        block: None,
        call: true,
        line: 0,
    })
}

/// Mixin call with argument text, which the compiler ignores.
pub fn call_with_args(name: impl Into<String>, args: impl Into<String>) -> Node {
    Node::Mixin(Mixin {
        name: name.into(),
        args: Some(args.into()),
        block: None,
        call: true,
        line: 0,
    })
}

/// Start `if test` with `consequent`.
pub fn when(test: impl Into<String>, consequent: Block) -> ConditionalBuilder {
    ConditionalBuilder {
        cond: Conditional {
            test: test.into(),
            consequent,
            alternate: None,
            line: 0,
        },
    }
}

/// Conditional under construction.
#[derive(Clone, Debug)]
pub struct ConditionalBuilder {
    cond: Conditional,
}

impl ConditionalBuilder {
    /// `else` block.
    pub fn otherwise(mut self, alternate: Block) -> Self {
        self.cond.alternate = Some(Box::new(Node::Block(alternate)));
        self
    }

    /// `else if` chain.
    pub fn otherwise_if(mut self, next: ConditionalBuilder) -> Self {
        self.cond.alternate = Some(Box::new(next.build()));
        self
    }

    /// Set the source line.
    pub fn line(mut self, line: u32) -> Self {
        self.cond.line = line;
        self
    }

    /// Finish the conditional.
    pub fn build(self) -> Node {
        Node::Conditional(self.cond)
    }
}

impl From<ConditionalBuilder> for Node {
    fn from(b: ConditionalBuilder) -> Self {
        b.build()
    }
}

/// Text node.
pub fn text(val: impl Into<String>) -> Node {
    Node::Text(Text {
        val: val.into(),
        line: 0,
    })
}

/// Comment node.
pub fn comment() -> Node {
    Node::Comment(Comment { line: 0 })
}

/// Node of a type the compiler does not handle.
pub fn unsupported(kind: impl Into<String>, line: u32) -> Node {
    Node::Unsupported {
        kind: kind.into(),
        line,
    }
}
