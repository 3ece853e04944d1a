use serde_json::json;

use super::*;

fn node(v: serde_json::Value) -> Node {
    serde_json::from_value(v).unwrap()
}

#[test]
fn tag_with_attributes_and_block() {
    let n = node(json!({
        "type": "Tag",
        "name": "vstack",
        "line": 3,
        "attrs": [
            {"name": "gap", "val": "8", "line": 3},
            {"name": "visible", "val": true}
        ],
        "block": {"type": "Block", "line": 3, "nodes": [
            {"type": "Tag", "name": "text", "line": 4}
        ]}
    }));

    let Node::Tag(tag) = n else {
        panic!("expected tag");
    };
    assert_eq!(tag.name, "vstack");
    assert_eq!(tag.line, 3);
    assert_eq!(tag.attrs[0].val, AttrValue::Text("8".to_owned()));
    assert_eq!(tag.attrs[1].val, AttrValue::Raw(json!(true)));
    assert_eq!(tag.attrs[1].line, 0);
    assert_eq!(tag.block.nodes.len(), 1);
    assert_eq!(tag.block.nodes[0].line(), 4);
}

#[test]
fn conditional_with_else_if_chain() {
    let n = node(json!({
        "type": "Conditional",
        "test": "a",
        "line": 1,
        "consequent": {"type": "Block", "nodes": []},
        "alternate": {
            "type": "Conditional",
            "test": "b",
            "line": 3,
            "consequent": {"type": "Block", "nodes": []}
        }
    }));

    let Node::Conditional(cond) = n else {
        panic!("expected conditional");
    };
    assert_eq!(cond.test, "a");
    let alternate = cond.alternate.unwrap();
    assert_eq!(alternate.kind_name(), "Conditional");
    assert_eq!(alternate.line(), 3);
}

#[test]
fn mixins_default_to_declarations() {
    let decl = node(json!({"type": "Mixin", "name": "card", "block": {"nodes": []}}));
    let Node::Mixin(decl) = decl else {
        panic!("expected mixin");
    };
    assert!(!decl.call);
    assert_eq!(decl.args, None);

    let call = node(json!({"type": "Mixin", "name": "card", "call": true, "args": "1, 2"}));
    let Node::Mixin(call) = call else {
        panic!("expected mixin");
    };
    assert!(call.call);
    assert_eq!(call.args.as_deref(), Some("1, 2"));
    assert!(call.block.is_none());
}

#[test]
fn comments_drop_their_content() {
    assert_eq!(
        node(json!({"type": "Comment", "val": " note", "line": 2})),
        Node::Comment(Comment { line: 2 })
    );
    assert_eq!(
        node(json!({"type": "BlockComment", "line": 5, "block": {"nodes": []}})),
        Node::Comment(Comment { line: 5 })
    );
}

#[test]
fn other_node_types_are_kept_for_the_compiler_to_reject() {
    let n = node(json!({"type": "Each", "obj": "items", "line": 9}));
    assert_eq!(
        n,
        Node::Unsupported {
            kind: "Each".to_owned(),
            line: 9
        }
    );
    assert_eq!(n.kind_name(), "Each");
}

#[test]
fn nodes_need_a_type() {
    let err = serde_json::from_value::<Node>(json!({"name": "text"})).unwrap_err();
    assert!(err.to_string().contains("type"), "{err}");
}

#[test]
fn malformed_known_nodes_are_errors() {
    assert!(serde_json::from_value::<Node>(json!({"type": "Tag", "line": 1})).is_err());
    assert!(serde_json::from_value::<Node>(json!({"type": "Conditional", "test": "a"})).is_err());
}
