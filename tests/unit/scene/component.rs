use serde_json::json;

use super::*;

#[test]
fn tags_round_trip_through_kinds() {
    for kind in ComponentKind::ALL {
        assert_eq!(ComponentKind::from_tag(kind.tag()), Some(kind));
        assert_eq!(ComponentSpec::new(kind).kind(), kind);
    }
    assert_eq!(ComponentKind::from_tag("div"), None);
    assert_eq!(ComponentKind::from_tag("phase"), None);
}

#[test]
fn only_stacks_and_images_own_children() {
    assert!(ComponentKind::ZStack.is_container());
    assert!(ComponentKind::Image.is_container());
    assert!(!ComponentKind::Text.is_container());
    assert!(!ComponentKind::Rectangle.is_container());
    assert!(ComponentSpec::new(ComponentKind::Text).children().is_none());
}

#[test]
fn attribute_whitelist_is_per_kind() {
    for kind in ComponentKind::ALL {
        for name in ["id", "style", "width", "padding_left", "opacity", "translate_y"] {
            assert!(kind.allows_attr(name), "{kind:?} should allow {name}");
        }
        assert!(!kind.allows_attr("onclick"));
    }

    assert!(ComponentKind::Text.allows_attr("text"));
    assert!(!ComponentKind::Text.allows_attr("gap"));
    assert!(ComponentKind::VStack.allows_attr("gap"));
    assert!(ComponentKind::HStack.allows_attr("justify"));
    assert!(ComponentKind::Image.allows_attr("src"));
    assert!(ComponentKind::VStack.allows_attr("children"));
    assert!(!ComponentKind::Rectangle.allows_attr("children"));
    assert!(!ComponentKind::ZStack.allows_attr("src"));
}

#[test]
fn set_attr_types_literals() {
    let mut text = ComponentSpec::new(ComponentKind::Text);
    text.set_attr("id", Attribute::Literal(Value::from("title")))
        .unwrap();
    text.set_attr("text", Attribute::Literal(Value::Number(3.0)))
        .unwrap();
    text.set_attr("opacity", Attribute::dynamic("visible ? 1 : 0"))
        .unwrap();
    text.set_attr("width", Attribute::Literal(Value::from("50%")))
        .unwrap();

    let ComponentSpec::Text(spec) = &text else {
        panic!("expected text");
    };
    assert_eq!(text.id(), Some("title"));
    assert_eq!(spec.text, Some(Attribute::Literal("3".to_owned())));
    assert_eq!(
        spec.common.transition.get(&TransitionProp::Opacity),
        Some(&Attribute::dynamic("visible ? 1 : 0"))
    );
    assert_eq!(
        spec.common.layout.get(&LayoutProp::Width),
        Some(&Attribute::Literal(Value::from("50%")))
    );
}

#[test]
fn set_attr_reports_the_expected_type() {
    let mut stack = ComponentSpec::new(ComponentKind::VStack);
    assert_eq!(
        stack.set_attr("gap", Attribute::Literal(Value::from("wide"))),
        Err("number")
    );
    assert_eq!(
        stack.set_attr("id", Attribute::Literal(Value::Array(vec![]))),
        Err("string")
    );
    assert_eq!(
        stack.set_attr("style", Attribute::Literal(Value::Number(1.0))),
        Err("object")
    );
    stack
        .set_attr("children", Attribute::Literal(Value::Null))
        .unwrap();
}

#[test]
fn find_searches_depth_first() {
    let mut leaf = ComponentSpec::new(ComponentKind::Rectangle);
    leaf.common_mut().id = Some(Attribute::Literal("leaf".to_owned()));
    let mut stack = ComponentSpec::new(ComponentKind::HStack);
    stack.children_mut().unwrap().push(leaf);
    let mut root = ComponentSpec::default();
    root.children_mut().unwrap().push(stack);

    assert_eq!(
        root.find("leaf").map(ComponentSpec::kind),
        Some(ComponentKind::Rectangle)
    );
    assert!(root.find("nope").is_none());
}

#[test]
fn serializes_with_kind_tag_and_flat_fields() {
    let mut text = ComponentSpec::new(ComponentKind::Text);
    text.set_attr("id", Attribute::Literal(Value::from("t")))
        .unwrap();
    text.set_attr("width", Attribute::Literal(Value::Number(100.0)))
        .unwrap();
    text.set_attr("opacity", Attribute::dynamic("a"))
        .unwrap();
    text.set_attr("text", Attribute::Literal(Value::from("Hi")))
        .unwrap();
    text.common_mut().line = Some(4);

    let mut root = ComponentSpec::default();
    root.children_mut().unwrap().push(text);

    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        json!({
            "kind": "zstack",
            "children": [{
                "kind": "text",
                "id": "t",
                "width": 100,
                "opacity": {"$": "a"},
                "text": "Hi"
            }]
        })
    );
}
