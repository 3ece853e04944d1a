use std::sync::Arc;

use super::*;

#[test]
fn typed_converts_literals_and_keeps_dynamic_sources() {
    let n = Attribute::<f64>::typed(Attribute::Literal(Value::Number(2.0))).unwrap();
    assert_eq!(n, Attribute::Literal(2.0));

    let d = Attribute::<f64>::typed(Attribute::dynamic("a + 1")).unwrap();
    assert_eq!(d.as_dynamic(), Some("a + 1"));
    assert!(d.is_dynamic());
    assert_eq!(d.as_literal(), None);

    let err = Attribute::<f64>::typed(Attribute::Literal(Value::from("x"))).unwrap_err();
    assert_eq!(err, "expected number, got string");
}

#[test]
fn literal_and_dynamic_wire_shapes() {
    let lit: Attribute<f64> = 1.5.into();
    assert_eq!(serde_json::to_string(&lit).unwrap(), "1.5");

    let dynamic: Attribute<f64> = Attribute::dynamic("a + 1");
    assert_eq!(
        serde_json::to_string(&dynamic).unwrap(),
        r#"{"$":"a + 1"}"#
    );
}

#[test]
fn strings_accept_numbers_and_booleans() {
    assert_eq!(String::from_value(Value::Number(3.0)).unwrap(), "3");
    assert_eq!(String::from_value(Value::Number(0.25)).unwrap(), "0.25");
    assert_eq!(String::from_value(Value::Bool(true)).unwrap(), "true");
    assert_eq!(
        String::from_value(Value::Null).unwrap_err(),
        "expected string, got null"
    );
}

#[test]
fn transition_values_need_known_numeric_props() {
    let raw = Value::from(serde_json::json!({"opacity": 0, "translate_x": 5}));
    let values = TransitionValues::from_value(raw).unwrap();
    assert_eq!(values.get(&TransitionProp::Opacity), Some(&0.0));
    assert_eq!(values.get(&TransitionProp::TranslateX), Some(&5.0));

    let unknown = Value::from(serde_json::json!({"blur": 1}));
    assert_eq!(
        TransitionValues::from_value(unknown).unwrap_err(),
        "`blur` is not a transitionable property"
    );

    let wrong = Value::from(serde_json::json!({"opacity": "1"}));
    assert_eq!(
        TransitionValues::from_value(wrong).unwrap_err(),
        "opacity: expected number, got string"
    );

    assert!(TransitionValues::from_value(Value::Number(1.0)).is_err());
}

#[test]
fn easing_names() {
    assert_eq!(
        Easing::from_value(Value::from("ease-in-out")).unwrap(),
        Easing::EaseInOut
    );
    assert_eq!(
        Easing::from_value(Value::from("bouncy")).unwrap_err(),
        "unknown easing `bouncy`"
    );
    assert_eq!(Easing::default(), Easing::Linear);
}

#[test]
fn image_sources_from_urls_or_bytes() {
    assert_eq!(
        ImageSource::from_value(Value::from("https://cdn/x.png")).unwrap(),
        ImageSource::Url("https://cdn/x.png".to_owned())
    );

    let bytes: Arc<[u8]> = Arc::from(vec![1u8, 2, 3]);
    assert_eq!(
        ImageSource::from_value(Value::Binary(bytes.clone())).unwrap(),
        ImageSource::Binary(bytes)
    );
    assert!(ImageSource::from_value(Value::Number(1.0)).is_err());
}

#[test]
fn image_sources_serialize_as_url_or_byte_array() {
    let url = ImageSource::Url("https://cdn/x.png".to_owned());
    assert_eq!(
        serde_json::to_value(&url).unwrap(),
        serde_json::json!("https://cdn/x.png")
    );

    let bin = Attribute::Literal(ImageSource::Binary(Arc::from(vec![7u8, 8])));
    assert_eq!(
        serde_json::to_value(&bin).unwrap(),
        serde_json::json!([7, 8])
    );
}

#[test]
fn style_requires_an_object() {
    let style = Object::from([("color".to_owned(), Value::from("red"))]);
    assert_eq!(
        Object::from_value(Value::Object(style.clone())).unwrap(),
        style
    );
    assert_eq!(
        Object::from_value(Value::Array(vec![])).unwrap_err(),
        "expected object, got array"
    );
}
