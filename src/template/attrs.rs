use std::collections::BTreeMap;

use crate::foundation::value::Value;
use crate::scene::attribute::Attribute;
use crate::template::ast::{AttrValue, Tag};
use crate::template::error::CompileError;

/// Classified attributes of one tag, by name.
pub type AttrMap = BTreeMap<String, Attribute<Value>>;

/// Turn raw attribute source text into a literal or a deferred expression.
///
/// Recognized literals, in order: `true`/`false`, signed decimal numbers, single-quoted strings
/// (with `\'` escapes) and double-quoted JSON strings. Everything else is kept verbatim as an
/// expression. The only failure is a double-quoted value that is not a valid JSON string.
pub fn classify(raw: &AttrValue) -> Result<Attribute<Value>, String> {
    let text = match raw {
        AttrValue::Raw(json) => return Ok(Attribute::Literal(Value::from(json.clone()))),
        AttrValue::Text(text) => text.as_str(),
    };

    match text {
        "true" => return Ok(Attribute::Literal(Value::Bool(true))),
        "false" => return Ok(Attribute::Literal(Value::Bool(false))),
        _ => {}
    }
    if is_decimal(text)
        && let Ok(n) = text.parse::<f64>()
    {
        return Ok(Attribute::Literal(Value::Number(n)));
    }
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        let inner = &text[1..text.len() - 1];
        return Ok(Attribute::Literal(Value::String(inner.replace("\\'", "'"))));
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return serde_json::from_str::<String>(text)
            .map(|s| Attribute::Literal(Value::String(s)))
            .map_err(|e| format!("invalid double-quoted string: {e}"));
    }
    Ok(Attribute::Dynamic(text.to_owned()))
}

/// `-?[0-9]+(\.[0-9]+)?`
fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

/// Classify the attributes of `tag` that pass `allowed`; the rest are dropped.
///
/// A repeated attribute name keeps its last value.
pub(crate) fn extract(
    tag: &Tag,
    allowed: impl Fn(&str) -> bool,
) -> Result<AttrMap, CompileError> {
    let mut out = AttrMap::new();
    for attr in &tag.attrs {
        if !allowed(&attr.name) {
            tracing::trace!(tag = %tag.name, attr = %attr.name, "unknown attribute dropped");
            continue;
        }
        let value = classify(&attr.val).map_err(|msg| {
            let line = if attr.line == 0 { tag.line } else { attr.line };
            CompileError::invalid(&tag.name, &attr.name, msg, line)
        })?;
        out.insert(attr.name.clone(), value);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/template/attrs.rs"]
mod tests;
