//! Template rewriting.
//!
//! Replaces the bind-all placeholder of a template with explicit attributes
//! for every prop whose current value differs from its default.

use crate::types::{ArgumentSet, RenderedAttribute};
use serde_json::{Number, Value};
use vize_carton::hyphenate;

/// The bind-all directive previews use to forward their args.
pub const DEFAULT_PLACEHOLDER: &str = r#"v-bind="args""#;

/// Serialize one argument to attribute syntax.
///
/// - `true` renders the bare attribute name, `false` renders nothing
/// - strings render `name="value"`, unescaped
/// - everything else renders a bound attribute `:name="value"`
///
/// ```
/// use serde_json::json;
/// use vize_replica::serialize_attribute;
///
/// assert_eq!(serialize_attribute("isActive", &json!(true)), "is-active");
/// assert_eq!(serialize_attribute("count", &json!(3)), r#":count="3""#);
/// ```
pub fn serialize_attribute(name: &str, value: &Value) -> String {
    let name = hyphenate(name);
    match value {
        Value::Bool(true) => name.into(),
        Value::Bool(false) => String::new(),
        Value::String(s) => format!(r#"{}="{}""#, name, s),
        other => format!(r#":{}="{}""#, name, to_display_string(other)),
    }
}

/// Attributes for every selected argument, in set order.
///
/// Arguments serializing to nothing (`false` booleans) are skipped.
pub fn rendered_attributes(args: &ArgumentSet) -> Vec<RenderedAttribute> {
    args.selected()
        .filter_map(|arg| {
            let value = arg.current_value.as_ref()?;
            let fragment = serialize_attribute(&arg.name, value);
            (!fragment.is_empty()).then(|| RenderedAttribute {
                name: hyphenate(&arg.name),
                fragment,
            })
        })
        .collect()
}

/// Join attributes, each prefixed by a single space.
pub fn assemble_attributes(attrs: &[RenderedAttribute]) -> String {
    let capacity = attrs.iter().map(|a| a.fragment.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.fragment);
    }
    out
}

/// Rewrite a template, replacing the first `placeholder` with the
/// attributes of all args that differ from their defaults.
///
/// Whitespace directly before the placeholder is folded into the inserted
/// attributes, which carry their own leading space. Without a placeholder
/// the template is returned unchanged.
///
/// ```
/// use serde_json::json;
/// use vize_replica::{rewrite, ArgumentDescriptor, ArgumentSet, Classification};
///
/// let args: ArgumentSet = [ArgumentDescriptor::new("label")
///     .with_classification(Classification::Prop)
///     .with_value(json!("Go"))]
/// .into_iter()
/// .collect();
///
/// let out = rewrite(r#"<button v-bind="args">Click</button>"#, &args, r#"v-bind="args""#);
/// assert_eq!(out, r#"<button label="Go">Click</button>"#);
/// ```
pub fn rewrite(template: &str, args: &ArgumentSet, placeholder: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    let Some(start) = template.find(placeholder) else {
        return template.to_string();
    };

    let attrs = assemble_attributes(&rendered_attributes(args));
    let head = template[..start].trim_end();
    let tail = &template[start + placeholder.len()..];

    let mut out = String::with_capacity(head.len() + attrs.len() + tail.len());
    out.push_str(head);
    out.push_str(&attrs);
    out.push_str(tail);
    out
}

/// Default string conversion of a value, as a script engine would print it.
fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[inline]
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(float_to_string).unwrap_or_default()
    }
}

/// Shortest round-trip form of a float. Magnitudes of at least `1e21` or
/// below `1e-6` use exponent form with an explicit sign (`1e+21`, `1.5e-7`).
fn float_to_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude < 1e21 && magnitude >= 1e-6 {
        // f64 Display drops a trailing `.0`
        return f.to_string();
    }
    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}
