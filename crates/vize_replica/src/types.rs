//! Type definitions for vize_replica.
//!
//! This module contains the snapshot types a host hands over when a preview
//! mounts (`PreviewContext`), the per-argument view derived from it
//! (`ArgumentDescriptor`, `ArgumentSet`), and the produced `Snippet`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use vize_carton::{CompactString, FxHashSet};
use vize_glyph::FormatError;

/// Kind of control an argument represents, from `argTypes[name].table.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Component prop, rendered as an attribute
    #[serde(rename = "props")]
    Prop,
    /// Slot content
    #[serde(rename = "slots")]
    Slot,
    /// Emitted event
    #[serde(rename = "events")]
    Event,
    /// Exposed instance member
    #[serde(rename = "expose")]
    Expose,
    /// Any other category
    #[serde(other)]
    Other,
}

/// Table metadata of an arg type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgTable {
    /// Category the controls panel files this argument under
    #[serde(default)]
    pub category: Option<Classification>,
}

/// Host metadata for a single argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgType {
    /// Controls panel table metadata
    #[serde(default)]
    pub table: Option<ArgTable>,

    /// Declared default; `None` when the field is absent, `Some(Null)` for `null`
    #[serde(default, deserialize_with = "present")]
    pub default_value: Option<Value>,
}

/// Deserialize a field that is present (including `null`) as `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ArgType {
    /// Classification of this argument, if declared.
    #[inline]
    pub fn classification(&self) -> Option<Classification> {
        self.table.as_ref().and_then(|t| t.category)
    }
}

/// One component argument as seen at mount time.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    /// Argument identifier (camelCase as declared by the component)
    pub name: CompactString,
    /// Current value, `None` when unset
    pub current_value: Option<Value>,
    /// Control classification, `None` when metadata is missing
    pub classification: Option<Classification>,
    /// Declared default, `None` when not declared
    pub default_value: Option<Value>,
}

impl ArgumentDescriptor {
    /// Create a descriptor with no value and no metadata.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            current_value: None,
            classification: None,
            default_value: None,
        }
    }

    /// Set the current value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.current_value = Some(value);
        self
    }

    /// Set the classification.
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Set the declared default.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Whether this argument must be written out as an explicit attribute.
    ///
    /// True when the value is set, the argument is a prop, and the value
    /// differs from the declared default. An undeclared default never matches.
    pub fn is_rendered(&self) -> bool {
        let Some(value) = &self.current_value else {
            return false;
        };
        if self.classification != Some(Classification::Prop) {
            return false;
        }
        match &self.default_value {
            Some(default) => !structurally_equal(value, default),
            None => true,
        }
    }
}

/// Insertion-ordered set of arguments with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSet {
    entries: Vec<ArgumentDescriptor>,
}

impl ArgumentSet {
    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from a host snapshot.
    ///
    /// Order follows `arg_types`, then any args without metadata. Arg types
    /// that cannot be decoded are kept without metadata, so they are never rendered.
    pub fn from_snapshot(args: &Map<String, Value>, arg_types: &Map<String, Value>) -> Self {
        let mut set = Self::new();

        for (name, raw) in arg_types {
            let arg_type = match ArgType::deserialize(raw) {
                Ok(arg_type) => arg_type,
                Err(err) => {
                    tracing::debug!(arg = %name, error = %err, "ignoring malformed arg type");
                    ArgType::default()
                }
            };

            set.insert(ArgumentDescriptor {
                name: name.as_str().into(),
                current_value: args.get(name).cloned(),
                classification: arg_type.classification(),
                default_value: arg_type.default_value,
            });
        }

        let described: FxHashSet<&str> = arg_types.keys().map(String::as_str).collect();
        for (name, value) in args {
            if !described.contains(name.as_str()) {
                set.insert(ArgumentDescriptor::new(name.as_str()).with_value(value.clone()));
            }
        }

        set
    }

    /// Insert a descriptor. A descriptor with the same name is replaced in place.
    pub fn insert(&mut self, descriptor: ArgumentDescriptor) {
        match self.entries.iter_mut().find(|d| d.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.entries.push(descriptor),
        }
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.entries.iter().find(|d| d.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ArgumentDescriptor> {
        self.entries.iter()
    }

    /// Arguments that must be written out, in insertion order.
    pub fn selected(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.entries.iter().filter(|d| d.is_rendered())
    }
}

impl FromIterator<ArgumentDescriptor> for ArgumentSet {
    fn from_iter<I: IntoIterator<Item = ArgumentDescriptor>>(iter: I) -> Self {
        let mut set = Self::new();
        for descriptor in iter {
            set.insert(descriptor);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ArgumentSet {
    type Item = &'a ArgumentDescriptor;
    type IntoIter = std::slice::Iter<'a, ArgumentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compare two values the way the controls panel does.
///
/// Numbers compare by numeric value, so `1` equals `1.0`.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| structurally_equal(x, y)))
        }
        _ => a == b,
    }
}

/// An attribute produced for one selected argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAttribute {
    /// Hyphenated attribute name
    pub name: CompactString,
    /// Full attribute syntax, e.g. `label="Go"` or `:count="3"`
    pub fragment: String,
}

/// Explicit source configured for a preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceParameters {
    /// Source code shown instead of a reconstruction
    #[serde(default)]
    pub code: Option<String>,
}

/// Docs parameters of a preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsParameters {
    #[serde(default)]
    pub source: Option<SourceParameters>,
}

/// Preview parameters relevant to source rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewParameters {
    #[serde(default)]
    pub docs: Option<DocsParameters>,
}

/// Read-only snapshot of a mounted preview supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewContext {
    /// Preview identifier, echoed on the notification channel
    pub id: String,

    /// Raw source text of the preview definition
    #[serde(default)]
    pub source: String,

    /// Current argument values
    #[serde(default)]
    pub args: Map<String, Value>,

    /// Argument metadata
    #[serde(default)]
    pub arg_types: Map<String, Value>,

    /// Preview parameters
    #[serde(default)]
    pub parameters: PreviewParameters,
}

impl PreviewContext {
    /// Create a context from an id and raw source text.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    /// Decode a host snapshot.
    pub fn from_json(json: &str) -> Result<Self, ReplicaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Argument view of this snapshot.
    #[inline]
    pub fn arguments(&self) -> ArgumentSet {
        ArgumentSet::from_snapshot(&self.args, &self.arg_types)
    }

    /// Source code explicitly configured via `parameters.docs.source.code`.
    pub fn explicit_source(&self) -> Option<&str> {
        self.parameters
            .docs
            .as_ref()?
            .source
            .as_ref()?
            .code
            .as_deref()
    }
}

/// Formatted markup for one preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Preview the snippet belongs to
    pub preview_id: String,
    /// Pretty-printed markup
    pub code: String,
}

/// Error type for source reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum ReplicaError {
    #[error("Invalid preview context: {0}")]
    InvalidContext(#[from] serde_json::Error),

    #[error("Failed to render code: {0}")]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prop(name: &str) -> ArgumentDescriptor {
        ArgumentDescriptor::new(name).with_classification(Classification::Prop)
    }

    #[test]
    fn test_value_equal_to_default_is_not_rendered() {
        let arg = prop("disabled")
            .with_value(json!(false))
            .with_default(json!(false));
        assert!(!arg.is_rendered());
    }

    #[test]
    fn test_value_differing_from_default_is_rendered() {
        let arg = prop("disabled").with_value(json!(true)).with_default(json!(false));
        assert!(arg.is_rendered());
    }

    #[test]
    fn test_unset_value_is_not_rendered() {
        let arg = prop("label").with_default(json!("x"));
        assert!(!arg.is_rendered());
    }

    #[test]
    fn test_non_prop_is_not_rendered() {
        let arg = ArgumentDescriptor::new("default")
            .with_classification(Classification::Slot)
            .with_value(json!("Slot text"));
        assert!(!arg.is_rendered());

        let unclassified = ArgumentDescriptor::new("label").with_value(json!("x"));
        assert!(!unclassified.is_rendered());
    }

    #[test]
    fn test_undeclared_default_is_rendered() {
        assert!(prop("label").with_value(json!("x")).is_rendered());
        // `false` is still written out as a boolean attribute request
        assert!(prop("open").with_value(json!(false)).is_rendered());
    }

    #[test]
    fn test_null_default_differs_from_absent_default() {
        let with_null = prop("value")
            .with_value(json!(null))
            .with_default(json!(null));
        assert!(!with_null.is_rendered());

        assert!(prop("value").with_value(json!(null)).is_rendered());
    }

    #[test]
    fn test_structural_equality() {
        assert!(structurally_equal(&json!(1), &json!(1.0)));
        assert!(structurally_equal(
            &json!({ "a": [1, 2], "b": "x" }),
            &json!({ "b": "x", "a": [1, 2] })
        ));
        assert!(!structurally_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!structurally_equal(&json!("1"), &json!(1)));
        assert!(!structurally_equal(&json!({ "a": 1 }), &json!({ "a": 1, "b": 2 })));
    }

    #[test]
    fn test_arg_type_deserialize() {
        let arg_type: ArgType = serde_json::from_value(json!({
            "table": { "category": "props", "type": { "summary": "string" } },
            "defaultValue": ""
        }))
        .unwrap();
        assert_eq!(arg_type.classification(), Some(Classification::Prop));
        assert_eq!(arg_type.default_value, Some(json!("")));

        let slot: ArgType = serde_json::from_value(json!({ "table": { "category": "slots" } }))
            .unwrap();
        assert_eq!(slot.classification(), Some(Classification::Slot));
        assert_eq!(slot.default_value, None);

        let null_default: ArgType = serde_json::from_value(json!({ "defaultValue": null }))
            .unwrap();
        assert_eq!(null_default.default_value, Some(Value::Null));
        assert_eq!(null_default.classification(), None);

        let custom: ArgType =
            serde_json::from_value(json!({ "table": { "category": "styling" } })).unwrap();
        assert_eq!(custom.classification(), Some(Classification::Other));
    }

    #[test]
    fn test_from_snapshot_preserves_order() {
        let args = json!({ "size": "lg", "label": "Go", "extra": 1 });
        let arg_types = json!({
            "label": { "table": { "category": "props" } },
            "size": { "table": { "category": "props" }, "defaultValue": "md" },
            "broken": "not an object",
        });
        let set = ArgumentSet::from_snapshot(
            args.as_object().unwrap(),
            arg_types.as_object().unwrap(),
        );

        let names: Vec<&str> = set.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["label", "size", "broken", "extra"]);

        let broken = set.get("broken").unwrap();
        assert_eq!(broken.classification, None);
        assert_eq!(broken.current_value, None);

        let selected: Vec<&str> = set.selected().map(|d| d.name.as_str()).collect();
        assert_eq!(selected, ["label", "size"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut set: ArgumentSet = [prop("a"), prop("b")].into_iter().collect();
        set.insert(prop("a").with_value(json!(1)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().current_value, Some(json!(1)));
    }

    #[test]
    fn test_preview_context_from_json() {
        let ctx = PreviewContext::from_json(
            r#"{
                "id": "forms-input--default",
                "source": "{ template: '<my-input v-bind=\"args\" />' }",
                "args": { "placeholder": "Name" },
                "argTypes": { "placeholder": { "table": { "category": "props" }, "defaultValue": "" } },
                "parameters": { "docs": { "source": { "code": "<my-input />" } } }
            }"#,
        )
        .unwrap();

        assert_eq!(ctx.id, "forms-input--default");
        assert_eq!(ctx.explicit_source(), Some("<my-input />"));
        assert_eq!(ctx.arguments().selected().count(), 1);
    }

    #[test]
    fn test_preview_context_invalid_json() {
        let err = PreviewContext::from_json("{ \"source\": 1 }").unwrap_err();
        assert!(matches!(err, ReplicaError::InvalidContext(_)));
    }
}
