//! YAML data files.

use serde_yaml::Value as YamlValue;
use stencil_domain::{DataContext, Map, Value};

use super::SerializationError;

/// Parses a YAML mapping into a `DataContext`.
///
/// Non-string mapping keys (`200:`, `true:`, `~:`) are stringified so they
/// stay reachable by path, e.g. `status.200`.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or its top level is not a mapping.
pub fn context_from_yaml(yaml: &str) -> Result<DataContext, SerializationError> {
    let value: YamlValue = serde_yaml::from_str(yaml)?;
    Ok(DataContext::try_from(from_yaml_value(value))?)
}

fn from_yaml_value(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_u64().map(Value::from))
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or_default(),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            Value::List(items.into_iter().map(from_yaml_value).collect())
        }
        YamlValue::Mapping(mapping) => Value::Map(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml_value(value)))
                .collect::<Map>(),
        ),
        // Tags (`!Thing value`) carry no meaning for substitution
        YamlValue::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        other => from_yaml_value(other).to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars_and_nesting() {
        let context = context_from_yaml(
            "user:\n  name: John\n  email: ~\nprice: 9.5\nactive: true\nitems:\n  - one\n  - two\n",
        )
        .unwrap();

        assert_eq!(context.resolve("user.name"), Some(&Value::from("John")));
        assert_eq!(context.resolve("user.email"), None);
        assert_eq!(context.resolve("price"), Some(&Value::Float(9.5)));
        assert_eq!(context.resolve("active"), Some(&Value::Bool(true)));
        assert_eq!(context.resolve("items.0"), Some(&Value::from("one")));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let context = context_from_yaml(
            "status:\n  200: OK\n  404: Missing\nflags:\n  true: on\nname: Ann\n",
        )
        .unwrap();

        assert_eq!(context.resolve("status.200"), Some(&Value::from("OK")));
        assert_eq!(context.resolve("status.404"), Some(&Value::from("Missing")));
        assert_eq!(context.resolve("flags.true"), Some(&Value::from("on")));
        assert_eq!(context.resolve("name"), Some(&Value::from("Ann")));
    }

    #[test]
    fn test_key_order_preserved() {
        let context = context_from_yaml("zebra: 1\napple: 2\n").unwrap();
        let keys: Vec<_> = context.root().keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_tagged_value_unwrapped() {
        let context = context_from_yaml("price: !money 12\n").unwrap();
        assert_eq!(context.resolve("price"), Some(&Value::Int(12)));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let result = context_from_yaml("just text");
        assert!(matches!(result, Err(SerializationError::Context(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = context_from_yaml("a: [unclosed");
        assert!(matches!(result, Err(SerializationError::Yaml(_))));
    }
}
