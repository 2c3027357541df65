use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod error;
pub mod preset;
pub mod route;

pub use error::{GenerationError, RouteError};
pub use preset::Preset;
pub use route::{paths_conflict, Properties, RouteBinding, RouteConfig, MAX_COUNT};

/// Ordered mapping from output field name to the spec used to generate it.
/// Declaration order is kept so responses read the same way as the config.
pub type Schema = IndexMap<String, FieldSpec>;

/// One requested output field: a generator type name plus its options.
///
/// Options sit next to `type` in config files:
/// `{ "type": "number", "min": 1, "max": 9 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(flatten)]
    pub constraints: Constraints,
}

impl FieldSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constraints: Constraints::default(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints = self.constraints.with(key, value);
        self
    }
}

/// Named generator options (`min`, `max`, `zeros`, `from`, `to`, `method`, ...).
///
/// Accessors treat `null` the same as an absent key. A present value of the
/// wrong JSON type is reported as [`GenerationError::InvalidConstraint`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constraints(Map<String, Value>);

impl Constraints {
    /// Builds constraints from an arbitrary options value. Non-object values
    /// yield an empty set.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric option. Numeric strings such as `"10"` are accepted.
    pub fn number(&self, key: &str) -> Result<Option<f64>, GenerationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| GenerationError::invalid(key, "number is out of range")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| GenerationError::invalid(key, format!("'{}' is not a number", s))),
            Some(other) => Err(GenerationError::invalid(
                key,
                format!("expected a number, got {}", other),
            )),
        }
    }

    /// Non-negative whole-number option, such as a length or digit count.
    pub fn length(&self, key: &str) -> Result<Option<usize>, GenerationError> {
        match self.number(key)? {
            None => Ok(None),
            Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Some(n as usize)),
            Some(n) => Err(GenerationError::invalid(
                key,
                format!("expected a non-negative integer, got {}", n),
            )),
        }
    }

    pub fn string(&self, key: &str) -> Result<Option<&str>, GenerationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(GenerationError::invalid(
                key,
                format!("expected a string, got {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_spec_flattens_constraints() {
        let spec: FieldSpec =
            serde_json::from_value(json!({ "type": "number", "min": 1, "max": 9 })).unwrap();
        assert_eq!(spec.type_name, "number");
        assert_eq!(spec.constraints.number("min").unwrap(), Some(1.0));
        assert_eq!(spec.constraints.number("max").unwrap(), Some(9.0));

        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back, json!({ "type": "number", "min": 1, "max": 9 }));
    }

    #[test]
    fn test_field_spec_requires_type() {
        let result = serde_json::from_value::<FieldSpec>(json!({ "min": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_keeps_declaration_order() {
        let schema: Schema = serde_json::from_str(
            r#"{ "zeta": {"type": "id"}, "alpha": {"type": "uuid"}, "mid": {"type": "city"} }"#,
        )
        .unwrap();
        let keys: Vec<&str> = schema.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_constraint_accessors() {
        let c = Constraints::default()
            .with("min", "3")
            .with("zeros", 4)
            .with("from", "2021-01-01")
            .with("nothing", Value::Null);

        assert_eq!(c.number("min").unwrap(), Some(3.0));
        assert_eq!(c.length("zeros").unwrap(), Some(4));
        assert_eq!(c.string("from").unwrap(), Some("2021-01-01"));
        assert_eq!(c.number("nothing").unwrap(), None);
        assert_eq!(c.number("missing").unwrap(), None);
    }

    #[test]
    fn test_constraint_type_mismatch() {
        let c = Constraints::default()
            .with("min", "abc")
            .with("max", json!([1, 2]))
            .with("zeros", 2.5)
            .with("method", 7);

        assert!(matches!(
            c.number("min"),
            Err(GenerationError::InvalidConstraint { .. })
        ));
        assert!(c.number("max").is_err());
        assert!(c.length("zeros").is_err());
        assert!(c.string("method").is_err());
    }

    #[test]
    fn test_from_value_ignores_non_objects() {
        assert!(Constraints::from_value(&json!(5)).is_empty());
        assert!(Constraints::from_value(&Value::Null).is_empty());
        let c = Constraints::from_value(&json!({ "max": 2 }));
        assert_eq!(c.number("max").unwrap(), Some(2.0));
    }
}
