use axum::http::Method;
use serde::{Deserialize, Serialize};

use super::{Preset, RouteError, Schema};

/// The `properties` of a route: either a preset name or an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Properties {
    Preset(String),
    Schema(Schema),
}

impl Properties {
    pub fn resolve(&self) -> Result<Schema, RouteError> {
        match self {
            Properties::Preset(name) => Ok(name.parse::<Preset>()?.schema()),
            Properties::Schema(schema) => Ok(schema.clone()),
        }
    }
}

impl From<Preset> for Properties {
    fn from(preset: Preset) -> Self {
        Properties::Preset(preset.name().to_string())
    }
}

impl From<Schema> for Properties {
    fn from(schema: Schema) -> Self {
        Properties::Schema(schema)
    }
}

/// How a route answers: HTTP method, number of objects and their schema.
///
/// `method` defaults to `GET` and `count` to `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_count")]
    pub count: usize,
    pub properties: Properties,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_count() -> usize {
    1
}

impl RouteConfig {
    pub fn new(properties: impl Into<Properties>) -> Self {
        Self {
            method: default_method(),
            count: default_count(),
            properties: properties.into(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Upper bound for the number of objects a single route returns.
pub const MAX_COUNT: usize = 10_000;

/// A validated method + path association with the schema and object count
/// used to answer it. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RouteBinding {
    pub method: Method,
    pub path: String,
    pub schema: Schema,
    pub count: usize,
}

impl RouteBinding {
    pub fn new(path: &str, config: &RouteConfig) -> Result<Self, RouteError> {
        validate_path(path)?;
        if config.count == 0 || config.count > MAX_COUNT {
            return Err(RouteError::InvalidCount {
                path: path.to_string(),
                max: MAX_COUNT,
            });
        }

        Ok(Self {
            method: parse_method(&config.method)?,
            path: path.to_string(),
            schema: config.properties.resolve()?,
            count: config.count,
        })
    }
}

/// Checks a path against the router's syntax: a leading `/`, parameters
/// (`:name`) and catch-alls (`*name`) that fill a whole segment and carry a
/// name, and a catch-all only in the last segment.
pub fn validate_path(path: &str) -> Result<(), RouteError> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(RouteError::invalid_path(path, "must start with '/'"));
    };

    let segments: Vec<&str> = rest.split('/').collect();
    for (idx, segment) in segments.iter().enumerate() {
        let (marker, name) = match segment.chars().next() {
            Some(c @ (':' | '*')) => (Some(c), &segment[1..]),
            _ => (None, *segment),
        };

        if name.contains([':', '*']) {
            return Err(RouteError::invalid_path(
                path,
                format!("'{}' must be a whole segment parameter", segment),
            ));
        }
        if marker.is_some() && name.is_empty() {
            return Err(RouteError::invalid_path(
                path,
                format!("'{}' is missing a parameter name", segment),
            ));
        }
        if marker == Some('*') && idx + 1 != segments.len() {
            return Err(RouteError::invalid_path(
                path,
                "a catch-all is only allowed in the last segment",
            ));
        }
    }
    Ok(())
}

/// Whether two distinct paths bind different parameters at the same
/// position (`/users/:id` and `/users/:name/posts`, or `/files/:id` and
/// `/files/*rest`). The router cannot hold both.
pub fn paths_conflict(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    for (left, right) in a.split('/').zip(b.split('/')) {
        if left == right {
            continue;
        }
        return is_parameter(left) && is_parameter(right);
    }
    false
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with([':', '*'])
}

/// Parses a method name case-insensitively, accepting only the methods the
/// HTTP router can dispatch on.
pub fn parse_method(method: &str) -> Result<Method, RouteError> {
    match method.trim().to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        "TRACE" => Ok(Method::TRACE),
        _ => Err(RouteError::InvalidMethod(method.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldSpec;

    #[test]
    fn test_parse_method_is_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Post").unwrap(), Method::POST);
        assert_eq!(parse_method(" delete ").unwrap(), Method::DELETE);
        assert!(matches!(
            parse_method("FETCH"),
            Err(RouteError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_binding_expands_preset() {
        let binding = RouteBinding::new("/user", &RouteConfig::new(Preset::Person)).unwrap();
        assert_eq!(binding.schema.len(), 12);
        assert_eq!(binding.method, Method::GET);
        assert_eq!(binding.count, 1);
    }

    #[test]
    fn test_binding_keeps_inline_schema() {
        let schema: Schema = [("id".to_string(), FieldSpec::new("id"))].into_iter().collect();
        let config = RouteConfig::new(schema).method("post").count(3);
        let binding = RouteBinding::new("/items", &config).unwrap();
        assert_eq!(binding.method, Method::POST);
        assert_eq!(binding.count, 3);
        assert!(binding.schema.contains_key("id"));
    }

    #[test]
    fn test_binding_rejects_bad_input() {
        let person = RouteConfig::new(Preset::Person);
        assert_eq!(
            RouteBinding::new("user", &person).unwrap_err(),
            RouteError::invalid_path("user", "must start with '/'")
        );
        assert!(matches!(
            RouteBinding::new("/user", &person.clone().count(0)),
            Err(RouteError::InvalidCount { .. })
        ));
        assert!(matches!(
            RouteBinding::new("/user", &person.clone().count(MAX_COUNT + 1)),
            Err(RouteError::InvalidCount { .. })
        ));
        assert!(RouteBinding::new("/user", &person.clone().count(MAX_COUNT)).is_ok());
        assert!(matches!(
            RouteBinding::new("/user", &person.clone().method("FETCH")),
            Err(RouteError::InvalidMethod(_))
        ));
        assert!(matches!(
            RouteBinding::new("/user", &RouteConfig::new(Properties::Preset("robot".into()))),
            Err(RouteError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_validate_path_syntax() {
        for ok in ["/", "/users", "/users/:id", "/users/:id/posts", "/files/*rest", "/a-b/c_d"] {
            assert!(validate_path(ok).is_ok(), "{} should be accepted", ok);
        }
        for bad in [
            "users",
            "/api/*",
            "/users/:",
            "/users/:/posts",
            "/files/*rest/more",
            "/users/id:x",
            "/users/:id:x",
            "/files/a*b",
        ] {
            assert!(
                matches!(validate_path(bad), Err(RouteError::InvalidPath { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_paths_conflict_on_parameter_names() {
        assert!(paths_conflict("/users/:id", "/users/:name"));
        assert!(paths_conflict("/users/:id", "/users/:name/posts"));
        assert!(paths_conflict("/files/:id", "/files/*rest"));

        assert!(!paths_conflict("/users/:id", "/users/:id"));
        assert!(!paths_conflict("/users/:id", "/users/:id/posts"));
        assert!(!paths_conflict("/users/:id", "/users/me"));
        assert!(!paths_conflict("/users/:id", "/teams/:name"));
    }

    #[test]
    fn test_route_config_defaults() {
        let config: RouteConfig = serde_json::from_str(r#"{ "properties": "person" }"#).unwrap();
        assert_eq!(config.method, "GET");
        assert_eq!(config.count, 1);
        assert_eq!(config, RouteConfig::new(Preset::Person));
    }

    #[test]
    fn test_properties_deserialize_untagged() {
        let preset: Properties = serde_json::from_str(r#""person""#).unwrap();
        assert_eq!(preset, Properties::Preset("person".to_string()));

        let inline: Properties =
            serde_json::from_str(r#"{ "price": { "type": "price" } }"#).unwrap();
        match inline {
            Properties::Schema(schema) => assert_eq!(schema["price"].type_name, "price"),
            other => panic!("expected inline schema, got {:?}", other),
        }
    }
}
