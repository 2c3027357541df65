use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::schema_mapper;
use super::value_generator::ValueGenerator;
use crate::domain::{paths_conflict, RouteBinding, RouteConfig, RouteError};

/// Route table for the mock server.
///
/// Routes are registered once at startup; [`MockRouter::into_router`] then
/// hands the finished table to axum. Nothing about a route changes after
/// that point.
pub struct MockRouter {
    generator: Arc<ValueGenerator>,
    bindings: Vec<Arc<RouteBinding>>,
}

impl MockRouter {
    pub fn new() -> Self {
        Self::with_generator(Arc::new(ValueGenerator::new()))
    }

    pub fn with_generator(generator: Arc<ValueGenerator>) -> Self {
        Self {
            generator,
            bindings: Vec::new(),
        }
    }

    /// Binds `config.method` + `path` to a handler that answers with
    /// generated data. The same path may be registered for several methods.
    pub fn register_route(&mut self, path: &str, config: &RouteConfig) -> Result<(), RouteError> {
        let binding = RouteBinding::new(path, config)?;

        if self
            .bindings
            .iter()
            .any(|b| b.method == binding.method && b.path == binding.path)
        {
            return Err(RouteError::Duplicate {
                method: binding.method.to_string(),
                path: binding.path,
            });
        }

        if let Some(existing) = self
            .bindings
            .iter()
            .find(|b| paths_conflict(&b.path, &binding.path))
        {
            return Err(RouteError::PathConflict {
                path: binding.path,
                existing: existing.path.clone(),
            });
        }

        for field in binding.schema.values() {
            if !self.generator.supports(&field.type_name) {
                warn!(
                    "Route {} {} uses unknown field type '{}', it will always be null",
                    binding.method, binding.path, field.type_name
                );
            }
        }

        info!(
            "Registered route {} {} (count: {}, fields: {})",
            binding.method,
            binding.path,
            binding.count,
            binding.schema.len()
        );
        self.bindings.push(Arc::new(binding));
        Ok(())
    }

    pub fn bindings(&self) -> &[Arc<RouteBinding>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Builds the axum router. Routes sharing a path are merged into one
    /// method router.
    pub fn into_router(self) -> Router {
        let mut router = Router::new();

        for binding in self.bindings {
            let filter = match MethodFilter::try_from(binding.method.clone()) {
                Ok(filter) => filter,
                Err(e) => {
                    warn!("Skipping route {} {}: {}", binding.method, binding.path, e);
                    continue;
                }
            };

            let path = binding.path.clone();
            let handler = {
                let generator = self.generator.clone();
                move || {
                    let generator = generator.clone();
                    let binding = binding.clone();
                    async move { respond(&generator, &binding) }
                }
            };

            router = router.route(&path, on(filter, handler));
        }

        router
    }
}

impl Default for MockRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the payload for one request and wraps it as `{ "data": ... }`.
/// Any failure, including a panic inside a generator, becomes a `500` with
/// `{ "error": "<message>" }`.
fn respond(generator: &ValueGenerator, binding: &RouteBinding) -> Response {
    debug!("Generating {} object(s) for {} {}", binding.count, binding.method, binding.path);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        schema_mapper::build_payload(generator, &binding.schema, binding.count)
    }));

    let message = match result {
        Ok(Ok(data)) => return (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    error!(
        "Failed to generate response for {} {}: {}",
        binding.method, binding.path, message
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Internal error while generating data".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldSpec, Preset, Schema};
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn schema(fields: &[(&str, FieldSpec)]) -> Schema {
        fields
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.clone()))
            .collect()
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut router = MockRouter::new();
        let config = RouteConfig::new(Preset::Person);
        router.register_route("/user", &config).unwrap();

        let err = router
            .register_route("/user", &config.clone().method("get"))
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::Duplicate {
                method: "GET".to_string(),
                path: "/user".to_string()
            }
        );

        router
            .register_route("/user", &config.method("POST"))
            .unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_conflicting_paths_rejected_before_routing() {
        let mut router = MockRouter::new();
        router
            .register_route("/users/:id", &RouteConfig::new(Preset::Person))
            .unwrap();

        let err = router
            .register_route(
                "/users/:name",
                &RouteConfig::new(Preset::Person).method("POST"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::PathConflict {
                path: "/users/:name".to_string(),
                existing: "/users/:id".to_string()
            }
        );

        assert!(matches!(
            router.register_route("/api/*", &RouteConfig::new(Preset::Person)),
            Err(RouteError::InvalidPath { .. })
        ));

        router
            .register_route("/users/:id/posts", &RouteConfig::new(Preset::Person))
            .unwrap();
        assert_eq!(router.len(), 2);
        let _ = router.into_router();
    }

    #[test]
    fn test_invalid_route_not_registered() {
        let mut router = MockRouter::new();
        assert!(router
            .register_route("/user", &RouteConfig::new(Preset::Person).method("BREW"))
            .is_err());
        assert!(router.is_empty());
    }

    #[tokio::test]
    async fn test_single_object_response() {
        let mut router = MockRouter::new();
        router
            .register_route("/user", &RouteConfig::new(Preset::Person))
            .unwrap();

        let (status, body) = call(router.into_router(), "GET", "/user").await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_object().unwrap();
        assert_eq!(data.len(), 12);
    }

    #[tokio::test]
    async fn test_array_response() {
        let mut router = MockRouter::new();
        let fields = schema(&[("id", FieldSpec::new("id")), ("price", FieldSpec::new("price"))]);
        router
            .register_route("/items", &RouteConfig::new(fields).count(3))
            .unwrap();

        let (status, body) = call(router.into_router(), "GET", "/items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_methods_share_a_path() {
        let mut router = MockRouter::new();
        let fields = schema(&[("id", FieldSpec::new("uuid"))]);
        router
            .register_route("/things", &RouteConfig::new(fields.clone()))
            .unwrap();
        router
            .register_route("/things", &RouteConfig::new(fields).method("post").count(2))
            .unwrap();
        let app = router.into_router();

        let (status, body) = call(app.clone(), "GET", "/things").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_object());

        let (status, body) = call(app.clone(), "POST", "/things").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, _) = call(app, "DELETE", "/things").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_path_parameters_are_accepted() {
        let mut router = MockRouter::new();
        router
            .register_route("/users/:id", &RouteConfig::new(Preset::Person))
            .unwrap();

        let (status, body) = call(router.into_router(), "GET", "/users/42").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["userId"].is_string());
    }

    #[tokio::test]
    async fn test_generation_error_is_500() {
        let mut router = MockRouter::new();
        let fields = schema(&[(
            "broken",
            FieldSpec::new("faker").with("method", "person.doesNotExist"),
        )]);
        router
            .register_route("/broken", &RouteConfig::new(fields))
            .unwrap();

        let (status, body) = call(router.into_router(), "GET", "/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("person.doesNotExist"));
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert!(!panic_message(boxed.as_ref()).is_empty());
    }
}
