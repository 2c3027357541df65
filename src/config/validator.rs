use std::collections::HashMap;
use thiserror::Error;

use crate::config::{RouteEntry, ServerSettings, Settings};
use crate::domain::{paths_conflict, Properties, RouteBinding, RouteError};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_routes(&settings.routes) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_routes(routes: &[RouteEntry]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen = HashMap::new();
        let mut accepted: Vec<&str> = Vec::new();

        for (idx, route) in routes.iter().enumerate() {
            if route.path.is_empty() {
                errors.push(ValidationError::MissingField(format!("routes[{}].path", idx)));
                continue;
            }

            if let Properties::Schema(schema) = &route.config.properties {
                for (name, field) in schema {
                    if field.type_name.trim().is_empty() {
                        errors.push(ValidationError::MissingField(format!(
                            "routes[{}].properties.{}.type",
                            idx, name
                        )));
                    }
                }
            }

            match RouteBinding::new(&route.path, &route.config) {
                Ok(binding) => {
                    let key = (binding.method.clone(), binding.path.clone());
                    if let Some(prev_idx) = seen.insert(key, idx) {
                        errors.push(ValidationError::Duplicate(format!(
                            "Route {} {} appears at indices {} and {}",
                            binding.method, binding.path, prev_idx, idx
                        )));
                    }

                    if let Some(existing) = accepted
                        .iter()
                        .find(|existing| paths_conflict(existing, &route.path))
                    {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("routes[{}].path", idx),
                            reason: RouteError::PathConflict {
                                path: route.path.clone(),
                                existing: existing.to_string(),
                            }
                            .to_string(),
                        });
                    } else if !accepted.contains(&route.path.as_str()) {
                        accepted.push(&route.path);
                    }
                }
                Err(e) => errors.push(ValidationError::InvalidValue {
                    field: format!("routes[{}]", idx),
                    reason: e.to_string(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
