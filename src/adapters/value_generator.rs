use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::generators::{self as g, GeneratorResult};
use super::passthrough::{self, PassthroughFn};
use crate::domain::{Constraints, GenerationError};

pub type GeneratorFn = fn(&Constraints) -> GeneratorResult;

/// Type name that hands generation off to the passthrough registry.
pub const PASSTHROUGH_TYPE: &str = "faker";

/// Resolves field type names to random values.
///
/// Both lookup tables are built once in [`ValueGenerator::new`] and only
/// read afterwards, so a single instance is shared by every request.
pub struct ValueGenerator {
    kinds: HashMap<&'static str, GeneratorFn>,
    passthrough: HashMap<&'static str, PassthroughFn>,
}

impl ValueGenerator {
    pub fn new() -> Self {
        let kinds: [(&'static str, GeneratorFn); 39] = [
            // Numbers and IDs
            ("number", g::number),
            ("float", g::float),
            ("id", g::id),
            ("uuid", g::uuid),
            // Strings
            ("string", g::string),
            ("sentence", g::sentence),
            ("paragraph", g::paragraph),
            ("word", g::word),
            // Dates and times
            ("date", g::date),
            ("past", g::past),
            ("future", g::future),
            ("timestamp", g::timestamp),
            // Person
            ("firstname", g::first_name),
            ("lastname", g::last_name),
            ("fullname", g::full_name),
            ("username", g::username),
            ("email", g::email),
            ("avatar", g::avatar),
            ("phone", g::phone),
            ("gender", g::gender),
            ("jobtitle", g::job_title),
            ("bio", g::bio),
            // Internet
            ("url", g::url),
            ("ipv4", g::ipv4),
            ("password", g::password),
            ("useragent", g::user_agent),
            // Location
            ("latitude", g::latitude),
            ("longitude", g::longitude),
            ("city", g::city),
            ("country", g::country),
            ("address", g::street_address),
            ("zipcode", g::zip_code),
            // Company
            ("company", g::company),
            ("department", g::department),
            ("catchphrase", g::catch_phrase),
            // Commerce
            ("product", g::product),
            ("price", g::price),
            ("color", g::color),
            // Boolean
            ("boolean", g::boolean),
        ];

        Self {
            kinds: kinds.into_iter().collect(),
            passthrough: passthrough::registry(),
        }
    }

    /// Generates one value for `type_name` (matched case-insensitively).
    ///
    /// Unknown type names yield `null` instead of an error.
    pub fn generate(&self, type_name: &str, constraints: &Constraints) -> GeneratorResult {
        let key = type_name.to_lowercase();
        if key == PASSTHROUGH_TYPE {
            return self.generate_passthrough(constraints);
        }

        match self.kinds.get(key.as_str()) {
            Some(generator) => generator(constraints),
            None => {
                debug!("Unknown field type '{}', returning null", type_name);
                Ok(Value::Null)
            }
        }
    }

    /// Dispatches `{ method: "namespace.method", options }` to the registry.
    /// A missing `method` yields `null`; an unregistered one is an error.
    fn generate_passthrough(&self, constraints: &Constraints) -> GeneratorResult {
        let Some(method) = constraints.string("method")? else {
            return Ok(Value::Null);
        };
        let generator = self
            .passthrough
            .get(method)
            .ok_or_else(|| GenerationError::UnknownMethod(method.to_string()))?;
        generator(constraints.get("options").unwrap_or(&Value::Null))
    }

    pub fn supports(&self, type_name: &str) -> bool {
        let key = type_name.to_lowercase();
        key == PASSTHROUGH_TYPE || self.kinds.contains_key(key.as_str())
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.kinds.keys().copied().collect();
        names.push(PASSTHROUGH_TYPE);
        names.sort_unstable();
        names
    }

    /// Registered passthrough method names, sorted.
    pub fn passthrough_methods(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.passthrough.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ValueGenerator {
    fn default() -> Self {
        Self::new()
    }
}
