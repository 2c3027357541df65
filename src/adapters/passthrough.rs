//! Registry behind the `faker` field type.
//!
//! A `faker` field names a generator as `namespace.method` and may carry an
//! `options` value. Only the names listed in [`registry`] resolve; anything
//! else is reported as [`GenerationError::UnknownMethod`].

use std::collections::HashMap;

use rand::Rng;
use serde_json::Value;

use super::generators::{self as g, GeneratorResult};
use crate::domain::{Constraints, GenerationError};

pub type PassthroughFn = fn(&Value) -> GeneratorResult;

/// Largest integer a JSON consumer can represent exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn registry() -> HashMap<&'static str, PassthroughFn> {
    let entries: [(&'static str, PassthroughFn); 44] = [
        // Numbers and strings
        ("number.int", |o: &Value| g::random_int(&range(o), 0.0, MAX_SAFE_INTEGER)),
        ("number.float", |o: &Value| g::random_float(&range(o), 0.0, 1.0, 2)),
        ("string.uuid", |_: &Value| g::uuid(&none())),
        ("string.numeric", |o: &Value| Ok(Value::String(g::numeric_string(length(o)?)?))),
        ("string.alpha", string_alpha),
        ("datatype.boolean", |_: &Value| g::boolean(&none())),
        // Dates
        ("date.past", |_: &Value| g::past(&none())),
        ("date.future", |_: &Value| g::future(&none())),
        ("date.recent", |_: &Value| g::recent(&none())),
        ("date.between", |o: &Value| g::date(&Constraints::from_value(o))),
        // Person
        ("person.firstName", |_: &Value| g::first_name(&none())),
        ("person.lastName", |_: &Value| g::last_name(&none())),
        ("person.fullName", |_: &Value| g::full_name(&none())),
        ("person.gender", |_: &Value| g::gender(&none())),
        ("person.jobTitle", |_: &Value| g::job_title(&none())),
        ("person.bio", |_: &Value| g::bio(&none())),
        ("phone.number", |_: &Value| g::phone(&none())),
        ("image.avatar", |_: &Value| g::avatar(&none())),
        // Internet
        ("internet.email", |_: &Value| g::email(&none())),
        ("internet.username", |_: &Value| g::username(&none())),
        ("internet.userName", |_: &Value| g::username(&none())),
        ("internet.url", |_: &Value| g::url(&none())),
        ("internet.ip", |_: &Value| g::ipv4(&none())),
        ("internet.ipv4", |_: &Value| g::ipv4(&none())),
        ("internet.password", |_: &Value| g::password(&none())),
        ("internet.userAgent", |_: &Value| g::user_agent(&none())),
        // Location
        ("location.city", |_: &Value| g::city(&none())),
        ("location.country", |_: &Value| g::country(&none())),
        ("location.streetAddress", |_: &Value| g::street_address(&none())),
        ("location.zipCode", |_: &Value| g::zip_code(&none())),
        ("location.latitude", |_: &Value| g::latitude(&none())),
        ("location.longitude", |_: &Value| g::longitude(&none())),
        // Company and commerce
        ("company.name", |_: &Value| g::company(&none())),
        ("company.catchPhrase", |_: &Value| g::catch_phrase(&none())),
        ("commerce.department", |_: &Value| g::department(&none())),
        ("commerce.productName", |_: &Value| g::product(&none())),
        ("commerce.price", |o: &Value| g::price(&Constraints::from_value(o))),
        ("color.human", |_: &Value| g::color(&none())),
        // Text
        ("lorem.word", |_: &Value| g::word(&none())),
        ("lorem.sentence", |_: &Value| g::sentence(&none())),
        ("lorem.paragraph", |_: &Value| g::paragraph(&none())),
        ("helpers.arrayElement", array_element),
        ("helpers.arrayElements", array_elements),
        ("helpers.maybe", maybe),
    ];
    entries.into_iter().collect()
}

fn none() -> Constraints {
    Constraints::default()
}

/// `{min, max}` object, or a bare number meaning `max`.
fn range(options: &Value) -> Constraints {
    match options {
        Value::Number(n) => Constraints::default().with("max", n.clone()),
        other => Constraints::from_value(other),
    }
}

/// A bare length, or `{ length: n }`. Defaults to one character.
fn length(options: &Value) -> Result<usize, GenerationError> {
    match options {
        Value::Number(_) => Constraints::default()
            .with("length", options.clone())
            .length("length")
            .map(|n| n.unwrap_or(1)),
        other => Ok(Constraints::from_value(other).length("length")?.unwrap_or(1)),
    }
}

fn string_alpha(options: &Value) -> GeneratorResult {
    let (min, max) = match options.get("length") {
        Some(Value::Object(_)) => {
            let bounds = Constraints::from_value(&options["length"]);
            let min = bounds.length("min")?.unwrap_or(1);
            let max = bounds.length("max")?.unwrap_or(min);
            (min, max)
        }
        _ => {
            let n = length(options)?;
            (n, n)
        }
    };
    Ok(Value::String(g::alpha_string(min, max)?))
}

fn elements(options: &Value) -> Result<&Vec<Value>, GenerationError> {
    match options {
        Value::Array(items) if !items.is_empty() => Ok(items),
        _ => Err(GenerationError::invalid(
            "options",
            "expected a non-empty array",
        )),
    }
}

fn array_element(options: &Value) -> GeneratorResult {
    let items = elements(options)?;
    let idx = rand::thread_rng().gen_range(0..items.len());
    Ok(items[idx].clone())
}

/// Random subset of the given array, in original order.
fn array_elements(options: &Value) -> GeneratorResult {
    let items = elements(options)?;
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(1..=items.len());
    let picked = rand::seq::index::sample(&mut rng, items.len(), count);
    let mut indices: Vec<usize> = picked.into_iter().collect();
    indices.sort_unstable();
    Ok(Value::Array(
        indices.into_iter().map(|i| items[i].clone()).collect(),
    ))
}

/// Returns `options.value` with `options.probability` (default 0.5), else `null`.
fn maybe(options: &Value) -> GeneratorResult {
    let probability = Constraints::from_value(options)
        .number("probability")?
        .unwrap_or(0.5);
    if !(0.0..=1.0).contains(&probability) {
        return Err(GenerationError::invalid(
            "probability",
            format!("{} is not between 0 and 1", probability),
        ));
    }
    if rand::thread_rng().gen_bool(probability) {
        Ok(options.get("value").cloned().unwrap_or(Value::Null))
    } else {
        Ok(Value::Null)
    }
}
