use serde_json::{Map, Value};

use super::value_generator::ValueGenerator;
use crate::domain::{GenerationError, Schema};

/// Generates one object with a value for every field of `schema`, in
/// declaration order. The first failing field aborts the object.
pub fn build_object(
    generator: &ValueGenerator,
    schema: &Schema,
) -> Result<Map<String, Value>, GenerationError> {
    let mut object = Map::with_capacity(schema.len());
    for (name, field) in schema {
        let value = generator.generate(&field.type_name, &field.constraints)?;
        object.insert(name.clone(), value);
    }
    Ok(object)
}

/// Generates `count` independent objects from the same schema.
pub fn build_many(
    generator: &ValueGenerator,
    schema: &Schema,
    count: usize,
) -> Result<Vec<Value>, GenerationError> {
    (0..count)
        .map(|_| build_object(generator, schema).map(Value::Object))
        .collect()
}

/// A single object for `count == 1`, otherwise an array of `count` objects.
pub fn build_payload(
    generator: &ValueGenerator,
    schema: &Schema,
    count: usize,
) -> Result<Value, GenerationError> {
    if count == 1 {
        build_object(generator, schema).map(Value::Object)
    } else {
        build_many(generator, schema, count).map(Value::Array)
    }
}
