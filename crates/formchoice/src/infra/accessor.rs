//! Property accessors used by choice renderers to read values off domain objects.

use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::AccessError;
use crate::domain::property::PropertyPath;

/// Capability to apply a [`PropertyPath`] to an object of type `T`.
pub trait PropertyAccessor<T: ?Sized> {
    fn evaluate(&self, path: &PropertyPath, object: &T) -> Result<Value, AccessError>;
}

/// Accessor that serializes the object with serde and walks the resulting JSON tree.
///
/// Maps are traversed by key, sequences by decimal index. A `null` met part way down the path
/// short-circuits to `null`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdeAccessor;

impl<T: Serialize + ?Sized> PropertyAccessor<T> for SerdeAccessor {
    fn evaluate(&self, path: &PropertyPath, object: &T) -> Result<Value, AccessError> {
        let segments = path.segments()?;
        let mut current = serde_json::to_value(object)?;

        for segment in segments {
            current = match current {
                Value::Null => return Ok(Value::Null),
                Value::Object(mut map) => {
                    map.remove(segment)
                        .ok_or_else(|| AccessError::UnknownProperty {
                            segment: segment.to_owned(),
                            target: "object".into(),
                        })?
                }
                Value::Array(mut items) => {
                    let index = segment
                        .parse::<usize>()
                        .ok()
                        .filter(|index| *index < items.len())
                        .ok_or_else(|| AccessError::UnknownProperty {
                            segment: segment.to_owned(),
                            target: format!("sequence of {}", items.len()),
                        })?;
                    items.swap_remove(index)
                }
                other => {
                    return Err(AccessError::NotTraversable {
                        segment: segment.to_owned(),
                        kind: kind_name(&other),
                    });
                }
            };
        }

        Ok(current)
    }
}

/// Adapts a closure into a [`PropertyAccessor`], handy for hand-written lookups.
#[derive(Debug, Clone, Copy)]
pub struct FnAccessor<F>(pub F);

impl<T, F> PropertyAccessor<T> for FnAccessor<F>
where
    T: ?Sized,
    F: Fn(&PropertyPath, &T) -> Result<Value, AccessError>,
{
    fn evaluate(&self, path: &PropertyPath, object: &T) -> Result<Value, AccessError> {
        (self.0)(path, object)
    }
}

/// String form of an evaluated value; `None` for `null`.
///
/// Strings come back without JSON quoting. Numbers keep their literal form, so `-1` stays `-1`.
pub fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}
