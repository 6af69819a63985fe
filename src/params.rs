use compact_str::CompactString;
use eyre::WrapErr;
use log::{debug, trace};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{any::type_name, collections::HashMap};

/// Request parameters: string keys mapped to loosely typed JSON values.
pub type Params = HashMap<CompactString, Value>;

/// Turns any serializable value into request parameters.
///
/// Keys follow the type's serde attributes: `rename` and `rename_all` pick the
/// external name, `skip` drops the field entirely. Nested values become nested
/// objects and sequences become arrays, recursively.
pub trait ToParams {
    /// Returns `None` when the value cannot be serialized at all, and an empty
    /// map when it serializes to something other than an object.
    fn to_params(&self) -> Option<Params>;

    /// Same as [`ToParams::to_params`], but keeps the serialization error.
    fn try_to_params(&self) -> eyre::Result<Params>;
}

impl<T: Serialize + ?Sized> ToParams for T {
    fn to_params(&self) -> Option<Params> {
        self.try_to_params()
            .map_err(|err| debug!("{err:?}"))
            .ok()
    }

    fn try_to_params(&self) -> eyre::Result<Params> {
        let value = serde_json::to_value(self)
            .wrap_err_with(|| format!("{} is not representable as params", type_name::<T>()))?;
        match value {
            Value::Object(map) => Ok(map.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            other => {
                trace!(
                    "{} serialized to {}, no params produced",
                    type_name::<T>(),
                    kind(&other)
                );
                Ok(Params::new())
            }
        }
    }
}

pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Option<Params> {
    value.to_params()
}

/// Typed lookups into nested parameters.
pub trait ParamsExt {
    /// Object stored under `key`.
    fn nested(&self, key: &str) -> Option<&Map<String, Value>>;

    /// Array stored under `key`, if every element is an object.
    fn nested_list(&self, key: &str) -> Option<Vec<&Map<String, Value>>>;
}

impl ParamsExt for Params {
    fn nested(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key)?.as_object()
    }

    fn nested_list(&self, key: &str) -> Option<Vec<&Map<String, Value>>> {
        self.get(key)?
            .as_array()?
            .iter()
            .map(Value::as_object)
            .collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
