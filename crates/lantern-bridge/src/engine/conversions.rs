//! JavaScript → JSON Value Conversion
//!
//! Converts Boa `JsValue`s produced by surface evaluation into
//! `serde_json::Value` for the host side. Only this direction is needed:
//! data flowing host → script travels as serialized JSON text inside the
//! callback statement and is parsed by the engine itself.
//!
//! Conversion rules:
//!
//! - `undefined`, `null` and symbols become JSON `null`
//! - arrays and plain objects are converted recursively
//! - symbol-keyed properties are skipped
//! - non-finite numbers are an error (JSON cannot carry them)

use boa_engine::{
    object::builtins::JsArray, property::PropertyKey, value::JsValue, Context,
};
use lantern_common::{LanternError, Result};
use serde_json::Value as JsonValue;

/// Converts a Boa value into its JSON equivalent.
pub fn js_value_to_json(value: JsValue, ctx: &mut Context) -> Result<JsonValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(JsonValue::Null);
    }

    if let Some(b) = value.as_boolean() {
        return Ok(JsonValue::Bool(b));
    }

    if value.is_integer() {
        if let Some(n) = value.as_number() {
            return Ok(JsonValue::Number((n as i32).into()));
        }
    }

    if let Some(n) = value.as_number() {
        return serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .ok_or_else(|| {
                LanternError::ScriptExecution("non-finite number is not representable".into())
            });
    }

    if let Some(s) = value.as_string() {
        return Ok(JsonValue::String(s.to_std_string().map_err(|e| {
            LanternError::ScriptExecution(format!("string conversion error: {e:?}"))
        })?));
    }

    if value.is_object() {
        let obj = value.as_object().ok_or_else(|| {
            LanternError::ScriptExecution("object value without object reference".into())
        })?;

        if obj.is_array() {
            let array = JsArray::from_object(obj.clone())
                .map_err(|e| LanternError::ScriptExecution(format!("not a valid array: {e}")))?;

            let length = array
                .length(ctx)
                .map_err(|e| LanternError::ScriptExecution(format!("array length: {e}")))?
                .try_into()
                .map_err(|_| LanternError::ScriptExecution("array length overflow".into()))?;

            let mut result = Vec::with_capacity(length);
            for i in 0..length {
                let element = array.get(i, ctx).map_err(|e| {
                    LanternError::ScriptExecution(format!("array element {i}: {e}"))
                })?;
                result.push(js_value_to_json(element, ctx)?);
            }
            return Ok(JsonValue::Array(result));
        }

        let keys = obj
            .own_property_keys(ctx)
            .map_err(|e| LanternError::ScriptExecution(format!("object keys: {e}")))?;

        let mut result = serde_json::Map::new();
        for key in keys {
            let key_str = match &key {
                PropertyKey::String(s) => s.to_std_string().map_err(|e| {
                    LanternError::ScriptExecution(format!("key conversion error: {e:?}"))
                })?,
                PropertyKey::Index(i) => i.get().to_string(),
                PropertyKey::Symbol(_) => continue,
            };

            let property = obj.get(key.clone(), ctx).map_err(|e| {
                LanternError::ScriptExecution(format!("property '{key_str}': {e}"))
            })?;
            result.insert(key_str, js_value_to_json(property, ctx)?);
        }
        return Ok(JsonValue::Object(result));
    }

    // Remaining cases (symbols) have no JSON counterpart.
    Ok(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_engine::Source;
    use serde_json::json;

    fn eval_to_json(source: &str) -> JsonValue {
        let mut ctx = Context::default();
        let value = ctx.eval(Source::from_bytes(source)).unwrap();
        js_value_to_json(value, &mut ctx).unwrap()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(eval_to_json("null"), json!(null));
        assert_eq!(eval_to_json("undefined"), json!(null));
        assert_eq!(eval_to_json("true"), json!(true));
        assert_eq!(eval_to_json("42"), json!(42));
        assert_eq!(eval_to_json("2.5"), json!(2.5));
        assert_eq!(eval_to_json("'hello'"), json!("hello"));
    }

    #[test]
    fn test_nested_structures() {
        let value = eval_to_json("({a: [1, 'two', null], b: {c: false}})");
        assert_eq!(value, json!({"a": [1, "two", null], "b": {"c": false}}));
    }

    #[test]
    fn test_empty_array_and_object() {
        assert_eq!(eval_to_json("[]"), json!([]));
        assert_eq!(eval_to_json("({})"), json!({}));
    }
}
