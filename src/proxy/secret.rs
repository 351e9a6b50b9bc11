//! Secret injection into JSON webhook bodies.

use bytes::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Inject `secret_value` under `secret_key` at the top level of a JSON body.
///
/// With no key configured the body passes through untouched. Otherwise the
/// body must be a JSON object; anything else cannot carry the secret and is
/// refused rather than forwarded corrupted. An existing key of the same name
/// is overwritten.
pub fn inject(body: &[u8], secret_value: &str, secret_key: Option<&str>) -> AppResult<Bytes> {
    let key = match secret_key {
        Some(key) if !key.is_empty() => key,
        _ => return Ok(Bytes::copy_from_slice(body)),
    };

    let parsed: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BodyRewrite(format!("invalid JSON body: {}", e)))?;

    let mut object = match parsed {
        Value::Object(object) => object,
        other => {
            return Err(AppError::BodyRewrite(format!(
                "top-level JSON value is not an object: {}",
                other
            )))
        }
    };
    object.insert(key.to_string(), Value::String(secret_value.to_string()));

    let rewritten =
        serde_json::to_vec(&Value::Object(object)).map_err(|e| AppError::BodyRewrite(e.to_string()))?;
    Ok(Bytes::from(rewritten))
}
