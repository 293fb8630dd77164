//! Mapping of HTTP responses onto results

use crate::error::{malformed_response, ArchetypeError, ArchetypeResult};
use serde_json::Value;

/// Field carrying the server's error message
const ERRMSG_FIELD: &str = "errmsg";
/// Field carrying the server's numeric error code
const ERRORCODE_FIELD: &str = "errorcode";

/// Turn a status code and raw body into parsed JSON or an error
///
/// - 401 is always an auth error; the body is ignored
/// - any other status >= 400 is an API error built from the `errmsg` and
///   `errorcode` fields of the body (an empty body counts as an empty object)
/// - a body that is not JSON, on any status other than 401, is a transport
///   error
pub fn map_response(status: u16, body: &[u8]) -> ArchetypeResult<Value> {
    if status == 401 {
        return Err(ArchetypeError::auth_failed());
    }

    if status >= 400 {
        return Err(api_error(status, body));
    }

    serde_json::from_slice(body).map_err(|e| malformed_response(&e))
}

fn api_error(status: u16, body: &[u8]) -> ArchetypeError {
    let fields = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(fields) => fields,
            Err(e) => return malformed_response(&e),
        }
    };

    let message = fields
        .get(ERRMSG_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("API error: {}", status));
    let error_code = fields.get(ERRORCODE_FIELD).and_then(error_code);

    ArchetypeError::api(message, status, error_code)
}

/// Integral error codes, including ones encoded as `42.0`
fn error_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|code| code.fract() == 0.0 && code.abs() < i64::MAX as f64)
            .map(|code| code as i64)
    })
}
