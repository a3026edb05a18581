//! Required-field validation for registration payloads.
//!
//! A field counts as present when it exists in the payload and is truthy:
//! a non-empty string, a non-zero number, `true`, or a non-empty array or
//! object. No format checks are applied (an email without an `@` is accepted).

use serde_json::Value;

use crate::types::ValidatedUser;

/// Fields every registration payload must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "password"];

/// Validate a parsed registration payload.
///
/// Returns `None` if the payload is not a JSON object or if any of
/// [`REQUIRED_FIELDS`] is missing or falsy.
///
/// ```
/// use otp_signup_core::validate;
/// use serde_json::json;
///
/// assert!(validate(&json!({"name": "Ann", "email": "ann@x.com", "password": "pw"})).is_some());
/// assert!(validate(&json!({"name": "Ann", "email": "", "password": "pw"})).is_none());
/// ```
#[must_use]
pub fn validate(payload: &Value) -> Option<ValidatedUser> {
    let fields = payload.as_object()?;

    let [name, email, password] =
        REQUIRED_FIELDS.map(|key| fields.get(key).and_then(truthy_text));

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) => {
            Some(ValidatedUser::new(name, email, password))
        }
        _ => None,
    }
}

/// Render a truthy JSON value as text, or `None` if it is falsy.
///
/// Strings are returned as-is; other truthy values use their JSON text
/// (`42` becomes `"42"`).
#[must_use]
pub fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_complete_payload() {
        let user = validate(&json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "pw"
        }))
        .unwrap();

        assert_eq!(user.name(), "Ann");
        assert_eq!(user.email(), "ann@x.com");
        assert_eq!(user.password(), "pw");
    }

    #[test]
    fn test_validate_ignores_extra_fields() {
        let user = validate(&json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "pw",
            "plan": "pro"
        }));
        assert!(user.is_some());
    }

    #[test]
    fn test_validate_missing_each_field() {
        for missing in REQUIRED_FIELDS {
            let mut payload = json!({"name": "Ann", "email": "ann@x.com", "password": "pw"});
            payload.as_object_mut().unwrap().remove(missing);
            assert!(validate(&payload).is_none(), "accepted payload without {missing}");
        }
    }

    #[test]
    fn test_validate_accepts_serialized_request() {
        let request = crate::RegistrationRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "pw".to_string(),
        };
        let payload = serde_json::to_value(&request).unwrap();

        let user = validate(&payload).unwrap();
        assert_eq!(user.name(), "Ann");
        assert_eq!(user.email(), "ann@x.com");
    }

    #[test]
    fn test_validate_falsy_values() {
        for falsy in [json!(""), json!(null), json!(false), json!(0), json!(0.0), json!([]), json!({})] {
            for field in REQUIRED_FIELDS {
                let mut payload = json!({"name": "Ann", "email": "ann@x.com", "password": "pw"});
                payload[field] = falsy.clone();
                assert!(
                    validate(&payload).is_none(),
                    "accepted {field} = {falsy}"
                );
            }
        }
    }

    #[test]
    fn test_validate_no_email_format_check() {
        let user = validate(&json!({"name": "Ann", "email": "not-an-email", "password": "pw"}));
        assert_eq!(user.unwrap().email(), "not-an-email");
    }

    #[test]
    fn test_validate_non_object() {
        assert!(validate(&json!(["Ann", "ann@x.com", "pw"])).is_none());
        assert!(validate(&json!("Ann")).is_none());
        assert!(validate(&json!(null)).is_none());
    }

    #[test]
    fn test_truthy_text_scalars() {
        assert_eq!(truthy_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(truthy_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(truthy_text(&json!(-1.5)).as_deref(), Some("-1.5"));
        assert_eq!(truthy_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(truthy_text(&json!(0)), None);
        assert_eq!(truthy_text(&json!(false)), None);
    }
}
