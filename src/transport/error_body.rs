use serde::de::Error as DeError;
use serde_json::Value;

use crate::domain::EndpointError;

const META: &str = "Meta";
const ERRORS: &str = "Errors";

/// Decode the body of a non-success response.
///
/// The API sends either a bare error object or a full envelope whose
/// `Meta.Errors` member carries it; both are accepted.
pub fn decode_error_body(body: &str) -> Result<EndpointError, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Object(mut object) if object.contains_key(META) => {
            let errors = object
                .remove(META)
                .and_then(|mut meta| meta.get_mut(ERRORS).map(Value::take))
                .filter(|errors| !errors.is_null())
                .ok_or_else(|| serde_json::Error::custom("error envelope carries no Meta.Errors"))?;
            serde_json::from_value(errors)
        }
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bare_error_object() {
        let body = r#"
        {
          "ErrorCode": "InvalidInput",
          "TraceCode": "abc-123",
          "ErrorMessages": [{ "Field": "Amount", "Message": "Amount must be positive" }]
        }
        "#;
        let error = decode_error_body(body).unwrap();
        assert_eq!(error.error_code, "InvalidInput");
        assert_eq!(error.trace_code, "abc-123");
        assert_eq!(error.error_messages[0].field.as_deref(), Some("Amount"));
    }

    #[test]
    fn decodes_error_wrapped_in_envelope() {
        let body = r#"
        {
          "Meta": {
            "Errors": {
              "ErrorCode": "NotFound",
              "TraceCode": "t-1",
              "ErrorMessages": [{ "Field": null, "Message": "Customer 9 not found" }]
            },
            "HttpStatusCode": 404
          },
          "Response": null
        }
        "#;
        let error = decode_error_body(body).unwrap();
        assert_eq!(error.error_code, "NotFound");
        assert_eq!(error.error_messages[0].message, "Customer 9 not found");
    }

    #[test]
    fn rejects_non_json_and_shapeless_bodies() {
        assert!(decode_error_body("<html>Bad Gateway</html>").is_err());
        assert!(decode_error_body("").is_err());
        assert!(decode_error_body("[1, 2]").is_err());
        assert!(decode_error_body(r#"{ "Meta": { "Errors": null } }"#).is_err());
        assert!(decode_error_body(r#"{ "Message": "oops" }"#).is_err());
    }
}
