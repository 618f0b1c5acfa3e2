//! Request body validation.

use std::collections::BTreeMap;

use quill_shared::FieldError;
use quill_shared::dto::Schema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::middleware::error::{AppError, AppResult};

/// Decode a JSON body into `T`, then validate it.
///
/// Missing and wrong-typed fields are reported as `required` and `type`
/// violations instead of a decoder message.
pub fn decode<T>(payload: Value) -> AppResult<T>
where
    T: Schema + DeserializeOwned + Validate,
{
    let Value::Object(fields) = &payload else {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let mut errors: Vec<FieldError> = T::FIELDS
        .iter()
        .filter_map(|spec| match fields.get(spec.name) {
            None | Some(Value::Null) if spec.required => Some(FieldError {
                field: spec.name.to_string(),
                rule: "required".to_string(),
                message: Some(format!("{} is required", spec.name)),
                params: BTreeMap::new(),
                value: Value::Null,
            }),
            None | Some(Value::Null) | Some(Value::String(_)) => None,
            Some(other) => Some(FieldError {
                field: spec.name.to_string(),
                rule: "type".to_string(),
                message: Some(format!("{} must be a string", spec.name)),
                params: BTreeMap::from([("expected".to_string(), Value::from("string"))]),
                value: other.clone(),
            }),
        })
        .collect();

    if !errors.is_empty() {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        return Err(AppError::Validation(errors));
    }

    let req: T =
        serde_json::from_value(payload).map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate(&req)?;
    Ok(req)
}

/// Check `payload` against its schema before it reaches the service.
pub fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::Validation(field_errors(&errors)))
}

/// Flatten validator output into one entry per violated rule, sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, violations)| {
            let field = field.to_string();
            violations.iter().map(move |violation| {
                let mut params: BTreeMap<String, Value> = violation
                    .params
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect();
                let value = params.remove("value").unwrap_or(Value::Null);

                FieldError {
                    field: field.clone(),
                    rule: violation.code.to_string(),
                    message: violation.message.as_ref().map(|m| m.to_string()),
                    params,
                    value,
                }
            })
        })
        .collect();

    flattened.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};
    use serde_json::json;

    #[test]
    fn test_valid_payload_passes() {
        let req = CreatePostRequest {
            title: "Hello".to_string(),
            body: String::new(),
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_short_title_reports_rule_and_value() {
        let req = CreatePostRequest {
            title: "ab".to_string(),
            body: "body".to_string(),
        };
        let Err(AppError::Validation(errors)) = validate(&req) else {
            panic!("expected validation error");
        };

        assert_eq!(errors.len(), 1);
        let error = &errors[0];
        assert_eq!(error.field, "title");
        assert_eq!(error.rule, "length");
        assert_eq!(error.value, Value::from("ab"));
        assert_eq!(error.params.get("min"), Some(&Value::from(3)));
        assert_eq!(error.params.get("max"), Some(&Value::from(60)));
        assert!(!error.params.contains_key("value"));
    }

    #[test]
    fn test_partial_schema_checks_present_title() {
        let req = UpdatePostRequest {
            title: Some("x".repeat(61)),
            body: None,
        };
        let Err(AppError::Validation(errors)) = validate(&req) else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_decode_reports_missing_and_mistyped_fields() {
        let Err(AppError::Validation(errors)) =
            decode::<CreatePostRequest>(json!({ "title": 5 }))
        else {
            panic!("expected validation error");
        };

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "body");
        assert_eq!(errors[0].rule, "required");
        assert_eq!(errors[1].field, "title");
        assert_eq!(errors[1].rule, "type");
        assert_eq!(errors[1].value, json!(5));
    }

    #[test]
    fn test_decode_partial_allows_omitted_fields() {
        let req = decode::<UpdatePostRequest>(json!({ "body": "text" })).unwrap();
        assert!(req.title.is_none());
        assert_eq!(req.body.as_deref(), Some("text"));

        let Err(AppError::Validation(errors)) =
            decode::<UpdatePostRequest>(json!({ "body": ["text"] }))
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "body");
        assert_eq!(errors[0].rule, "type");
    }

    #[test]
    fn test_decode_runs_length_rules() {
        let Err(AppError::Validation(errors)) =
            decode::<CreatePostRequest>(json!({ "title": "ab", "body": "" }))
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].rule, "length");
    }

    #[test]
    fn test_decode_rejects_non_object_body() {
        let res = decode::<CreatePostRequest>(json!(["title"]));
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }
}
