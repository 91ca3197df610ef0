// HTTP API error taxonomy.
//
// Every failure a handler can see funnels through exactly one variant here,
// and every variant has one status code and one stable `error` string, so
// clients can branch on `success` alone or on `error` without parsing
// messages.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::config;
use crate::store::{FieldError, StoreError};

#[derive(Debug)]
pub enum ApiError {
    // 401: Authorization header absent or not `Bearer <token>` shaped
    Unauthenticated(String),

    // 403: bearer token failed verification (signature/expiry/format)
    InvalidCredential(String),

    // 400: path identifier fails the store's id-format check
    MalformedIdentifier(String),

    // 400: creation payload lacks required fields; lists exactly which
    MissingFields(Vec<String>),

    // 400: store-level field validation, all offending fields collected
    Validation(Vec<FieldError>),

    // 400: uniqueness-constraint violation, names the duplicated field
    Duplicate(String),

    // 404: no entity matches the (well-formed) identifier
    NotFound(String),

    // 500: any other store or internal failure; detail kept server-side
    StoreFailure(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredential(_) => StatusCode::FORBIDDEN,
            ApiError::MalformedIdentifier(_)
            | ApiError::MissingFields(_)
            | ApiError::Validation(_)
            | ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable `error` string for client-side branching.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "Unauthenticated",
            ApiError::InvalidCredential(_) => "InvalidCredential",
            ApiError::MalformedIdentifier(_) => "MalformedIdentifier",
            ApiError::MissingFields(_) => "MissingFields",
            ApiError::Validation(_) => "ValidationError",
            ApiError::Duplicate(_) => "DuplicateEntity",
            ApiError::NotFound(_) => "NotFound",
            ApiError::StoreFailure(_) => "StoreFailure",
        }
    }

    /// Response body. `include_detail` governs whether internal diagnostic
    /// detail is exposed on 500s; it is true only in development mode.
    pub fn to_json(&self, include_detail: bool) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.error_code(),
        });

        match self {
            ApiError::Unauthenticated(msg) | ApiError::InvalidCredential(msg) => {
                body["message"] = json!(msg);
            }
            ApiError::MalformedIdentifier(id) => {
                body["message"] = json!("Invalid product id");
                body["id"] = json!(id);
            }
            ApiError::MissingFields(fields) => {
                body["message"] = json!("Missing required fields");
                body["missingFields"] = json!(fields);
            }
            ApiError::Validation(errors) => {
                body["message"] = json!("Product validation failed");
                body["errors"] = json!(errors);
            }
            ApiError::Duplicate(field) => {
                body["message"] = json!(format!("Duplicate value for field '{}'", field));
                body["field"] = json!(field);
            }
            ApiError::NotFound(id) => {
                body["message"] = json!("Product not found");
                body["id"] = json!(id);
            }
            ApiError::StoreFailure(detail) => {
                body["message"] = json!("An error occurred while processing your request");
                if include_detail {
                    body["detail"] = json!(detail);
                }
            }
        }

        body
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(id) => ApiError::MalformedIdentifier(id),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Validation(errors) => ApiError::Validation(errors),
            StoreError::Duplicate(field) => ApiError::Duplicate(field),
            StoreError::Sqlx(e) => ApiError::StoreFailure(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_code())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::StoreFailure(detail) = &self {
            tracing::error!("store failure: {}", detail);
        }
        let include_detail = config::config().is_development();
        (self.status_code(), Json(self.to_json(include_detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_store_error_maps_to_one_variant() {
        let cases: Vec<(StoreError, &str, StatusCode)> = vec![
            (
                StoreError::MalformedId("abc".into()),
                "MalformedIdentifier",
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::NotFound("id".into()), "NotFound", StatusCode::NOT_FOUND),
            (StoreError::Validation(vec![]), "ValidationError", StatusCode::BAD_REQUEST),
            (StoreError::Duplicate("name".into()), "DuplicateEntity", StatusCode::BAD_REQUEST),
            (
                StoreError::Sqlx(sqlx::Error::PoolClosed),
                "StoreFailure",
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (store_err, code, status) in cases {
            let api_err = ApiError::from(store_err);
            assert_eq!(api_err.error_code(), code);
            assert_eq!(api_err.status_code(), status);
        }
    }

    #[test]
    fn missing_fields_lists_exactly_the_absent_set() {
        let err = ApiError::MissingFields(vec!["name".into(), "image".into()]);
        let body = err.to_json(false);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("MissingFields"));
        assert_eq!(body["missingFields"], json!(["name", "image"]));
    }

    #[test]
    fn validation_payload_enumerates_field_errors() {
        let err = ApiError::Validation(vec![FieldError {
            field: "name".into(),
            message: "This field is required".into(),
        }]);
        let body = err.to_json(false);
        assert_eq!(body["errors"][0]["field"], json!("name"));
        assert_eq!(body["errors"][0]["message"], json!("This field is required"));
    }

    #[test]
    fn store_failure_detail_suppressed_outside_development() {
        let err = ApiError::StoreFailure("connection refused on 5432".into());
        let suppressed = err.to_json(false);
        assert!(suppressed.get("detail").is_none());
        assert_eq!(
            suppressed["message"],
            json!("An error occurred while processing your request")
        );
        let verbose = err.to_json(true);
        assert_eq!(verbose["detail"], json!("connection refused on 5432"));
    }

    #[test]
    fn not_found_echoes_the_requested_id() {
        let err = ApiError::NotFound("0f8b2c1d".into());
        assert_eq!(err.to_json(false)["id"], json!("0f8b2c1d"));
    }
}
