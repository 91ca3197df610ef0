// Validation & mapping layer: raw JSON payloads in, validated entity fields
// out. Creation computes the missing-required-fields set; update applies only
// the allow-listed keys explicitly present in the payload.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::store::{
    FieldError, NewProduct, Product, Specifications, DEFAULT_BRAND, DEFAULT_RATING,
};

/// Fields that must be present and non-falsy on every creation payload.
pub const REQUIRED_FIELDS: [&str; 5] =
    ["name", "category", "description", "image", "fullDescription"];

/// Fields an update payload may touch; anything else is ignored. `id` and
/// `createdAt` are immutable and deliberately absent.
pub const UPDATABLE_FIELDS: [&str; 10] = [
    "name",
    "category",
    "description",
    "image",
    "brand",
    "rating",
    "fullDescription",
    "features",
    "applications",
    "specifications",
];

/// Required fields that are absent or falsy (null, empty string) in the
/// payload, in declaration order.
pub fn missing_required_fields(payload: &Value) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| is_falsy(payload.get(**field)))
        .map(|field| field.to_string())
        .collect()
}

fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Turn a creation payload into a `NewProduct`, rejecting with
/// `MissingFields` before anything else and applying the documented defaults
/// for absent optional fields.
pub fn new_product_from(payload: &Value) -> Result<NewProduct, ApiError> {
    let missing = missing_required_fields(payload);
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }

    let mut errors = Vec::new();

    let name = required_string(payload, "name", &mut errors);
    let category = required_string(payload, "category", &mut errors);
    let description = required_string(payload, "description", &mut errors);
    let image = required_string(payload, "image", &mut errors);
    let full_description = required_string(payload, "fullDescription", &mut errors);
    let brand = optional_string(payload, "brand", DEFAULT_BRAND, &mut errors);
    let rating = optional_number(payload, "rating", DEFAULT_RATING, &mut errors);
    let features = optional_string_list(payload, "features", &mut errors);
    let applications = optional_string_list(payload, "applications", &mut errors);
    let specifications = optional_specifications(payload, &mut errors);

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(NewProduct {
        name,
        category,
        description,
        image,
        full_description,
        brand,
        rating,
        features,
        applications,
        specifications,
    })
}

/// Apply a partial update. Only allow-listed keys explicitly present in the
/// payload are written; each written key is recorded in the returned list.
/// Absent keys leave the entity untouched.
pub fn apply_updates(
    product: &mut Product,
    payload: &Map<String, Value>,
) -> Result<Vec<String>, ApiError> {
    let mut updated = Vec::new();
    let mut errors = Vec::new();

    for field in UPDATABLE_FIELDS {
        let Some(value) = payload.get(field) else {
            continue;
        };

        match field {
            "name" => set_string(&mut product.name, value, field, &mut errors),
            "category" => set_string(&mut product.category, value, field, &mut errors),
            "description" => set_string(&mut product.description, value, field, &mut errors),
            "image" => set_string(&mut product.image, value, field, &mut errors),
            "brand" => set_string(&mut product.brand, value, field, &mut errors),
            "fullDescription" => {
                set_string(&mut product.full_description, value, field, &mut errors)
            }
            "rating" => match value.as_f64() {
                Some(n) => product.rating = n,
                None => errors.push(type_error(field, "must be a number")),
            },
            "features" => set_string_list(&mut product.features, value, field, &mut errors),
            "applications" => {
                set_string_list(&mut product.applications, value, field, &mut errors)
            }
            "specifications" => match to_specifications(value) {
                Some(spec) => product.specifications = spec,
                None => errors.push(type_error(field, "must be an object")),
            },
            _ => unreachable!("field outside the update allow-list"),
        }

        updated.push(field.to_string());
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(updated)
}

fn type_error(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn required_string(payload: &Value, field: &str, errors: &mut Vec<FieldError>) -> String {
    match payload.get(field).and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            errors.push(type_error(field, "must be a string"));
            String::new()
        }
    }
}

fn optional_string(
    payload: &Value,
    field: &str,
    default: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    match payload.get(field) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push(type_error(field, "must be a string"));
            default.to_string()
        }
    }
}

fn optional_number(
    payload: &Value,
    field: &str,
    default: f64,
    errors: &mut Vec<FieldError>,
) -> f64 {
    match payload.get(field) {
        None | Some(Value::Null) => default,
        Some(value) => match value.as_f64() {
            Some(n) => n,
            None => {
                errors.push(type_error(field, "must be a number"));
                default
            }
        },
    }
}

fn optional_string_list(
    payload: &Value,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Vec<String> {
    match payload.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => match to_string_list(value) {
            Some(list) => list,
            None => {
                errors.push(type_error(field, "must be an array of strings"));
                Vec::new()
            }
        },
    }
}

fn optional_specifications(payload: &Value, errors: &mut Vec<FieldError>) -> Specifications {
    match payload.get("specifications") {
        None | Some(Value::Null) => Specifications::default(),
        Some(value) => match to_specifications(value) {
            Some(spec) => spec,
            None => {
                errors.push(type_error("specifications", "must be an object"));
                Specifications::default()
            }
        },
    }
}

fn set_string(target: &mut String, value: &Value, field: &str, errors: &mut Vec<FieldError>) {
    match value.as_str() {
        Some(s) => *target = s.to_string(),
        None => errors.push(type_error(field, "must be a string")),
    }
}

fn set_string_list(
    target: &mut Vec<String>,
    value: &Value,
    field: &str,
    errors: &mut Vec<FieldError>,
) {
    match to_string_list(value) {
        Some(list) => *target = list,
        None => errors.push(type_error(field, "must be an array of strings")),
    }
}

fn to_string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Omitted specification keys fall back to empty strings, keeping the
/// four-key record invariant.
fn to_specifications(value: &Value) -> Option<Specifications> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
