//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use billsplit_shared::AppError;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::ApiError;

/// A JSON object body read without a fixed schema.
///
/// Fields of the wrong type are treated as absent, so validation decides
/// which message the caller sees.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| invalid_json())?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|_| invalid_json())?;
        Ok(Self(value))
    }
}

fn invalid_json() -> ApiError {
    ApiError(AppError::Validation("Invalid JSON".to_string()))
}

impl JsonBody {
    /// A string field.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// A decimal field given as a JSON number or a numeric string.
    #[must_use]
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).and_then(value_to_decimal)
    }

    /// An array field; anything else is an empty slice.
    #[must_use]
    pub fn array(&self, key: &str) -> &[Value] {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }
}

/// Converts a JSON number or numeric string to a `Decimal`.
#[must_use]
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
