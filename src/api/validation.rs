//! Request payloads and the checks that turn them into service inputs.
//!
//! Payload fields are untyped optional JSON values at the serde level so a
//! single pass can report every missing, mistyped or malformed field at once.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::database::models::{FavInput, ListInput, UserPatch};
use crate::error::ApiError;
use crate::services::{SigninInput, SignupInput};

pub type FieldErrors = HashMap<String, String>;

pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, FieldErrors>;
}

/// JSON body that has been parsed as `P` and passed `P::validate`.
///
/// An empty body is read as `{}` so it fails field validation instead of parsing.
pub struct Valid<P: Validate>(pub P::Output);

#[async_trait]
impl<S, P> FromRequest<S> for Valid<P>
where
    S: Send + Sync,
    P: Validate + DeserializeOwned + Send,
    P::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(rejection.body_text())
            } else {
                ApiError::bad_request(rejection.body_text())
            }
        })?;

        let parsed = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice::<P>(b"{}")
        } else {
            serde_json::from_slice::<P>(&body)
        };
        let payload = parsed.map_err(|e| ApiError::invalid_json(format!("Malformed request body: {}", e)))?;

        payload
            .validate()
            .map(Valid)
            .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))
    }
}

/// Parse a numeric path segment: optional `-` then ASCII digits only.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, ApiError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let well_formed = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());

    well_formed
        .then(|| raw.parse::<i64>().ok())
        .flatten()
        .ok_or_else(|| {
            let mut fields = FieldErrors::new();
            fields.insert(field.to_string(), "numeric string is expected".to_string());
            ApiError::validation_error("Validation failed (numeric string is expected)", Some(fields))
        })
}

/// Basic email validation adapted to the field-error collector
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format".to_string());
    };
    if local.is_empty() || domain.contains('@') {
        return Err("Invalid email format".to_string());
    }

    // Domain needs a dot with something on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

#[derive(Default)]
struct Checks {
    errors: FieldErrors,
}

impl Checks {
    /// Absent and `null` are `None`; any non-string value is recorded as an error.
    fn string(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                self.errors
                    .insert(field.to_string(), format!("{} must be a string", field));
                None
            }
        }
    }

    fn required(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match self.string(field, value) {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.errors
                    .entry(field.to_string())
                    .or_insert_with(|| format!("{} should not be empty", field));
                None
            }
        }
    }

    fn email(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        let value = self.required(field, value)?;
        match validate_email_format(value.trim()) {
            Ok(()) => Some(value.trim().to_string()),
            Err(_) => {
                self.errors
                    .insert(field.to_string(), format!("{} must be an email", field));
                None
            }
        }
    }

    fn optional_email(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(v) => self.email(field, Some(v)),
        }
    }

    fn finish<T>(self, output: Option<T>) -> Result<T, FieldErrors> {
        match output {
            Some(output) if self.errors.is_empty() => Ok(output),
            _ => Err(self.errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupPayload {
    pub email: Option<Value>,
    pub password: Option<Value>,
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
}

impl Validate for SignupPayload {
    type Output = SignupInput;

    fn validate(self) -> Result<SignupInput, FieldErrors> {
        let mut checks = Checks::default();
        let email = checks.email("email", self.email);
        let password = checks.required("password", self.password);
        let first_name = checks.string("firstName", self.first_name);
        let last_name = checks.string("lastName", self.last_name);

        let output = email.zip(password).map(|(email, password)| SignupInput {
            email,
            password,
            first_name,
            last_name,
        });
        checks.finish(output)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninPayload {
    pub email: Option<Value>,
    pub password: Option<Value>,
}

impl Validate for SigninPayload {
    type Output = SigninInput;

    fn validate(self) -> Result<SigninInput, FieldErrors> {
        let mut checks = Checks::default();
        let email = checks.email("email", self.email);
        let password = checks.required("password", self.password);

        let output = email
            .zip(password)
            .map(|(email, password)| SigninInput { email, password });
        checks.finish(output)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditUserPayload {
    pub email: Option<Value>,
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
}

impl Validate for EditUserPayload {
    type Output = UserPatch;

    fn validate(self) -> Result<UserPatch, FieldErrors> {
        let mut checks = Checks::default();
        let email = checks.optional_email("email", self.email);
        let first_name = checks.string("firstName", self.first_name);
        let last_name = checks.string("lastName", self.last_name);

        let patch = UserPatch {
            email,
            first_name,
            last_name,
        };
        checks.finish(Some(patch))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListPayload {
    #[serde(alias = "playlist_name")]
    pub name: Option<Value>,
}

impl Validate for ListPayload {
    type Output = ListInput;

    fn validate(self) -> Result<ListInput, FieldErrors> {
        let mut checks = Checks::default();
        let name = checks.required("name", self.name);
        checks.finish(name.map(|name| ListInput { name }))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FavPayload {
    pub url: Option<Value>,
}

impl Validate for FavPayload {
    type Output = FavInput;

    fn validate(self) -> Result<FavInput, FieldErrors> {
        let mut checks = Checks::default();
        let url = checks.required("url", self.url);
        checks.finish(url.map(|url| FavInput { url }))
    }
}
