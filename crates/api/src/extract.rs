//! Request body extractor for the contact form.
//!
//! Browsers post either JSON (the site's script) or a plain urlencoded form
//! (no-JS fallback). Any other content type, or an empty body, yields an
//! empty form so the visitor gets the required-fields message rather than a
//! decoding error.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use finserv_core::submission::ContactForm;

use crate::error::AppError;

/// Extracts a [`ContactForm`] from a JSON or urlencoded body.
#[derive(Debug)]
pub struct ContactPayload(pub ContactForm);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let essence = content_type.split(';').next().unwrap_or_default().trim();

        if essence == "application/x-www-form-urlencoded" {
            let Form(form) = Form::<ContactForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self(form));
        }

        if is_json(essence) {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self(ContactForm::default()));
            }
            let Json(form) = Json::<ContactForm>::from_bytes(&bytes)
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self(form));
        }

        Ok(Self(ContactForm::default()))
    }
}

fn is_json(essence: &str) -> bool {
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
