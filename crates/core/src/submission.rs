//! Contact-form submission input and validation rules.
//!
//! A submission is accepted only when every required field is present and
//! the phone number reduces to exactly ten digits once whitespace is removed.
//! Rules run in a fixed order and the first failure wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Message returned when any required field is missing or empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, Phone, and Interest Type are required fields";

/// Message returned when the phone number is not ten digits.
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid 10-digit phone number";

/// Message returned once a submission has been stored.
pub const THANK_YOU_MESSAGE: &str = "Thank you for contacting us! We will get back to you soon.";

/// Pattern a whitespace-stripped phone number must match.
pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Raw contact-form payload as posted by the browser.
///
/// Every field is optional at the wire level so that a missing field is
/// reported through the required-fields rule instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub interest_type: Option<String>,
}

/// A validated submission, ready to be inserted.
///
/// `phone` keeps the visitor's original formatting; whitespace is only
/// ignored for the digit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub interest_type: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw form and convert it into a [`NewSubmission`].
///
/// An empty `email` is treated the same as an absent one.
pub fn validate_submission(form: ContactForm) -> Result<NewSubmission, CoreError> {
    let ContactForm {
        name,
        phone,
        email,
        interest_type,
    } = form;

    let (Some(name), Some(phone), Some(interest_type)) = (
        non_empty(name),
        non_empty(phone),
        non_empty(interest_type),
    ) else {
        return Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    if !is_valid_phone(&phone) {
        return Err(CoreError::Validation(INVALID_PHONE_MESSAGE.to_string()));
    }

    Ok(NewSubmission {
        name,
        phone,
        email: non_empty(email),
        interest_type,
    })
}

/// Returns `true` when `phone` is exactly ten ASCII digits after every
/// whitespace character is removed.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(&strip_whitespace(phone))
}

/// Remove all whitespace, including interior runs.
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(name: &str, phone: &str, email: Option<&str>, interest: &str) -> ContactForm {
        ContactForm {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            email: email.map(str::to_string),
            interest_type: Some(interest.to_string()),
        }
    }

    fn message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_submission() {
        let submission =
            validate_submission(form("Asha Rao", "9876543210", Some("a@x.com"), "loan")).unwrap();
        assert_eq!(
            submission,
            NewSubmission {
                name: "Asha Rao".into(),
                phone: "9876543210".into(),
                email: Some("a@x.com".into()),
                interest_type: "loan".into(),
            }
        );
    }

    #[test]
    fn missing_email_becomes_none() {
        let submission = validate_submission(form("Asha", "9876543210", None, "loan")).unwrap();
        assert_eq!(submission.email, None);
    }

    #[test]
    fn empty_email_becomes_none() {
        let submission = validate_submission(form("Asha", "9876543210", Some(""), "loan")).unwrap();
        assert_eq!(submission.email, None);
    }

    #[test]
    fn empty_required_fields_rejected() {
        for f in [
            form("", "9876543210", None, "loan"),
            form("Asha", "", None, "loan"),
            form("Asha", "9876543210", None, ""),
        ] {
            assert_eq!(
                message(validate_submission(f).unwrap_err()),
                REQUIRED_FIELDS_MESSAGE
            );
        }
    }

    #[test]
    fn absent_required_fields_rejected() {
        let err = validate_submission(ContactForm::default()).unwrap_err();
        assert_eq!(message(err), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn required_fields_checked_before_phone() {
        let err = validate_submission(form("", "12345", None, "loan")).unwrap_err();
        assert_eq!(message(err), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn bad_phone_rejected() {
        for phone in ["12345", "123-456-78901", "98765432100", "98765abcde", "123-456-7890"] {
            let err = validate_submission(form("Asha", phone, None, "loan")).unwrap_err();
            assert_matches!(&err, CoreError::Validation(_));
            assert_eq!(message(err), INVALID_PHONE_MESSAGE, "phone {phone:?}");
        }
    }

    #[test]
    fn phone_whitespace_is_ignored_but_preserved() {
        let submission =
            validate_submission(form("Asha", "98765 43210", None, "loan")).unwrap();
        assert_eq!(submission.phone, "98765 43210");
        assert!(is_valid_phone(" 987 654\t3210 "));
    }

    #[test]
    fn whitespace_only_phone_fails_digit_check() {
        let err = validate_submission(form("Asha", "   ", None, "loan")).unwrap_err();
        assert_eq!(message(err), INVALID_PHONE_MESSAGE);
    }

    #[test]
    fn form_deserializes_with_missing_fields() {
        let form: ContactForm =
            serde_json::from_str(r#"{"name":"Asha","phone":"9876543210"}"#).unwrap();
        assert_eq!(form.name.as_deref(), Some("Asha"));
        assert!(form.interest_type.is_none());
        assert!(form.email.is_none());
    }

    #[test]
    fn strip_whitespace_removes_interior_runs() {
        assert_eq!(strip_whitespace(" 98 76\n54  3210 "), "9876543210");
    }
}
