//! Account form validators.
//!
//! Pure field-level checks shared by the sign-up and profile-edit forms:
//!
//! - [`validate_name`] / [`validate_email`] return a single error message,
//!   or the empty string when the field is valid (the forms' error-map
//!   convention).
//! - [`password::evaluate`] checks a candidate password against the whole
//!   policy and accumulates violations; it never stops at the first.
//!
//! Everything here is a client-side hint. The server re-validates
//! authoritatively and may reject input these checks accept.

pub mod password;

use std::sync::LazyLock;

use regex::Regex;

/// Permissive `local@domain.tld` shape, searched anywhere in the input.
///
/// Intentionally weak: ASCII lowercase-oriented (uppercase local parts are
/// rejected) and satisfied by a partial match inside a longer string. A
/// hint for the user, not the authority on what the server accepts.
static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+@[a-z]+\.[a-z]{1,3}").expect("email pattern"));

/// Validate the full-name field. Returns the error message, or `""` when
/// the field is valid.
pub fn validate_name(name: &str) -> &'static str {
    if name.is_empty() {
        "Full Name is required."
    } else {
        ""
    }
}

/// Validate the email field. Returns the error message, or `""` when the
/// field is valid.
pub fn validate_email(email: &str) -> &'static str {
    if email.is_empty() {
        "Email address is required."
    } else if !EMAIL_FORMAT.is_match(email) {
        "Invalid Email Address format."
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_required() {
        assert_eq!(validate_name(""), "Full Name is required.");
        assert_eq!(validate_name("Ada Lovelace"), "");
    }

    #[test]
    fn email_required() {
        assert_eq!(validate_email(""), "Email address is required.");
    }

    #[test]
    fn email_format() {
        assert_eq!(validate_email("a@b.co"), "");
        assert_eq!(validate_email("user1@example.com"), "");
        assert_eq!(validate_email("not-an-email"), "Invalid Email Address format.");
        assert_eq!(validate_email("@no-local.com"), "Invalid Email Address format.");
    }

    #[test]
    fn email_format_is_permissive_by_design() {
        // The unanchored search accepts trailing garbage and partial TLD
        // matches. Documented behavior, not a defect to fix here.
        assert_eq!(validate_email("a@b.co m"), "");
        assert_eq!(validate_email("a@b.company"), "");
    }
}
