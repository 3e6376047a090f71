pub mod auth;
pub mod profile;

use account_forms::FieldErrors;

/// Print a form's error map to stderr, one line per problem.
pub(crate) fn print_field_errors(errors: &FieldErrors) {
    if !errors.name.is_empty() {
        eprintln!("name: {}", errors.name);
    }
    if !errors.email.is_empty() {
        eprintln!("email: {}", errors.email);
    }
    for violation in &errors.password {
        eprintln!("password: {}", violation);
    }
}
