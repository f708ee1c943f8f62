//! Validation schemas for forms and request payloads.
//!
//! Each schema is a plain struct deriving `validator::Validate`. Call
//! `validate()` before sending it anywhere, and use `field_messages` to turn
//! the result into the field path → messages map a form renders.

pub mod auth;
pub mod profile;
pub mod query;

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub use auth::{LoginForm, RegisterForm};
pub use profile::{ContactForm, ProfileForm, UpdateUser};
pub use query::{FilterParams, FilterStatus, SearchParams, SortOrder};

/// Flatten `errors` into `field path → messages`.
///
/// Nested structs use dotted paths (`pagination.page`) and list items use
/// indices (`items[2].name`).
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.entry(path)
                    .or_default()
                    .extend(list.iter().map(message_for));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// The error's own message, or a readable default for its code.
pub fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "email" => "Invalid email address".to_string(),
        "url" => "Invalid URL".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "must_match" => "Fields don't match".to_string(),
        code => code.to_string(),
    }
}
