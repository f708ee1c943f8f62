use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials posted to `/auth/login`.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Registration data posted to `/auth/register`.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords don't match"))]
    pub confirm_password: String,
}

// Passwords stay out of logs
impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::field_messages;

    fn register(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_rejects_bad_email_and_short_password() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "ab".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_login_accepts_valid_credentials() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "abcdef".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_login_password_boundary() {
        let mut form = LoginForm {
            email: "a@b.com".to_string(),
            password: "abcde".to_string(),
        };
        assert!(form.validate().is_err());
        form.password.push('f');
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_accepts_valid_form() {
        assert!(register("Ada", "a@b.com", "secret1", "secret1").validate().is_ok());
    }

    #[test]
    fn test_register_requires_matching_passwords() {
        let errors = register("Ada", "a@b.com", "secret1", "secret2")
            .validate()
            .unwrap_err();
        let messages = field_messages(&errors);
        assert_eq!(messages.len(), 1);
        let (_, confirm) = messages.iter().next().unwrap();
        assert_eq!(confirm, &vec!["Passwords don't match".to_string()]);
    }

    #[test]
    fn test_register_collects_every_failure() {
        let errors = register("", "nope", "abc", "xyz").validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_register_serializes_camel_case() {
        let value = serde_json::to_value(register("Ada", "a@b.com", "secret1", "secret1")).unwrap();
        assert_eq!(value["confirmPassword"], "secret1");
        assert!(value.get("confirm_password").is_none());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{:?}", form);
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("hunter22"));
    }
}
