use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// The signed-in account.
///
/// Timestamps are kept as the strings the backend sends; nothing in the
/// session flow interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub avatar: Option<String>,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Apply every field present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A partial `User`: every field optional, used for field-wise merges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;

    #[test]
    fn test_parse_user_json() {
        let json = r#"{"id":"u1","email":"a@b.com","name":"Ada","role":"admin","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-02T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).expect("Failed to parse user JSON");
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.avatar, None);
        assert_eq!(user.created_at, "2024-01-01T00:00:00Z");
        assert!(user.is_admin());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["role"], "user");
        // Absent avatar is omitted rather than sent as null
        assert!(value.get("avatar").is_none());
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut user = sample_user();
        user.merge(UserPatch {
            name: Some("Grace".to_string()),
            avatar: Some("https://example.com/g.png".to_string()),
            ..Default::default()
        });
        assert_eq!(user.name, "Grace");
        assert_eq!(user.avatar.as_deref(), Some("https://example.com/g.png"));
        assert_eq!(user.email, sample_user().email);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let mut user = sample_user();
        user.merge(UserPatch::default());
        assert_eq!(user, sample_user());
    }

    #[test]
    fn test_user_validation() {
        assert!(sample_user().validate().is_ok());

        let mut bad = sample_user();
        bad.email = "nope".to_string();
        bad.name = String::new();
        bad.avatar = Some("not a url".to_string());
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }
}
