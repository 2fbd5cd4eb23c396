// src/types/user.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The signed-in account as returned by `/me`.
///
/// The payload has no fixed schema: ids may be numbers, and a field of an
/// unexpected type is treated as absent instead of rejecting the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub is_superadmin: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of the one-shot session check.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Strings as-is, numbers in their decimal form, anything else as `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_kept() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "email": "hr@example.com",
            "tenant": "acme"
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("7"));
        assert_eq!(user.email.as_deref(), Some("hr@example.com"));
        assert_eq!(user.extra.get("tenant"), Some(&json!("acme")));
    }

    #[test]
    fn test_unexpected_field_types_do_not_reject_user() {
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "name": null,
            "avatar_url": {"small": "a.png"},
            "is_superadmin": 1
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("u-1"));
        assert!(user.name.is_none());
        assert!(user.avatar_url.is_none());
        assert!(user.is_superadmin);
    }

    #[test]
    fn test_session_state_constructors() {
        assert!(SessionState::loading().is_loading);
        let resolved = SessionState::resolved(Some(User::default()));
        assert!(!resolved.is_loading);
        assert!(resolved.is_authenticated());
    }
}
