//! Login / session payload probing

use super::value::{first_string, lookup, string_or};
use crate::client::UserInfo;
use serde_json::Value;

/// Token locations, in priority order
pub const TOKEN_PATHS: &[&str] = &[
    "token",
    "access_token",
    "data.token",
    "data.access_token",
    "token.access_token",
    "token.token",
    "token_data.access_token",
    "token_data.token",
    "data.token_data.access_token",
    "data.token_data.token",
    "data.token.access_token",
    "data.token.token",
];

/// User record locations, in priority order
pub const USER_PATHS: &[&str] = &[
    "user",
    "data.user",
    "admin",
    "data.admin",
    "token_data.user",
    "data.token_data.user",
    "data",
];

const USER_MARKERS: &[&str] = &["id", "username", "email", "name"];

/// First non-empty string token found in a login response
pub fn extract_token(raw: &Value) -> Option<String> {
    TOKEN_PATHS.iter().find_map(|path| match lookup(raw, path) {
        Some(Value::String(token)) if !token.trim().is_empty() => Some(token.trim().to_string()),
        _ => None,
    })
}

/// First object that looks like a user record, normalized
pub fn extract_user(raw: &Value) -> Option<UserInfo> {
    USER_PATHS
        .iter()
        .filter_map(|path| lookup(raw, path))
        .chain(std::iter::once(raw))
        .find(|candidate| looks_like_user(candidate))
        .map(normalize_user)
}

fn looks_like_user(candidate: &Value) -> bool {
    candidate.is_object()
        && USER_MARKERS.iter().any(|key| candidate.get(*key).is_some())
}

pub fn normalize_user(raw: &Value) -> UserInfo {
    let username = string_or(raw, &["username", "user_name", "email", "login"], "");
    UserInfo {
        id: string_or(raw, &["id", "user_id", "admin_id"], ""),
        name: first_string(raw, &["name", "full_name", "display_name"])
            .unwrap_or_else(|| username.clone()),
        role: string_or(raw, &["role.name", "role", "role_name", "user_type", "type"], "admin"),
        username,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_locations() {
        assert_eq!(extract_token(&json!({"token": "t1"})), Some("t1".into()));
        assert_eq!(extract_token(&json!({"data": {"token": "t2"}})), Some("t2".into()));
        assert_eq!(
            extract_token(&json!({"data": {"token_data": {"access_token": "abc"}}})),
            Some("abc".into())
        );
        assert_eq!(
            extract_token(&json!({"token": {"access_token": "t3"}})),
            Some("t3".into())
        );
    }

    #[test]
    fn test_token_priority_and_blank_skipped() {
        let raw = json!({"token": " ", "data": {"token": "inner"}, "access_token": "outer"});
        assert_eq!(extract_token(&raw), Some("outer".into()));
        assert_eq!(extract_token(&json!({"success": true})), None);
    }

    #[test]
    fn test_extract_user_locations() {
        let raw = json!({"data": {"token": "x", "user": {"id": 4, "email": "a@b.test", "role": {"name": "manager"}}}});
        let user = extract_user(&raw).unwrap();
        assert_eq!(user.id, "4");
        assert_eq!(user.username, "a@b.test");
        assert_eq!(user.name, "a@b.test");
        assert_eq!(user.role, "manager");

        let raw = json!({"id": 1, "username": "root", "name": "Root"});
        assert_eq!(extract_user(&raw).unwrap().role, "admin");

        assert!(extract_user(&json!({"data": {"token": "x"}})).is_none());
    }
}
