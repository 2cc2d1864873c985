//! Authentication Wire Types
//!
//! Bodies exchanged with `POST /login` and `POST /register`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login body. Older backends omit `username`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    /// Email is optional; an absent value is omitted from the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_omits_missing_email() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: None,
            password: "secret".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_login_response_without_username() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(response.token, "abc123");
        assert!(response.username.is_none());
    }
}
