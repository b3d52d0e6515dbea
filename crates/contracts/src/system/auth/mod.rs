use serde::{Deserialize, Serialize};

/// Credentials for `POST /auth/login`.
///
/// The gateway expects an OAuth2 password form, so this is sent
/// `application/x-www-form-urlencoded`, not JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Result of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub balance: f64,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_defaults_token_type() {
        let resp: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn user_info_tolerates_missing_optional_fields() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id":7,"username":"alice","is_admin":true}"#).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.is_admin);
        assert!(user.is_active);
        assert_eq!(user.balance, 0.0);
        assert_eq!(user.email, None);
    }
}
