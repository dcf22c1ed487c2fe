use serde::{Deserialize, Serialize};

pub const DEFAULT_JWT_SECRET: &str = "your_secret_key";

/// Configuration for the sessions module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionsConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_users")]
    pub users: Vec<UserCredential>,
}

/// One entry of the fixed login table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl_secs(),
            users: default_users(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_token_ttl_secs() -> u64 {
    3600
}

fn default_users() -> Vec<UserCredential> {
    vec![
        UserCredential {
            username: "user1".into(),
            password: "pass123".into(),
            role: "admin".into(),
        },
        UserCredential {
            username: "user2".into(),
            password: "pass123".into(),
            role: "user".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_default_users() {
        let cfg: SessionsConfig =
            serde_json::from_value(serde_json::json!({ "jwt_secret": "s3cret" })).unwrap();
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert_eq!(cfg.users.len(), 2);
        assert_eq!(cfg.users[0].role, "admin");
    }

    #[test]
    fn custom_user_table_replaces_defaults() {
        let cfg: SessionsConfig = serde_json::from_value(serde_json::json!({
            "users": [{ "username": "nurse", "password": "pw", "role": "staff" }]
        }))
        .unwrap();
        assert_eq!(
            cfg.users,
            vec![UserCredential {
                username: "nurse".into(),
                password: "pw".into(),
                role: "staff".into(),
            }]
        );
    }
}
