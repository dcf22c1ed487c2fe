use serde::{Deserialize, Serialize};

use crate::contract::model::Session;

/// REST DTO for login; missing fields deserialize as empty and fail authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginReq {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResp {
    pub token: String,
    pub role: String,
}

/// `role` is `null` when the user never logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResp {
    pub role: Option<String>,
}

impl From<Session> for LoginResp {
    fn from(s: Session) -> Self {
        Self {
            token: s.token,
            role: s.role,
        }
    }
}
