use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kvstore::KvStore;
use tracing::{debug, info, instrument, warn};

use crate::config::UserCredential;
use crate::contract::model::{Claims, Session};
use crate::domain::error::DomainError;
use crate::domain::token::TokenSigner;

/// Login and role lookup. The role of the last successful login is kept
/// in the store under the bare username.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn KvStore>,
    signer: Arc<dyn TokenSigner>,
    users: Arc<HashMap<String, UserCredential>>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub token_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: 3600,
        }
    }
}

impl Service {
    pub fn new(
        store: Arc<dyn KvStore>,
        signer: Arc<dyn TokenSigner>,
        users: Vec<UserCredential>,
        config: ServiceConfig,
    ) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect::<HashMap<_, _>>();
        Self {
            store,
            signer,
            users: Arc::new(users),
            config,
        }
    }

    #[instrument(name = "sessions.service.login", skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let user = match self.users.get(username) {
            Some(u) if u.password == password => u,
            _ => {
                warn!("Rejected login");
                return Err(DomainError::InvalidCredentials);
            }
        };

        let now = Utc::now().timestamp();
        let claims = Claims {
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + self.config.token_ttl_secs as i64,
        };
        let token = self.signer.sign(&claims)?;

        self.store.set(&user.username, &user.role).await?;

        info!(role = %user.role, "Login succeeded");
        Ok(Session {
            token,
            role: user.role.clone(),
        })
    }

    /// Role recorded by the last successful login, `None` if there never was one.
    #[instrument(name = "sessions.service.get_role", skip(self), fields(username = %username))]
    pub async fn get_role(&self, username: &str) -> Result<Option<String>, DomainError> {
        let role = self.store.get(username).await?;
        debug!(found = role.is_some(), "Role lookup");
        Ok(role)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        self.signer.verify(token)
    }
}
