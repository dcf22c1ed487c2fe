use std::sync::Arc;

use modkit::{ModuleCtx, RestfulModule};
use tracing::{debug, info, warn};

use crate::api::rest::routes;
use crate::config::{SessionsConfig, DEFAULT_JWT_SECRET};
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::jwt::JwtSigner;

pub const MODULE_NAME: &str = "sessions";

/// Login endpoint plus role lookup, wired to the shared store.
#[derive(Clone)]
pub struct Sessions {
    service: Arc<Service>,
}

impl Sessions {
    pub fn init(ctx: &ModuleCtx) -> anyhow::Result<Self> {
        info!("Initializing sessions module");

        let cfg: SessionsConfig = ctx.module_config_required(MODULE_NAME)?;
        debug!(
            "Loaded sessions config: users={}, token_ttl_secs={}",
            cfg.users.len(),
            cfg.token_ttl_secs
        );
        if cfg.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("sessions.jwt_secret is the built-in default; set it in config for real deployments");
        }

        let signer = Arc::new(JwtSigner::new(&cfg.jwt_secret));
        let service = Service::new(
            ctx.store(),
            signer,
            cfg.users,
            ServiceConfig {
                token_ttl_secs: cfg.token_ttl_secs,
            },
        );

        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }
}

impl RestfulModule for Sessions {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering sessions REST routes");
        Ok(routes::register_routes(router, self.service.clone()))
    }
}
