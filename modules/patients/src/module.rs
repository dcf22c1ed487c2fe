use std::sync::Arc;

use modkit::{ModuleCtx, RestfulModule};
use tracing::info;

use crate::api::rest::routes;
use crate::contract::client::PatientsApi;
use crate::domain::service::Service;
use crate::gateways::local::PatientsLocalClient;
use crate::infra::storage::kv_repo::KvPatientsRepository;

pub const MODULE_NAME: &str = "patients";

/// Patient and medical-record CRUD over the shared store.
#[derive(Clone)]
pub struct Patients {
    service: Arc<Service>,
}

impl Patients {
    pub fn init(ctx: &ModuleCtx) -> anyhow::Result<Self> {
        info!("Initializing patients module");

        // Wire repository (infra) to domain service (port)
        let repo = KvPatientsRepository::new(ctx.store());
        let service = Service::new(Arc::new(repo));

        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn PatientsApi> {
        Arc::new(PatientsLocalClient::new(self.service.clone()))
    }
}

impl RestfulModule for Patients {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering patients REST routes");
        Ok(routes::register_routes(router, self.service.clone()))
    }
}
