//! HTTP front door: assembles module routes behind the shared middleware
//! stack and serves them until cancelled.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use modkit::{ModuleCtx, RestfulModule};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub const MODULE_NAME: &str = "api_ingress";

/// Handler timeout used when `server.timeout_sec` is 0.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the HTTP server and the middleware applied to every module's routes.
pub struct ApiIngress {
    config: ApiIngressConfig,
    timeout: Duration,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `modules.api_ingress`; an invalid section is an error.
    pub fn init(ctx: &ModuleCtx) -> Result<Self> {
        let cfg: ApiIngressConfig = ctx.module_config_required(MODULE_NAME)?;
        tracing::debug!(
            module = MODULE_NAME,
            cors_enabled = cfg.cors_enabled,
            body_limit_bytes = cfg.body_limit_bytes,
            "Module initialized with context"
        );
        Ok(Self::new(cfg))
    }

    /// Zero keeps the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the HTTP router from the modules' routes
    pub fn build_router(&self, modules: &[Arc<dyn RestfulModule>]) -> Result<Router> {
        let mut router = Router::new().route("/health", get(web::health_check));
        for module in modules {
            tracing::debug!(module = module.name(), "Registering REST routes");
            router = module.register_rest(router)?;
        }

        // Middleware order (outermost to innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> Timeout -> CORS -> BodyLimit
        // Router::layer wraps, so the innermost layer is added first.
        let x_request_id = request_id::header();

        // axum's own 2 MiB extractor limit would otherwise win over the configured one
        router = router.layer(DefaultBodyLimit::disable());
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(TimeoutLayer::new(self.timeout));
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Serve on an already bound listener until `cancel` fires, then drain in-flight requests.
    pub async fn serve(
        &self,
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_keeps_default() {
        let ingress = ApiIngress::new(ApiIngressConfig::default()).with_timeout(Duration::ZERO);
        assert_eq!(ingress.timeout(), DEFAULT_TIMEOUT);

        let ingress = ingress.with_timeout(Duration::from_secs(5));
        assert_eq!(ingress.timeout(), Duration::from_secs(5));
    }
}
