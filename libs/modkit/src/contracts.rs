use axum::Router;

/// A module that contributes HTTP routes to the ingress router.
pub trait RestfulModule: Send + Sync {
    /// Stable module name, also the key of its config section.
    fn name(&self) -> &'static str;

    fn register_rest(&self, router: Router) -> anyhow::Result<Router>;
}
