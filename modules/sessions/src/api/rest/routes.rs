use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    // POST /login - issue a session token
    // GET /role/{username} - role recorded by the last login
    let routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/role/{username}", get(handlers::get_role))
        .layer(Extension(service));

    router.merge(routes)
}
