use std::sync::Arc;

use axum::{extract::Path, response::Json, Extension};
use modkit::{JsonBody, ProblemResponse};
use tracing::info;

use crate::api::rest::dto::{LoginReq, LoginResp, RoleResp};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// Check credentials, issue a token and remember the role
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<LoginReq>,
) -> Result<Json<LoginResp>, ProblemResponse> {
    info!("Login attempt for {}", req.username);

    svc.login(&req.username, &req.password)
        .await
        .map(|s| Json(LoginResp::from(s)))
        .map_err(|e| map_domain_error(&e))
}

/// Role stored by the user's last login
pub async fn get_role(
    Extension(svc): Extension<Arc<Service>>,
    Path(username): Path<String>,
) -> Result<Json<RoleResp>, ProblemResponse> {
    svc.get_role(&username)
        .await
        .map(|role| Json(RoleResp { role }))
        .map_err(|e| map_domain_error(&e))
}
