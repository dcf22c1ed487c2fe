use std::sync::Arc;

use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    // POST /patients - create or overwrite a patient
    // GET /patients - list all patients
    // PUT /patients/{id} - partial update
    // DELETE /patients/{id} - unconditional delete
    // POST|GET|PUT|DELETE /patients/{id}/medical-record - the patient's medical record
    let routes = Router::new()
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/{id}",
            put(handlers::update_patient).delete(handlers::delete_patient),
        )
        .route(
            "/patients/{id}/medical-record",
            get(handlers::get_medical_record)
                .post(handlers::create_medical_record)
                .put(handlers::update_medical_record)
                .delete(handlers::delete_medical_record),
        )
        .layer(Extension(service));

    router.merge(routes)
}
