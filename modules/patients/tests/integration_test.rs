//! Integration-style tests for the patients module.
//!
//! - Service runs on a fresh in-memory store per test.
//! - REST layer is exercised via an Axum Router registered through the real routes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use kvstore::{FieldMap, KvStore, MemoryStore, StoreError};
use modkit::{ModuleCtx, RestfulModule};
use serde_json::{json, Value};
use tower::ServiceExt;

use patients::{
    client::PatientsApi, domain::service::Service, error::PatientsError,
    infra::storage::kv_repo::KvPatientsRepository, model::PatientPatch, Patients,
};

fn create_test_router(store: Arc<dyn KvStore>) -> Router {
    let service = Arc::new(Service::new(Arc::new(KvPatientsRepository::new(store))));
    patients::api::rest::routes::register_routes(Router::new(), service)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn full_patient(id: &str) -> Value {
    json!({
        "id": id,
        "firstname": "Ana",
        "lastname": "Cruz",
        "appoint_date": "2024-05-01",
        "appoint_type": "checkup",
        "age": "34",
        "address": "Cebu City",
        "email": "ana@example.com",
        "pnumber": "09171234567"
    })
}

/// Store double whose every call fails.
struct BrokenStore;

#[async_trait]
impl KvStore for BrokenStore {
    async fn get(&self, _key: &str) -> kvstore::Result<Option<String>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn set(&self, _key: &str, _value: &str) -> kvstore::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn del(&self, _key: &str) -> kvstore::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn hgetall(&self, _key: &str) -> kvstore::Result<FieldMap> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn hset_multiple(&self, _key: &str, _f: &[(String, String)]) -> kvstore::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn keys_with_prefix(&self, _prefix: &str) -> kvstore::Result<Vec<String>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> kvstore::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn create_then_list_returns_the_patient() {
    let router = create_test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(&router, "POST", "/patients", Some(full_patient("1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "patient saved successfully" }));

    let (status, body) = send(&router, "GET", "/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([full_patient("1")]));
}

#[tokio::test]
async fn create_with_missing_or_empty_field_is_400_and_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());

    for field in [
        "id",
        "firstname",
        "lastname",
        "appoint_date",
        "appoint_type",
        "age",
        "address",
        "email",
        "pnumber",
    ] {
        let mut missing = full_patient("1");
        missing.as_object_mut().unwrap().remove(field);
        let (status, body) = send(&router, "POST", "/patients", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(body, json!({ "message": "All fields are required" }));

        let mut empty = full_patient("1");
        empty[field] = json!("");
        let (status, _) = send(&router, "POST", "/patients", Some(empty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty {field}");
    }

    assert!(store.is_empty());
    let (_, body) = send(&router, "GET", "/patients", None).await;
    assert_eq!(body, json!([]));
}

async fn send_raw(router: &Router, content_type: Option<&str>, raw: &str) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method("POST").uri("/patients");
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let resp = router
        .clone()
        .oneshot(builder.body(Body::from(raw.to_owned())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, ct, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn body_without_json_content_type_counts_as_no_fields() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());

    let (status, ct, body) = send_raw(&router, None, &full_patient("1").to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ct.as_deref(), Some("application/json"));
    assert_eq!(body, json!({ "message": "All fields are required" }));

    let (status, _, body) =
        send_raw(&router, Some("text/plain"), &full_patient("1").to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
    assert!(store.is_empty());
}

#[tokio::test]
async fn unusable_json_bodies_are_400_with_json_message() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());

    let mut boolean = full_patient("1");
    boolean["firstname"] = json!(true);

    for raw in [boolean.to_string(), r#"{"id": "1","#.to_string()] {
        let (status, ct, body) = send_raw(&router, Some("application/json"), &raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
        assert_eq!(ct.as_deref(), Some("application/json"));
        assert_eq!(body["message"], "Invalid request body");
        assert!(body["details"].is_string());
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn numeric_age_and_id_are_stored_as_strings() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());

    let mut body = full_patient("ignored");
    body["id"] = json!(7);
    body["age"] = json!(41);
    let (status, _) = send(&router, "POST", "/patients", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = store.hgetall("patient:7").await.unwrap();
    assert_eq!(stored["age"], "41");
    assert!(!stored.contains_key("id"));
}

#[tokio::test]
async fn create_with_duplicate_id_overwrites() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let mut again = full_patient("1");
    again["firstname"] = json!("Bea");
    let (status, _) = send(&router, "POST", "/patients", Some(again.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&router, "GET", "/patients", None).await;
    assert_eq!(body, json!([again]));
}

#[tokio::test]
async fn update_of_unknown_patient_is_404() {
    let router = create_test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &router,
        "PUT",
        "/patients/404",
        Some(json!({ "firstname": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "patient not found" }));
}

#[tokio::test]
async fn update_without_fields_is_400() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/patients/1",
        Some(json!({ "firstname": "", "age": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "At least one field is required to update" })
    );
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/patients/1",
        Some(json!({ "email": "new@example.com", "lastname": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "patient updated successfully" }));

    let mut expected = full_patient("1");
    expected["email"] = json!("new@example.com");
    let (_, body) = send(&router, "GET", "/patients", None).await;
    assert_eq!(body, json!([expected]));
}

#[tokio::test]
async fn delete_succeeds_whether_or_not_the_patient_exists() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    for id in ["1", "1", "never-existed"] {
        let (status, body) = send(&router, "DELETE", &format!("/patients/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "patient deleted successfully" }));
    }

    let (_, body) = send(&router, "GET", "/patients", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn medical_record_read_requires_patient_and_defaults_to_empty() {
    let router = create_test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(&router, "GET", "/patients/1/medical-record", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Patient not found" }));

    send(&router, "POST", "/patients", Some(full_patient("1"))).await;
    let (status, body) = send(&router, "GET", "/patients/1/medical-record", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "diagnosis": "", "treatment": "", "prescription": "", "notes": "" })
    );
}

#[tokio::test]
async fn medical_record_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let (status, body) = send(
        &router,
        "POST",
        "/patients/1/medical-record",
        Some(json!({ "diagnosis": "flu", "treatment": "rest" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Medical record saved successfully" }));

    let (status, body) = send(
        &router,
        "PUT",
        "/patients/1/medical-record",
        Some(json!({ "notes": "follow up in a week" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Medical record updated successfully" })
    );

    let (_, body) = send(&router, "GET", "/patients/1/medical-record", None).await;
    assert_eq!(
        body,
        json!({
            "diagnosis": "flu",
            "treatment": "rest",
            "prescription": "",
            "notes": "follow up in a week"
        })
    );

    // deleting the patient leaves the record behind
    send(&router, "DELETE", "/patients/1", None).await;
    assert_eq!(
        store.hgetall("medical_record:1").await.unwrap()["diagnosis"],
        "flu"
    );

    let (status, body) = send(&router, "DELETE", "/patients/1/medical-record", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Medical record deleted successfully" })
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn medical_record_create_does_not_check_patient() {
    let store = Arc::new(MemoryStore::new());
    let router = create_test_router(store.clone());

    let (status, _) = send(&router, "POST", "/patients/ghost/medical-record", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = store.hgetall("medical_record:ghost").await.unwrap();
    assert_eq!(stored.len(), 4);
    assert!(stored.values().all(|v| v.is_empty()));
}

#[tokio::test]
async fn medical_record_update_requires_existing_record() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/patients/1/medical-record",
        Some(json!({ "diagnosis": "flu" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Medical record not found" }));
}

#[tokio::test]
async fn medical_record_update_without_fields_is_a_no_op() {
    let router = create_test_router(Arc::new(MemoryStore::new()));
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;
    send(
        &router,
        "POST",
        "/patients/1/medical-record",
        Some(json!({ "diagnosis": "flu" })),
    )
    .await;

    let (status, _) = send(&router, "PUT", "/patients/1/medical-record", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, "GET", "/patients/1/medical-record", None).await;
    assert_eq!(body["diagnosis"], "flu");
}

#[tokio::test]
async fn store_failures_are_500_with_operation_message_and_details() {
    let router = create_test_router(Arc::new(BrokenStore));

    let cases = [
        ("POST", "/patients", Some(full_patient("1")), "Failed to save patient"),
        ("GET", "/patients", None, "Failed to fetch patients"),
        (
            "PUT",
            "/patients/1",
            Some(json!({ "age": "40" })),
            "Failed to update patient",
        ),
        ("DELETE", "/patients/1", None, "Failed to delete patient"),
        (
            "POST",
            "/patients/1/medical-record",
            Some(json!({})),
            "Failed to save medical record",
        ),
        (
            "GET",
            "/patients/1/medical-record",
            None,
            "Error fetching medical record",
        ),
        (
            "PUT",
            "/patients/1/medical-record",
            Some(json!({ "notes": "x" })),
            "Failed to update medical record",
        ),
        (
            "DELETE",
            "/patients/1/medical-record",
            None,
            "Failed to delete medical record",
        ),
    ];

    for (method, uri, body, message) in cases {
        let (status, resp) = send(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(resp["message"], message);
        assert!(resp["details"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }
}

#[tokio::test]
async fn module_registers_routes_and_exposes_local_client() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let module = Patients::init(&ModuleCtx::new(store)).unwrap();
    assert_eq!(module.name(), "patients");

    let router = module.register_rest(Router::new()).unwrap();
    send(&router, "POST", "/patients", Some(full_patient("1"))).await;

    let client = module.client();
    let patients = client.list_patients().await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].firstname, "Ana");

    let err = client
        .update_patient("2", PatientPatch {
            age: Some("50".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<PatientsError>(),
        Some(&PatientsError::PatientNotFound { id: "2".into() })
    );

    let err = client.get_medical_record("2").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PatientsError>(),
        Some(PatientsError::PatientNotFound { .. })
    ));
}
