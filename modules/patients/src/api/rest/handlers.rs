use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use modkit::{JsonBody, ProblemResponse};
use tracing::info;

use crate::api::rest::dto::{
    CreatePatientReq, MedicalRecordDto, MedicalRecordReq, MessageResp, PatientDto,
    UpdatePatientReq,
};
use crate::api::rest::error::{map_domain_error, Operation};
use crate::domain::service::Service;

type Ack = (StatusCode, Json<MessageResp>);

fn ack(status: StatusCode, message: &str) -> Ack {
    (status, Json(MessageResp::new(message)))
}

/// Create (or overwrite) a patient
pub async fn create_patient(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<CreatePatientReq>,
) -> Result<Ack, ProblemResponse> {
    info!("Creating patient: {:?}", req.id);

    svc.create_patient(req.into())
        .await
        .map(|_| ack(StatusCode::CREATED, "patient saved successfully"))
        .map_err(|e| map_domain_error(&e, Operation::CreatePatient))
}

/// List every stored patient
pub async fn list_patients(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<PatientDto>>, ProblemResponse> {
    svc.list_patients()
        .await
        .map(|patients| Json(patients.into_iter().map(PatientDto::from).collect()))
        .map_err(|e| map_domain_error(&e, Operation::ListPatients))
}

/// Update the given fields of an existing patient
pub async fn update_patient(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdatePatientReq>,
) -> Result<Ack, ProblemResponse> {
    info!("Updating patient {}", id);

    svc.update_patient(&id, req.into())
        .await
        .map(|_| ack(StatusCode::OK, "patient updated successfully"))
        .map_err(|e| map_domain_error(&e, Operation::UpdatePatient))
}

pub async fn delete_patient(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Ack, ProblemResponse> {
    info!("Deleting patient {}", id);

    svc.delete_patient(&id)
        .await
        .map(|_| ack(StatusCode::OK, "patient deleted successfully"))
        .map_err(|e| map_domain_error(&e, Operation::DeletePatient))
}

/// Save the medical record of a patient
pub async fn create_medical_record(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<MedicalRecordReq>,
) -> Result<Ack, ProblemResponse> {
    info!("Saving medical record for patient {}", id);

    svc.save_medical_record(&id, req.into())
        .await
        .map(|_| ack(StatusCode::CREATED, "Medical record saved successfully"))
        .map_err(|e| map_domain_error(&e, Operation::CreateMedicalRecord))
}

/// Medical record of a patient, empty when none was saved yet
pub async fn get_medical_record(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<MedicalRecordDto>, ProblemResponse> {
    info!("Retrieving medical record for patient {}", id);

    svc.get_medical_record(&id)
        .await
        .map(|r| Json(MedicalRecordDto::from(r)))
        .map_err(|e| map_domain_error(&e, Operation::GetMedicalRecord))
}

pub async fn update_medical_record(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<MedicalRecordReq>,
) -> Result<Ack, ProblemResponse> {
    info!("Updating medical record for patient {}", id);

    svc.update_medical_record(&id, req.into())
        .await
        .map(|_| ack(StatusCode::OK, "Medical record updated successfully"))
        .map_err(|e| map_domain_error(&e, Operation::UpdateMedicalRecord))
}

pub async fn delete_medical_record(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Ack, ProblemResponse> {
    info!("Deleting medical record for patient {}", id);

    svc.delete_medical_record(&id)
        .await
        .map(|_| ack(StatusCode::OK, "Medical record deleted successfully"))
        .map_err(|e| map_domain_error(&e, Operation::DeleteMedicalRecord))
}
