use modkit::{bad_request, internal_error, not_found, ProblemResponse};

use crate::domain::error::DomainError;

/// REST operation an error happened in; picks the wording of 404 and 500 bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePatient,
    ListPatients,
    UpdatePatient,
    DeletePatient,
    CreateMedicalRecord,
    GetMedicalRecord,
    UpdateMedicalRecord,
    DeleteMedicalRecord,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::CreatePatient => "Failed to save patient",
            Self::ListPatients => "Failed to fetch patients",
            Self::UpdatePatient => "Failed to update patient",
            Self::DeletePatient => "Failed to delete patient",
            Self::CreateMedicalRecord => "Failed to save medical record",
            Self::GetMedicalRecord => "Error fetching medical record",
            Self::UpdateMedicalRecord => "Failed to update medical record",
            Self::DeleteMedicalRecord => "Failed to delete medical record",
        }
    }
}

/// Map domain error to the REST error body
pub fn map_domain_error(e: &DomainError, op: Operation) -> ProblemResponse {
    match e {
        DomainError::Validation { message } => bad_request(message.clone()),
        DomainError::PatientNotFound { .. } => match op {
            Operation::GetMedicalRecord => not_found("Patient not found"),
            _ => not_found("patient not found"),
        },
        DomainError::MedicalRecordNotFound { .. } => not_found("Medical record not found"),
        DomainError::Store { message } => {
            tracing::error!(error = %message, operation = ?op, "Store error occurred");
            internal_error(op.failure_message(), message.clone())
        }
    }
}
