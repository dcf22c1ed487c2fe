use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatientsError {
    #[error("Patient not found: {id}")]
    PatientNotFound { id: String },

    #[error("Medical record not found: {id}")]
    MedicalRecordNotFound { id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}
