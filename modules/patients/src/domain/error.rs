use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Patient not found: {id}")]
    PatientNotFound { id: String },

    #[error("Medical record not found: {id}")]
    MedicalRecordNotFound { id: String },

    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn patient_not_found(id: impl Into<String>) -> Self {
        Self::PatientNotFound { id: id.into() }
    }

    pub fn medical_record_not_found(id: impl Into<String>) -> Self {
        Self::MedicalRecordNotFound { id: id.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        // alternate form keeps the whole context chain
        Self::store(format!("{e:#}"))
    }
}
