use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::PatientsApi,
    error::PatientsError,
    model::{MedicalRecord, MedicalRecordPatch, NewPatient, Patient, PatientPatch},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the PatientsApi trait that delegates to the domain service
pub struct PatientsLocalClient {
    service: Arc<Service>,
}

impl PatientsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PatientsApi for PatientsLocalClient {
    async fn create_patient(&self, new_patient: NewPatient) -> anyhow::Result<()> {
        self.service
            .create_patient(new_patient)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_patients(&self) -> anyhow::Result<Vec<Patient>> {
        self.service
            .list_patients()
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_patient(&self, id: &str, patch: PatientPatch) -> anyhow::Result<()> {
        self.service
            .update_patient(id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_patient(&self, id: &str) -> anyhow::Result<()> {
        self.service
            .delete_patient(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn save_medical_record(&self, id: &str, record: MedicalRecord) -> anyhow::Result<()> {
        self.service
            .save_medical_record(id, record)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_medical_record(&self, id: &str) -> anyhow::Result<MedicalRecord> {
        self.service
            .get_medical_record(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_medical_record(
        &self,
        id: &str,
        patch: MedicalRecordPatch,
    ) -> anyhow::Result<()> {
        self.service
            .update_medical_record(id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_medical_record(&self, id: &str) -> anyhow::Result<()> {
        self.service
            .delete_medical_record(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::Validation { message } => PatientsError::Validation { message },
        DomainError::PatientNotFound { id } => PatientsError::PatientNotFound { id },
        DomainError::MedicalRecordNotFound { id } => PatientsError::MedicalRecordNotFound { id },
        DomainError::Store { message } => {
            tracing::error!(error = %message, "Store error in patients client");
            PatientsError::Internal
        }
    };

    anyhow::Error::new(contract_error)
}
