use async_trait::async_trait;

use crate::contract::model::{MedicalRecord, MedicalRecordPatch, NewPatient, Patient, PatientPatch};

/// Public API trait for the patients module that other modules can use
#[async_trait]
pub trait PatientsApi: Send + Sync {
    async fn create_patient(&self, new_patient: NewPatient) -> anyhow::Result<()>;

    async fn list_patients(&self) -> anyhow::Result<Vec<Patient>>;

    async fn update_patient(&self, id: &str, patch: PatientPatch) -> anyhow::Result<()>;

    async fn delete_patient(&self, id: &str) -> anyhow::Result<()>;

    async fn save_medical_record(&self, id: &str, record: MedicalRecord) -> anyhow::Result<()>;

    /// Record of an existing patient; all-empty when none was saved yet.
    async fn get_medical_record(&self, id: &str) -> anyhow::Result<MedicalRecord>;

    async fn update_medical_record(&self, id: &str, patch: MedicalRecordPatch)
        -> anyhow::Result<()>;

    async fn delete_medical_record(&self, id: &str) -> anyhow::Result<()>;
}
