use async_trait::async_trait;

use crate::contract::model::{MedicalRecord, MedicalRecordPatch, Patient, PatientPatch};

/// Port for the domain layer: persistence operations the domain needs.
/// Every write of one logical record is a single store call.
#[async_trait]
pub trait PatientsRepository: Send + Sync {
    /// Load a patient; `None` when no field map exists under its key.
    async fn find_patient(&self, id: &str) -> anyhow::Result<Option<Patient>>;
    /// Write all fields of a patient, overwriting whatever is there.
    async fn save_patient(&self, p: &Patient) -> anyhow::Result<()>;
    /// Write only the present fields of the patch.
    async fn patch_patient(&self, id: &str, patch: &PatientPatch) -> anyhow::Result<()>;
    async fn list_patients(&self) -> anyhow::Result<Vec<Patient>>;
    async fn delete_patient(&self, id: &str) -> anyhow::Result<()>;

    async fn find_medical_record(&self, id: &str) -> anyhow::Result<Option<MedicalRecord>>;
    async fn save_medical_record(&self, id: &str, record: &MedicalRecord) -> anyhow::Result<()>;
    async fn patch_medical_record(
        &self,
        id: &str,
        patch: &MedicalRecordPatch,
    ) -> anyhow::Result<()>;
    async fn delete_medical_record(&self, id: &str) -> anyhow::Result<()>;
}
