use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{MedicalRecord, MedicalRecordPatch, NewPatient, Patient, PatientPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::PatientsRepository;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const UPDATE_NEEDS_A_FIELD: &str = "At least one field is required to update";

/// Domain service for patients and their medical records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn PatientsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn PatientsRepository>) -> Self {
        Self { repo }
    }

    /// Upsert: an existing patient with the same id is overwritten.
    #[instrument(name = "patients.service.create_patient", skip(self, new_patient), fields(patient_id = %new_patient.id))]
    pub async fn create_patient(&self, new_patient: NewPatient) -> Result<(), DomainError> {
        if new_patient.has_empty_field() {
            debug!("Rejected patient with missing fields");
            return Err(DomainError::validation(ALL_FIELDS_REQUIRED));
        }

        self.repo.save_patient(&Patient::from(new_patient)).await?;
        info!("Patient saved");
        Ok(())
    }

    #[instrument(name = "patients.service.list_patients", skip(self))]
    pub async fn list_patients(&self) -> Result<Vec<Patient>, DomainError> {
        let patients = self.repo.list_patients().await?;
        debug!("Listed {} patients", patients.len());
        Ok(patients)
    }

    #[instrument(name = "patients.service.update_patient", skip(self, patch), fields(patient_id = %id))]
    pub async fn update_patient(&self, id: &str, patch: PatientPatch) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation(UPDATE_NEEDS_A_FIELD));
        }

        if self.repo.find_patient(id).await?.is_none() {
            return Err(DomainError::patient_not_found(id));
        }

        self.repo.patch_patient(id, &patch).await?;
        info!(fields = patch.present_fields().len(), "Patient updated");
        Ok(())
    }

    /// Succeeds whether or not the patient existed. The medical record is left in place.
    #[instrument(name = "patients.service.delete_patient", skip(self), fields(patient_id = %id))]
    pub async fn delete_patient(&self, id: &str) -> Result<(), DomainError> {
        self.repo.delete_patient(id).await?;
        info!("Patient deleted");
        Ok(())
    }

    /// No validation and no patient check; absent fields are stored as empty strings.
    #[instrument(name = "patients.service.save_medical_record", skip(self, record), fields(patient_id = %id))]
    pub async fn save_medical_record(
        &self,
        id: &str,
        record: MedicalRecord,
    ) -> Result<(), DomainError> {
        self.repo.save_medical_record(id, &record).await?;
        info!("Medical record saved");
        Ok(())
    }

    #[instrument(name = "patients.service.get_medical_record", skip(self), fields(patient_id = %id))]
    pub async fn get_medical_record(&self, id: &str) -> Result<MedicalRecord, DomainError> {
        if self.repo.find_patient(id).await?.is_none() {
            debug!("Patient not found");
            return Err(DomainError::patient_not_found(id));
        }

        match self.repo.find_medical_record(id).await? {
            Some(record) => Ok(record),
            None => {
                debug!("No medical record yet, returning empty record");
                Ok(MedicalRecord::default())
            }
        }
    }

    /// Requires an existing record. A patch with no present field changes nothing
    /// and succeeds, where an empty HSET would be a store error.
    #[instrument(name = "patients.service.update_medical_record", skip(self, patch), fields(patient_id = %id))]
    pub async fn update_medical_record(
        &self,
        id: &str,
        patch: MedicalRecordPatch,
    ) -> Result<(), DomainError> {
        if self.repo.find_medical_record(id).await?.is_none() {
            return Err(DomainError::medical_record_not_found(id));
        }

        self.repo.patch_medical_record(id, &patch).await?;
        info!(
            fields = patch.present_fields().len(),
            "Medical record updated"
        );
        Ok(())
    }

    #[instrument(name = "patients.service.delete_medical_record", skip(self), fields(patient_id = %id))]
    pub async fn delete_medical_record(&self, id: &str) -> Result<(), DomainError> {
        self.repo.delete_medical_record(id).await?;
        info!("Medical record deleted");
        Ok(())
    }
}
