//! Key-value backed repository implementation for the domain port.
//!
//! Patients live in hashes at `patient:<id>`, medical records at
//! `medical_record:<id>`. An empty hash counts as absent.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use kvstore::KvStore;

use crate::contract::model::{MedicalRecord, MedicalRecordPatch, Patient, PatientPatch};
use crate::domain::repo::PatientsRepository;
use crate::infra::storage::mapper::{
    medical_record_from_fields, medical_record_key, medical_record_to_fields, owned_pairs,
    patient_from_fields, patient_id_from_key, patient_key, patient_to_fields, PATIENT_PREFIX,
};

pub struct KvPatientsRepository {
    store: Arc<dyn KvStore>,
}

impl KvPatientsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PatientsRepository for KvPatientsRepository {
    async fn find_patient(&self, id: &str) -> anyhow::Result<Option<Patient>> {
        let fields = self
            .store
            .hgetall(&patient_key(id))
            .await
            .context("find_patient failed")?;
        Ok((!fields.is_empty()).then(|| patient_from_fields(id, fields)))
    }

    async fn save_patient(&self, p: &Patient) -> anyhow::Result<()> {
        self.store
            .hset_multiple(&patient_key(&p.id), &patient_to_fields(p))
            .await
            .context("save_patient failed")
    }

    async fn patch_patient(&self, id: &str, patch: &PatientPatch) -> anyhow::Result<()> {
        self.store
            .hset_multiple(&patient_key(id), &owned_pairs(patch.present_fields()))
            .await
            .context("patch_patient failed")
    }

    async fn list_patients(&self) -> anyhow::Result<Vec<Patient>> {
        let mut keys = self
            .store
            .keys_with_prefix(PATIENT_PREFIX)
            .await
            .context("list_patients failed")?;
        keys.sort();

        let mut patients = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(id) = patient_id_from_key(&key) else {
                continue;
            };
            let fields = self
                .store
                .hgetall(&key)
                .await
                .with_context(|| format!("loading {key} failed"))?;
            // deleted between KEYS and HGETALL
            if fields.is_empty() {
                continue;
            }
            patients.push(patient_from_fields(id, fields));
        }
        Ok(patients)
    }

    async fn delete_patient(&self, id: &str) -> anyhow::Result<()> {
        self.store
            .del(&patient_key(id))
            .await
            .context("delete_patient failed")
    }

    async fn find_medical_record(&self, id: &str) -> anyhow::Result<Option<MedicalRecord>> {
        let fields = self
            .store
            .hgetall(&medical_record_key(id))
            .await
            .context("find_medical_record failed")?;
        Ok((!fields.is_empty()).then(|| medical_record_from_fields(fields)))
    }

    async fn save_medical_record(&self, id: &str, record: &MedicalRecord) -> anyhow::Result<()> {
        self.store
            .hset_multiple(&medical_record_key(id), &medical_record_to_fields(record))
            .await
            .context("save_medical_record failed")
    }

    async fn patch_medical_record(
        &self,
        id: &str,
        patch: &MedicalRecordPatch,
    ) -> anyhow::Result<()> {
        self.store
            .hset_multiple(&medical_record_key(id), &owned_pairs(patch.present_fields()))
            .await
            .context("patch_medical_record failed")
    }

    async fn delete_medical_record(&self, id: &str) -> anyhow::Result<()> {
        self.store
            .del(&medical_record_key(id))
            .await
            .context("delete_medical_record failed")
    }
}
