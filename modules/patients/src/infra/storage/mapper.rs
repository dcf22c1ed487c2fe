//! Conversions between contract models and store field maps.

use kvstore::FieldMap;

use crate::contract::model::{MedicalRecord, Patient};

pub const PATIENT_PREFIX: &str = "patient:";
pub const MEDICAL_RECORD_PREFIX: &str = "medical_record:";

pub fn patient_key(id: &str) -> String {
    format!("{PATIENT_PREFIX}{id}")
}

pub fn medical_record_key(id: &str) -> String {
    format!("{MEDICAL_RECORD_PREFIX}{id}")
}

/// Id is everything after the key prefix, so ids containing `:` survive.
pub fn patient_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(PATIENT_PREFIX)
}

pub fn patient_to_fields(p: &Patient) -> Vec<(String, String)> {
    [
        ("firstname", &p.firstname),
        ("lastname", &p.lastname),
        ("appoint_date", &p.appoint_date),
        ("appoint_type", &p.appoint_type),
        ("age", &p.age),
        ("address", &p.address),
        ("email", &p.email),
        ("pnumber", &p.pnumber),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.clone()))
    .collect()
}

/// Missing fields come back as empty strings.
pub fn patient_from_fields(id: &str, mut fields: FieldMap) -> Patient {
    let mut take = |name: &str| fields.remove(name).unwrap_or_default();
    Patient {
        id: id.to_string(),
        firstname: take("firstname"),
        lastname: take("lastname"),
        appoint_date: take("appoint_date"),
        appoint_type: take("appoint_type"),
        age: take("age"),
        address: take("address"),
        email: take("email"),
        pnumber: take("pnumber"),
    }
}

pub fn medical_record_to_fields(r: &MedicalRecord) -> Vec<(String, String)> {
    [
        ("diagnosis", &r.diagnosis),
        ("treatment", &r.treatment),
        ("prescription", &r.prescription),
        ("notes", &r.notes),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.clone()))
    .collect()
}

pub fn medical_record_from_fields(mut fields: FieldMap) -> MedicalRecord {
    let mut take = |name: &str| fields.remove(name).unwrap_or_default();
    MedicalRecord {
        diagnosis: take("diagnosis"),
        treatment: take("treatment"),
        prescription: take("prescription"),
        notes: take("notes"),
    }
}

pub fn owned_pairs(pairs: Vec<(&'static str, &str)>) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
