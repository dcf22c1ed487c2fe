use serde::{Deserialize, Deserializer, Serialize};

use crate::contract::model::{MedicalRecord, MedicalRecordPatch, NewPatient, Patient, PatientPatch};

/// Accepts a JSON string or number. Empty strings, `0` and `null` count as absent.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Str(s)) if !s.is_empty() => Some(s),
        Some(Loose::Num(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// REST DTO for creating a patient; validation happens in the domain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePatientReq {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub appoint_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub appoint_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub pnumber: Option<String>,
}

/// REST DTO for a partial patient update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatientReq {
    #[serde(default, deserialize_with = "loose_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub appoint_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub appoint_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub pnumber: Option<String>,
}

/// Body of both medical-record create and update; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicalRecordReq {
    #[serde(default, deserialize_with = "loose_string")]
    pub diagnosis: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub treatment: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub prescription: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientDto {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub appoint_date: String,
    pub appoint_type: String,
    pub age: String,
    pub address: String,
    pub email: String,
    pub pnumber: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicalRecordDto {
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: String,
}

/// Acknowledgement body of every write endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<CreatePatientReq> for NewPatient {
    fn from(req: CreatePatientReq) -> Self {
        Self {
            id: req.id.unwrap_or_default(),
            firstname: req.firstname.unwrap_or_default(),
            lastname: req.lastname.unwrap_or_default(),
            appoint_date: req.appoint_date.unwrap_or_default(),
            appoint_type: req.appoint_type.unwrap_or_default(),
            age: req.age.unwrap_or_default(),
            address: req.address.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            pnumber: req.pnumber.unwrap_or_default(),
        }
    }
}

impl From<UpdatePatientReq> for PatientPatch {
    fn from(req: UpdatePatientReq) -> Self {
        Self {
            firstname: req.firstname,
            lastname: req.lastname,
            appoint_date: req.appoint_date,
            appoint_type: req.appoint_type,
            age: req.age,
            address: req.address,
            email: req.email,
            pnumber: req.pnumber,
        }
    }
}

impl From<MedicalRecordReq> for MedicalRecord {
    fn from(req: MedicalRecordReq) -> Self {
        Self {
            diagnosis: req.diagnosis.unwrap_or_default(),
            treatment: req.treatment.unwrap_or_default(),
            prescription: req.prescription.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
        }
    }
}

impl From<MedicalRecordReq> for MedicalRecordPatch {
    fn from(req: MedicalRecordReq) -> Self {
        Self {
            diagnosis: req.diagnosis,
            treatment: req.treatment,
            prescription: req.prescription,
            notes: req.notes,
        }
    }
}

impl From<Patient> for PatientDto {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            firstname: p.firstname,
            lastname: p.lastname,
            appoint_date: p.appoint_date,
            appoint_type: p.appoint_type,
            age: p.age,
            address: p.address,
            email: p.email,
            pnumber: p.pnumber,
        }
    }
}

impl From<MedicalRecord> for MedicalRecordDto {
    fn from(r: MedicalRecord) -> Self {
        Self {
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            prescription: r.prescription,
            notes: r.notes,
        }
    }
}
