/// A stored patient. The id lives in the store key, not in the field map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patient {
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

/// Data for creating a patient. Every field must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
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

impl NewPatient {
    pub fn has_empty_field(&self) -> bool {
        [
            &self.id,
            &self.firstname,
            &self.lastname,
            &self.appoint_date,
            &self.appoint_type,
            &self.age,
            &self.address,
            &self.email,
            &self.pnumber,
        ]
        .iter()
        .any(|v| v.is_empty())
    }
}

impl From<NewPatient> for Patient {
    fn from(n: NewPatient) -> Self {
        Self {
            id: n.id,
            firstname: n.firstname,
            lastname: n.lastname,
            appoint_date: n.appoint_date,
            appoint_type: n.appoint_type,
            age: n.age,
            address: n.address,
            email: n.email,
            pnumber: n.pnumber,
        }
    }
}

/// Partial update. `None` and empty strings both leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub appoint_date: Option<String>,
    pub appoint_type: Option<String>,
    pub age: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub pnumber: Option<String>,
}

impl PatientPatch {
    /// `(field, value)` pairs that carry a value.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        present([
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("appoint_date", &self.appoint_date),
            ("appoint_type", &self.appoint_type),
            ("age", &self.age),
            ("address", &self.address),
            ("email", &self.email),
            ("pnumber", &self.pnumber),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

/// Medical record of a patient, keyed by the patient id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalRecord {
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalRecordPatch {
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

impl MedicalRecordPatch {
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        present([
            ("diagnosis", &self.diagnosis),
            ("treatment", &self.treatment),
            ("prescription", &self.prescription),
            ("notes", &self.notes),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

fn present<'a, const N: usize>(
    fields: [(&'static str, &'a Option<String>); N],
) -> Vec<(&'static str, &'a str)> {
    fields
        .into_iter()
        .filter_map(|(name, v)| match v.as_deref() {
            Some(s) if !s.is_empty() => Some((name, s)),
            _ => None,
        })
        .collect()
}
