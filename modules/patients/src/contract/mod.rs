pub mod client;
pub mod error;
pub mod model;

pub use error::PatientsError;
pub use model::{MedicalRecord, MedicalRecordPatch, NewPatient, Patient, PatientPatch};
