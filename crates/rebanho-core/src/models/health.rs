use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A disease diagnosis on an animal's health history.
/// An open record (no recovery date) counts as an active case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: i64,
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "doenca")]
    pub disease: String,
    #[serde(rename = "dataDiagnostico")]
    pub diagnosed_on: NaiveDate,
    #[serde(rename = "dataRecuperacao", default)]
    pub recovered_on: Option<NaiveDate>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

impl DiseaseRecord {
    pub fn is_active(&self) -> bool {
        self.recovered_on.is_none()
    }
}

/// Payload for recording or updating a diagnosis.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseInput {
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "doenca")]
    pub disease: String,
    #[serde(rename = "dataDiagnostico")]
    pub diagnosed_on: NaiveDate,
    #[serde(rename = "dataRecuperacao", skip_serializing_if = "Option::is_none")]
    pub recovered_on: Option<NaiveDate>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A vaccine dose applied to an animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccineApplication {
    pub id: i64,
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "vacina")]
    pub vaccine: String,
    #[serde(rename = "dataAplicacao")]
    pub applied_on: NaiveDate,
    #[serde(rename = "dose", default)]
    pub dose: Option<String>,
    #[serde(rename = "proximaDose", default)]
    pub next_dose_on: Option<NaiveDate>,
}

/// Payload for recording a vaccine application.
#[derive(Debug, Clone, Serialize)]
pub struct VaccineInput {
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "vacina")]
    pub vaccine: String,
    #[serde(rename = "dataAplicacao")]
    pub applied_on: NaiveDate,
    #[serde(rename = "dose", skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    #[serde(rename = "proximaDose", skip_serializing_if = "Option::is_none")]
    pub next_dose_on: Option<NaiveDate>,
}
