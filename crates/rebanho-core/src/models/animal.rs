use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl std::fmt::Display for AnimalSex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalSex::Male => write!(f, "M"),
            AnimalSex::Female => write!(f, "F"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalStatus {
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "vendido")]
    Sold,
    #[serde(rename = "morto")]
    Deceased,
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalStatus::Active => write!(f, "ativo"),
            AnimalStatus::Sold => write!(f, "vendido"),
            AnimalStatus::Deceased => write!(f, "morto"),
        }
    }
}

/// A registered animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    #[serde(rename = "brinco")]
    pub tag: String,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "especie", default)]
    pub species: Option<String>,
    #[serde(rename = "raca", default)]
    pub breed: Option<String>,
    #[serde(rename = "sexo", default)]
    pub sex: Option<AnimalSex>,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "pesoKg", default)]
    pub weight_kg: Option<f64>,
    #[serde(rename = "fazendaId", default)]
    pub farm_id: Option<i64>,
    #[serde(default)]
    pub status: Option<AnimalStatus>,
}

impl Animal {
    /// Tag plus name when present, for display
    pub fn display_label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.tag, name),
            None => self.tag.clone(),
        }
    }
}

/// Payload for creating or updating an animal.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalInput {
    #[serde(rename = "brinco")]
    pub tag: String,
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "especie", skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(rename = "raca", skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    pub sex: Option<AnimalSex>,
    #[serde(rename = "dataNascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "pesoKg", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "fazendaId")]
    pub farm_id: i64,
}
