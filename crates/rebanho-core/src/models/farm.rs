use serde::{Deserialize, Serialize};

/// A property animals are registered under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "municipio", default)]
    pub city: Option<String>,
    #[serde(rename = "estado", default)]
    pub state: Option<String>,
    #[serde(rename = "areaHectares", default)]
    pub area_hectares: Option<f64>,
    #[serde(rename = "totalAnimais", default)]
    pub total_animals: Option<u64>,
}

impl Farm {
    /// "Name - City/ST" when location is known
    pub fn display_label(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{} - {}/{}", self.name, city, state),
            (Some(city), None) => format!("{} - {}", self.name, city),
            _ => self.name.clone(),
        }
    }
}

/// Payload for creating or updating a farm.
#[derive(Debug, Clone, Serialize)]
pub struct FarmInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "municipio", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "areaHectares", skip_serializing_if = "Option::is_none")]
    pub area_hectares: Option<f64>,
}
