use serde::{Deserialize, Serialize};

/// Herd count per species for the dashboard breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCount {
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(default)]
    pub total: u64,
}

/// Aggregates for the dashboard view. Fields default to zero/empty so a
/// partial payload from the backend still renders.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    #[serde(rename = "totalAnimais", default)]
    pub total_animals: u64,
    #[serde(rename = "totalFazendas", default)]
    pub total_farms: u64,
    #[serde(rename = "doencasAtivas", default)]
    pub active_diseases: u64,
    #[serde(rename = "vacinasAplicadas", default)]
    pub vaccinations_applied: u64,
    #[serde(rename = "animaisPorEspecie", default)]
    pub animals_by_species: Vec<SpeciesCount>,
}
