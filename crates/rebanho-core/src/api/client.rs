//! Typed access to the rebanho resource endpoints.
//!
//! Every call goes through [`SessionManager::execute`], which owns the
//! bearer token and the single renewal-on-401; nothing here deals with
//! authentication directly.
//!
//! Collection endpoints answer either a `{"data": [...], "pagination"?}`
//! envelope or a bare JSON array, and both 404 and 204 mean "nothing to
//! list", not an error. Single-resource endpoints answer either a
//! `{"data": {...}}` envelope or the bare object.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::auth::SessionManager;
use crate::models::{
    Animal, AnimalInput, DashboardSummary, DiseaseInput, DiseaseRecord, Farm, FarmInput,
    Paginated, VaccineApplication, VaccineInput,
};

use super::ApiError;

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(ref search) = self.search {
            query.push(("busca", search.clone()));
        }
        query
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Client for the livestock management API.
pub struct ApiClient {
    session: SessionManager,
}

impl ApiClient {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    // ===== Animals =====

    pub async fn list_animals(&mut self, params: &ListParams) -> Result<Vec<Animal>, ApiError> {
        self.get_collection("/animais", &params.to_query()).await
    }

    pub async fn get_animal(&mut self, id: i64) -> Result<Animal, ApiError> {
        self.get_one(&format!("/animais/{}", id)).await
    }

    pub async fn create_animal(&mut self, input: &AnimalInput) -> Result<Animal, ApiError> {
        self.send_entity(Method::POST, "/animais", input).await
    }

    pub async fn update_animal(&mut self, id: i64, input: &AnimalInput) -> Result<Animal, ApiError> {
        self.send_entity(Method::PUT, &format!("/animais/{}", id), input)
            .await
    }

    pub async fn delete_animal(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/animais/{}", id)).await
    }

    // ===== Farms =====

    pub async fn list_farms(&mut self, params: &ListParams) -> Result<Vec<Farm>, ApiError> {
        self.get_collection("/fazendas", &params.to_query()).await
    }

    pub async fn get_farm(&mut self, id: i64) -> Result<Farm, ApiError> {
        self.get_one(&format!("/fazendas/{}", id)).await
    }

    pub async fn create_farm(&mut self, input: &FarmInput) -> Result<Farm, ApiError> {
        self.send_entity(Method::POST, "/fazendas", input).await
    }

    pub async fn update_farm(&mut self, id: i64, input: &FarmInput) -> Result<Farm, ApiError> {
        self.send_entity(Method::PUT, &format!("/fazendas/{}", id), input)
            .await
    }

    pub async fn delete_farm(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/fazendas/{}", id)).await
    }

    // ===== Health records =====

    /// List disease records, optionally restricted to one animal
    pub async fn list_diseases(
        &mut self,
        animal_id: Option<i64>,
    ) -> Result<Vec<DiseaseRecord>, ApiError> {
        let mut query = Vec::new();
        if let Some(animal_id) = animal_id {
            query.push(("animalId", animal_id.to_string()));
        }
        self.get_collection("/doencas-animal", &query).await
    }

    pub async fn record_disease(&mut self, input: &DiseaseInput) -> Result<DiseaseRecord, ApiError> {
        self.send_entity(Method::POST, "/doencas-animal", input).await
    }

    /// Update a diagnosis, e.g. to close it with a recovery date
    pub async fn update_disease(
        &mut self,
        id: i64,
        input: &DiseaseInput,
    ) -> Result<DiseaseRecord, ApiError> {
        self.send_entity(Method::PUT, &format!("/doencas-animal/{}", id), input)
            .await
    }

    pub async fn delete_disease(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/doencas-animal/{}", id)).await
    }

    /// List vaccine applications, optionally restricted to one animal
    pub async fn list_vaccinations(
        &mut self,
        animal_id: Option<i64>,
    ) -> Result<Vec<VaccineApplication>, ApiError> {
        let mut query = Vec::new();
        if let Some(animal_id) = animal_id {
            query.push(("animalId", animal_id.to_string()));
        }
        self.get_collection("/aplicacoes-vacina", &query).await
    }

    pub async fn record_vaccination(
        &mut self,
        input: &VaccineInput,
    ) -> Result<VaccineApplication, ApiError> {
        self.send_entity(Method::POST, "/aplicacoes-vacina", input)
            .await
    }

    pub async fn delete_vaccination(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/aplicacoes-vacina/{}", id)).await
    }

    // ===== Dashboard =====

    pub async fn dashboard(&mut self) -> Result<DashboardSummary, ApiError> {
        self.get_one("/dashboard").await
    }

    // ===== Request helpers =====

    async fn get_collection<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self.session.execute(Method::GET, path, query, None).await?;
        let status = response.status();

        // Empty collections come back as 404 or 204, never as errors
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            debug!(path, status = %status, "treating as empty collection");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }

        let text = response.text().await?;
        parse_collection(path, &text)
    }

    async fn get_one<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let response = self.session.execute(Method::GET, path, &[], None).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        let text = response.text().await?;
        parse_entity(path, &text)
    }

    async fn send_entity<T: DeserializeOwned, B: Serialize>(
        &mut self,
        method: Method,
        path: &str,
        input: &B,
    ) -> Result<T, ApiError> {
        let body: Value = serde_json::to_value(input)
            .map_err(|e| ApiError::Validation(format!("unserializable payload: {}", e)))?;

        let response = self
            .session
            .execute(method, path, &[], Some(&body))
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        let text = response.text().await?;
        parse_entity(path, &text)
    }

    async fn delete(&mut self, path: &str) -> Result<(), ApiError> {
        let response = self
            .session
            .execute(Method::DELETE, path, &[], None)
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        Ok(())
    }
}

/// Parse a collection body: `{"data": [...]}` envelope first, bare array
/// as the fallback.
fn parse_collection<T: DeserializeOwned>(path: &str, text: &str) -> Result<Vec<T>, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<Paginated<T>>(text) {
        return Ok(envelope.data);
    }
    if let Ok(items) = serde_json::from_str::<Vec<T>>(text) {
        return Ok(items);
    }
    Err(ApiError::InvalidResponse(format!(
        "unrecognized collection shape from {}",
        path
    )))
}

/// Parse a single-resource body: `{"data": {...}}` envelope first, bare
/// object as the fallback.
fn parse_entity<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<DataEnvelope<T>>(text) {
        return Ok(envelope.data);
    }
    if let Ok(entity) = serde_json::from_str::<T>(text) {
        return Ok(entity);
    }
    Err(ApiError::InvalidResponse(format!(
        "unrecognized entity shape from {}",
        path
    )))
}
