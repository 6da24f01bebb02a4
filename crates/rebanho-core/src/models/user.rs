use serde::{Deserialize, Serialize};

/// Authenticated user profile, returned alongside the access token by
/// both `/auth/login` and `/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "perfil", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Pagination metadata on collection responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// Collection envelope: `{"data": [...], "pagination": {...}}`.
/// Some endpoints answer with a bare array instead; the client tries
/// this shape first and falls back.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
