// src/models/om.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Organização Militar: unidade à qual equipamentos e guias são vinculados.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Om {
    pub id: Uuid,
    pub name: String,
    // Brasão/distintivo da OM.
    pub crest_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuiaStatus {
    Pendente,
    Separando,
    Concluida,
}

// Guia de remessa/requisição vinculada a uma OM.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guia {
    pub id: Uuid,
    pub om_id: Uuid,
    pub title: String,
    pub status: GuiaStatus,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOmPayload {
    #[validate(length(min = 1, message = "O nome da OM é obrigatório."))]
    pub name: String,
    pub crest_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOmPayload {
    pub name: Option<String>,
    pub crest_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuiaPayload {
    pub om_id: Uuid,
    #[validate(length(min = 1, message = "O título da guia é obrigatório."))]
    pub title: String,
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuiaPayload {
    pub title: Option<String>,
    pub status: Option<GuiaStatus>,
    pub document_url: Option<String>,
}
