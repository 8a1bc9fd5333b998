// src/models/ballistic.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BallisticCategory {
    Colete,
    Capacete,
    Placa,
    Outro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BallisticStatus {
    Ativo,
    EmUso,
    Reservado,
    Obsoleto,
    Condenado,
    Manutencao,
    Extraviado,
    Distribuido,
}

// Evento do sub-histórico de um item balístico. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BallisticEvent {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BallisticItem {
    pub id: Uuid,
    pub category: BallisticCategory,
    pub status: BallisticStatus,
    pub serial_number: String,
    // Código de identificação gravado na peça (distinto do nº de série).
    pub id_code: String,
    pub om_id: Option<Uuid>,
    pub manufacture_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub history: Vec<BallisticEvent>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBallisticPayload {
    pub category: BallisticCategory,
    #[serde(default = "default_status")]
    pub status: BallisticStatus,
    #[validate(length(min = 1, message = "O número de série é obrigatório."))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "O código de identificação é obrigatório."))]
    pub id_code: String,
    pub om_id: Option<Uuid>,
    pub manufacture_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

fn default_status() -> BallisticStatus {
    BallisticStatus::Ativo
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBallisticPayload {
    pub category: Option<BallisticCategory>,
    pub status: Option<BallisticStatus>,
    pub serial_number: Option<String>,
    pub id_code: Option<String>,
    pub om_id: Option<Uuid>,
    pub manufacture_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BallisticEventPayload {
    #[validate(length(min = 1, message = "A descrição do evento é obrigatória."))]
    pub description: String,
}
