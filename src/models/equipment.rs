// src/models/equipment.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Disponivel,
    EmUso,
    Manutencao,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub status: EquipmentStatus,
    // Operador atual, quando em uso.
    pub operator: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,
    #[serde(default = "default_status")]
    pub status: EquipmentStatus,
    pub operator: Option<String>,
    pub image_url: Option<String>,
}

fn default_status() -> EquipmentStatus {
    EquipmentStatus::Disponivel
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentPayload {
    pub name: Option<String>,
    pub model: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub operator: Option<String>,
    pub image_url: Option<String>,
}
