// src/models/warehouse.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Id sentinela da "Área de Recebimento": paletes que ainda não foram
/// endereçados em uma rua ficam apontando para este local virtual.
pub const RECEIVING_AREA_ID: Uuid = Uuid::nil();

// --- 1. Ruas (corredores do almoxarifado) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Street {
    pub id: Uuid,
    pub name: String,
    // Ordem de exibição manual. Mantida como ordem total: após qualquer
    // reordenação, cada rua recebe exatamente a sua posição na sequência.
    pub order: i32,
}

// --- 2. Locais (endereços dentro de uma rua) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    pub street_id: Uuid,
    pub name: String,
    // Marcado quando o local precisa de conferência manual de estoque.
    pub needs_recount: bool,
}

// Status derivado de um local. Nunca é armazenado: é calculado a cada
// consulta a partir dos paletes e da flag de conferência.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    Vazia,
    Ocupada,
    NecessitaConferencia,
}

// --- 3. Tipo de movimentação do palete ---
// TRP: material em recebimento, aguardando endereçamento.
// TRD: material já endereçado em um local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PalletKind {
    Trp,
    Trd,
}

// --- 4. Paletes ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pallet {
    pub id: Uuid,
    // Local atual, ou RECEIVING_AREA_ID enquanto não endereçado.
    pub location_id: Uuid,
    // Chave primária de junção com o catálogo. Paletes de material fora do
    // catálogo ficam com None e apenas o nome livre abaixo.
    pub material_id: Option<Uuid>,
    pub material_name: String,
    pub kind: PalletKind,
    pub quantity: u32,
    pub entry_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

// --- 5. Catálogo de Materiais ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub default_kind: PalletKind,
    // Estoque mínimo. None (ou zero) cai no limite global de SystemSettings.
    pub min_stock: Option<u32>,
    pub image_url: Option<String>,
}

// --- 6. Histórico de Movimentações ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Entrada,
    Saida,
    Transferencia,
}

// Registro imutável: uma vez criado, nunca é alterado. Os nomes de local e
// rua são resolvidos no momento da movimentação e congelados aqui, para que
// o histórico sobreviva a renomeações e exclusões posteriores.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub kind: MovementKind,
    pub material_name: String,
    pub material_kind: PalletKind,
    pub quantity: u32,
    pub location_name: String,
    pub street_name: String,
}

// ---
// Payloads (criação e atualização parcial)
// Nas atualizações, campo None significa "não mexer" — merge raso.
// ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStreetPayload {
    #[validate(length(min = 1, message = "O nome da rua é obrigatório."))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStreetPayload {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderStreetsPayload {
    // Sequência completa de ids na nova ordem de exibição.
    #[validate(length(min = 1, message = "A nova ordem não pode ser vazia."))]
    pub street_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationPayload {
    pub street_id: Uuid,
    #[validate(length(min = 1, message = "O nome do local é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub needs_recount: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationPayload {
    pub name: Option<String>,
    pub needs_recount: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePalletPayload {
    // Pode ser o id sentinela nulo (área de recebimento).
    pub location_id: Uuid,
    pub material_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O nome do material é obrigatório."))]
    pub material_name: String,
    pub kind: PalletKind,
    pub quantity: u32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePalletPayload {
    pub material_id: Option<Uuid>,
    pub material_name: Option<String>,
    pub kind: Option<PalletKind>,
    pub quantity: Option<u32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovePalletPayload {
    pub location_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, message = "O nome do material é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub default_kind: PalletKind,
    pub min_stock: Option<u32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub default_kind: Option<PalletKind>,
    pub min_stock: Option<u32>,
    pub image_url: Option<String>,
}
