// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Ocupação de uma rua: contagem de locais ocupados sobre o total.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreetOccupancy {
    pub street_id: Uuid,
    pub street_name: String,
    pub total_locations: u32,
    pub occupied_locations: u32,
    pub percent: u8,
    // Acima do limite `highOccupancyPercent` das configurações.
    pub above_threshold: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub streets: Vec<StreetOccupancy>,
    pub total_locations: u32,
    pub occupied_locations: u32,
    pub percent: u8,
}

// Material do catálogo cujo estoque agregado está no limite ou abaixo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockEntry {
    pub material_id: Uuid,
    pub material_name: String,
    pub on_hand: u32,
    pub min_stock: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub streets: u32,
    pub locations: u32,
    pub pallets: u32,
    pub materials: u32,
    pub pallets_in_receiving: u32,
    pub occupancy: OccupancySummary,
    pub low_stock: Vec<LowStockEntry>,
}
