// src/models/settings.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Registro singleton de configurações do sistema (slot `settings`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub system_name: String,
    // Limite global de estoque baixo, usado quando o material não define
    // um `minStock` próprio.
    pub low_stock_threshold: u32,
    // Percentual de ocupação de uma rua a partir do qual ela é destacada
    // no painel como quase cheia.
    pub high_occupancy_percent: u8,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            system_name: "Sistema de Almoxarifado".to_string(),
            low_stock_threshold: 5,
            high_occupancy_percent: 85,
        }
    }
}

// Atualização parcial: campo None mantém o valor atual.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    pub system_name: Option<String>,
    pub low_stock_threshold: Option<u32>,
    pub high_occupancy_percent: Option<u8>,
}
