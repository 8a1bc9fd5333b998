// src/storage/keys.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Cada coleção de entidades vive em um slot próprio do armazenamento
// (um arquivo JSON ou uma linha JSONB, conforme o backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageKey {
    Streets,
    Locations,
    Pallets,
    Materials,
    History,
    Equipment,
    Ballistics,
    Oms,
    Guias,
    Users,
    Settings,
}

impl StorageKey {
    pub const ALL: [StorageKey; 11] = [
        StorageKey::Streets,
        StorageKey::Locations,
        StorageKey::Pallets,
        StorageKey::Materials,
        StorageKey::History,
        StorageKey::Equipment,
        StorageKey::Ballistics,
        StorageKey::Oms,
        StorageKey::Guias,
        StorageKey::Users,
        StorageKey::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Streets => "streets",
            StorageKey::Locations => "locations",
            StorageKey::Pallets => "pallets",
            StorageKey::Materials => "materials",
            StorageKey::History => "history",
            StorageKey::Equipment => "equipment",
            StorageKey::Ballistics => "ballistics",
            StorageKey::Oms => "oms",
            StorageKey::Guias => "guias",
            StorageKey::Users => "users",
            StorageKey::Settings => "settings",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
