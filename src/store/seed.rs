// src/store/seed.rs
//
// Dados de demonstração usados quando um slot está ausente ou ilegível.
// Os ids são fixos (derivados de constantes) para que as referências entre
// coleções continuem válidas mesmo que apenas parte dos slots seja seedada.

use chrono::Utc;
use uuid::Uuid;

use crate::models::auth::{NotificationPreferences, Role, User};
use crate::models::ballistic::{BallisticCategory, BallisticEvent, BallisticItem, BallisticStatus};
use crate::models::equipment::{Equipment, EquipmentStatus};
use crate::models::om::Om;
use crate::models::settings::SystemSettings;
use crate::models::warehouse::{
    Location, Material, Pallet, PalletKind, Street, RECEIVING_AREA_ID,
};

use super::inventory::InventorySnapshot;

const RUA_A: Uuid = Uuid::from_u128(0xA1);
const RUA_B: Uuid = Uuid::from_u128(0xA2);
const LOCAL_A01: Uuid = Uuid::from_u128(0xB1);
const LOCAL_A02: Uuid = Uuid::from_u128(0xB2);
const LOCAL_B01: Uuid = Uuid::from_u128(0xB3);
const MAT_COTURNO: Uuid = Uuid::from_u128(0xC1);
const MAT_CAPACETE: Uuid = Uuid::from_u128(0xC2);
const MAT_COLETE: Uuid = Uuid::from_u128(0xC3);
const OM_BPE: Uuid = Uuid::from_u128(0xD1);
const ADMIN_ID: Uuid = Uuid::from_u128(0xE1);

// Senha inicial do administrador de demonstração. Deve ser trocada no
// primeiro acesso; o startup loga um aviso enquanto ela existir.
pub const ADMIN_EMAIL: &str = "admin@almoxarifado.eb.mil.br";
const ADMIN_PASSWORD: &str = "admin123";

pub fn demo_snapshot() -> InventorySnapshot {
    InventorySnapshot {
        streets: streets(),
        locations: locations(),
        pallets: pallets(),
        materials: materials(),
        history: Vec::new(),
        equipment: equipment(),
        ballistics: ballistics(),
        oms: oms(),
        guias: Vec::new(),
        users: users(),
        settings: SystemSettings::default(),
    }
}

fn streets() -> Vec<Street> {
    vec![
        Street { id: RUA_A, name: "Rua A".into(), order: 0 },
        Street { id: RUA_B, name: "Rua B".into(), order: 1 },
    ]
}

fn locations() -> Vec<Location> {
    vec![
        Location { id: LOCAL_A01, street_id: RUA_A, name: "A-01".into(), needs_recount: false },
        Location { id: LOCAL_A02, street_id: RUA_A, name: "A-02".into(), needs_recount: false },
        Location { id: LOCAL_B01, street_id: RUA_B, name: "B-01".into(), needs_recount: true },
    ]
}

fn materials() -> Vec<Material> {
    vec![
        Material {
            id: MAT_COTURNO,
            name: "Coturno Tático".into(),
            description: Some("Coturno tático preto, par".into()),
            default_kind: PalletKind::Trd,
            min_stock: Some(10),
            image_url: None,
        },
        Material {
            id: MAT_CAPACETE,
            name: "Capacete Balístico".into(),
            description: None,
            default_kind: PalletKind::Trd,
            min_stock: Some(4),
            image_url: None,
        },
        Material {
            id: MAT_COLETE,
            name: "Colete Modular".into(),
            description: None,
            default_kind: PalletKind::Trp,
            min_stock: None,
            image_url: None,
        },
    ]
}

fn pallets() -> Vec<Pallet> {
    vec![
        Pallet {
            id: Uuid::from_u128(0xF1),
            location_id: LOCAL_A01,
            material_id: Some(MAT_COTURNO),
            material_name: "Coturno Tático".into(),
            kind: PalletKind::Trd,
            quantity: 12,
            entry_at: Utc::now(),
            image_url: None,
        },
        Pallet {
            id: Uuid::from_u128(0xF2),
            location_id: RECEIVING_AREA_ID,
            material_id: Some(MAT_COLETE),
            material_name: "Colete Modular".into(),
            kind: PalletKind::Trp,
            quantity: 6,
            entry_at: Utc::now(),
            image_url: None,
        },
    ]
}

fn equipment() -> Vec<Equipment> {
    vec![Equipment {
        id: Uuid::from_u128(0xF3),
        name: "Empilhadeira".into(),
        model: "Hyster H50".into(),
        status: EquipmentStatus::Disponivel,
        operator: None,
        image_url: None,
    }]
}

fn ballistics() -> Vec<BallisticItem> {
    vec![BallisticItem {
        id: Uuid::from_u128(0xF4),
        category: BallisticCategory::Colete,
        status: BallisticStatus::Ativo,
        serial_number: "SN-0001".into(),
        id_code: "CL-0001".into(),
        om_id: Some(OM_BPE),
        manufacture_date: None,
        expiration_date: None,
        notes: None,
        image_url: None,
        history: vec![BallisticEvent {
            timestamp: Utc::now(),
            user: "Sistema".into(),
            description: "Item cadastrado".into(),
        }],
    }]
}

fn oms() -> Vec<Om> {
    vec![Om { id: OM_BPE, name: "1º Batalhão de Polícia do Exército".into(), crest_url: None }]
}

fn users() -> Vec<User> {
    // O hash é gerado a cada boot em que o slot `users` precisa do seed.
    // Falhar aqui significa ambiente quebrado; abortar o startup é o certo.
    let hash = bcrypt::hash(ADMIN_PASSWORD, bcrypt::DEFAULT_COST)
        .expect("Falha ao gerar o hash da senha do administrador padrão.");
    tracing::warn!(
        "⚠️  Usuário administrador padrão seedado ({}). Troque a senha inicial!",
        ADMIN_EMAIL
    );
    vec![User {
        id: ADMIN_ID,
        name: "Administrador".into(),
        email: ADMIN_EMAIL.into(),
        role: Role::Admin,
        password_hash: hash,
        preferences: NotificationPreferences::default(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_tem_integridade_referencial() {
        let snapshot = demo_snapshot();

        for location in &snapshot.locations {
            assert!(
                snapshot.streets.iter().any(|s| s.id == location.street_id),
                "local {} aponta para rua inexistente",
                location.name
            );
        }
        for pallet in &snapshot.pallets {
            let ok = pallet.location_id == RECEIVING_AREA_ID
                || snapshot.locations.iter().any(|l| l.id == pallet.location_id);
            assert!(ok, "palete aponta para local inexistente");
            if let Some(mid) = pallet.material_id {
                assert!(snapshot.materials.iter().any(|m| m.id == mid));
            }
        }
        for item in &snapshot.ballistics {
            if let Some(om_id) = item.om_id {
                assert!(snapshot.oms.iter().any(|o| o.id == om_id));
            }
        }
        assert!(snapshot.users.iter().any(|u| u.role == Role::Admin));
    }

    #[test]
    fn senha_do_admin_seedado_confere() {
        let users = users();
        assert!(bcrypt::verify(ADMIN_PASSWORD, &users[0].password_hash).unwrap());
    }
}
