// src/services/inventory.rs
//
// Camada fina entre os handlers e o cache: aplica a mutação no
// InventoryStore e em seguida persiste os slots afetados (o que também
// dispara o evento UPDATE para as outras "abas"). As leituras passam
// direto para o cache, sem I/O.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::ballistic::{BallisticItem, CreateBallisticPayload, UpdateBallisticPayload};
use crate::models::equipment::{CreateEquipmentPayload, Equipment, UpdateEquipmentPayload};
use crate::models::om::{CreateGuiaPayload, CreateOmPayload, Guia, Om, UpdateGuiaPayload, UpdateOmPayload};
use crate::models::settings::{SystemSettings, UpdateSettingsPayload};
use crate::models::warehouse::{
    CreateLocationPayload, CreateMaterialPayload, CreatePalletPayload, Location, Material,
    Pallet, Street, UpdateLocationPayload, UpdateMaterialPayload, UpdatePalletPayload,
    UpdateStreetPayload,
};
use crate::store::inventory::InventorySnapshot;
use crate::store::{seed, InventoryStore};
use crate::storage::{StorageKey, StorageService};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<InventoryStore>,
    storage: StorageService,
}

impl InventoryService {
    pub fn new(store: Arc<InventoryStore>, storage: StorageService) -> Self {
        Self { store, storage }
    }

    // Monta a fotografia inicial das coleções: cada slot é lido do
    // armazenamento e, na ausência (ou corrupção), cai nos dados de
    // demonstração daquele slot.
    pub async fn load_snapshot(storage: &StorageService) -> InventorySnapshot {
        let seed = seed::demo_snapshot();
        InventorySnapshot {
            streets: storage.get(StorageKey::Streets, seed.streets).await,
            locations: storage.get(StorageKey::Locations, seed.locations).await,
            pallets: storage.get(StorageKey::Pallets, seed.pallets).await,
            materials: storage.get(StorageKey::Materials, seed.materials).await,
            history: storage.get(StorageKey::History, seed.history).await,
            equipment: storage.get(StorageKey::Equipment, seed.equipment).await,
            ballistics: storage.get(StorageKey::Ballistics, seed.ballistics).await,
            oms: storage.get(StorageKey::Oms, seed.oms).await,
            guias: storage.get(StorageKey::Guias, seed.guias).await,
            users: storage.get(StorageKey::Users, seed.users).await,
            settings: storage.get(StorageKey::Settings, seed.settings).await,
        }
    }

    async fn persist(&self, keys: &[StorageKey]) {
        for key in keys {
            self.storage.set(*key, &self.store.export(*key)).await;
        }
    }

    // ---
    // Ruas
    // ---

    pub async fn add_street(&self, name: &str) -> Option<Street> {
        let street = self.store.add_street(name)?;
        self.persist(&[StorageKey::Streets]).await;
        Some(street)
    }

    pub async fn update_street(&self, id: Uuid, payload: &UpdateStreetPayload) -> Option<Street> {
        let street = self.store.update_street(id, payload)?;
        self.persist(&[StorageKey::Streets]).await;
        Some(street)
    }

    pub async fn reorder_streets(&self, new_order: &[Uuid]) -> Vec<Street> {
        self.store.reorder_streets(new_order);
        self.persist(&[StorageKey::Streets]).await;
        self.store.streets()
    }

    pub async fn delete_street(&self, id: Uuid) {
        if self.store.delete_street(id) {
            // A cascata pode ter tocado três coleções.
            self.persist(&[StorageKey::Streets, StorageKey::Locations, StorageKey::Pallets])
                .await;
        }
    }

    // ---
    // Locais
    // ---

    pub async fn add_location(&self, payload: &CreateLocationPayload) -> Option<Location> {
        let location = self.store.add_location(payload)?;
        self.persist(&[StorageKey::Locations]).await;
        Some(location)
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        payload: &UpdateLocationPayload,
    ) -> Option<Location> {
        let location = self.store.update_location(id, payload)?;
        self.persist(&[StorageKey::Locations]).await;
        Some(location)
    }

    pub async fn delete_location(&self, id: Uuid) {
        if self.store.delete_location(id) {
            self.persist(&[StorageKey::Locations, StorageKey::Pallets]).await;
        }
    }

    pub async fn clear_location(&self, id: Uuid) -> usize {
        let removed = self.store.clear_location(id);
        if removed > 0 {
            self.persist(&[StorageKey::Pallets, StorageKey::History]).await;
        }
        removed
    }

    // ---
    // Paletes
    // ---

    pub async fn add_pallet(&self, payload: &CreatePalletPayload, user: &str) -> Option<Pallet> {
        let pallet = self.store.add_pallet(payload, user)?;
        self.persist(&[StorageKey::Pallets, StorageKey::History]).await;
        Some(pallet)
    }

    pub async fn update_pallet(&self, id: Uuid, payload: &UpdatePalletPayload) -> Option<Pallet> {
        let pallet = self.store.update_pallet(id, payload)?;
        self.persist(&[StorageKey::Pallets]).await;
        Some(pallet)
    }

    pub async fn remove_pallet(&self, id: Uuid, user: &str) -> bool {
        if self.store.remove_pallet(id, user) {
            self.persist(&[StorageKey::Pallets, StorageKey::History]).await;
            return true;
        }
        false
    }

    pub async fn move_pallet(&self, id: Uuid, new_location_id: Uuid, user: &str) -> bool {
        if self.store.move_pallet(id, new_location_id, user) {
            if self.store.logs_moves() {
                self.persist(&[StorageKey::Pallets, StorageKey::History]).await;
            } else {
                self.persist(&[StorageKey::Pallets]).await;
            }
            return true;
        }
        false
    }

    // ---
    // Materiais
    // ---

    pub async fn add_material(&self, payload: &CreateMaterialPayload) -> Material {
        let material = self.store.add_material(payload);
        self.persist(&[StorageKey::Materials]).await;
        material
    }

    pub async fn update_material(
        &self,
        id: Uuid,
        payload: &UpdateMaterialPayload,
    ) -> Option<Material> {
        let material = self.store.update_material(id, payload)?;
        // Renomear propaga o nome de exibição aos paletes vinculados.
        self.persist(&[StorageKey::Materials, StorageKey::Pallets]).await;
        Some(material)
    }

    pub async fn delete_material(&self, id: Uuid) {
        if self.store.delete_material(id) {
            self.persist(&[StorageKey::Materials, StorageKey::Pallets]).await;
        }
    }

    // ---
    // Equipamentos
    // ---

    pub async fn add_equipment(&self, payload: &CreateEquipmentPayload) -> Equipment {
        let item = self.store.add_equipment(payload);
        self.persist(&[StorageKey::Equipment]).await;
        item
    }

    pub async fn update_equipment(
        &self,
        id: Uuid,
        payload: &UpdateEquipmentPayload,
    ) -> Option<Equipment> {
        let item = self.store.update_equipment(id, payload)?;
        self.persist(&[StorageKey::Equipment]).await;
        Some(item)
    }

    pub async fn delete_equipment(&self, id: Uuid) {
        if self.store.delete_equipment(id) {
            self.persist(&[StorageKey::Equipment]).await;
        }
    }

    // ---
    // Material balístico
    // ---

    pub async fn add_ballistic(
        &self,
        payload: &CreateBallisticPayload,
        user: &str,
    ) -> BallisticItem {
        let item = self.store.add_ballistic(payload, user);
        self.persist(&[StorageKey::Ballistics]).await;
        item
    }

    pub async fn update_ballistic(
        &self,
        id: Uuid,
        payload: &UpdateBallisticPayload,
    ) -> Option<BallisticItem> {
        let item = self.store.update_ballistic(id, payload)?;
        self.persist(&[StorageKey::Ballistics]).await;
        Some(item)
    }

    pub async fn delete_ballistic(&self, id: Uuid) {
        if self.store.delete_ballistic(id) {
            self.persist(&[StorageKey::Ballistics]).await;
        }
    }

    pub async fn push_ballistic_event(
        &self,
        id: Uuid,
        user: &str,
        description: &str,
    ) -> Option<BallisticItem> {
        let item = self.store.push_ballistic_event(id, user, description)?;
        self.persist(&[StorageKey::Ballistics]).await;
        Some(item)
    }

    // ---
    // OMs e Guias
    // ---

    pub async fn add_om(&self, payload: &CreateOmPayload) -> Om {
        let om = self.store.add_om(payload);
        self.persist(&[StorageKey::Oms]).await;
        om
    }

    pub async fn update_om(&self, id: Uuid, payload: &UpdateOmPayload) -> Option<Om> {
        let om = self.store.update_om(id, payload)?;
        self.persist(&[StorageKey::Oms]).await;
        Some(om)
    }

    pub async fn delete_om(&self, id: Uuid) {
        if self.store.delete_om(id) {
            self.persist(&[StorageKey::Oms, StorageKey::Guias, StorageKey::Ballistics])
                .await;
        }
    }

    pub async fn add_guia(&self, payload: &CreateGuiaPayload) -> Option<Guia> {
        let guia = self.store.add_guia(payload)?;
        self.persist(&[StorageKey::Guias]).await;
        Some(guia)
    }

    pub async fn update_guia(&self, id: Uuid, payload: &UpdateGuiaPayload) -> Option<Guia> {
        let guia = self.store.update_guia(id, payload)?;
        self.persist(&[StorageKey::Guias]).await;
        Some(guia)
    }

    pub async fn delete_guia(&self, id: Uuid) {
        if self.store.delete_guia(id) {
            self.persist(&[StorageKey::Guias]).await;
        }
    }

    // ---
    // Configurações e usuários
    // ---

    pub async fn update_settings(&self, payload: &UpdateSettingsPayload) -> SystemSettings {
        let settings = self.store.update_settings(payload);
        self.persist(&[StorageKey::Settings]).await;
        settings
    }

    pub async fn update_user_role(
        &self,
        id: Uuid,
        role: crate::models::auth::Role,
    ) -> Option<crate::models::auth::User> {
        let user = self.store.update_user_role(id, role)?;
        self.persist(&[StorageKey::Users]).await;
        Some(user)
    }

    pub async fn update_user_preferences(
        &self,
        id: Uuid,
        low_stock: Option<bool>,
        movements: Option<bool>,
    ) -> Option<crate::models::auth::User> {
        let user = self.store.update_user_preferences(id, low_stock, movements)?;
        self.persist(&[StorageKey::Users]).await;
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SyncEvent;

    async fn service_em_tempdir() -> (tempfile::TempDir, InventoryService) {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageService::new_file(dir.path()).unwrap();
        let snapshot = InventorySnapshot::default();
        let store = Arc::new(InventoryStore::new(snapshot, false));
        (dir, InventoryService::new(store, storage))
    }

    #[tokio::test]
    async fn mutacao_persiste_o_slot_e_avisa_os_inscritos() {
        let (dir, service) = service_em_tempdir().await;
        let storage = StorageService::new_file(dir.path()).unwrap();
        let mut rx = service.storage.subscribe();

        service.add_street("Rua Nova").await.unwrap();

        // O evento saiu...
        assert_eq!(rx.recv().await.unwrap(), SyncEvent::Update { key: StorageKey::Streets });
        // ...e quem relê o slot (a "outra aba") enxerga exatamente o que
        // foi escrito.
        let lidas: Vec<Street> = storage.get(StorageKey::Streets, Vec::new()).await;
        assert_eq!(lidas.len(), 1);
        assert_eq!(lidas[0].name, "Rua Nova");
    }

    #[tokio::test]
    async fn cascata_persiste_as_tres_colecoes() {
        let (dir, service) = service_em_tempdir().await;
        let rua = service.add_street("Rua A").await.unwrap();
        let local = service
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .await
            .unwrap();
        service
            .add_pallet(
                &CreatePalletPayload {
                    location_id: local.id,
                    material_id: None,
                    material_name: "Coturno Tático".into(),
                    kind: crate::models::warehouse::PalletKind::Trd,
                    quantity: 5,
                    image_url: None,
                },
                "sgt.silva",
            )
            .await
            .unwrap();

        service.delete_street(rua.id).await;

        let storage = StorageService::new_file(dir.path()).unwrap();
        let streets: Vec<Street> = storage.get(StorageKey::Streets, Vec::new()).await;
        let locations: Vec<Location> = storage.get(StorageKey::Locations, Vec::new()).await;
        let pallets: Vec<Pallet> = storage.get(StorageKey::Pallets, Vec::new()).await;
        assert!(streets.is_empty());
        assert!(locations.is_empty());
        assert!(pallets.is_empty());

        // O histórico continua com o registro de Entrada (imutável).
        let history: Vec<crate::models::warehouse::MovementLog> =
            storage.get(StorageKey::History, Vec::new()).await;
        assert_eq!(history.len(), 1);
    }
}
