// src/store/inventory.rs
//
// O cache de estado do inventário: a cópia autoritativa, em memória, de
// todas as coleções de entidades da sessão. É construído uma única vez na
// inicialização e injetado por referência em quem precisa dele — nada de
// contexto ambiente/global.
//
// Todas as coleções vivem atrás de um único RwLock. Isso faz com que cada
// mutação que atravessa mais de uma coleção (a cascata Rua → Locais →
// Paletes, o esvaziamento de um local, a reordenação) seja atômica do ponto
// de vista de qualquer leitor.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auth::{NotificationPreferences, Role, User};
use crate::models::ballistic::{
    BallisticEvent, BallisticItem, CreateBallisticPayload, UpdateBallisticPayload,
};
use crate::models::dashboard::{
    DashboardSummary, LowStockEntry, OccupancySummary, StreetOccupancy,
};
use crate::models::equipment::{CreateEquipmentPayload, Equipment, UpdateEquipmentPayload};
use crate::models::om::{
    CreateGuiaPayload, CreateOmPayload, Guia, GuiaStatus, Om, UpdateGuiaPayload, UpdateOmPayload,
};
use crate::models::settings::{SystemSettings, UpdateSettingsPayload};
use crate::models::warehouse::{
    CreateLocationPayload, CreateMaterialPayload, CreatePalletPayload, Location, LocationStatus,
    Material, MovementKind, MovementLog, Pallet, Street, UpdateLocationPayload,
    UpdateMaterialPayload, UpdatePalletPayload, UpdateStreetPayload, RECEIVING_AREA_ID,
};
use crate::storage::StorageKey;

// Ator registrado no histórico quando a baixa é feita pelo próprio sistema
// (ex.: esvaziamento de um local).
pub const SYSTEM_ACTOR: &str = "Sistema";

// Fotografia completa das coleções, no mesmo formato dos slots persistidos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub streets: Vec<Street>,
    pub locations: Vec<Location>,
    pub pallets: Vec<Pallet>,
    pub materials: Vec<Material>,
    pub history: Vec<MovementLog>,
    pub equipment: Vec<Equipment>,
    pub ballistics: Vec<BallisticItem>,
    pub oms: Vec<Om>,
    pub guias: Vec<Guia>,
    pub users: Vec<User>,
    pub settings: SystemSettings,
}

#[derive(Debug, Default)]
struct StoreInner {
    streets: HashMap<Uuid, Street>,
    locations: HashMap<Uuid, Location>,
    pallets: HashMap<Uuid, Pallet>,
    materials: HashMap<Uuid, Material>,
    history: Vec<MovementLog>,
    equipment: HashMap<Uuid, Equipment>,
    ballistics: HashMap<Uuid, BallisticItem>,
    oms: HashMap<Uuid, Om>,
    guias: HashMap<Uuid, Guia>,
    users: HashMap<Uuid, User>,
    settings: SystemSettings,
}

pub struct InventoryStore {
    inner: RwLock<StoreInner>,
    // Controla se `move_pallet` gera registro de Transferência no histórico.
    log_pallet_moves: bool,
}

impl InventoryStore {
    pub fn new(snapshot: InventorySnapshot, log_pallet_moves: bool) -> Self {
        let mut inner = StoreInner {
            streets: snapshot.streets.into_iter().map(|s| (s.id, s)).collect(),
            locations: snapshot.locations.into_iter().map(|l| (l.id, l)).collect(),
            pallets: snapshot.pallets.into_iter().map(|p| (p.id, p)).collect(),
            materials: snapshot.materials.into_iter().map(|m| (m.id, m)).collect(),
            history: snapshot.history,
            equipment: snapshot.equipment.into_iter().map(|e| (e.id, e)).collect(),
            ballistics: snapshot.ballistics.into_iter().map(|b| (b.id, b)).collect(),
            oms: snapshot.oms.into_iter().map(|o| (o.id, o)).collect(),
            guias: snapshot.guias.into_iter().map(|g| (g.id, g)).collect(),
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            settings: snapshot.settings,
        };

        // Passada única de migração: paletes antigos que só têm o nome livre
        // do material ganham o id do catálogo quando o nome bate exatamente.
        let by_name: HashMap<String, Uuid> = inner
            .materials
            .values()
            .map(|m| (m.name.trim().to_lowercase(), m.id))
            .collect();
        let mut backfilled = 0usize;
        for pallet in inner.pallets.values_mut() {
            if pallet.material_id.is_none() {
                if let Some(id) = by_name.get(&pallet.material_name.trim().to_lowercase()) {
                    pallet.material_id = Some(*id);
                    backfilled += 1;
                }
            }
        }
        if backfilled > 0 {
            tracing::info!("🔗 {} paletes vinculados ao catálogo pelo nome.", backfilled);
        }

        Self { inner: RwLock::new(inner), log_pallet_moves }
    }

    pub fn logs_moves(&self) -> bool {
        self.log_pallet_moves
    }

    // ---
    // Ruas
    // ---

    pub fn streets(&self) -> Vec<Street> {
        let inner = self.inner.read();
        let mut streets: Vec<Street> = inner.streets.values().cloned().collect();
        streets.sort_by_key(|s| s.order);
        streets
    }

    // Nome vazio (ou só espaços) é rejeitado como no-op. A validação
    // principal continua na borda (payload), esta é a rede de segurança.
    pub fn add_street(&self, name: &str) -> Option<Street> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut inner = self.inner.write();
        let next_order = inner.streets.values().map(|s| s.order).max().map_or(0, |o| o + 1);
        let street = Street { id: Uuid::new_v4(), name: name.to_string(), order: next_order };
        inner.streets.insert(street.id, street.clone());
        Some(street)
    }

    pub fn update_street(&self, id: Uuid, payload: &UpdateStreetPayload) -> Option<Street> {
        let mut inner = self.inner.write();
        let street = inner.streets.get_mut(&id)?;
        if let Some(name) = &payload.name {
            if !name.trim().is_empty() {
                street.name = name.trim().to_string();
            }
        }
        Some(street.clone())
    }

    // Reescreve o campo `order` de cada rua conforme a posição na nova
    // sequência. Ids desconhecidos são ignorados; ruas ausentes da sequência
    // vão para o final, mantendo a ordem relativa anterior. O resultado é
    // sempre uma ordem total.
    pub fn reorder_streets(&self, new_order: &[Uuid]) {
        let mut inner = self.inner.write();

        let mut position: i32 = 0;
        for id in new_order {
            if let Some(street) = inner.streets.get_mut(id) {
                street.order = position;
                position += 1;
            }
        }

        let mut leftovers: Vec<(Uuid, i32)> = inner
            .streets
            .values()
            .filter(|s| !new_order.contains(&s.id))
            .map(|s| (s.id, s.order))
            .collect();
        leftovers.sort_by_key(|(_, order)| *order);
        for (id, _) in leftovers {
            if let Some(street) = inner.streets.get_mut(&id) {
                street.order = position;
                position += 1;
            }
        }
    }

    // Cascata transitiva: a rua, seus locais e todos os paletes que
    // referenciavam esses locais. Idempotente: id inexistente é no-op.
    pub fn delete_street(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write();
        if inner.streets.remove(&id).is_none() {
            return false;
        }

        let doomed_locations: Vec<Uuid> = inner
            .locations
            .values()
            .filter(|l| l.street_id == id)
            .map(|l| l.id)
            .collect();
        inner.locations.retain(|_, l| l.street_id != id);
        inner.pallets.retain(|_, p| !doomed_locations.contains(&p.location_id));
        true
    }

    // ---
    // Locais
    // ---

    pub fn locations(&self) -> Vec<Location> {
        let inner = self.inner.read();
        let mut locations: Vec<Location> = inner.locations.values().cloned().collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        locations
    }

    pub fn locations_by_street(&self, street_id: Uuid) -> Vec<Location> {
        let inner = self.inner.read();
        let mut locations: Vec<Location> = inner
            .locations
            .values()
            .filter(|l| l.street_id == street_id)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        locations
    }

    // Todo local precisa nascer vinculado a uma rua existente.
    pub fn add_location(&self, payload: &CreateLocationPayload) -> Option<Location> {
        let mut inner = self.inner.write();
        if !inner.streets.contains_key(&payload.street_id) {
            return None;
        }
        let location = Location {
            id: Uuid::new_v4(),
            street_id: payload.street_id,
            name: payload.name.trim().to_string(),
            needs_recount: payload.needs_recount,
        };
        inner.locations.insert(location.id, location.clone());
        Some(location)
    }

    pub fn update_location(&self, id: Uuid, payload: &UpdateLocationPayload) -> Option<Location> {
        let mut inner = self.inner.write();
        let location = inner.locations.get_mut(&id)?;
        if let Some(name) = &payload.name {
            if !name.trim().is_empty() {
                location.name = name.trim().to_string();
            }
        }
        if let Some(flag) = payload.needs_recount {
            location.needs_recount = flag;
        }
        Some(location.clone())
    }

    // Cascata apenas para baixo: remove os paletes do local, nunca a rua.
    pub fn delete_location(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write();
        if inner.locations.remove(&id).is_none() {
            return false;
        }
        inner.pallets.retain(|_, p| p.location_id != id);
        true
    }

    // Precedência: flag de conferência > ocupação > vazio.
    pub fn location_status(&self, id: Uuid) -> Option<LocationStatus> {
        let inner = self.inner.read();
        let location = inner.locations.get(&id)?;
        if location.needs_recount {
            return Some(LocationStatus::NecessitaConferencia);
        }
        let occupied = inner.pallets.values().any(|p| p.location_id == id);
        Some(if occupied { LocationStatus::Ocupada } else { LocationStatus::Vazia })
    }

    // Baixa todos os paletes do local, um registro de Saída por palete,
    // com o sistema como ator. Retorna quantos foram removidos.
    pub fn clear_location(&self, id: Uuid) -> usize {
        let mut inner = self.inner.write();
        let doomed: Vec<Pallet> = inner
            .pallets
            .values()
            .filter(|p| p.location_id == id)
            .cloned()
            .collect();

        for pallet in &doomed {
            let log = Self::movement_for(&inner, pallet, MovementKind::Saida, SYSTEM_ACTOR);
            inner.history.push(log);
            inner.pallets.remove(&pallet.id);
        }
        doomed.len()
    }

    // ---
    // Paletes
    // ---

    pub fn pallets(&self) -> Vec<Pallet> {
        let inner = self.inner.read();
        let mut pallets: Vec<Pallet> = inner.pallets.values().cloned().collect();
        pallets.sort_by_key(|p| p.entry_at);
        pallets
    }

    pub fn pallets_by_location(&self, location_id: Uuid) -> Vec<Pallet> {
        let inner = self.inner.read();
        let mut pallets: Vec<Pallet> = inner
            .pallets
            .values()
            .filter(|p| p.location_id == location_id)
            .cloned()
            .collect();
        pallets.sort_by_key(|p| p.entry_at);
        pallets
    }

    // Gera id e timestamp de entrada, grava o palete e registra a Entrada
    // no histórico com os nomes de local/rua resolvidos *neste* instante.
    pub fn add_pallet(&self, payload: &CreatePalletPayload, user: &str) -> Option<Pallet> {
        let mut inner = self.inner.write();

        let valid_location = payload.location_id == RECEIVING_AREA_ID
            || inner.locations.contains_key(&payload.location_id);
        if !valid_location {
            return None;
        }

        // O nome exibido vem do catálogo quando há vínculo por id; o texto
        // livre fica só para materiais fora do catálogo.
        let material_name = payload
            .material_id
            .and_then(|mid| inner.materials.get(&mid))
            .map(|m| m.name.clone())
            .unwrap_or_else(|| payload.material_name.trim().to_string());

        let pallet = Pallet {
            id: Uuid::new_v4(),
            location_id: payload.location_id,
            material_id: payload.material_id,
            material_name,
            kind: payload.kind,
            quantity: payload.quantity,
            entry_at: Utc::now(),
            image_url: payload.image_url.clone(),
        };

        let log = Self::movement_for(&inner, &pallet, MovementKind::Entrada, user);
        inner.history.push(log);
        inner.pallets.insert(pallet.id, pallet.clone());
        Some(pallet)
    }

    pub fn update_pallet(&self, id: Uuid, payload: &UpdatePalletPayload) -> Option<Pallet> {
        let mut inner = self.inner.write();

        let resolved_name = payload
            .material_id
            .and_then(|mid| inner.materials.get(&mid))
            .map(|m| m.name.clone());

        let pallet = inner.pallets.get_mut(&id)?;
        if let Some(mid) = payload.material_id {
            pallet.material_id = Some(mid);
        }
        if let Some(name) = resolved_name {
            pallet.material_name = name;
        } else if let Some(name) = &payload.material_name {
            if !name.trim().is_empty() {
                pallet.material_name = name.trim().to_string();
            }
        }
        if let Some(kind) = payload.kind {
            pallet.kind = kind;
        }
        if let Some(quantity) = payload.quantity {
            pallet.quantity = quantity;
        }
        if let Some(image_url) = &payload.image_url {
            pallet.image_url = Some(image_url.clone());
        }
        Some(pallet.clone())
    }

    // A saída remove o registro inteiro — a quantidade nunca é decrementada
    // abaixo de zero porque não há decremento parcial neste fluxo.
    pub fn remove_pallet(&self, id: Uuid, user: &str) -> bool {
        let mut inner = self.inner.write();
        let Some(pallet) = inner.pallets.get(&id).cloned() else {
            return false;
        };
        let log = Self::movement_for(&inner, &pallet, MovementKind::Saida, user);
        inner.history.push(log);
        inner.pallets.remove(&id);
        true
    }

    // Remaneja o palete para outro local. Só entra no histórico quando o
    // registro de transferências está habilitado na configuração.
    pub fn move_pallet(&self, id: Uuid, new_location_id: Uuid, user: &str) -> bool {
        let mut inner = self.inner.write();

        let valid_target = new_location_id == RECEIVING_AREA_ID
            || inner.locations.contains_key(&new_location_id);
        if !valid_target || !inner.pallets.contains_key(&id) {
            return false;
        }

        if let Some(pallet) = inner.pallets.get_mut(&id) {
            pallet.location_id = new_location_id;
        }

        if self.log_pallet_moves {
            let pallet = inner.pallets[&id].clone();
            let log = Self::movement_for(&inner, &pallet, MovementKind::Transferencia, user);
            inner.history.push(log);
        }
        true
    }

    fn movement_for(inner: &StoreInner, pallet: &Pallet, kind: MovementKind, user: &str) -> MovementLog {
        let (location_name, street_name) = Self::resolve_place(inner, pallet.location_id);
        MovementLog {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            user: user.to_string(),
            kind,
            material_name: pallet.material_name.clone(),
            material_kind: pallet.kind,
            quantity: pallet.quantity,
            location_name,
            street_name,
        }
    }

    fn resolve_place(inner: &StoreInner, location_id: Uuid) -> (String, String) {
        if location_id == RECEIVING_AREA_ID {
            return ("Área de Recebimento".to_string(), "-".to_string());
        }
        match inner.locations.get(&location_id) {
            Some(location) => {
                let street = inner
                    .streets
                    .get(&location.street_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "-".to_string());
                (location.name.clone(), street)
            }
            None => ("Local removido".to_string(), "-".to_string()),
        }
    }

    // ---
    // Catálogo de Materiais
    // ---

    pub fn materials(&self) -> Vec<Material> {
        let inner = self.inner.read();
        let mut materials: Vec<Material> = inner.materials.values().cloned().collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        materials
    }

    pub fn add_material(&self, payload: &CreateMaterialPayload) -> Material {
        let mut inner = self.inner.write();
        let material = Material {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            description: payload.description.clone(),
            default_kind: payload.default_kind,
            min_stock: payload.min_stock,
            image_url: payload.image_url.clone(),
        };
        inner.materials.insert(material.id, material.clone());
        material
    }

    pub fn update_material(&self, id: Uuid, payload: &UpdateMaterialPayload) -> Option<Material> {
        let mut inner = self.inner.write();
        let material = inner.materials.get_mut(&id)?;
        if let Some(name) = &payload.name {
            if !name.trim().is_empty() {
                material.name = name.trim().to_string();
            }
        }
        if let Some(description) = &payload.description {
            material.description = Some(description.clone());
        }
        if let Some(kind) = payload.default_kind {
            material.default_kind = kind;
        }
        if let Some(min_stock) = payload.min_stock {
            material.min_stock = Some(min_stock);
        }
        if let Some(image_url) = &payload.image_url {
            material.image_url = Some(image_url.clone());
        }
        let updated = material.clone();

        // Como a junção é por id, renomear o material não órfã o estoque —
        // mas o nome de exibição congelado nos paletes precisa acompanhar.
        for pallet in inner.pallets.values_mut() {
            if pallet.material_id == Some(id) {
                pallet.material_name = updated.name.clone();
            }
        }
        Some(updated)
    }

    pub fn delete_material(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write();
        if inner.materials.remove(&id).is_none() {
            return false;
        }
        // Paletes do material viram "fora do catálogo": mantêm o nome livre.
        for pallet in inner.pallets.values_mut() {
            if pallet.material_id == Some(id) {
                pallet.material_id = None;
            }
        }
        true
    }

    // Quantidade agregada em mãos, somada por vínculo de id com o catálogo.
    pub fn material_on_hand(&self, id: Uuid) -> u32 {
        let inner = self.inner.read();
        inner
            .pallets
            .values()
            .filter(|p| p.material_id == Some(id))
            .map(|p| p.quantity)
            .sum()
    }

    // Estoque baixo: agregado <= minStock do material, caindo no limite
    // global quando o material não define um (ou define zero).
    pub fn is_low_stock(&self, id: Uuid) -> Option<bool> {
        let threshold = {
            let inner = self.inner.read();
            let material = inner.materials.get(&id)?;
            match material.min_stock {
                Some(min) if min > 0 => min,
                _ => inner.settings.low_stock_threshold,
            }
        };
        Some(self.material_on_hand(id) <= threshold)
    }

    pub fn low_stock_entries(&self) -> Vec<LowStockEntry> {
        let materials = self.materials();
        let mut entries = Vec::new();
        for material in materials {
            if self.is_low_stock(material.id) == Some(true) {
                let threshold = match material.min_stock {
                    Some(min) if min > 0 => min,
                    _ => self.settings().low_stock_threshold,
                };
                entries.push(LowStockEntry {
                    material_id: material.id,
                    material_name: material.name,
                    on_hand: self.material_on_hand(material.id),
                    min_stock: threshold,
                });
            }
        }
        entries
    }

    // ---
    // Histórico (append-only; nenhuma operação o altera ou remove)
    // ---

    pub fn history(&self) -> Vec<MovementLog> {
        let inner = self.inner.read();
        let mut history = inner.history.clone();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history
    }

    // ---
    // Equipamentos
    // ---

    pub fn equipment(&self) -> Vec<Equipment> {
        let inner = self.inner.read();
        let mut items: Vec<Equipment> = inner.equipment.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn add_equipment(&self, payload: &CreateEquipmentPayload) -> Equipment {
        let mut inner = self.inner.write();
        let item = Equipment {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            model: payload.model.trim().to_string(),
            status: payload.status,
            operator: payload.operator.clone(),
            image_url: payload.image_url.clone(),
        };
        inner.equipment.insert(item.id, item.clone());
        item
    }

    pub fn update_equipment(&self, id: Uuid, payload: &UpdateEquipmentPayload) -> Option<Equipment> {
        let mut inner = self.inner.write();
        let item = inner.equipment.get_mut(&id)?;
        if let Some(name) = &payload.name {
            item.name = name.clone();
        }
        if let Some(model) = &payload.model {
            item.model = model.clone();
        }
        if let Some(status) = payload.status {
            item.status = status;
            // Equipamento devolvido não tem mais operador.
            if status == crate::models::equipment::EquipmentStatus::Disponivel {
                item.operator = None;
            }
        }
        if let Some(operator) = &payload.operator {
            item.operator = Some(operator.clone());
        }
        if let Some(image_url) = &payload.image_url {
            item.image_url = Some(image_url.clone());
        }
        Some(item.clone())
    }

    pub fn delete_equipment(&self, id: Uuid) -> bool {
        self.inner.write().equipment.remove(&id).is_some()
    }

    // ---
    // Material balístico
    // ---

    pub fn ballistics(&self) -> Vec<BallisticItem> {
        let inner = self.inner.read();
        let mut items: Vec<BallisticItem> = inner.ballistics.values().cloned().collect();
        items.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
        items
    }

    pub fn add_ballistic(&self, payload: &CreateBallisticPayload, user: &str) -> BallisticItem {
        let mut inner = self.inner.write();
        let item = BallisticItem {
            id: Uuid::new_v4(),
            category: payload.category,
            status: payload.status,
            serial_number: payload.serial_number.trim().to_string(),
            id_code: payload.id_code.trim().to_string(),
            om_id: payload.om_id,
            manufacture_date: payload.manufacture_date,
            expiration_date: payload.expiration_date,
            notes: payload.notes.clone(),
            image_url: payload.image_url.clone(),
            history: vec![BallisticEvent {
                timestamp: Utc::now(),
                user: user.to_string(),
                description: "Item cadastrado".to_string(),
            }],
        };
        inner.ballistics.insert(item.id, item.clone());
        item
    }

    pub fn update_ballistic(&self, id: Uuid, payload: &UpdateBallisticPayload) -> Option<BallisticItem> {
        let mut inner = self.inner.write();
        let item = inner.ballistics.get_mut(&id)?;
        if let Some(category) = payload.category {
            item.category = category;
        }
        if let Some(status) = payload.status {
            item.status = status;
        }
        if let Some(serial) = &payload.serial_number {
            item.serial_number = serial.clone();
        }
        if let Some(code) = &payload.id_code {
            item.id_code = code.clone();
        }
        if let Some(om_id) = payload.om_id {
            item.om_id = Some(om_id);
        }
        if let Some(date) = payload.manufacture_date {
            item.manufacture_date = Some(date);
        }
        if let Some(date) = payload.expiration_date {
            item.expiration_date = Some(date);
        }
        if let Some(notes) = &payload.notes {
            item.notes = Some(notes.clone());
        }
        if let Some(image_url) = &payload.image_url {
            item.image_url = Some(image_url.clone());
        }
        Some(item.clone())
    }

    pub fn delete_ballistic(&self, id: Uuid) -> bool {
        self.inner.write().ballistics.remove(&id).is_some()
    }

    // Sub-histórico append-only do item.
    pub fn push_ballistic_event(&self, id: Uuid, user: &str, description: &str) -> Option<BallisticItem> {
        let mut inner = self.inner.write();
        let item = inner.ballistics.get_mut(&id)?;
        item.history.push(BallisticEvent {
            timestamp: Utc::now(),
            user: user.to_string(),
            description: description.to_string(),
        });
        Some(item.clone())
    }

    // ---
    // OMs e Guias
    // ---

    pub fn oms(&self) -> Vec<Om> {
        let inner = self.inner.read();
        let mut oms: Vec<Om> = inner.oms.values().cloned().collect();
        oms.sort_by(|a, b| a.name.cmp(&b.name));
        oms
    }

    pub fn add_om(&self, payload: &CreateOmPayload) -> Om {
        let mut inner = self.inner.write();
        let om = Om {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            crest_url: payload.crest_url.clone(),
        };
        inner.oms.insert(om.id, om.clone());
        om
    }

    pub fn update_om(&self, id: Uuid, payload: &UpdateOmPayload) -> Option<Om> {
        let mut inner = self.inner.write();
        let om = inner.oms.get_mut(&id)?;
        if let Some(name) = &payload.name {
            if !name.trim().is_empty() {
                om.name = name.trim().to_string();
            }
        }
        if let Some(crest_url) = &payload.crest_url {
            om.crest_url = Some(crest_url.clone());
        }
        Some(om.clone())
    }

    // As guias pertencem à OM e caem junto; itens balísticos apenas perdem
    // o vínculo.
    pub fn delete_om(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write();
        if inner.oms.remove(&id).is_none() {
            return false;
        }
        inner.guias.retain(|_, g| g.om_id != id);
        for item in inner.ballistics.values_mut() {
            if item.om_id == Some(id) {
                item.om_id = None;
            }
        }
        true
    }

    pub fn guias(&self) -> Vec<Guia> {
        let inner = self.inner.read();
        let mut guias: Vec<Guia> = inner.guias.values().cloned().collect();
        guias.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        guias
    }

    pub fn guias_by_om(&self, om_id: Uuid) -> Vec<Guia> {
        let inner = self.inner.read();
        let mut guias: Vec<Guia> = inner
            .guias
            .values()
            .filter(|g| g.om_id == om_id)
            .cloned()
            .collect();
        guias.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        guias
    }

    pub fn add_guia(&self, payload: &CreateGuiaPayload) -> Option<Guia> {
        let mut inner = self.inner.write();
        if !inner.oms.contains_key(&payload.om_id) {
            return None;
        }
        let now = Utc::now();
        let guia = Guia {
            id: Uuid::new_v4(),
            om_id: payload.om_id,
            title: payload.title.trim().to_string(),
            status: GuiaStatus::Pendente,
            document_url: payload.document_url.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.guias.insert(guia.id, guia.clone());
        Some(guia)
    }

    pub fn update_guia(&self, id: Uuid, payload: &UpdateGuiaPayload) -> Option<Guia> {
        let mut inner = self.inner.write();
        let guia = inner.guias.get_mut(&id)?;
        if let Some(title) = &payload.title {
            if !title.trim().is_empty() {
                guia.title = title.trim().to_string();
            }
        }
        if let Some(status) = payload.status {
            guia.status = status;
        }
        if let Some(document_url) = &payload.document_url {
            guia.document_url = Some(document_url.clone());
        }
        guia.updated_at = Utc::now();
        Some(guia.clone())
    }

    pub fn delete_guia(&self, id: Uuid) -> bool {
        self.inner.write().guias.remove(&id).is_some()
    }

    // ---
    // Usuários
    // ---

    pub fn users(&self) -> Vec<User> {
        let inner = self.inner.read();
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read();
        inner
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn find_user_by_id(&self, id: Uuid) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    // `false` quando o e-mail já está em uso.
    pub fn add_user(&self, user: User) -> bool {
        let mut inner = self.inner.write();
        let taken = inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return false;
        }
        inner.users.insert(user.id, user);
        true
    }

    pub fn update_user_role(&self, id: Uuid, role: Role) -> Option<User> {
        let mut inner = self.inner.write();
        let user = inner.users.get_mut(&id)?;
        user.role = role;
        Some(user.clone())
    }

    pub fn update_user_preferences(
        &self,
        id: Uuid,
        low_stock: Option<bool>,
        movements: Option<bool>,
    ) -> Option<User> {
        let mut inner = self.inner.write();
        let user = inner.users.get_mut(&id)?;
        let mut prefs = user.preferences.clone();
        if let Some(flag) = low_stock {
            prefs.low_stock = flag;
        }
        if let Some(flag) = movements {
            prefs.movements = flag;
        }
        user.preferences = prefs;
        Some(user.clone())
    }

    // ---
    // Configurações
    // ---

    pub fn settings(&self) -> SystemSettings {
        self.inner.read().settings.clone()
    }

    pub fn update_settings(&self, payload: &UpdateSettingsPayload) -> SystemSettings {
        let mut inner = self.inner.write();
        if let Some(name) = &payload.system_name {
            if !name.trim().is_empty() {
                inner.settings.system_name = name.trim().to_string();
            }
        }
        if let Some(threshold) = payload.low_stock_threshold {
            inner.settings.low_stock_threshold = threshold;
        }
        if let Some(percent) = payload.high_occupancy_percent {
            inner.settings.high_occupancy_percent = percent.min(100);
        }
        inner.settings.clone()
    }

    // ---
    // Painel (agregações derivadas)
    // ---

    pub fn occupancy_summary(&self) -> OccupancySummary {
        let inner = self.inner.read();
        let threshold = inner.settings.high_occupancy_percent;

        let mut streets: Vec<Street> = inner.streets.values().cloned().collect();
        streets.sort_by_key(|s| s.order);

        let mut per_street = Vec::with_capacity(streets.len());
        let mut total = 0u32;
        let mut occupied_total = 0u32;

        for street in streets {
            let locations: Vec<&Location> = inner
                .locations
                .values()
                .filter(|l| l.street_id == street.id)
                .collect();
            let occupied = locations
                .iter()
                .filter(|l| inner.pallets.values().any(|p| p.location_id == l.id))
                .count() as u32;
            let count = locations.len() as u32;
            let percent = if count == 0 { 0 } else { (occupied * 100 / count) as u8 };

            total += count;
            occupied_total += occupied;
            per_street.push(StreetOccupancy {
                street_id: street.id,
                street_name: street.name,
                total_locations: count,
                occupied_locations: occupied,
                percent,
                above_threshold: percent >= threshold,
            });
        }

        let percent = if total == 0 { 0 } else { (occupied_total * 100 / total) as u8 };
        OccupancySummary {
            streets: per_street,
            total_locations: total,
            occupied_locations: occupied_total,
            percent,
        }
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        let occupancy = self.occupancy_summary();
        let low_stock = self.low_stock_entries();
        let inner = self.inner.read();
        DashboardSummary {
            streets: inner.streets.len() as u32,
            locations: inner.locations.len() as u32,
            pallets: inner.pallets.len() as u32,
            materials: inner.materials.len() as u32,
            pallets_in_receiving: inner
                .pallets
                .values()
                .filter(|p| p.location_id == RECEIVING_AREA_ID)
                .count() as u32,
            occupancy,
            low_stock,
        }
    }

    // ---
    // Integração com o armazenamento (exportar/recarregar slots)
    // ---

    // Serializa uma coleção no formato exato do slot persistido.
    pub fn export(&self, key: StorageKey) -> serde_json::Value {
        let inner = self.inner.read();
        let value = match key {
            StorageKey::Streets => {
                let mut v: Vec<_> = inner.streets.values().cloned().collect();
                v.sort_by_key(|s| s.order);
                serde_json::to_value(v)
            }
            StorageKey::Locations => {
                let mut v: Vec<_> = inner.locations.values().cloned().collect();
                v.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::to_value(v)
            }
            StorageKey::Pallets => {
                let mut v: Vec<_> = inner.pallets.values().cloned().collect();
                v.sort_by_key(|p| p.entry_at);
                serde_json::to_value(v)
            }
            StorageKey::Materials => {
                let mut v: Vec<_> = inner.materials.values().cloned().collect();
                v.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::to_value(v)
            }
            StorageKey::History => serde_json::to_value(&inner.history),
            StorageKey::Equipment => {
                let mut v: Vec<_> = inner.equipment.values().cloned().collect();
                v.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::to_value(v)
            }
            StorageKey::Ballistics => {
                let mut v: Vec<_> = inner.ballistics.values().cloned().collect();
                v.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
                serde_json::to_value(v)
            }
            StorageKey::Oms => {
                let mut v: Vec<_> = inner.oms.values().cloned().collect();
                v.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::to_value(v)
            }
            StorageKey::Guias => {
                let mut v: Vec<_> = inner.guias.values().cloned().collect();
                v.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                serde_json::to_value(v)
            }
            StorageKey::Users => {
                // Aqui o hash PRECISA ir junto (o slot é a fonte de verdade
                // na releitura), então não usamos a serialização dos modelos,
                // que omite o campo por segurança.
                let users: Vec<PersistedUser> =
                    inner.users.values().cloned().map(PersistedUser::from).collect();
                serde_json::to_value(users)
            }
            StorageKey::Settings => serde_json::to_value(inner.settings.clone()),
        };
        value.unwrap_or_default()
    }

    // Recarga grosseira de uma coleção inteira a partir do slot — o caminho
    // usado quando outra instância avisa que escreveu. Sem merge: o que veio
    // substitui o que havia.
    pub fn replace_collection(
        &self,
        key: StorageKey,
        raw: serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        let mut inner = self.inner.write();
        match key {
            StorageKey::Streets => {
                let v: Vec<Street> = serde_json::from_value(raw)?;
                inner.streets = v.into_iter().map(|s| (s.id, s)).collect();
            }
            StorageKey::Locations => {
                let v: Vec<Location> = serde_json::from_value(raw)?;
                inner.locations = v.into_iter().map(|l| (l.id, l)).collect();
            }
            StorageKey::Pallets => {
                let v: Vec<Pallet> = serde_json::from_value(raw)?;
                inner.pallets = v.into_iter().map(|p| (p.id, p)).collect();
            }
            StorageKey::Materials => {
                let v: Vec<Material> = serde_json::from_value(raw)?;
                inner.materials = v.into_iter().map(|m| (m.id, m)).collect();
            }
            StorageKey::History => {
                inner.history = serde_json::from_value(raw)?;
            }
            StorageKey::Equipment => {
                let v: Vec<Equipment> = serde_json::from_value(raw)?;
                inner.equipment = v.into_iter().map(|e| (e.id, e)).collect();
            }
            StorageKey::Ballistics => {
                let v: Vec<BallisticItem> = serde_json::from_value(raw)?;
                inner.ballistics = v.into_iter().map(|b| (b.id, b)).collect();
            }
            StorageKey::Oms => {
                let v: Vec<Om> = serde_json::from_value(raw)?;
                inner.oms = v.into_iter().map(|o| (o.id, o)).collect();
            }
            StorageKey::Guias => {
                let v: Vec<Guia> = serde_json::from_value(raw)?;
                inner.guias = v.into_iter().map(|g| (g.id, g)).collect();
            }
            StorageKey::Users => {
                let v: Vec<PersistedUser> = serde_json::from_value(raw)?;
                inner.users = v.into_iter().map(User::from).map(|u| (u.id, u)).collect();
            }
            StorageKey::Settings => {
                inner.settings = serde_json::from_value(raw)?;
            }
        }
        Ok(())
    }
}

// Forma persistida do usuário: igual ao modelo, mas com o hash de senha
// presente na serialização. Nunca sai pela API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    #[serde(default)]
    pub preferences: NotificationPreferences,
}

impl From<User> for PersistedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            password_hash: u.password_hash,
            preferences: u.preferences,
        }
    }
}

impl From<PersistedUser> for User {
    fn from(p: PersistedUser) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            role: p.role,
            password_hash: p.password_hash,
            preferences: p.preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::warehouse::PalletKind;

    fn store_vazio() -> InventoryStore {
        InventoryStore::new(InventorySnapshot::default(), false)
    }

    fn pallet_em(store: &InventoryStore, location_id: Uuid, material: &str, qty: u32) -> Pallet {
        store
            .add_pallet(
                &CreatePalletPayload {
                    location_id,
                    material_id: None,
                    material_name: material.to_string(),
                    kind: PalletKind::Trd,
                    quantity: qty,
                    image_url: None,
                },
                "sgt.silva",
            )
            .unwrap()
    }

    #[test]
    fn add_street_atribui_a_proxima_ordem() {
        let store = store_vazio();
        let a = store.add_street("Rua A").unwrap();
        let b = store.add_street("Rua B").unwrap();
        assert_eq!(a.order, 0);
        assert_eq!(b.order, 1);
    }

    #[test]
    fn add_street_com_nome_vazio_e_noop() {
        let store = store_vazio();
        assert!(store.add_street("   ").is_none());
        assert!(store.streets().is_empty());
    }

    #[test]
    fn reordenacao_reescreve_a_ordem_total() {
        let store = store_vazio();
        let a = store.add_street("Rua A").unwrap();
        let b = store.add_street("Rua B").unwrap();
        let c = store.add_street("Rua C").unwrap();

        store.reorder_streets(&[c.id, a.id, b.id]);

        let ids: Vec<Uuid> = store.streets().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
        let orders: Vec<i32> = store.streets().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn reordenacao_parcial_mantem_as_demais_no_final() {
        let store = store_vazio();
        let a = store.add_street("Rua A").unwrap();
        let b = store.add_street("Rua B").unwrap();
        let c = store.add_street("Rua C").unwrap();

        // Só a última vai para a frente; as outras duas preservam a ordem
        // relativa que tinham.
        store.reorder_streets(&[c.id]);

        let ids: Vec<Uuid> = store.streets().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
    }

    #[test]
    fn excluir_rua_leva_locais_e_paletes_juntos() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let outra = store.add_street("Rua B").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        let local_da_outra = store
            .add_location(&CreateLocationPayload {
                street_id: outra.id,
                name: "B-01".into(),
                needs_recount: false,
            })
            .unwrap();
        pallet_em(&store, local.id, "Coturno Tático", 10);
        let sobrevivente = pallet_em(&store, local_da_outra.id, "Capacete", 4);

        assert!(store.delete_street(rua.id));

        assert!(store.locations_by_street(rua.id).is_empty());
        assert!(store.pallets_by_location(local.id).is_empty());
        // A cascata não vaza para as outras ruas.
        assert_eq!(store.pallets_by_location(local_da_outra.id)[0].id, sobrevivente.id);
    }

    #[test]
    fn excluir_rua_duas_vezes_e_idempotente() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        assert!(store.delete_street(rua.id));
        assert!(!store.delete_street(rua.id)); // segunda chamada: no-op
        assert!(store.streets().is_empty());
    }

    #[test]
    fn entrada_de_palete_gera_exatamente_um_registro() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();

        let palete = pallet_em(&store, local.id, "Coturno Tático", 12);

        let encontrados = store.pallets_by_location(local.id);
        assert_eq!(encontrados.len(), 1);
        assert_eq!(encontrados[0].id, palete.id);

        let historico = store.history();
        assert_eq!(historico.len(), 1);
        assert_eq!(historico[0].kind, MovementKind::Entrada);
        assert_eq!(historico[0].quantity, 12);
        // Nomes resolvidos no instante da movimentação.
        assert_eq!(historico[0].location_name, "A-01");
        assert_eq!(historico[0].street_name, "Rua A");
    }

    #[test]
    fn saida_registra_quantidade_e_usuario_e_remove_o_palete() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        let palete = pallet_em(&store, local.id, "Coturno Tático", 7);

        assert!(store.remove_pallet(palete.id, "cb.souza"));
        assert!(!store.remove_pallet(palete.id, "cb.souza")); // já saiu: no-op

        assert!(store.pallets_by_location(local.id).is_empty());
        let saidas: Vec<MovementLog> = store
            .history()
            .into_iter()
            .filter(|m| m.kind == MovementKind::Saida)
            .collect();
        assert_eq!(saidas.len(), 1);
        assert_eq!(saidas[0].quantity, 7);
        assert_eq!(saidas[0].user, "cb.souza");
    }

    #[test]
    fn historico_preserva_nomes_apos_renomear_e_excluir() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        pallet_em(&store, local.id, "Coturno Tático", 3);

        store.update_location(
            local.id,
            &UpdateLocationPayload { name: Some("Z-99".into()), needs_recount: None },
        );
        store.delete_street(rua.id);

        // O registro de Entrada continua com os nomes da época.
        let historico = store.history();
        assert_eq!(historico[0].location_name, "A-01");
        assert_eq!(historico[0].street_name, "Rua A");
    }

    #[test]
    fn mover_palete_sem_flag_nao_audita() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let origem = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        let destino = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-02".into(),
                needs_recount: false,
            })
            .unwrap();
        let palete = pallet_em(&store, origem.id, "Placa Balística", 2);
        let antes = store.history().len();

        assert!(store.move_pallet(palete.id, destino.id, "sgt.silva"));

        assert_eq!(store.pallets_by_location(destino.id).len(), 1);
        assert_eq!(store.history().len(), antes);
    }

    #[test]
    fn mover_palete_com_flag_gera_transferencia() {
        let store = InventoryStore::new(InventorySnapshot::default(), true);
        let rua = store.add_street("Rua A").unwrap();
        let origem = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        let destino = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-02".into(),
                needs_recount: false,
            })
            .unwrap();
        let palete = store
            .add_pallet(
                &CreatePalletPayload {
                    location_id: origem.id,
                    material_id: None,
                    material_name: "Placa Balística".into(),
                    kind: PalletKind::Trd,
                    quantity: 2,
                    image_url: None,
                },
                "sgt.silva",
            )
            .unwrap();

        assert!(store.move_pallet(palete.id, destino.id, "sgt.silva"));

        let transferencias: usize = store
            .history()
            .iter()
            .filter(|m| m.kind == MovementKind::Transferencia)
            .count();
        assert_eq!(transferencias, 1);
        // O registro aponta para o destino (nomes resolvidos após o update).
        let registro = store
            .history()
            .into_iter()
            .find(|m| m.kind == MovementKind::Transferencia)
            .unwrap();
        assert_eq!(registro.location_name, "A-02");
    }

    #[test]
    fn esvaziar_local_da_baixa_em_tudo_com_ator_de_sistema() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        pallet_em(&store, local.id, "Coturno Tático", 5);
        pallet_em(&store, local.id, "Capacete", 3);

        assert_eq!(store.clear_location(local.id), 2);

        assert!(store.pallets_by_location(local.id).is_empty());
        let saidas: Vec<MovementLog> = store
            .history()
            .into_iter()
            .filter(|m| m.kind == MovementKind::Saida)
            .collect();
        assert_eq!(saidas.len(), 2);
        assert!(saidas.iter().all(|m| m.user == SYSTEM_ACTOR));
    }

    #[test]
    fn status_do_local_segue_a_precedencia() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();

        assert_eq!(store.location_status(local.id), Some(LocationStatus::Vazia));

        let palete = pallet_em(&store, local.id, "Coturno Tático", 1);
        assert_eq!(store.location_status(local.id), Some(LocationStatus::Ocupada));

        // A flag de conferência vence a ocupação.
        store.update_location(
            local.id,
            &UpdateLocationPayload { name: None, needs_recount: Some(true) },
        );
        assert_eq!(
            store.location_status(local.id),
            Some(LocationStatus::NecessitaConferencia)
        );

        store.remove_pallet(palete.id, "sgt.silva");
        assert_eq!(
            store.location_status(local.id),
            Some(LocationStatus::NecessitaConferencia)
        );

        assert_eq!(store.location_status(Uuid::new_v4()), None);
    }

    #[test]
    fn estoque_baixo_usa_o_minimo_do_material() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let local = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        let material = store.add_material(&CreateMaterialPayload {
            name: "Coturno Tático".into(),
            description: None,
            default_kind: PalletKind::Trd,
            min_stock: Some(10),
            image_url: None,
        });

        // 8 unidades <= 10: estoque baixo.
        store.add_pallet(
            &CreatePalletPayload {
                location_id: local.id,
                material_id: Some(material.id),
                material_name: String::new(),
                kind: PalletKind::Trd,
                quantity: 8,
                image_url: None,
            },
            "sgt.silva",
        );
        assert_eq!(store.is_low_stock(material.id), Some(true));

        // +4 = 12 unidades > 10: normal.
        store.add_pallet(
            &CreatePalletPayload {
                location_id: local.id,
                material_id: Some(material.id),
                material_name: String::new(),
                kind: PalletKind::Trd,
                quantity: 4,
                image_url: None,
            },
            "sgt.silva",
        );
        assert_eq!(store.is_low_stock(material.id), Some(false));
        assert_eq!(store.material_on_hand(material.id), 12);
    }

    #[test]
    fn estoque_baixo_cai_no_limite_global_sem_minimo() {
        let store = store_vazio();
        // Limite global padrão: 5.
        let material = store.add_material(&CreateMaterialPayload {
            name: "Cadarço".into(),
            description: None,
            default_kind: PalletKind::Trp,
            min_stock: None,
            image_url: None,
        });
        // Sem nenhum palete: 0 <= 5.
        assert_eq!(store.is_low_stock(material.id), Some(true));
        // Material inexistente: não é erro, é ausência.
        assert_eq!(store.is_low_stock(Uuid::new_v4()), None);
    }

    #[test]
    fn renomear_material_nao_orfa_a_agregacao() {
        let store = store_vazio();
        let material = store.add_material(&CreateMaterialPayload {
            name: "Coturno Tático".into(),
            description: None,
            default_kind: PalletKind::Trd,
            min_stock: Some(10),
            image_url: None,
        });
        store.add_pallet(
            &CreatePalletPayload {
                location_id: RECEIVING_AREA_ID,
                material_id: Some(material.id),
                material_name: String::new(),
                kind: PalletKind::Trp,
                quantity: 8,
                image_url: None,
            },
            "sgt.silva",
        );

        store.update_material(
            material.id,
            &UpdateMaterialPayload { name: Some("Coturno Tático II".into()), ..Default::default() },
        );

        // A junção é por id: a soma continua encontrando o estoque.
        assert_eq!(store.material_on_hand(material.id), 8);
        // E o nome de exibição congelado no palete acompanhou.
        assert_eq!(store.pallets()[0].material_name, "Coturno Tático II");
    }

    #[test]
    fn snapshot_backfill_vincula_paletes_pelo_nome() {
        let material = Material {
            id: Uuid::new_v4(),
            name: "Coturno Tático".into(),
            description: None,
            default_kind: PalletKind::Trd,
            min_stock: Some(10),
            image_url: None,
        };
        let pallet = Pallet {
            id: Uuid::new_v4(),
            location_id: RECEIVING_AREA_ID,
            material_id: None,
            material_name: "coturno tático".into(),
            kind: PalletKind::Trp,
            quantity: 8,
            entry_at: Utc::now(),
            image_url: None,
        };
        let snapshot = InventorySnapshot {
            materials: vec![material.clone()],
            pallets: vec![pallet],
            ..Default::default()
        };

        let store = InventoryStore::new(snapshot, false);
        assert_eq!(store.material_on_hand(material.id), 8);
    }

    #[test]
    fn palete_na_area_de_recebimento() {
        let store = store_vazio();
        let palete = pallet_em(&store, RECEIVING_AREA_ID, "Capacete", 2);

        assert_eq!(store.pallets_by_location(RECEIVING_AREA_ID)[0].id, palete.id);
        let historico = store.history();
        assert_eq!(historico[0].location_name, "Área de Recebimento");
        assert_eq!(historico[0].street_name, "-");
    }

    #[test]
    fn palete_para_local_inexistente_e_noop() {
        let store = store_vazio();
        let resultado = store.add_pallet(
            &CreatePalletPayload {
                location_id: Uuid::new_v4(),
                material_id: None,
                material_name: "Capacete".into(),
                kind: PalletKind::Trd,
                quantity: 2,
                image_url: None,
            },
            "sgt.silva",
        );
        assert!(resultado.is_none());
        assert!(store.history().is_empty());
    }

    #[test]
    fn exportar_e_recarregar_mantem_a_colecao() {
        let store = store_vazio();
        store.add_street("Rua A");
        store.add_street("Rua B");

        let exportado = store.export(StorageKey::Streets);

        let outro = store_vazio();
        outro.replace_collection(StorageKey::Streets, exportado).unwrap();
        let nomes: Vec<String> = outro.streets().into_iter().map(|s| s.name).collect();
        assert_eq!(nomes, vec!["Rua A".to_string(), "Rua B".to_string()]);
    }

    #[test]
    fn usuarios_persistidos_guardam_o_hash() {
        let store = store_vazio();
        assert!(store.add_user(User {
            id: Uuid::new_v4(),
            name: "Fulano".into(),
            email: "fulano@eb.mil.br".into(),
            role: Role::Operator,
            password_hash: "$2b$12$hash".into(),
            preferences: NotificationPreferences::default(),
        }));
        // E-mail repetido (mesmo com caixa diferente) é recusado.
        assert!(!store.add_user(User {
            id: Uuid::new_v4(),
            name: "Outro".into(),
            email: "FULANO@eb.mil.br".into(),
            role: Role::Viewer,
            password_hash: String::new(),
            preferences: NotificationPreferences::default(),
        }));

        let exportado = store.export(StorageKey::Users);
        assert_eq!(exportado[0]["passwordHash"], "$2b$12$hash");

        let outro = store_vazio();
        outro.replace_collection(StorageKey::Users, exportado).unwrap();
        let lido = outro.find_user_by_email("fulano@eb.mil.br").unwrap();
        assert_eq!(lido.password_hash, "$2b$12$hash");
    }

    #[test]
    fn ocupacao_agregada_por_rua() {
        let store = store_vazio();
        let rua = store.add_street("Rua A").unwrap();
        let ocupado = store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-01".into(),
                needs_recount: false,
            })
            .unwrap();
        store
            .add_location(&CreateLocationPayload {
                street_id: rua.id,
                name: "A-02".into(),
                needs_recount: false,
            })
            .unwrap();
        pallet_em(&store, ocupado.id, "Coturno Tático", 1);

        let resumo = store.occupancy_summary();
        assert_eq!(resumo.total_locations, 2);
        assert_eq!(resumo.occupied_locations, 1);
        assert_eq!(resumo.percent, 50);
        assert_eq!(resumo.streets[0].percent, 50);
        assert!(!resumo.streets[0].above_threshold); // limite padrão: 85%
    }

    #[test]
    fn guia_exige_om_existente_e_om_cascateia_guias() {
        let store = store_vazio();
        assert!(store
            .add_guia(&CreateGuiaPayload {
                om_id: Uuid::new_v4(),
                title: "Guia avulsa".into(),
                document_url: None,
            })
            .is_none());

        let om = store.add_om(&CreateOmPayload { name: "1º BPE".into(), crest_url: None });
        let guia = store
            .add_guia(&CreateGuiaPayload {
                om_id: om.id,
                title: "Remessa de coletes".into(),
                document_url: None,
            })
            .unwrap();
        assert_eq!(guia.status, GuiaStatus::Pendente);
        assert_eq!(store.guias_by_om(om.id).len(), 1);

        assert!(store.delete_om(om.id));
        assert!(store.guias_by_om(om.id).is_empty());
        assert!(store.guias().is_empty());
    }

    #[test]
    fn sub_historico_balistico_e_append_only() {
        let store = store_vazio();
        let item = store.add_ballistic(
            &CreateBallisticPayload {
                category: crate::models::ballistic::BallisticCategory::Colete,
                status: crate::models::ballistic::BallisticStatus::Ativo,
                serial_number: "SN-001".into(),
                id_code: "CL-001".into(),
                om_id: None,
                manufacture_date: None,
                expiration_date: None,
                notes: None,
                image_url: None,
            },
            "sgt.silva",
        );
        assert_eq!(item.history.len(), 1);

        let depois = store
            .push_ballistic_event(item.id, "cb.souza", "Enviado para manutenção")
            .unwrap();
        assert_eq!(depois.history.len(), 2);
        assert_eq!(depois.history[1].description, "Enviado para manutenção");
    }
}
