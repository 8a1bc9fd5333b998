// src/config.rs

use std::{env, sync::Arc};

use tokio::sync::broadcast::error::RecvError;

use crate::services::{AuthService, InventoryService};
use crate::storage::StorageService;
use crate::store::InventoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InventoryStore>,
    pub storage: StorageService,
    pub inventory_service: InventoryService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Registrar transferências no histórico é opcional; o padrão do
        // sistema é manter o histórico só com entradas e saídas.
        let log_pallet_moves = env::var("LOG_PALLET_MOVES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        // Com DATABASE_URL presente, os slots vivem no Postgres e as
        // instâncias se sincronizam via LISTEN/NOTIFY. Sem ela, cada
        // coleção é um arquivo JSON em DATA_DIR.
        let storage = match env::var("DATABASE_URL") {
            Ok(database_url) => StorageService::new_postgres(&database_url).await?,
            Err(_) => {
                let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
                StorageService::new_file(&data_dir)?
            }
        };

        // --- Monta o gráfico de dependências ---
        let snapshot = InventoryService::load_snapshot(&storage).await;
        let store = Arc::new(InventoryStore::new(snapshot, log_pallet_moves));
        let inventory_service = InventoryService::new(store.clone(), storage.clone());
        let auth_service = AuthService::new(store.clone(), storage.clone(), jwt_secret);

        Self::spawn_reload_task(store.clone(), storage.clone());

        Ok(Self { store, storage, inventory_service, auth_service })
    }

    // Quando outra instância grava um slot, recarrega a coleção inteira no
    // cache. Última escrita vence; não há merge.
    fn spawn_reload_task(store: Arc<InventoryStore>, storage: StorageService) {
        let mut remote = storage.subscribe_remote();

        tokio::spawn(async move {
            loop {
                match remote.recv().await {
                    Ok(key) => {
                        let Some(raw) = storage.read_raw(key).await else {
                            tracing::warn!("Slot '{}' sumiu durante a recarga", key);
                            continue;
                        };
                        if let Err(e) = store.replace_collection(key, raw) {
                            tracing::warn!("Falha ao recarregar o slot '{}': {}", key, e);
                        } else {
                            tracing::debug!("Coleção '{}' recarregada do backing store", key);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Recarga atrasada, {} eventos pulados", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}
