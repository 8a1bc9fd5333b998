// src/storage/service.rs

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use super::events::{NotificationVariant, SyncEvent};
use super::file::FileBackend;
use super::keys::StorageKey;
use super::postgres::PgBackend;

enum Backend {
    File(FileBackend),
    Postgres(PgBackend),
}

// O notificador de sincronização: persiste cada coleção em um slot chaveado
// e transmite um evento de mudança para quem estiver inscrito.
//
// As falhas de escrita são registradas e descartadas — o estado em memória
// não sofre rollback, então cache e armazenamento podem divergir até a
// próxima escrita bem-sucedida. É o comportamento aceito deste sistema,
// que assume um único operador por vez.
#[derive(Clone)]
pub struct StorageService {
    backend: Arc<Backend>,
    events: broadcast::Sender<SyncEvent>,
    // Só o listener do Postgres publica aqui; no backend local nunca dispara.
    remote: broadcast::Sender<StorageKey>,
}

impl StorageService {
    pub fn new_file(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let backend = FileBackend::new(data_dir.as_ref())?;
        let (events, _) = broadcast::channel(64);
        let (remote, _) = broadcast::channel(64);
        tracing::info!("📁 Armazenamento local em {:?}", data_dir.as_ref());
        Ok(Self { backend: Arc::new(Backend::File(backend)), events, remote })
    }

    pub async fn new_postgres(database_url: &str) -> anyhow::Result<Self> {
        let backend = PgBackend::connect(database_url).await?;
        let (events, _) = broadcast::channel(64);
        let (remote, _) = broadcast::channel(64);
        backend.spawn_listener(events.clone(), remote.clone());
        Ok(Self { backend: Arc::new(Backend::Postgres(backend)), events, remote })
    }

    // Leitura bruta de um slot. Ausência ou falha viram None.
    pub async fn read_raw(&self, key: StorageKey) -> Option<serde_json::Value> {
        match self.backend.as_ref() {
            Backend::File(file) => file.read(key),
            Backend::Postgres(pg) => match pg.read(key).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Falha ao ler o slot '{}' do Postgres: {}", key, e);
                    None
                }
            },
        }
    }

    // Lê e desserializa uma coleção; qualquer problema cai no valor padrão
    // (os dados de demonstração), nunca em erro para o chamador.
    pub async fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let Some(raw) = self.read_raw(key).await else {
            return default;
        };
        match serde_json::from_value(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Slot '{}' com formato inesperado, usando padrão: {}", key, e);
                default
            }
        }
    }

    // Serializa, grava o slot e transmite o evento UPDATE correspondente.
    pub async fn set<T: Serialize>(&self, key: StorageKey, value: &T) {
        let raw = match serde_json::to_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Falha ao serializar o slot '{}': {}", key, e);
                return;
            }
        };

        let result = match self.backend.as_ref() {
            Backend::File(file) => file.write(key, &raw).map_err(|e| e.to_string()),
            Backend::Postgres(pg) => pg.write(key, &raw).await.map_err(|e| e.to_string()),
        };
        if let Err(e) = result {
            tracing::error!("Falha ao gravar o slot '{}': {}", key, e);
        }

        // Mesmo com a escrita falha, os inscritos locais ficam sabendo da
        // mudança em memória. Erro aqui só significa "ninguém ouvindo".
        let _ = self.events.send(SyncEvent::Update { key });
    }

    // A inscrição segue o padrão de recurso com escopo: soltar o receiver
    // desfaz a inscrição, sem vazamento de listeners.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    // Somente escritas feitas por OUTRAS instâncias (via Postgres).
    pub fn subscribe_remote(&self) -> broadcast::Receiver<StorageKey> {
        self.remote.subscribe()
    }

    // Transmite uma notificação voltada ao usuário, sem persistir nada.
    pub fn notify_event(&self, message: impl Into<String>, variant: Option<NotificationVariant>) {
        let _ = self.events.send(SyncEvent::Notification { message: message.into(), variant });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::warehouse::Street;
    use uuid::Uuid;

    fn service_em_tempdir() -> (tempfile::TempDir, StorageService) {
        let dir = tempfile::tempdir().unwrap();
        let service = StorageService::new_file(dir.path()).unwrap();
        (dir, service)
    }

    #[tokio::test]
    async fn set_grava_e_get_devolve_o_mesmo_valor() {
        let (_dir, service) = service_em_tempdir();
        let streets = vec![Street { id: Uuid::new_v4(), name: "Rua A".into(), order: 0 }];

        service.set(StorageKey::Streets, &streets).await;
        let lidas: Vec<Street> = service.get(StorageKey::Streets, Vec::new()).await;

        assert_eq!(lidas.len(), 1);
        assert_eq!(lidas[0].id, streets[0].id);
        assert_eq!(lidas[0].name, "Rua A");
    }

    #[tokio::test]
    async fn get_de_slot_ausente_retorna_o_padrao() {
        let (_dir, service) = service_em_tempdir();
        let padrao = vec![Street { id: Uuid::new_v4(), name: "Seed".into(), order: 0 }];

        let lidas: Vec<Street> = service.get(StorageKey::Streets, padrao.clone()).await;
        assert_eq!(lidas[0].name, padrao[0].name);
    }

    #[tokio::test]
    async fn set_transmite_update_para_inscritos() {
        let (_dir, service) = service_em_tempdir();
        let mut rx = service.subscribe();

        service.set(StorageKey::Pallets, &Vec::<crate::models::warehouse::Pallet>::new()).await;

        let evento = rx.recv().await.unwrap();
        assert_eq!(evento, SyncEvent::Update { key: StorageKey::Pallets });
    }

    #[tokio::test]
    async fn notify_event_nao_persiste_nada() {
        let (dir, service) = service_em_tempdir();
        let mut rx = service.subscribe();

        service.notify_event("simulação de mudança remota", None);

        match rx.recv().await.unwrap() {
            SyncEvent::Notification { message, variant } => {
                assert_eq!(message, "simulação de mudança remota");
                assert_eq!(variant, None);
            }
            outro => panic!("evento inesperado: {:?}", outro),
        }
        // Nenhum slot foi criado no diretório de dados.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
