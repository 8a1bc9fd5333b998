// src/storage/postgres.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgListener, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::SyncEvent;
use super::keys::StorageKey;

// Canal do pg_notify usado para avisar outras instâncias que um slot mudou.
const UPDATE_CHANNEL: &str = "almoxarifado_updates";

// Payload do pg_notify. O `origin` identifica a instância que escreveu,
// para que ela ignore o eco da própria notificação.
#[derive(Debug, Serialize, Deserialize)]
struct UpdatePayload {
    key: StorageKey,
    origin: Uuid,
}

// Backend remoto opcional: cada coleção vira uma linha JSONB na tabela
// `collection_slots`, e o LISTEN/NOTIFY do Postgres faz o papel do evento
// de storage entre abas — outra instância escreve, esta recarrega o slot.
pub struct PgBackend {
    pool: PgPool,
    origin: Uuid,
}

impl PgBackend {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;
        tracing::info!("✅ Backing store Postgres conectado e migrado!");

        Ok(Self { pool, origin: Uuid::new_v4() })
    }

    pub async fn read(&self, key: StorageKey) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT data FROM collection_slots WHERE key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn write(
        &self,
        key: StorageKey,
        value: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO collection_slots (key, data, updated_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;

        // Avisa as demais instâncias. Quem escreveu por último "vence":
        // não há merge, só invalidação e releitura do slot inteiro.
        let payload = serde_json::to_string(&UpdatePayload { key, origin: self.origin })
            .unwrap_or_default();
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(UPDATE_CHANNEL)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Tarefa de fundo que escuta o canal e reinjeta as mudanças vindas de
    // outras instâncias no broadcast local, como se fossem eventos de aba.
    // O canal `remote` só carrega escritas alheias, para quem precisa
    // recarregar o cache sem reagir às próprias gravações.
    pub fn spawn_listener(
        &self,
        events: broadcast::Sender<SyncEvent>,
        remote: broadcast::Sender<StorageKey>,
    ) {
        let pool = self.pool.clone();
        let own_origin = self.origin;

        tokio::spawn(async move {
            let mut listener = match PgListener::connect_with(&pool).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Falha ao abrir o listener do Postgres: {}", e);
                    return;
                }
            };
            if let Err(e) = listener.listen(UPDATE_CHANNEL).await {
                tracing::error!("Falha no LISTEN '{}': {}", UPDATE_CHANNEL, e);
                return;
            }

            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        let payload: UpdatePayload =
                            match serde_json::from_str(notification.payload()) {
                                Ok(p) => p,
                                Err(e) => {
                                    tracing::warn!("Notificação com payload inválido: {}", e);
                                    continue;
                                }
                            };

                        if payload.origin == own_origin {
                            continue; // eco da nossa própria escrita
                        }

                        tracing::debug!("Slot '{}' alterado por outra instância", payload.key);
                        let _ = remote.send(payload.key);
                        let _ = events.send(SyncEvent::Update { key: payload.key });
                    }
                    Err(e) => {
                        // O PgListener tenta reconectar sozinho no próximo recv.
                        tracing::warn!("Listener do Postgres caiu, aguardando: {}", e);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });
    }
}
