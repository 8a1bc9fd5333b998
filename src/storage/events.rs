// src/storage/events.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::keys::StorageKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

// Eventos de sincronização propagados entre as "abas" (clientes conectados
// via SSE) e, quando há backing store Postgres, entre instâncias do servidor.
//
// UPDATE diz apenas *qual* coleção mudou; quem recebe relê o slot inteiro
// (invalidação grosseira, sem merge). NOTIFICATION carrega uma mensagem
// para o usuário, sem persistir nada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum SyncEvent {
    #[serde(rename = "UPDATE")]
    Update { key: StorageKey },

    #[serde(rename = "NOTIFICATION")]
    Notification {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        variant: Option<NotificationVariant>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formato_dos_eventos_no_fio() {
        let update = SyncEvent::Update { key: StorageKey::Pallets };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "type": "UPDATE", "key": "pallets" })
        );

        let notif = SyncEvent::Notification {
            message: "dados alterados remotamente".into(),
            variant: Some(NotificationVariant::Destructive),
        };
        assert_eq!(
            serde_json::to_value(&notif).unwrap(),
            serde_json::json!({
                "type": "NOTIFICATION",
                "message": "dados alterados remotamente",
                "variant": "destructive",
            })
        );
    }
}
