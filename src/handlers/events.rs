use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::rbac::{RequireRole, RoleOperator};
use crate::storage::NotificationVariant;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyPayload {
    #[validate(length(min = 1, message = "A mensagem é obrigatória."))]
    pub message: String,
    pub variant: Option<NotificationVariant>,
}

// Fluxo SSE com os eventos de sincronização: cada cliente conectado é o
// equivalente de uma aba inscrita no canal de broadcast. Fechar a conexão
// solta o receiver e desfaz a inscrição.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Eventos",
    responses((status = 200, description = "Fluxo text/event-stream de eventos UPDATE e NOTIFICATION")),
    security(("api_jwt" = []))
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.storage.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    // O payload no fio é o mesmo JSON dos eventos internos.
                    let sse = Event::default().json_data(&event).ok()?;
                    return Some((Ok(sse), rx));
                }
                // Cliente lento perdeu eventos antigos; segue do ponto atual.
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Cliente SSE atrasado, {} eventos pulados", skipped);
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[utoipa::path(
    post,
    path = "/api/events/notify",
    tag = "Eventos",
    request_body = NotifyPayload,
    responses((status = 202, description = "Notificação transmitida aos inscritos")),
    security(("api_jwt" = []))
)]
pub async fn notify(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<NotifyPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state.storage.notify_event(payload.message, payload.variant);
    Ok(StatusCode::ACCEPTED)
}
