use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::rbac::{RequireRole, RoleOperator};
use crate::models::ballistic::{
    BallisticEvent, BallisticEventPayload, BallisticItem, CreateBallisticPayload,
    UpdateBallisticPayload,
};

#[utoipa::path(
    get,
    path = "/api/ballistics",
    tag = "Proteção Balística",
    responses((status = 200, description = "Itens de proteção balística", body = [BallisticItem])),
    security(("api_jwt" = []))
)]
pub async fn list_ballistics(State(app_state): State<AppState>) -> Json<Vec<BallisticItem>> {
    Json(app_state.store.ballistics())
}

#[utoipa::path(
    post,
    path = "/api/ballistics",
    tag = "Proteção Balística",
    request_body = CreateBallisticPayload,
    responses((status = 201, description = "Item cadastrado com evento inicial", body = BallisticItem)),
    security(("api_jwt" = []))
)]
pub async fn create_ballistic(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateBallisticPayload>,
) -> Result<(StatusCode, Json<BallisticItem>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let item = app_state
        .inventory_service
        .add_ballistic(&payload, &user.name)
        .await;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/ballistics/{id}",
    tag = "Proteção Balística",
    request_body = UpdateBallisticPayload,
    responses(
        (status = 200, description = "Item atualizado", body = BallisticItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ballistic(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBallisticPayload>,
) -> Result<Json<BallisticItem>, AppError> {
    let item = app_state
        .inventory_service
        .update_ballistic(id, &payload)
        .await
        .ok_or(AppError::NotFound("Item balístico"))?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/ballistics/{id}",
    tag = "Proteção Balística",
    responses((status = 204, description = "Item removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_ballistic(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_ballistic(id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/ballistics/{id}/history",
    tag = "Proteção Balística",
    responses(
        (status = 200, description = "Histórico de eventos do item", body = [BallisticEvent]),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn ballistic_history(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BallisticEvent>>, AppError> {
    let item = app_state
        .store
        .ballistics()
        .into_iter()
        .find(|b| b.id == id)
        .ok_or(AppError::NotFound("Item balístico"))?;
    Ok(Json(item.history))
}

#[utoipa::path(
    post,
    path = "/api/ballistics/{id}/history",
    tag = "Proteção Balística",
    request_body = BallisticEventPayload,
    responses(
        (status = 201, description = "Evento adicionado ao histórico", body = BallisticItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn push_ballistic_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BallisticEventPayload>,
) -> Result<(StatusCode, Json<BallisticItem>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let item = app_state
        .inventory_service
        .push_ballistic_event(id, &user.name, &payload.description)
        .await
        .ok_or(AppError::NotFound("Item balístico"))?;
    Ok((StatusCode::CREATED, Json(item)))
}
