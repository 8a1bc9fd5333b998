use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::rbac::{RequireRole, RoleOperator};
use crate::models::equipment::{CreateEquipmentPayload, Equipment, UpdateEquipmentPayload};

#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "Equipamentos",
    responses((status = 200, description = "Equipamentos de movimentação", body = [Equipment])),
    security(("api_jwt" = []))
)]
pub async fn list_equipment(State(app_state): State<AppState>) -> Json<Vec<Equipment>> {
    Json(app_state.store.equipment())
}

#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "Equipamentos",
    request_body = CreateEquipmentPayload,
    responses((status = 201, description = "Equipamento cadastrado", body = Equipment)),
    security(("api_jwt" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateEquipmentPayload>,
) -> Result<(StatusCode, Json<Equipment>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let equipment = app_state.inventory_service.add_equipment(&payload).await;
    Ok((StatusCode::CREATED, Json(equipment)))
}

#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    tag = "Equipamentos",
    request_body = UpdateEquipmentPayload,
    responses(
        (status = 200, description = "Equipamento atualizado", body = Equipment),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipment(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEquipmentPayload>,
) -> Result<Json<Equipment>, AppError> {
    let equipment = app_state
        .inventory_service
        .update_equipment(id, &payload)
        .await
        .ok_or(AppError::NotFound("Equipamento"))?;
    Ok(Json(equipment))
}

#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    tag = "Equipamentos",
    responses((status = 204, description = "Equipamento removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_equipment(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_equipment(id).await;
    StatusCode::NO_CONTENT
}
