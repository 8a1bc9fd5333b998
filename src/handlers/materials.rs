use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::rbac::{RequireRole, RoleOperator};
use crate::models::dashboard::LowStockEntry;
use crate::models::warehouse::{CreateMaterialPayload, Material, UpdateMaterialPayload};

#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Materiais",
    responses((status = 200, description = "Catálogo de materiais", body = [Material])),
    security(("api_jwt" = []))
)]
pub async fn list_materials(State(app_state): State<AppState>) -> Json<Vec<Material>> {
    Json(app_state.store.materials())
}

#[utoipa::path(
    post,
    path = "/api/materials",
    tag = "Materiais",
    request_body = CreateMaterialPayload,
    responses((status = 201, description = "Material cadastrado", body = Material)),
    security(("api_jwt" = []))
)]
pub async fn create_material(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<(StatusCode, Json<Material>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let material = app_state.inventory_service.add_material(&payload).await;
    Ok((StatusCode::CREATED, Json(material)))
}

#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = "Materiais",
    request_body = UpdateMaterialPayload,
    responses(
        (status = 200, description = "Material atualizado (nome propagado aos paletes)", body = Material),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_material(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMaterialPayload>,
) -> Result<Json<Material>, AppError> {
    let material = app_state
        .inventory_service
        .update_material(id, &payload)
        .await
        .ok_or(AppError::NotFound("Material"))?;
    Ok(Json(material))
}

#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = "Materiais",
    responses((status = 204, description = "Material removido do catálogo; paletes viram avulsos")),
    security(("api_jwt" = []))
)]
pub async fn delete_material(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_material(id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/materials/{id}/stock",
    tag = "Materiais",
    responses(
        (status = 200, description = "Saldo em estoque e situação de estoque baixo"),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn material_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let low = app_state
        .store
        .is_low_stock(id)
        .ok_or(AppError::NotFound("Material"))?;
    let on_hand = app_state.store.material_on_hand(id);
    Ok(Json(json!({ "onHand": on_hand, "lowStock": low })))
}

#[utoipa::path(
    get,
    path = "/api/materials/low-stock",
    tag = "Materiais",
    responses((status = 200, description = "Materiais abaixo do estoque mínimo", body = [LowStockEntry])),
    security(("api_jwt" = []))
)]
pub async fn low_stock(State(app_state): State<AppState>) -> Json<Vec<LowStockEntry>> {
    Json(app_state.store.low_stock_entries())
}
