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
use crate::models::om::{
    CreateGuiaPayload, CreateOmPayload, Guia, Om, UpdateGuiaPayload, UpdateOmPayload,
};

// --- Organizações Militares ---

#[utoipa::path(
    get,
    path = "/api/oms",
    tag = "OMs e Guias",
    responses((status = 200, description = "Organizações militares atendidas", body = [Om])),
    security(("api_jwt" = []))
)]
pub async fn list_oms(State(app_state): State<AppState>) -> Json<Vec<Om>> {
    Json(app_state.store.oms())
}

#[utoipa::path(
    post,
    path = "/api/oms",
    tag = "OMs e Guias",
    request_body = CreateOmPayload,
    responses((status = 201, description = "OM cadastrada", body = Om)),
    security(("api_jwt" = []))
)]
pub async fn create_om(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateOmPayload>,
) -> Result<(StatusCode, Json<Om>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let om = app_state.inventory_service.add_om(&payload).await;
    Ok((StatusCode::CREATED, Json(om)))
}

#[utoipa::path(
    put,
    path = "/api/oms/{id}",
    tag = "OMs e Guias",
    request_body = UpdateOmPayload,
    responses(
        (status = 200, description = "OM atualizada", body = Om),
        (status = 404, description = "OM não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_om(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOmPayload>,
) -> Result<Json<Om>, AppError> {
    let om = app_state
        .inventory_service
        .update_om(id, &payload)
        .await
        .ok_or(AppError::NotFound("OM"))?;
    Ok(Json(om))
}

#[utoipa::path(
    delete,
    path = "/api/oms/{id}",
    tag = "OMs e Guias",
    responses((status = 204, description = "OM removida; guias em cascata, itens balísticos desvinculados")),
    security(("api_jwt" = []))
)]
pub async fn delete_om(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_om(id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/oms/{id}/guias",
    tag = "OMs e Guias",
    responses((status = 200, description = "Guias da OM", body = [Guia])),
    security(("api_jwt" = []))
)]
pub async fn guias_by_om(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Guia>> {
    Json(app_state.store.guias_by_om(id))
}

// --- Guias de remessa ---

#[utoipa::path(
    get,
    path = "/api/guias",
    tag = "OMs e Guias",
    responses((status = 200, description = "Todas as guias de remessa", body = [Guia])),
    security(("api_jwt" = []))
)]
pub async fn list_guias(State(app_state): State<AppState>) -> Json<Vec<Guia>> {
    Json(app_state.store.guias())
}

#[utoipa::path(
    post,
    path = "/api/guias",
    tag = "OMs e Guias",
    request_body = CreateGuiaPayload,
    responses(
        (status = 201, description = "Guia criada com status PENDENTE", body = Guia),
        (status = 404, description = "OM não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_guia(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateGuiaPayload>,
) -> Result<(StatusCode, Json<Guia>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let guia = app_state
        .inventory_service
        .add_guia(&payload)
        .await
        .ok_or(AppError::NotFound("OM"))?;
    Ok((StatusCode::CREATED, Json(guia)))
}

#[utoipa::path(
    put,
    path = "/api/guias/{id}",
    tag = "OMs e Guias",
    request_body = UpdateGuiaPayload,
    responses(
        (status = 200, description = "Guia atualizada", body = Guia),
        (status = 404, description = "Guia não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_guia(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuiaPayload>,
) -> Result<Json<Guia>, AppError> {
    let guia = app_state
        .inventory_service
        .update_guia(id, &payload)
        .await
        .ok_or(AppError::NotFound("Guia"))?;
    Ok(Json(guia))
}

#[utoipa::path(
    delete,
    path = "/api/guias/{id}",
    tag = "OMs e Guias",
    responses((status = 204, description = "Guia removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_guia(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_guia(id).await;
    StatusCode::NO_CONTENT
}
