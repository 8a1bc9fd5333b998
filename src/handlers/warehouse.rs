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
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::rbac::{RequireRole, RoleOperator};
use crate::models::warehouse::{
    CreateLocationPayload, CreatePalletPayload, CreateStreetPayload, Location, MovePalletPayload,
    Pallet, ReorderStreetsPayload, Street, UpdateLocationPayload, UpdatePalletPayload,
    UpdateStreetPayload,
};

// --- Ruas ---

#[utoipa::path(
    get,
    path = "/api/streets",
    tag = "Almoxarifado",
    responses((status = 200, description = "Ruas em ordem de exibição", body = [Street])),
    security(("api_jwt" = []))
)]
pub async fn list_streets(State(app_state): State<AppState>) -> Json<Vec<Street>> {
    Json(app_state.store.streets())
}

#[utoipa::path(
    post,
    path = "/api/streets",
    tag = "Almoxarifado",
    request_body = CreateStreetPayload,
    responses(
        (status = 201, description = "Rua criada", body = Street),
        (status = 400, description = "Nome inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_street(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateStreetPayload>,
) -> Result<(StatusCode, Json<Street>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let street = app_state
        .inventory_service
        .add_street(&payload.name)
        .await
        .ok_or(AppError::BadRequest("O nome da rua não pode ser vazio."))?;
    Ok((StatusCode::CREATED, Json(street)))
}

#[utoipa::path(
    put,
    path = "/api/streets/{id}",
    tag = "Almoxarifado",
    request_body = UpdateStreetPayload,
    responses(
        (status = 200, description = "Rua atualizada", body = Street),
        (status = 404, description = "Rua não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_street(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStreetPayload>,
) -> Result<Json<Street>, AppError> {
    let street = app_state
        .inventory_service
        .update_street(id, &payload)
        .await
        .ok_or(AppError::NotFound("Rua"))?;
    Ok(Json(street))
}

#[utoipa::path(
    put,
    path = "/api/streets/reorder",
    tag = "Almoxarifado",
    request_body = ReorderStreetsPayload,
    responses((status = 200, description = "Nova ordem das ruas", body = [Street])),
    security(("api_jwt" = []))
)]
pub async fn reorder_streets(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<ReorderStreetsPayload>,
) -> Result<Json<Vec<Street>>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let streets = app_state
        .inventory_service
        .reorder_streets(&payload.street_ids)
        .await;
    Ok(Json(streets))
}

#[utoipa::path(
    delete,
    path = "/api/streets/{id}",
    tag = "Almoxarifado",
    responses((status = 204, description = "Rua e dependentes removidos")),
    security(("api_jwt" = []))
)]
pub async fn delete_street(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_street(id).await;
    StatusCode::NO_CONTENT
}

// --- Locais ---

#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "Almoxarifado",
    responses((status = 200, description = "Todos os locais", body = [Location])),
    security(("api_jwt" = []))
)]
pub async fn list_locations(State(app_state): State<AppState>) -> Json<Vec<Location>> {
    Json(app_state.store.locations())
}

#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "Almoxarifado",
    request_body = CreateLocationPayload,
    responses(
        (status = 201, description = "Local criado", body = Location),
        (status = 404, description = "Rua não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreateLocationPayload>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let location = app_state
        .inventory_service
        .add_location(&payload)
        .await
        .ok_or(AppError::NotFound("Rua"))?;
    Ok((StatusCode::CREATED, Json(location)))
}

#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = "Almoxarifado",
    request_body = UpdateLocationPayload,
    responses(
        (status = 200, description = "Local atualizado", body = Location),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_location(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationPayload>,
) -> Result<Json<Location>, AppError> {
    let location = app_state
        .inventory_service
        .update_location(id, &payload)
        .await
        .ok_or(AppError::NotFound("Local"))?;
    Ok(Json(location))
}

#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = "Almoxarifado",
    responses((status = 204, description = "Local e paletes removidos")),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.inventory_service.delete_location(id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}/status",
    tag = "Almoxarifado",
    responses(
        (status = 200, description = "Status derivado do local"),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn location_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let status = app_state
        .store
        .location_status(id)
        .ok_or(AppError::NotFound("Local"))?;
    Ok(Json(json!({ "status": status })))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}/pallets",
    tag = "Almoxarifado",
    responses((status = 200, description = "Paletes armazenados no local", body = [Pallet])),
    security(("api_jwt" = []))
)]
pub async fn pallets_by_location(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Pallet>> {
    Json(app_state.store.pallets_by_location(id))
}

#[utoipa::path(
    post,
    path = "/api/locations/{id}/clear",
    tag = "Almoxarifado",
    responses((status = 200, description = "Quantidade de paletes dados baixa")),
    security(("api_jwt" = []))
)]
pub async fn clear_location(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> Json<Value> {
    let removed = app_state.inventory_service.clear_location(id).await;
    Json(json!({ "removed": removed }))
}

// --- Paletes ---

#[utoipa::path(
    get,
    path = "/api/pallets",
    tag = "Almoxarifado",
    responses((status = 200, description = "Todos os paletes", body = [Pallet])),
    security(("api_jwt" = []))
)]
pub async fn list_pallets(State(app_state): State<AppState>) -> Json<Vec<Pallet>> {
    Json(app_state.store.pallets())
}

#[utoipa::path(
    post,
    path = "/api/pallets",
    tag = "Almoxarifado",
    request_body = CreatePalletPayload,
    responses(
        (status = 201, description = "Palete registrado (entrada)", body = Pallet),
        (status = 404, description = "Local de destino não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_pallet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleOperator>,
    Json(payload): Json<CreatePalletPayload>,
) -> Result<(StatusCode, Json<Pallet>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let pallet = app_state
        .inventory_service
        .add_pallet(&payload, &user.name)
        .await
        .ok_or(AppError::NotFound("Local"))?;
    Ok((StatusCode::CREATED, Json(pallet)))
}

#[utoipa::path(
    put,
    path = "/api/pallets/{id}",
    tag = "Almoxarifado",
    request_body = UpdatePalletPayload,
    responses(
        (status = 200, description = "Palete atualizado", body = Pallet),
        (status = 404, description = "Palete não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_pallet(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePalletPayload>,
) -> Result<Json<Pallet>, AppError> {
    let pallet = app_state
        .inventory_service
        .update_pallet(id, &payload)
        .await
        .ok_or(AppError::NotFound("Palete"))?;
    Ok(Json(pallet))
}

#[utoipa::path(
    delete,
    path = "/api/pallets/{id}",
    tag = "Almoxarifado",
    responses(
        (status = 204, description = "Saída registrada e palete removido"),
        (status = 404, description = "Palete não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_pallet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.inventory_service.remove_pallet(id, &user.name).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Palete"))
    }
}

#[utoipa::path(
    post,
    path = "/api/pallets/{id}/move",
    tag = "Almoxarifado",
    request_body = MovePalletPayload,
    responses(
        (status = 200, description = "Palete transferido", body = Pallet),
        (status = 404, description = "Palete ou local de destino não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn move_pallet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleOperator>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MovePalletPayload>,
) -> Result<Json<Pallet>, AppError> {
    if !app_state
        .inventory_service
        .move_pallet(id, payload.location_id, &user.name)
        .await
    {
        return Err(AppError::NotFound("Palete ou local de destino"));
    }
    let pallet = app_state
        .store
        .pallets()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(AppError::NotFound("Palete"))?;
    Ok(Json(pallet))
}
