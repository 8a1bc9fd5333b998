use axum::{extract::State, Json};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::rbac::{RequireRole, RoleAdmin};
use crate::models::settings::{SystemSettings, UpdateSettingsPayload};

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Configurações",
    responses((status = 200, description = "Parâmetros globais do sistema", body = SystemSettings)),
    security(("api_jwt" = []))
)]
pub async fn get_settings(State(app_state): State<AppState>) -> Json<SystemSettings> {
    Json(app_state.store.settings())
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Configurações",
    request_body = UpdateSettingsPayload,
    responses((status = 200, description = "Parâmetros atualizados", body = SystemSettings)),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<Json<SystemSettings>, AppError> {
    let settings = app_state.inventory_service.update_settings(&payload).await;
    Ok(Json(settings))
}
