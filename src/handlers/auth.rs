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
use crate::middleware::rbac::{RequireRole, RoleAdmin};
use crate::models::auth::{
    AuthResponse, LoginUserPayload, RegisterUserPayload, UpdatePreferencesPayload,
    UpdateUserRolePayload, User,
};

// --- Autenticação ---

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Autenticação",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado, token emitido", body = AuthResponse),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let token = app_state
        .auth_service
        .register_user(&payload.name, &payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Autenticação",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Token emitido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse { token }))
}

// --- Usuários ---

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Usuários",
    responses((status = 200, description = "Perfil do usuário autenticado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    put,
    path = "/api/users/me/preferences",
    tag = "Usuários",
    request_body = UpdatePreferencesPayload,
    responses((status = 200, description = "Preferências atualizadas", body = User)),
    security(("api_jwt" = []))
)]
pub async fn update_my_preferences(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpdatePreferencesPayload>,
) -> Result<Json<User>, AppError> {
    let updated = app_state
        .inventory_service
        .update_user_preferences(user.id, payload.low_stock, payload.movements)
        .await
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Usuários",
    responses((status = 200, description = "Lista de usuários", body = [User])),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
) -> Json<Vec<User>> {
    Json(app_state.store.users())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "Usuários",
    request_body = UpdateUserRolePayload,
    responses(
        (status = 200, description = "Perfil de acesso atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRolePayload>,
) -> Result<Json<User>, AppError> {
    let updated = app_state
        .inventory_service
        .update_user_role(id, payload.role)
        .await
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(updated))
}
