use axum::{extract::State, Json};

use crate::config::AppState;
use crate::models::warehouse::MovementLog;

#[utoipa::path(
    get,
    path = "/api/history",
    tag = "Histórico",
    responses((status = 200, description = "Movimentações, da mais recente para a mais antiga", body = [MovementLog])),
    security(("api_jwt" = []))
)]
pub async fn list_history(State(app_state): State<AppState>) -> Json<Vec<MovementLog>> {
    Json(app_state.store.history())
}
