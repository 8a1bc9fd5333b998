use axum::{extract::State, Json};

use crate::config::AppState;
use crate::models::dashboard::{DashboardSummary, OccupancySummary};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Visão consolidada do almoxarifado", body = DashboardSummary)),
    security(("api_jwt" = []))
)]
pub async fn summary(State(app_state): State<AppState>) -> Json<DashboardSummary> {
    Json(app_state.store.dashboard_summary())
}

#[utoipa::path(
    get,
    path = "/api/dashboard/occupancy",
    tag = "Dashboard",
    responses((status = 200, description = "Ocupação por rua e geral", body = OccupancySummary)),
    security(("api_jwt" = []))
)]
pub async fn occupancy(State(app_state): State<AppState>) -> Json<OccupancySummary> {
    Json(app_state.store.occupancy_summary())
}
