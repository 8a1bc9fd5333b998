// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod storage;
mod store;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Todo o restante da API exige um token válido.
    let protected_routes = Router::new()
        // --- Usuários ---
        .route("/users", get(handlers::auth::list_users))
        .route("/users/me", get(handlers::auth::get_me))
        .route("/users/me/preferences", put(handlers::auth::update_my_preferences))
        .route("/users/{id}/role", put(handlers::auth::update_user_role))
        // --- Ruas ---
        .route(
            "/streets",
            get(handlers::warehouse::list_streets).post(handlers::warehouse::create_street),
        )
        .route("/streets/reorder", put(handlers::warehouse::reorder_streets))
        .route(
            "/streets/{id}",
            put(handlers::warehouse::update_street).delete(handlers::warehouse::delete_street),
        )
        // --- Locais ---
        .route(
            "/locations",
            get(handlers::warehouse::list_locations).post(handlers::warehouse::create_location),
        )
        .route(
            "/locations/{id}",
            put(handlers::warehouse::update_location)
                .delete(handlers::warehouse::delete_location),
        )
        .route("/locations/{id}/status", get(handlers::warehouse::location_status))
        .route("/locations/{id}/pallets", get(handlers::warehouse::pallets_by_location))
        .route("/locations/{id}/clear", post(handlers::warehouse::clear_location))
        // --- Paletes ---
        .route(
            "/pallets",
            get(handlers::warehouse::list_pallets).post(handlers::warehouse::create_pallet),
        )
        .route(
            "/pallets/{id}",
            put(handlers::warehouse::update_pallet).delete(handlers::warehouse::remove_pallet),
        )
        .route("/pallets/{id}/move", post(handlers::warehouse::move_pallet))
        // --- Materiais ---
        .route(
            "/materials",
            get(handlers::materials::list_materials).post(handlers::materials::create_material),
        )
        .route("/materials/low-stock", get(handlers::materials::low_stock))
        .route(
            "/materials/{id}",
            put(handlers::materials::update_material)
                .delete(handlers::materials::delete_material),
        )
        .route("/materials/{id}/stock", get(handlers::materials::material_stock))
        // --- Histórico ---
        .route("/history", get(handlers::history::list_history))
        // --- Equipamentos ---
        .route(
            "/equipment",
            get(handlers::equipment::list_equipment).post(handlers::equipment::create_equipment),
        )
        .route(
            "/equipment/{id}",
            put(handlers::equipment::update_equipment)
                .delete(handlers::equipment::delete_equipment),
        )
        // --- Proteção balística ---
        .route(
            "/ballistics",
            get(handlers::ballistics::list_ballistics)
                .post(handlers::ballistics::create_ballistic),
        )
        .route(
            "/ballistics/{id}",
            put(handlers::ballistics::update_ballistic)
                .delete(handlers::ballistics::delete_ballistic),
        )
        .route(
            "/ballistics/{id}/history",
            get(handlers::ballistics::ballistic_history)
                .post(handlers::ballistics::push_ballistic_event),
        )
        // --- OMs e guias ---
        .route("/oms", get(handlers::oms::list_oms).post(handlers::oms::create_om))
        .route(
            "/oms/{id}",
            put(handlers::oms::update_om).delete(handlers::oms::delete_om),
        )
        .route("/oms/{id}/guias", get(handlers::oms::guias_by_om))
        .route("/guias", get(handlers::oms::list_guias).post(handlers::oms::create_guia))
        .route(
            "/guias/{id}",
            put(handlers::oms::update_guia).delete(handlers::oms::delete_guia),
        )
        // --- Configurações ---
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        // --- Dashboard ---
        .route("/dashboard", get(handlers::dashboard::summary))
        .route("/dashboard/occupancy", get(handlers::dashboard::occupancy))
        // --- Eventos de sincronização ---
        .route("/events", get(handlers::events::subscribe))
        .route("/events/notify", post(handlers::events::notify))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
