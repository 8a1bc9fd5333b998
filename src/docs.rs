// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::storage;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_my_preferences,
        handlers::auth::list_users,
        handlers::auth::update_user_role,

        // --- Almoxarifado ---
        handlers::warehouse::list_streets,
        handlers::warehouse::create_street,
        handlers::warehouse::update_street,
        handlers::warehouse::reorder_streets,
        handlers::warehouse::delete_street,
        handlers::warehouse::list_locations,
        handlers::warehouse::create_location,
        handlers::warehouse::update_location,
        handlers::warehouse::delete_location,
        handlers::warehouse::location_status,
        handlers::warehouse::pallets_by_location,
        handlers::warehouse::clear_location,
        handlers::warehouse::list_pallets,
        handlers::warehouse::create_pallet,
        handlers::warehouse::update_pallet,
        handlers::warehouse::remove_pallet,
        handlers::warehouse::move_pallet,

        // --- Materiais ---
        handlers::materials::list_materials,
        handlers::materials::create_material,
        handlers::materials::update_material,
        handlers::materials::delete_material,
        handlers::materials::material_stock,
        handlers::materials::low_stock,

        // --- Histórico ---
        handlers::history::list_history,

        // --- Equipamentos ---
        handlers::equipment::list_equipment,
        handlers::equipment::create_equipment,
        handlers::equipment::update_equipment,
        handlers::equipment::delete_equipment,

        // --- Proteção balística ---
        handlers::ballistics::list_ballistics,
        handlers::ballistics::create_ballistic,
        handlers::ballistics::update_ballistic,
        handlers::ballistics::delete_ballistic,
        handlers::ballistics::ballistic_history,
        handlers::ballistics::push_ballistic_event,

        // --- OMs e guias ---
        handlers::oms::list_oms,
        handlers::oms::create_om,
        handlers::oms::update_om,
        handlers::oms::delete_om,
        handlers::oms::guias_by_om,
        handlers::oms::list_guias,
        handlers::oms::create_guia,
        handlers::oms::update_guia,
        handlers::oms::delete_guia,

        // --- Configurações ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Dashboard ---
        handlers::dashboard::summary,
        handlers::dashboard::occupancy,

        // --- Eventos ---
        handlers::events::subscribe,
        handlers::events::notify,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::NotificationPreferences,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UpdatePreferencesPayload,
            models::auth::UpdateUserRolePayload,

            // --- Almoxarifado ---
            models::warehouse::Street,
            models::warehouse::Location,
            models::warehouse::LocationStatus,
            models::warehouse::PalletKind,
            models::warehouse::Pallet,
            models::warehouse::Material,
            models::warehouse::MovementKind,
            models::warehouse::MovementLog,
            models::warehouse::CreateStreetPayload,
            models::warehouse::UpdateStreetPayload,
            models::warehouse::ReorderStreetsPayload,
            models::warehouse::CreateLocationPayload,
            models::warehouse::UpdateLocationPayload,
            models::warehouse::CreatePalletPayload,
            models::warehouse::UpdatePalletPayload,
            models::warehouse::MovePalletPayload,
            models::warehouse::CreateMaterialPayload,
            models::warehouse::UpdateMaterialPayload,

            // --- Equipamentos ---
            models::equipment::EquipmentStatus,
            models::equipment::Equipment,
            models::equipment::CreateEquipmentPayload,
            models::equipment::UpdateEquipmentPayload,

            // --- Proteção balística ---
            models::ballistic::BallisticCategory,
            models::ballistic::BallisticStatus,
            models::ballistic::BallisticEvent,
            models::ballistic::BallisticItem,
            models::ballistic::CreateBallisticPayload,
            models::ballistic::UpdateBallisticPayload,
            models::ballistic::BallisticEventPayload,

            // --- OMs e guias ---
            models::om::Om,
            models::om::GuiaStatus,
            models::om::Guia,
            models::om::CreateOmPayload,
            models::om::UpdateOmPayload,
            models::om::CreateGuiaPayload,
            models::om::UpdateGuiaPayload,

            // --- Configurações ---
            models::settings::SystemSettings,
            models::settings::UpdateSettingsPayload,

            // --- Dashboard ---
            models::dashboard::StreetOccupancy,
            models::dashboard::OccupancySummary,
            models::dashboard::LowStockEntry,
            models::dashboard::DashboardSummary,

            // --- Eventos ---
            storage::NotificationVariant,
            handlers::events::NotifyPayload,
        )
    ),
    tags(
        (name = "Autenticação", description = "Registro e Login"),
        (name = "Usuários", description = "Perfil, Preferências e Perfis de Acesso"),
        (name = "Almoxarifado", description = "Ruas, Locais e Paletes"),
        (name = "Materiais", description = "Catálogo de Materiais e Estoque Mínimo"),
        (name = "Histórico", description = "Registro Imutável de Movimentações"),
        (name = "Equipamentos", description = "Equipamentos de Movimentação de Carga"),
        (name = "Proteção Balística", description = "Coletes, Capacetes e Placas"),
        (name = "OMs e Guias", description = "Organizações Militares e Guias de Remessa"),
        (name = "Configurações", description = "Parâmetros Globais do Sistema"),
        (name = "Dashboard", description = "Indicadores Consolidados"),
        (name = "Eventos", description = "Sincronização em Tempo Real (SSE)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
