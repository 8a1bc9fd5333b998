pub mod auth;
pub mod inventory;

pub use auth::AuthService;
pub use inventory::InventoryService;
