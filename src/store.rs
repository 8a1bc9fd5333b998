pub mod inventory;
pub mod seed;

pub use inventory::InventoryStore;
