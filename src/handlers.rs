pub mod auth;
pub mod ballistics;
pub mod dashboard;
pub mod equipment;
pub mod events;
pub mod history;
pub mod materials;
pub mod oms;
pub mod settings;
pub mod warehouse;
