pub mod auth;
pub mod ballistic;
pub mod dashboard;
pub mod equipment;
pub mod om;
pub mod settings;
pub mod warehouse;
