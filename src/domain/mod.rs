//! Domain layer - core business logic and entities

pub mod balance;
pub mod exchange;
pub mod swap;
