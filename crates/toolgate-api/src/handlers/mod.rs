//! API handler modules

pub mod backends;
pub mod health;
pub mod metrics;
pub mod tools;
