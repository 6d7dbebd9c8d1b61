pub mod config;
pub mod identifier;
