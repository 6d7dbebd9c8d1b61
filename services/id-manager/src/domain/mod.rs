pub mod format;
pub mod hash;
pub mod repository;
pub mod types;
