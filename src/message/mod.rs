#[cfg(any(test, not(feature = "postgres")))]
pub mod memory_repository;
pub mod models;
#[cfg(feature = "postgres")]
pub mod postgres_repository;
pub mod repository;
pub mod service;
pub mod validation;
