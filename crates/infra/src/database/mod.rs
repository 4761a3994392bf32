//! SQLite persistence: connection pool and the orders repository

mod manager;
mod orders_repository;

pub use manager::DbManager;
pub use orders_repository::SqliteOrdersRepository;
