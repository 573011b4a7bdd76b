pub mod stores;
pub use stores::{AuthDirectory, CatalogStore, OrderStore, UserStore};
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod auth_repo;
pub use auth_repo::AuthRepository;

#[cfg(test)]
pub mod memory;
