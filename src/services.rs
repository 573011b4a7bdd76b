pub mod aggregation;
pub mod fanout;
pub mod cache;

pub mod auth;
pub mod dashboard_service;
pub mod comment_service;
pub mod catalog_service;
pub mod user_service;
pub mod account_service;
