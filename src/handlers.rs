pub mod auth;
pub mod users;
pub mod accounts;
pub mod catalog;
pub mod dashboard;
pub mod comments;
