pub mod auth;
pub mod errors;
pub mod list;
pub mod repository;
pub mod user;
