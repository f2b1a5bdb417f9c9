pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::errors::AppError;
pub use outbound::store;
