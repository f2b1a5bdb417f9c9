pub mod models;
pub mod ports;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;

pub use models::Document;
pub use models::Filter;
pub use models::JsonDocument;
pub use models::Projection;
pub use models::ID_FIELD;
pub use ports::DocumentStore;
pub use ports::StoreError;
pub use service::DocumentRepository;
