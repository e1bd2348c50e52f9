// Adapters layer: concrete implementations for external systems.

pub mod http;
pub mod storage;

pub use http::{StripeGateway, DEFAULT_API_BASE};
pub use storage::LocalStorage;
