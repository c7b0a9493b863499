// Adapters layer: concrete implementations of the domain ports.

pub mod http_client;
pub mod storage;
pub mod wire;
