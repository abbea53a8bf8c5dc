// Adapters layer: concrete implementations for external systems (http, storage, preferences).

pub mod http;
pub mod preferences;
pub mod storage;
