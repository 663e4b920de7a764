// Adapters layer: concrete implementations of the domain ports (Canvas HTTP, local files).

pub mod http;
pub mod storage;

pub use http::CanvasClient;
pub use storage::LocalStorage;
