//! DocuWare document forwarder library.

pub mod config;
pub mod docuware;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upload;

pub use config::ForwarderConfig;
pub use docuware::{DocuWareClient, DocumentStore};
pub use error::{ForwarderError, UpstreamError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
