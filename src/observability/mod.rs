//! Observability subsystem.
//!
//! Logging only: request spans from the HTTP layer plus `warn` for rejected
//! uploads and `error` for upstream failures.

pub mod logging;

pub use logging::init_logging;
