//! HTTP shim: one JSON sample in, the predictor's outcome out.

mod handlers;
mod router;

pub use handlers::{ErrorBody, HealthResponse, SessionCreated};
pub use router::{create_router, start_server};
